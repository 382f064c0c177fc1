// Application layer - Dashboard assembly over host-provided ports
pub mod chart_renderer;
pub mod config_panel;
pub mod dashboard_service;
pub mod document_host;
pub mod manifest_source;
pub mod resize_sync;
