// Infrastructure layer - Adapters for hosts, sources and configuration
pub mod config;
pub mod headless_renderer;
pub mod memory_document;

#[cfg(not(target_arch = "wasm32"))]
pub mod file_manifest;
#[cfg(not(target_arch = "wasm32"))]
pub mod http_manifest;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
