//! Tabbed chart dashboard assembled at load time from a `plots.json`
//! manifest.
//!
//! The core (`domain` and `application`) only talks to the page through the
//! ports in [`application::document_host`] and
//! [`application::chart_renderer`]. The browser build implements them with
//! `web-sys` and Plotly; the native build provides an in-memory page, a
//! headless renderer and a small preview server.
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(not(target_arch = "wasm32"))]
pub mod presentation;

#[cfg(target_arch = "wasm32")]
pub mod web;
