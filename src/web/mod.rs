// Browser entry points exported through wasm-bindgen
mod console;
mod dom;
mod fetch;
mod plotly;

use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event};

use crate::application::config_panel::ConfigPanel;
use crate::application::dashboard_service::DashboardService;
use crate::application::manifest_source::ManifestSource;
use crate::infrastructure::config::DashboardConfig;

pub use dom::{WebDocument, WebScheduler};
pub use fetch::FetchManifestSource;
pub use plotly::PlotlyRenderer;

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn with_panel(action: impl FnOnce(&ConfigPanel<'_, WebDocument>)) {
    let Some(document) = document() else {
        return;
    };
    let config = DashboardConfig::default();
    let surface = WebDocument::new(document, config.elements.clone());
    action(&ConfigPanel::new(&surface, &config.elements));
}

#[wasm_bindgen(start)]
pub fn start() {
    console::init_logging();

    let Some(document) = document() else {
        tracing::error!("no document, dashboard not started");
        return;
    };
    wire_modal_dismissal(&document);

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || spawn_local(bootstrap()));
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    } else {
        spawn_local(bootstrap());
    }
}

async fn bootstrap() {
    let Some(document) = document() else {
        return;
    };
    let config = DashboardConfig::default();
    let host = Rc::new(WebDocument::new(document, config.elements.clone()));
    let renderer = Rc::new(PlotlyRenderer::new(Rc::clone(&host)));
    let service = DashboardService::new(host, renderer, Rc::new(WebScheduler));

    let manifest = FetchManifestSource::new(config.manifest).load().await;
    service.build(manifest).await;
    service.settle_after_paint();
}

/// Close the modal from its close button or a click on the backdrop.
fn wire_modal_dismissal(document: &Document) {
    let elements = DashboardConfig::default().elements;
    let Some(modal) = document.get_element_by_id(&elements.modal) else {
        return;
    };

    if let Ok(Some(close)) = modal.query_selector(".close") {
        let on_close = Closure::<dyn Fn()>::new(|| with_panel(|panel| panel.close()));
        let _ = close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref());
        on_close.forget();
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let backdrop: JsValue = modal.into();
    let on_backdrop = Closure::<dyn Fn(Event)>::new(move |event: Event| {
        let hit_backdrop = event
            .target()
            .is_some_and(|target| JsValue::from(target) == backdrop);
        if hit_backdrop {
            with_panel(|panel| panel.close());
        }
    });
    let _ = window.add_event_listener_with_callback("click", on_backdrop.as_ref().unchecked_ref());
    on_backdrop.forget();
}

#[wasm_bindgen(js_name = openModal)]
pub fn open_modal() {
    with_panel(|panel| panel.open());
}

#[wasm_bindgen(js_name = applyConfiguration)]
pub fn apply_configuration() {
    with_panel(|panel| panel.apply());
}

#[wasm_bindgen(js_name = loadExampleData)]
pub fn load_example_data() {
    with_panel(|panel| panel.load_example());
}
