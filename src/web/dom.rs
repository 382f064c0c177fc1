// Browser document and event-loop hosts
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::application::document_host::{ConfigSurface, DocumentHost, FrameScheduler};
use crate::infrastructure::config::ElementIds;

const ACTIVE_CLASS: &str = "active";

pub struct WebDocument {
    document: Document,
    elements: ElementIds,
}

impl WebDocument {
    pub fn new(document: Document, elements: ElementIds) -> Self {
        Self { document, elements }
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn nav_controls(&self) -> Vec<Element> {
        self.query_all(&format!("#{} .nav-link", self.elements.nav))
    }

    fn content_sections(&self) -> Vec<Element> {
        self.query_all(&format!("#{} > .section", self.elements.sections))
    }

    /// Chart container of section `id`, looked up inside the sections
    /// wrapper only so page elements sharing the id are never hit.
    pub fn chart_container(&self, id: &str) -> Option<Element> {
        let wrapper = self.by_id(&self.elements.sections)?;
        wrapper
            .query_selector(&format!(":scope > .section[id=\"{}\"] .chart-container", id))
            .ok()
            .flatten()
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        element.set_class_name(class);
        Ok(element)
    }

    fn try_append_nav_control(
        &self,
        id: &str,
        label: &str,
        on_click: Box<dyn Fn()>,
    ) -> Result<(), JsValue> {
        let nav = self
            .by_id(&self.elements.nav)
            .ok_or_else(|| JsValue::from_str("navigation container missing"))?;
        let control = self.create("span", "nav-link")?;
        control.set_attribute("data-section", id)?;
        control.set_text_content(Some(label));

        let closure = Closure::<dyn Fn()>::wrap(on_click);
        control.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        nav.append_child(&control)?;
        Ok(())
    }

    fn try_append_section(&self, id: &str, label: &str) -> Result<(), JsValue> {
        let wrapper = self
            .by_id(&self.elements.sections)
            .ok_or_else(|| JsValue::from_str("sections container missing"))?;

        let section = self.create("section", "section")?;
        section.set_id(id);

        let heading = self.create("h2", "section-title")?;
        heading.set_text_content(Some(label));

        let chart_section = self.create("div", "chart-section")?;
        let chart = self.create("div", "chart-container")?;
        chart.set_attribute("style", "width: 100%; min-height: 420px;")?;

        chart_section.append_child(&chart)?;
        section.append_child(&heading)?;
        section.append_child(&chart_section)?;
        wrapper.append_child(&section)?;
        Ok(())
    }
}

fn set_active(element: &Element, active: bool) {
    if let Err(err) = element.class_list().toggle_with_force(ACTIVE_CLASS, active) {
        tracing::debug!(error = ?err, "could not toggle active class");
    }
}

impl DocumentHost for WebDocument {
    fn has_containers(&self) -> bool {
        self.by_id(&self.elements.nav).is_some() && self.by_id(&self.elements.sections).is_some()
    }

    fn append_nav_control(&self, id: &str, label: &str, on_click: Box<dyn Fn()>) {
        if let Err(err) = self.try_append_nav_control(id, label, on_click) {
            tracing::warn!(section = id, error = ?err, "could not add navigation control");
        }
    }

    fn append_section(&self, id: &str, label: &str) {
        if let Err(err) = self.try_append_section(id, label) {
            tracing::warn!(section = id, error = ?err, "could not add section");
        }
    }

    fn set_chart_markup(&self, id: &str, markup: &str) {
        if let Some(container) = self.chart_container(id) {
            container.set_inner_html(markup);
        }
    }

    fn sync_active(&self, is_active: &dyn Fn(&str) -> bool) -> bool {
        for control in self.nav_controls() {
            let bound = control.get_attribute("data-section").unwrap_or_default();
            set_active(&control, is_active(&bound));
        }
        let mut matched = false;
        for section in self.content_sections() {
            let active = is_active(&section.id());
            matched |= active;
            set_active(&section, active);
        }
        matched
    }

    fn active_chart(&self) -> Option<String> {
        let section = self
            .document
            .query_selector(&format!("#{} > .section.{}", self.elements.sections, ACTIVE_CLASS))
            .ok()
            .flatten()?;
        section
            .query_selector(".chart-container")
            .ok()
            .flatten()
            .map(|_| section.id())
    }
}

impl ConfigSurface for WebDocument {
    fn set_modal_visible(&self, visible: bool) {
        let modal = self
            .by_id(&self.elements.modal)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(modal) = modal {
            let display = if visible { "block" } else { "none" };
            let _ = modal.style().set_property("display", display);
        }
    }

    fn field_value(&self, field: &str) -> Option<String> {
        let element = self.by_id(field)?;
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(input.value()),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .ok()
                .map(|area| area.value()),
        }
    }

    fn set_field_value(&self, field: &str, value: &str) {
        let Some(element) = self.by_id(field) else {
            return;
        };
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => input.set_value(value),
            Err(element) => {
                if let Ok(area) = element.dyn_into::<HtmlTextAreaElement>() {
                    area.set_value(value);
                }
            }
        }
    }

    fn set_text(&self, target: &str, text: &str) {
        if let Some(element) = self.by_id(target) {
            element.set_text_content(Some(text));
        }
    }

    fn set_markup(&self, target: &str, markup: &str) {
        if let Some(element) = self.by_id(target) {
            element.set_inner_html(markup);
        }
    }
}

/// `requestAnimationFrame`, `setTimeout(0)` and the window `resize` event.
pub struct WebScheduler;

impl FrameScheduler for WebScheduler {
    fn next_frame(&self, task: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(task);
        if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
            tracing::debug!(error = ?err, "requestAnimationFrame failed");
        }
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(task);
        if let Err(err) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
        {
            tracing::debug!(error = ?err, "setTimeout failed");
        }
    }

    fn on_viewport_resize(&self, listener: Box<dyn Fn()>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn Fn()>::wrap(listener);
        if let Err(err) =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            tracing::debug!(error = ?err, "could not listen for resize");
        }
        closure.forget();
    }
}
