// In-memory page used by `inspect` and the tests
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::application::document_host::{ConfigSurface, DocumentHost, FrameScheduler};

#[derive(Clone)]
pub struct NavControl {
    pub section: String,
    pub label: String,
    pub active: bool,
    on_click: Rc<dyn Fn()>,
}

impl fmt::Debug for NavControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavControl")
            .field("section", &self.section)
            .field("label", &self.label)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    pub id: String,
    pub title: String,
    pub chart_markup: Option<String>,
    pub active: bool,
}

/// Document with a navigation list, a sections wrapper and the
/// configuration modal, all kept in memory.
#[derive(Debug)]
pub struct MemoryDocument {
    containers: bool,
    nav: RefCell<Vec<NavControl>>,
    sections: RefCell<Vec<ContentNode>>,
    fields: RefCell<BTreeMap<String, String>>,
    texts: RefCell<BTreeMap<String, String>>,
    modal_visible: Cell<bool>,
    activation_passes: Cell<usize>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            containers: true,
            nav: RefCell::new(Vec::new()),
            sections: RefCell::new(Vec::new()),
            fields: RefCell::new(BTreeMap::new()),
            texts: RefCell::new(BTreeMap::new()),
            modal_visible: Cell::new(false),
            activation_passes: Cell::new(0),
        }
    }

    /// A page lacking the navigation list and sections wrapper.
    pub fn without_containers() -> Self {
        Self {
            containers: false,
            ..Self::new()
        }
    }

    pub fn nav_controls(&self) -> Vec<NavControl> {
        self.nav.borrow().clone()
    }

    pub fn content_nodes(&self) -> Vec<ContentNode> {
        self.sections.borrow().clone()
    }

    /// Invoke the click handler of the navigation control at `position`.
    pub fn click_nav(&self, position: usize) -> bool {
        let handler = self
            .nav
            .borrow()
            .get(position)
            .map(|control| Rc::clone(&control.on_click));
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn active_nav_bindings(&self) -> Vec<String> {
        self.nav
            .borrow()
            .iter()
            .filter(|control| control.active)
            .map(|control| control.section.clone())
            .collect()
    }

    pub fn active_section_ids(&self) -> Vec<String> {
        self.sections
            .borrow()
            .iter()
            .filter(|node| node.active)
            .map(|node| node.id.clone())
            .collect()
    }

    pub fn chart_markup(&self, id: &str) -> Option<String> {
        self.sections
            .borrow()
            .iter()
            .find(|node| node.id == id)
            .and_then(|node| node.chart_markup.clone())
    }

    pub fn text(&self, target: &str) -> Option<String> {
        self.texts.borrow().get(target).cloned()
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible.get()
    }

    /// How many times the active markers were synchronized.
    pub fn activation_passes(&self) -> usize {
        self.activation_passes.get()
    }
}

impl DocumentHost for MemoryDocument {
    fn has_containers(&self) -> bool {
        self.containers
    }

    fn append_nav_control(&self, id: &str, label: &str, on_click: Box<dyn Fn()>) {
        self.nav.borrow_mut().push(NavControl {
            section: id.to_string(),
            label: label.to_string(),
            active: false,
            on_click: Rc::from(on_click),
        });
    }

    fn append_section(&self, id: &str, label: &str) {
        self.sections.borrow_mut().push(ContentNode {
            id: id.to_string(),
            title: label.to_string(),
            chart_markup: None,
            active: false,
        });
    }

    fn set_chart_markup(&self, id: &str, markup: &str) {
        if let Some(node) = self.sections.borrow_mut().iter_mut().find(|n| n.id == id) {
            node.chart_markup = Some(markup.to_string());
        }
    }

    fn sync_active(&self, is_active: &dyn Fn(&str) -> bool) -> bool {
        self.activation_passes.set(self.activation_passes.get() + 1);
        for control in self.nav.borrow_mut().iter_mut() {
            control.active = is_active(&control.section);
        }
        let mut matched = false;
        for node in self.sections.borrow_mut().iter_mut() {
            node.active = is_active(&node.id);
            matched |= node.active;
        }
        matched
    }

    fn active_chart(&self) -> Option<String> {
        self.sections
            .borrow()
            .iter()
            .find(|node| node.active)
            .map(|node| node.id.clone())
    }
}

impl ConfigSurface for MemoryDocument {
    fn set_modal_visible(&self, visible: bool) {
        self.modal_visible.set(visible);
    }

    fn field_value(&self, field: &str) -> Option<String> {
        self.fields.borrow().get(field).cloned()
    }

    fn set_field_value(&self, field: &str, value: &str) {
        self.fields
            .borrow_mut()
            .insert(field.to_string(), value.to_string());
    }

    fn set_text(&self, target: &str, text: &str) {
        self.texts
            .borrow_mut()
            .insert(target.to_string(), text.to_string());
    }

    fn set_markup(&self, target: &str, markup: &str) {
        self.set_text(target, markup);
    }
}

/// Queues standing in for animation frames, timers and resize events.
/// Nothing runs until the owner drains a queue.
#[derive(Default)]
pub struct MemoryScheduler {
    frames: RefCell<Vec<Box<dyn FnOnce()>>>,
    deferred: RefCell<Vec<Box<dyn FnOnce()>>>,
    resize_listeners: RefCell<Vec<Rc<dyn Fn()>>>,
}

impl MemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every queued frame task; tasks queued meanwhile wait for the next
    /// call. Returns how many ran.
    pub fn run_frames(&self) -> usize {
        run_queue(&self.frames)
    }

    pub fn run_deferred(&self) -> usize {
        run_queue(&self.deferred)
    }

    pub fn fire_viewport_resize(&self) -> usize {
        let listeners = self.resize_listeners.borrow().clone();
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.borrow().len()
    }
}

fn run_queue(queue: &RefCell<Vec<Box<dyn FnOnce()>>>) -> usize {
    let tasks = mem::take(&mut *queue.borrow_mut());
    let count = tasks.len();
    for task in tasks {
        task();
    }
    count
}

impl FrameScheduler for MemoryScheduler {
    fn next_frame(&self, task: Box<dyn FnOnce()>) {
        self.frames.borrow_mut().push(task);
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.deferred.borrow_mut().push(task);
    }

    fn on_viewport_resize(&self, listener: Box<dyn Fn()>) {
        self.resize_listeners.borrow_mut().push(Rc::from(listener));
    }
}
