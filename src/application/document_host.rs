// Ports to the page the dashboard is assembled into

/// DOM boundary used by the section builder and the visibility sync.
///
/// Nodes are addressed by the section id they are bound to.
pub trait DocumentHost {
    /// Whether the navigation list and the sections wrapper both exist.
    fn has_containers(&self) -> bool;

    /// Append a navigation control bound to `id`.
    fn append_nav_control(&self, id: &str, label: &str, on_click: Box<dyn Fn()>);

    /// Append a content section with a heading and an empty chart container.
    fn append_section(&self, id: &str, label: &str);

    /// Replace the chart container's markup for section `id`.
    fn set_chart_markup(&self, id: &str, markup: &str);

    /// Set the active marker of every navigation control and content section
    /// in a single pass over each listing. `is_active` gets the section id a
    /// node is bound to. Returns whether any content section ended up active.
    fn sync_active(&self, is_active: &dyn Fn(&str) -> bool) -> bool;

    /// Section id whose chart container is currently shown, if any.
    fn active_chart(&self) -> Option<String>;
}

/// Event sources of the UI thread.
pub trait FrameScheduler {
    /// Run `task` on the next animation frame.
    fn next_frame(&self, task: Box<dyn FnOnce()>);

    /// Run `task` on the next macrotask, after the current paint.
    fn defer(&self, task: Box<dyn FnOnce()>);

    /// Call `listener` on every viewport resize.
    fn on_viewport_resize(&self, listener: Box<dyn Fn()>);
}

/// Form fields and text targets of the configuration modal.
pub trait ConfigSurface {
    fn set_modal_visible(&self, visible: bool);

    fn field_value(&self, field: &str) -> Option<String>;

    fn set_field_value(&self, field: &str, value: &str);

    fn set_text(&self, target: &str, text: &str);

    fn set_markup(&self, target: &str, markup: &str);
}
