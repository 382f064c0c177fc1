// Resize synchronizer - keeps chart sizes in step with their containers
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::application::chart_renderer::ChartRenderer;
use crate::application::document_host::FrameScheduler;

/// Requests re-measurement from the charting library. Every call is guarded
/// and fire-and-forget; repeated requests are harmless so none are dropped.
pub struct ResizeSynchronizer {
    renderer: Rc<dyn ChartRenderer>,
    scheduler: Rc<dyn FrameScheduler>,
    attached: RefCell<HashSet<String>>,
}

impl ResizeSynchronizer {
    pub fn new(renderer: Rc<dyn ChartRenderer>, scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            renderer,
            scheduler,
            attached: RefCell::new(HashSet::new()),
        }
    }

    /// Re-measure now and once more on the next animation frame, since the
    /// container width may not be final until the browser settles layout.
    pub fn remeasure(&self, target: &str) {
        if !self.renderer.is_available() {
            tracing::debug!(section = target, "charting library unavailable, skipping re-measure");
            return;
        }
        resize_guarded(self.renderer.as_ref(), target);

        let renderer = Rc::clone(&self.renderer);
        let target = target.to_string();
        self.scheduler
            .next_frame(Box::new(move || resize_guarded(renderer.as_ref(), &target)));
    }

    /// Single re-measure on the next macrotask.
    pub fn remeasure_after_paint(&self, target: &str) {
        let renderer = Rc::clone(&self.renderer);
        let target = target.to_string();
        self.scheduler.defer(Box::new(move || {
            if renderer.is_available() {
                resize_guarded(renderer.as_ref(), &target);
            }
        }));
    }

    /// Re-measure `target` on every viewport resize. Returns `false` if a
    /// listener for it was already attached.
    pub fn attach(&self, target: &str) -> bool {
        if !self.attached.borrow_mut().insert(target.to_string()) {
            return false;
        }
        let renderer = Rc::clone(&self.renderer);
        let target = target.to_string();
        self.scheduler
            .on_viewport_resize(Box::new(move || resize_guarded(renderer.as_ref(), &target)));
        true
    }

    pub fn is_attached(&self, target: &str) -> bool {
        self.attached.borrow().contains(target)
    }
}

fn resize_guarded(renderer: &dyn ChartRenderer, target: &str) {
    if let Err(err) = renderer.resize(target) {
        tracing::debug!(section = target, error = %err, "chart re-measure failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::headless_renderer::HeadlessRenderer;
    use crate::infrastructure::memory_document::MemoryScheduler;

    fn synchronizer(renderer: &Rc<HeadlessRenderer>) -> (ResizeSynchronizer, Rc<MemoryScheduler>) {
        let scheduler = Rc::new(MemoryScheduler::new());
        let sync = ResizeSynchronizer::new(renderer.clone(), scheduler.clone());
        (sync, scheduler)
    }

    #[test]
    fn test_remeasure_is_double_tick() {
        let renderer = Rc::new(HeadlessRenderer::new());
        let (sync, scheduler) = synchronizer(&renderer);

        sync.remeasure("empleo");
        assert_eq!(renderer.resize_count("empleo"), 1);
        assert_eq!(scheduler.run_frames(), 1);
        assert_eq!(renderer.resize_count("empleo"), 2);
    }

    #[test]
    fn test_remeasure_skipped_without_library() {
        let renderer = Rc::new(HeadlessRenderer::unavailable());
        let (sync, scheduler) = synchronizer(&renderer);

        sync.remeasure("empleo");
        assert_eq!(scheduler.run_frames(), 0);
        assert_eq!(renderer.resize_count("empleo"), 0);
    }

    #[test]
    fn test_attach_is_idempotent_per_chart() {
        let renderer = Rc::new(HeadlessRenderer::new());
        let (sync, scheduler) = synchronizer(&renderer);

        assert!(sync.attach("a"));
        assert!(!sync.attach("a"));
        assert!(sync.attach("b"));
        assert!(sync.is_attached("a"));
        assert_eq!(scheduler.resize_listener_count(), 2);

        scheduler.fire_viewport_resize();
        scheduler.fire_viewport_resize();
        assert_eq!(renderer.resize_count("a"), 2);
        assert_eq!(renderer.resize_count("b"), 2);
    }

    #[test]
    fn test_resize_failures_are_swallowed() {
        let renderer = Rc::new(HeadlessRenderer::failing_resize());
        let (sync, scheduler) = synchronizer(&renderer);

        sync.attach("a");
        sync.remeasure("a");
        scheduler.run_frames();
        scheduler.fire_viewport_resize();
        assert_eq!(renderer.resize_count("a"), 3);
    }

    #[test]
    fn test_after_paint_runs_on_deferred_queue() {
        let renderer = Rc::new(HeadlessRenderer::new());
        let (sync, scheduler) = synchronizer(&renderer);

        sync.remeasure_after_paint("a");
        assert_eq!(renderer.resize_count("a"), 0);
        assert_eq!(scheduler.run_deferred(), 1);
        assert_eq!(renderer.resize_count("a"), 1);
    }
}
