// Headless chart renderer - records figures instead of drawing them
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::application::chart_renderer::{ChartError, ChartRenderer};
use crate::domain::layout::Figure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Available,
    Unavailable,
    FailingResize,
}

/// Keeps every rendered figure and counts re-measure requests per section.
#[derive(Debug)]
pub struct HeadlessRenderer {
    mode: Mode,
    figures: RefCell<Vec<(String, Figure)>>,
    resizes: RefCell<HashMap<String, usize>>,
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::with_mode(Mode::Available)
    }

    /// Behaves like a page where the charting library failed to load.
    pub fn unavailable() -> Self {
        Self::with_mode(Mode::Unavailable)
    }

    /// Renders fine but every re-measure errors.
    pub fn failing_resize() -> Self {
        Self::with_mode(Mode::FailingResize)
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            figures: RefCell::new(Vec::new()),
            resizes: RefCell::new(HashMap::new()),
        }
    }

    /// Rendered figures in render order.
    pub fn figures(&self) -> Vec<(String, Figure)> {
        self.figures.borrow().clone()
    }

    pub fn figure(&self, target: &str) -> Option<Figure> {
        self.figures
            .borrow()
            .iter()
            .find(|(id, _)| id == target)
            .map(|(_, figure)| figure.clone())
    }

    /// Re-measure attempts for `target`, including failed ones.
    pub fn resize_count(&self, target: &str) -> usize {
        self.resizes.borrow().get(target).copied().unwrap_or(0)
    }

    pub fn total_resizes(&self) -> usize {
        self.resizes.borrow().values().sum()
    }
}

#[async_trait(?Send)]
impl ChartRenderer for HeadlessRenderer {
    fn is_available(&self) -> bool {
        self.mode != Mode::Unavailable
    }

    async fn render(&self, target: &str, figure: &Figure) -> Result<(), ChartError> {
        if self.mode == Mode::Unavailable {
            return Err(ChartError::Unavailable);
        }
        self.figures
            .borrow_mut()
            .push((target.to_string(), figure.clone()));
        Ok(())
    }

    fn resize(&self, target: &str) -> Result<(), ChartError> {
        *self.resizes.borrow_mut().entry(target.to_string()).or_insert(0) += 1;
        match self.mode {
            Mode::Available => Ok(()),
            Mode::Unavailable => Err(ChartError::Unavailable),
            Mode::FailingResize => Err(ChartError::Resize {
                target: target.to_string(),
                reason: "container detached".to_string(),
            }),
        }
    }
}
