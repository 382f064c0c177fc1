// Charting library port
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::layout::Figure;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("charting library is not loaded")]
    Unavailable,
    #[error("no chart container for section `{0}`")]
    MissingContainer(String),
    #[error("rendering `{target}` failed: {reason}")]
    Render { target: String, reason: String },
    #[error("re-measuring `{target}` failed: {reason}")]
    Resize { target: String, reason: String },
}

/// Narrow adapter over the charting library. Callers treat every error as
/// loggable and carry on.
#[async_trait(?Send)]
pub trait ChartRenderer {
    fn is_available(&self) -> bool;

    /// Draw `figure` into the chart container of section `target`. Resolves
    /// once the library reports the initial render as complete.
    async fn render(&self, target: &str, figure: &Figure) -> Result<(), ChartError>;

    /// Ask the library to re-measure the container of section `target`.
    fn resize(&self, target: &str) -> Result<(), ChartError>;
}
