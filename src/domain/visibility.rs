// Visibility state machine - exactly one active section at a time
/// Tracks which section id is currently shown.
///
/// There is a single transition, [`VisibilityController::activate`]; a new
/// id implicitly replaces the previous one and there is no way back to the
/// initial "nothing activated yet" state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VisibilityController {
    active: Option<String>,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, id: &str) {
        self.active = Some(id.to_string());
    }

    /// Last requested id, whether or not any node carries it.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether a node bound to `candidate` should be marked active.
    pub fn is_active(&self, candidate: &str) -> bool {
        self.active.as_deref() == Some(candidate)
    }
}
