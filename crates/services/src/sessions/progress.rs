use recall_core::model::SessionState;

/// Aggregated view of session progress, useful for the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub attempts: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        let total = state.cards().len();
        let remaining = state.remaining_indices().len();
        Self {
            total,
            answered: total.saturating_sub(remaining),
            remaining,
            attempts: state.studied_count(),
            is_complete: state.is_finished(),
        }
    }
}
