mod engine;
mod plan;
mod progress;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use engine::{SessionEngine, SessionOutcome, SessionPhase};
pub use plan::{SessionBuilder, SessionPlan};
pub use progress::SessionProgress;
