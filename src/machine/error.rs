//! Errors reported by the bundled state machine.

use crate::dispatch::TransitionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MachineError {
    /// Only one transition may be current at a time.
    #[error("Cannot fire '{action}' while '{pending}' is in progress")]
    TransitionInProgress { action: String, pending: String },

    #[error("No transition in progress")]
    NotTransitioning,

    #[error(transparent)]
    Transition(#[from] TransitionError),
}
