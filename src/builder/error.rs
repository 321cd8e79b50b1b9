//! Build errors for the state machine builder.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Execution target not specified. Call .target(value) before .build()")]
    MissingTarget,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,
}
