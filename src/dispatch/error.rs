//! Errors raised while building or running a transition.

use crate::core::DispatchPath;
use thiserror::Error;

/// Boxed error returned by a failing handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building or dispatching a transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The action table has no entry for this action from the current state.
    #[error("Action '{action}' is not available from state '{from}'")]
    InvalidAction { action: String, from: String },

    /// A dynamic destination named a state no action leads to from `from`.
    #[error("Target state '{to}' resolved for action '{action}' is not reachable from '{from}'")]
    InvalidTargetState {
        action: String,
        from: String,
        to: String,
    },

    /// A handler failed. The transition's queue is left partially drained.
    #[error("Handler at '{path}' failed: {source}")]
    HandlerFault {
        path: DispatchPath,
        #[source]
        source: BoxError,
    },
}
