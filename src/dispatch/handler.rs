//! Lifecycle handler types.

use super::error::BoxError;
use super::event::Event;
use serde_json::Value;
use std::sync::Arc;

/// What a handler asks the transition to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Run the next queued handler
    Continue,
    /// Stop draining and keep the remaining queue until resumed
    Pause,
    /// Abandon the transition; no further handler runs
    Cancel,
}

/// Result of a single handler invocation.
pub type HandlerResult = Result<HandlerOutcome, BoxError>;

/// A registered lifecycle handler.
///
/// Handlers receive the event for their dispatch path, the machine's
/// execution target and the parameters the action was fired with.
pub type Handler<S, C> = Arc<dyn Fn(&Event<S>, &C, &[Value]) -> HandlerResult + Send + Sync>;

/// Conversion from a handler's return value into a [`HandlerResult`].
///
/// `()` and `None` continue, `true` pauses, `false` cancels. The `Result`
/// forms let a handler fail with any error.
pub trait IntoHandlerResult {
    fn into_handler_result(self) -> HandlerResult;
}

impl IntoHandlerResult for HandlerOutcome {
    fn into_handler_result(self) -> HandlerResult {
        Ok(self)
    }
}

impl IntoHandlerResult for () {
    fn into_handler_result(self) -> HandlerResult {
        Ok(HandlerOutcome::Continue)
    }
}

impl IntoHandlerResult for bool {
    fn into_handler_result(self) -> HandlerResult {
        Ok(if self {
            HandlerOutcome::Pause
        } else {
            HandlerOutcome::Cancel
        })
    }
}

impl IntoHandlerResult for Option<bool> {
    fn into_handler_result(self) -> HandlerResult {
        match self {
            Some(flag) => flag.into_handler_result(),
            None => Ok(HandlerOutcome::Continue),
        }
    }
}

impl<E: Into<BoxError>> IntoHandlerResult for Result<(), E> {
    fn into_handler_result(self) -> HandlerResult {
        self.map(|_| HandlerOutcome::Continue).map_err(Into::into)
    }
}

impl<E: Into<BoxError>> IntoHandlerResult for Result<bool, E> {
    fn into_handler_result(self) -> HandlerResult {
        self.map_err(Into::into)?.into_handler_result()
    }
}

impl<E: Into<BoxError>> IntoHandlerResult for Result<HandlerOutcome, E> {
    fn into_handler_result(self) -> HandlerResult {
        self.map_err(Into::into)
    }
}

/// Wrap a closure into a [`Handler`].
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::dispatch::{handler, Event, Handler};
/// use serde_json::Value;
///
/// let log_enter: Handler<String, ()> = handler(|event: &Event<String>, _: &(), _: &[Value]| {
///     println!("entering {}", event.to());
/// });
/// let veto: Handler<String, ()> = handler(|_: &Event<String>, _: &(), params: &[Value]| {
///     !params.is_empty() // cancel when fired without parameters
/// });
/// ```
pub fn handler<S, C, F, R>(f: F) -> Handler<S, C>
where
    S: 'static,
    C: 'static,
    F: Fn(&Event<S>, &C, &[Value]) -> R + Send + Sync + 'static,
    R: IntoHandlerResult,
{
    Arc::new(move |event: &Event<S>, target: &C, params: &[Value]| {
        f(event, target, params).into_handler_result()
    })
}
