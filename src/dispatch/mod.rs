//! Dispatch of lifecycle handlers.
//!
//! A [`Transition`] owns an ordered queue of bound handler invocations and
//! drains it one handler at a time. Each handler gets a fresh [`Event`] and
//! decides whether the transition continues, pauses or is cancelled.
//!
//! # Key Concepts
//!
//! - **Handlers**: closures registered in a [`HandlerRegistry`] under a dispatch path
//! - **Callbacks**: the owning machine's `cancel`, `pause`, `resume` and `complete`
//! - **Transition**: the queue plus its pause flag and terminal status

mod callbacks;
mod error;
mod event;
mod handler;
mod registry;
mod transition;

pub use callbacks::Callbacks;
pub use error::{BoxError, TransitionError};
pub use event::Event;
pub use handler::{handler, Handler, HandlerOutcome, HandlerResult, IntoHandlerResult};
pub use registry::{HandlerLookup, HandlerRegistry};
pub use transition::{Transition, TransitionStatus};

pub(crate) use transition::Queued;
