//! An in-flight transition and its dispatch loop.

use super::callbacks::Callbacks;
use super::error::TransitionError;
use super::handler::{HandlerOutcome, HandlerResult};
use crate::core::{DispatchPath, State};
use crate::sync::lock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};
use uuid::Uuid;

/// Zero-argument handler invocation, bound at build time.
pub(crate) type Thunk = Box<dyn FnOnce() -> HandlerResult + Send>;

pub(crate) struct Queued {
    pub(crate) path: DispatchPath,
    pub(crate) thunk: Thunk,
}

/// Lifecycle position of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionStatus {
    /// Built, not yet executed
    Idle,
    /// Draining its queue
    Running,
    /// Halted until resumed
    Paused,
    /// Queue drained, `complete` delivered
    Completed,
    /// A handler cancelled, `cancel` delivered
    Cancelled,
    /// Discarded through `clear`
    Cleared,
}

impl TransitionStatus {
    /// Whether no handler of this transition will ever run again.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Cleared)
    }
}

struct Dispatch {
    queue: VecDeque<Queued>,
    paused: bool,
    status: TransitionStatus,
}

struct Shared<S> {
    id: Uuid,
    created_at: DateTime<Utc>,
    action: String,
    from: S,
    to: S,
    callbacks: Callbacks,
    dispatch: Mutex<Dispatch>,
}

enum Step {
    Run(Queued),
    Complete,
    Halt,
}

/// One in-flight request to move a machine from `from` to `to`.
///
/// A `Transition` is a cheap, cloneable handle: the owning machine, the
/// caller and any handler may hold it and all of them drive the same queue.
/// No internal lock is held while a handler or callback runs, so handlers may
/// pause, resume or clear the transition they are part of.
pub struct Transition<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for Transition<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: State> Transition<S> {
    pub(crate) fn new(
        action: String,
        from: S,
        to: S,
        callbacks: Callbacks,
        queue: Vec<Queued>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                action,
                from,
                to,
                callbacks,
                dispatch: Mutex::new(Dispatch {
                    queue: queue.into(),
                    paused: false,
                    status: TransitionStatus::Idle,
                }),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.shared.created_at
    }

    pub fn action(&self) -> &str {
        &self.shared.action
    }

    pub fn from(&self) -> &S {
        &self.shared.from
    }

    pub fn to(&self) -> &S {
        &self.shared.to
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.shared.callbacks
    }

    pub fn is_paused(&self) -> bool {
        lock(&self.shared.dispatch).paused
    }

    pub fn status(&self) -> TransitionStatus {
        let dispatch = lock(&self.shared.dispatch);
        if dispatch.paused && !dispatch.status.is_settled() {
            TransitionStatus::Paused
        } else {
            dispatch.status
        }
    }

    /// Number of handlers still queued.
    pub fn remaining(&self) -> usize {
        lock(&self.shared.dispatch).queue.len()
    }

    /// Whether two handles refer to the same transition.
    pub fn same_as(&self, other: &Transition<S>) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Drain the queue until a handler pauses or cancels, or it runs dry.
    ///
    /// A no-op while paused or once settled. A failing handler aborts the
    /// drain with [`TransitionError::HandlerFault`]; handlers behind it stay
    /// queued.
    pub fn exec(&self) -> Result<&Self, TransitionError> {
        loop {
            let Queued { path, thunk } = match self.next_step() {
                Step::Halt => return Ok(self),
                Step::Complete => {
                    debug!(
                        transition = %self.shared.id,
                        action = %self.shared.action,
                        to = self.shared.to.name(),
                        "Transition complete"
                    );
                    self.shared.callbacks.complete();
                    return Ok(self);
                }
                Step::Run(queued) => queued,
            };

            trace!(transition = %self.shared.id, path = %path, "Dispatching handler");
            let outcome = match thunk() {
                Ok(outcome) => outcome,
                Err(source) => return Err(TransitionError::HandlerFault { path, source }),
            };

            match outcome {
                HandlerOutcome::Continue => continue,
                HandlerOutcome::Pause => {
                    if self.settle_pause() {
                        debug!(transition = %self.shared.id, path = %path, "Transition paused");
                        self.shared.callbacks.pause();
                    }
                    return Ok(self);
                }
                HandlerOutcome::Cancel => {
                    if self.settle_cancel() {
                        debug!(transition = %self.shared.id, path = %path, "Transition cancelled");
                        self.shared.callbacks.cancel();
                    }
                    return Ok(self);
                }
            }
        }
    }

    /// Halt dispatch after the running handler. The queue is kept.
    pub fn pause(&self) -> &Self {
        let mut dispatch = lock(&self.shared.dispatch);
        if !dispatch.status.is_settled() {
            dispatch.paused = true;
        }
        self
    }

    /// Clear the pause flag and continue draining.
    pub fn resume(&self) -> Result<&Self, TransitionError> {
        lock(&self.shared.dispatch).paused = false;
        self.exec()
    }

    /// Drop every queued handler so nothing stale fires later.
    pub fn clear(&self) -> &Self {
        let mut dispatch = lock(&self.shared.dispatch);
        dispatch.paused = false;
        dispatch.queue.clear();
        if !dispatch.status.is_settled() {
            dispatch.status = TransitionStatus::Cleared;
        }
        self
    }

    fn next_step(&self) -> Step {
        let mut dispatch = lock(&self.shared.dispatch);
        if dispatch.paused || dispatch.status.is_settled() {
            return Step::Halt;
        }
        match dispatch.queue.pop_front() {
            Some(queued) => {
                dispatch.status = TransitionStatus::Running;
                Step::Run(queued)
            }
            None => {
                dispatch.status = TransitionStatus::Completed;
                Step::Complete
            }
        }
    }

    /// Returns false when the transition settled while the handler ran.
    fn settle_pause(&self) -> bool {
        let mut dispatch = lock(&self.shared.dispatch);
        if dispatch.status.is_settled() {
            return false;
        }
        dispatch.paused = true;
        true
    }

    fn settle_cancel(&self) -> bool {
        let mut dispatch = lock(&self.shared.dispatch);
        if dispatch.status.is_settled() {
            return false;
        }
        dispatch.queue.clear();
        dispatch.paused = false;
        dispatch.status = TransitionStatus::Cancelled;
        true
    }
}

impl<S: State> fmt::Debug for Transition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.shared.id)
            .field("action", &self.shared.action)
            .field("from", &self.shared.from)
            .field("to", &self.shared.to)
            .field("status", &self.status())
            .field("remaining", &self.remaining())
            .finish()
    }
}
