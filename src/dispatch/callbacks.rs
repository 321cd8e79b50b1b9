//! The four control operations a transition and its events delegate to.

use super::error::TransitionError;
use std::fmt;
use std::sync::Arc;

type Notify = Arc<dyn Fn() + Send + Sync>;
type Resume = Arc<dyn Fn() -> Result<(), TransitionError> + Send + Sync>;

/// Control operations supplied by the owning machine.
///
/// Built once per transition and shared with every event it creates, so
/// calling `pause` through an event, the transition or the machine all reach
/// the same place. Cloning is cheap.
#[derive(Clone)]
pub struct Callbacks {
    cancel: Notify,
    pause: Notify,
    resume: Resume,
    complete: Notify,
}

impl Callbacks {
    pub fn new<Ca, P, R, Co>(cancel: Ca, pause: P, resume: R, complete: Co) -> Self
    where
        Ca: Fn() + Send + Sync + 'static,
        P: Fn() + Send + Sync + 'static,
        R: Fn() -> Result<(), TransitionError> + Send + Sync + 'static,
        Co: Fn() + Send + Sync + 'static,
    {
        Self {
            cancel: Arc::new(cancel),
            pause: Arc::new(pause),
            resume: Arc::new(resume),
            complete: Arc::new(complete),
        }
    }

    /// Callbacks that do nothing.
    pub fn noop() -> Self {
        Self::new(|| {}, || {}, || Ok(()), || {})
    }

    pub fn cancel(&self) {
        (self.cancel)()
    }

    pub fn pause(&self) {
        (self.pause)()
    }

    pub fn resume(&self) -> Result<(), TransitionError> {
        (self.resume)()
    }

    pub fn complete(&self) {
        (self.complete)()
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}
