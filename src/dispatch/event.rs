//! Event values handed to lifecycle handlers.

use super::callbacks::Callbacks;
use super::error::TransitionError;
use crate::core::{Category, DispatchPath, PathName, Phase, State};

/// The value a handler receives for one dispatch path.
///
/// A fresh event is built for every handler invocation. Its control methods
/// delegate to the same [`Callbacks`] as the transition it belongs to.
#[derive(Clone, Debug)]
pub struct Event<S> {
    path: DispatchPath,
    action: String,
    from: S,
    to: S,
    callbacks: Callbacks,
}

impl<S: State> Event<S> {
    pub fn new(path: DispatchPath, action: String, from: S, to: S, callbacks: Callbacks) -> Self {
        Self {
            path,
            action,
            from,
            to,
            callbacks,
        }
    }

    pub fn path(&self) -> &DispatchPath {
        &self.path
    }

    pub fn category(&self) -> Category {
        self.path.category()
    }

    /// `*` for wildcard handlers, otherwise the action or state name.
    pub fn name(&self) -> &PathName {
        self.path.name()
    }

    pub fn phase(&self) -> Phase {
        self.path.phase()
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn from(&self) -> &S {
        &self.from
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn cancel(&self) {
        self.callbacks.cancel()
    }

    pub fn pause(&self) {
        self.callbacks.pause()
    }

    pub fn resume(&self) -> Result<(), TransitionError> {
        self.callbacks.resume()
    }

    pub fn complete(&self) {
        self.callbacks.complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn event_exposes_path_parts() {
        let event = Event::new(
            DispatchPath::named("running", Phase::Enter),
            "start".to_string(),
            "idle".to_string(),
            "running".to_string(),
            Callbacks::noop(),
        );

        assert_eq!(event.category(), Category::State);
        assert_eq!(event.name().as_str(), "running");
        assert_eq!(event.phase(), Phase::Enter);
        assert_eq!(event.action(), "start");
        assert_eq!(event.from(), "idle");
        assert_eq!(event.to(), "running");
    }

    #[test]
    fn control_methods_delegate_to_callbacks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (c1, c2, c3, c4) = (calls.clone(), calls.clone(), calls.clone(), calls.clone());
        let callbacks = Callbacks::new(
            move || {
                c1.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                c2.fetch_add(10, Ordering::SeqCst);
            },
            move || {
                c3.fetch_add(100, Ordering::SeqCst);
                Ok(())
            },
            move || {
                c4.fetch_add(1000, Ordering::SeqCst);
            },
        );
        let event = Event::new(
            DispatchPath::any(Phase::Start),
            "go".to_string(),
            "a".to_string(),
            "b".to_string(),
            callbacks,
        );

        event.cancel();
        event.pause();
        event.resume().unwrap();
        event.complete();

        assert_eq!(calls.load(Ordering::SeqCst), 1111);
    }
}
