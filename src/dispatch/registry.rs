//! Handler registry keyed by dispatch path.

use super::event::Event;
use super::handler::{handler, Handler, IntoHandlerResult};
use crate::core::DispatchPath;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Read access to registered handlers, as the transition builder needs it.
pub trait HandlerLookup<S, C> {
    /// Handlers for `path` in registration order; empty when none exist.
    fn lookup(&self, path: &DispatchPath) -> &[Handler<S, C>];
}

/// Handlers grouped by dispatch path, in registration order.
pub struct HandlerRegistry<S, C> {
    handlers: HashMap<DispatchPath, Vec<Handler<S, C>>>,
}

impl<S, C> HandlerRegistry<S, C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a closure under `path`.
    pub fn on<F, R>(&mut self, path: DispatchPath, f: F) -> &mut Self
    where
        S: 'static,
        C: 'static,
        F: Fn(&Event<S>, &C, &[Value]) -> R + Send + Sync + 'static,
        R: IntoHandlerResult,
    {
        self.register(path, handler(f))
    }

    /// Register an already wrapped handler under `path`.
    pub fn register(&mut self, path: DispatchPath, handler: Handler<S, C>) -> &mut Self {
        self.handlers.entry(path).or_default().push(handler);
        self
    }

    /// Remove every handler under `path`, returning how many were removed.
    pub fn off(&mut self, path: &DispatchPath) -> usize {
        self.handlers.remove(path).map_or(0, |removed| removed.len())
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn paths(&self) -> impl Iterator<Item = &DispatchPath> {
        self.handlers.keys()
    }
}

impl<S, C> HandlerLookup<S, C> for HandlerRegistry<S, C> {
    fn lookup(&self, path: &DispatchPath) -> &[Handler<S, C>] {
        self.handlers.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<S, C> Clone for HandlerRegistry<S, C> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<S, C> Default for HandlerRegistry<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> fmt::Debug for HandlerRegistry<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<String, usize> = self
            .handlers
            .iter()
            .map(|(path, handlers)| (path.to_string(), handlers.len()))
            .collect();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;
    use crate::dispatch::Callbacks;

    fn event(path: DispatchPath) -> Event<String> {
        Event::new(
            path,
            "go".to_string(),
            "a".to_string(),
            "b".to_string(),
            Callbacks::noop(),
        )
    }

    #[test]
    fn lookup_of_unknown_path_is_empty() {
        let registry: HandlerRegistry<String, ()> = HandlerRegistry::new();
        assert!(registry.lookup(&DispatchPath::any(Phase::Start)).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn handlers_keep_registration_order() {
        let mut registry: HandlerRegistry<String, ()> = HandlerRegistry::new();
        let path = DispatchPath::any(Phase::Start);
        registry
            .on(path.clone(), |_: &Event<String>, _: &(), _: &[Value]| true)
            .on(path.clone(), |_: &Event<String>, _: &(), _: &[Value]| false);

        let found = registry.lookup(&path);
        assert_eq!(found.len(), 2);

        let e = event(path.clone());
        assert_eq!(
            found[0](&e, &(), &[]).unwrap(),
            crate::dispatch::HandlerOutcome::Pause
        );
        assert_eq!(
            found[1](&e, &(), &[]).unwrap(),
            crate::dispatch::HandlerOutcome::Cancel
        );
    }

    #[test]
    fn paths_lists_each_registered_key_once() {
        let mut registry: HandlerRegistry<String, ()> = HandlerRegistry::new();
        let start = DispatchPath::any(Phase::Start);
        let enter = DispatchPath::named("b", Phase::Enter);
        registry
            .on(start.clone(), |_: &Event<String>, _: &(), _: &[Value]| {})
            .on(start.clone(), |_: &Event<String>, _: &(), _: &[Value]| {})
            .on(enter.clone(), |_: &Event<String>, _: &(), _: &[Value]| {});

        let mut paths: Vec<String> = registry.paths().map(ToString::to_string).collect();
        paths.sort();

        assert_eq!(paths, vec!["action.*.start", "state.b.enter"]);
    }

    #[test]
    fn clone_is_independent_of_later_registrations() {
        let mut registry: HandlerRegistry<String, ()> = HandlerRegistry::new();
        let start = DispatchPath::any(Phase::Start);
        registry.on(start.clone(), |_: &Event<String>, _: &(), _: &[Value]| {});

        let copy = registry.clone();
        registry.on(start.clone(), |_: &Event<String>, _: &(), _: &[Value]| {});

        assert_eq!(copy.lookup(&start).len(), 1);
        assert_eq!(registry.lookup(&start).len(), 2);
    }

    #[test]
    fn off_removes_only_that_path() {
        let mut registry: HandlerRegistry<String, ()> = HandlerRegistry::new();
        let leave = DispatchPath::named("a", Phase::Leave);
        let enter = DispatchPath::named("b", Phase::Enter);
        registry
            .on(leave.clone(), |_: &Event<String>, _: &(), _: &[Value]| {})
            .on(leave.clone(), |_: &Event<String>, _: &(), _: &[Value]| {})
            .on(enter.clone(), |_: &Event<String>, _: &(), _: &[Value]| {});

        assert_eq!(registry.off(&leave), 2);
        assert_eq!(registry.off(&leave), 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(&enter).len(), 1);
    }
}
