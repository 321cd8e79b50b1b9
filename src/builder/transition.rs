//! Builder that turns an action request into a ready-to-run transition.

use super::{Destination, Machine};
use crate::core::{Order, State};
use crate::dispatch::{Event, HandlerLookup, Queued, Transition, TransitionError};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Builds [`Transition`]s from a machine, a handler registry and an action.
///
/// Owns the ordering template; changing it affects only transitions built
/// afterwards.
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    order: Order,
}

impl TransitionBuilder {
    /// Create a builder with the default order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a custom order.
    pub fn with_order(order: Order) -> Self {
        let mut builder = Self::new();
        builder.set_order(Some(order));
        builder
    }

    /// Replace the ordering template. `None` or an empty order restores the default.
    pub fn set_order(&mut self, order: Option<Order>) -> &mut Self {
        self.order = order.filter(|o| !o.is_empty()).unwrap_or_default();
        self
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Build the transition for `action` from the machine's current state.
    ///
    /// No handler runs here. Fails with [`TransitionError::InvalidAction`]
    /// when the action has no entry from the current state, and with
    /// [`TransitionError::InvalidTargetState`] when a dynamic destination
    /// names a state no action leads to.
    pub fn build<M, R>(
        &self,
        machine: &M,
        registry: &R,
        action: &str,
        params: Vec<Value>,
    ) -> Result<Transition<M::State>, TransitionError>
    where
        M: Machine,
        R: HandlerLookup<M::State, M::Target> + ?Sized,
    {
        let from = machine.state();
        let target = machine.target();

        let (action, to) = match machine.resolve(action, &from) {
            Some(Destination::State(to)) => (action.to_string(), to),
            Some(Destination::Dynamic(resolver)) => {
                let to = resolver(&*target, &params[..]);
                let resolved = machine.action_for(&from, &to).ok_or_else(|| {
                    TransitionError::InvalidTargetState {
                        action: action.to_string(),
                        from: from.name().to_string(),
                        to: to.name().to_string(),
                    }
                })?;
                (resolved, to)
            }
            None => {
                return Err(TransitionError::InvalidAction {
                    action: action.to_string(),
                    from: from.name().to_string(),
                })
            }
        };

        let callbacks = machine.callbacks();
        let params: Arc<[Value]> = params.into();
        let mut queue = Vec::new();

        for path in self.order.expand(&action, from.name(), to.name()) {
            for handler in registry.lookup(&path) {
                let handler = Arc::clone(handler);
                let target = Arc::clone(&target);
                let params = Arc::clone(&params);
                let (event_path, action, from, to, callbacks) = (
                    path.clone(),
                    action.clone(),
                    from.clone(),
                    to.clone(),
                    callbacks.clone(),
                );
                queue.push(Queued {
                    path: path.clone(),
                    thunk: Box::new(move || {
                        let event = Event::new(event_path, action, from, to, callbacks);
                        handler(&event, &*target, &params[..])
                    }),
                });
            }
        }

        debug!(
            action = %action,
            from = from.name(),
            to = to.name(),
            handlers = queue.len(),
            "Transition built"
        );

        Ok(Transition::new(action, from, to, callbacks, queue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DispatchPath, Phase};
    use crate::dispatch::{Callbacks, HandlerRegistry};
    use std::sync::Mutex;

    struct FixedMachine {
        state: String,
        routes: Vec<(&'static str, &'static str, &'static str)>,
        dynamic: Option<(&'static str, &'static str)>,
    }

    impl Machine for FixedMachine {
        type State = String;
        type Target = ();

        fn state(&self) -> String {
            self.state.clone()
        }

        fn resolve(&self, action: &str, from: &String) -> Option<Destination<String, ()>> {
            if let Some((dyn_action, dyn_to)) = self.dynamic {
                if dyn_action == action {
                    return Some(Destination::dynamic(move |_: &(), _: &[Value]| {
                        dyn_to.to_string()
                    }));
                }
            }
            self.routes
                .iter()
                .find(|(a, f, _)| *a == action && *f == from.as_str())
                .map(|(_, _, to)| Destination::State(to.to_string()))
        }

        fn action_for(&self, from: &String, to: &String) -> Option<String> {
            self.routes
                .iter()
                .find(|(_, f, t)| *f == from.as_str() && *t == to.as_str())
                .map(|(a, _, _)| a.to_string())
        }

        fn target(&self) -> Arc<()> {
            Arc::new(())
        }

        fn callbacks(&self) -> Callbacks {
            Callbacks::noop()
        }
    }

    fn machine() -> FixedMachine {
        FixedMachine {
            state: "idle".to_string(),
            routes: vec![("start", "idle", "running"), ("stop", "running", "idle")],
            dynamic: None,
        }
    }

    fn recording(
        registry: &mut HandlerRegistry<String, ()>,
        log: &Arc<Mutex<Vec<String>>>,
        path: DispatchPath,
        label: &str,
    ) {
        let log = log.clone();
        let label = label.to_string();
        registry.on(path, move |_: &Event<String>, _: &(), _: &[Value]| {
            log.lock().unwrap().push(label.clone());
        });
    }

    #[test]
    fn set_order_none_restores_default() {
        let mut builder = TransitionBuilder::with_order(Order::parse(["*.end"]).unwrap());
        assert_eq!(builder.order().len(), 1);

        builder.set_order(None);
        assert_eq!(builder.order(), &Order::default());

        builder.set_order(Some(Order::new(Vec::new())));
        assert_eq!(builder.order(), &Order::default());
    }

    #[test]
    fn build_does_not_run_handlers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HandlerRegistry::new();
        recording(&mut registry, &log, DispatchPath::any(Phase::Start), "any");

        let transition = TransitionBuilder::new()
            .build(&machine(), &registry, "start", Vec::new())
            .unwrap();

        assert!(log.lock().unwrap().is_empty());
        assert_eq!(transition.remaining(), 1);
        assert_eq!(transition.action(), "start");
        assert_eq!(transition.from(), "idle");
        assert_eq!(transition.to(), "running");
    }

    #[test]
    fn unknown_action_is_rejected() {
        let registry: HandlerRegistry<String, ()> = HandlerRegistry::new();
        let result = TransitionBuilder::new().build(&machine(), &registry, "stop", Vec::new());

        assert!(matches!(
            result,
            Err(TransitionError::InvalidAction { ref action, ref from })
                if action == "stop" && from == "idle"
        ));
    }

    #[test]
    fn custom_order_controls_sequence() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HandlerRegistry::new();
        recording(&mut registry, &log, DispatchPath::any(Phase::Start), "any.start");
        recording(&mut registry, &log, DispatchPath::any(Phase::End), "any.end");
        recording(
            &mut registry,
            &log,
            DispatchPath::named("running", Phase::Enter),
            "running.enter",
        );

        let order = Order::parse(["*.end", "to.enter", "*.start"]).unwrap();
        TransitionBuilder::with_order(order)
            .build(&machine(), &registry, "start", Vec::new())
            .unwrap()
            .exec()
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["any.end", "running.enter", "any.start"]
        );
    }

    #[test]
    fn dynamic_destination_rederives_action() {
        let mut m = machine();
        m.dynamic = Some(("go", "running"));
        let registry: HandlerRegistry<String, ()> = HandlerRegistry::new();

        let transition = TransitionBuilder::new()
            .build(&m, &registry, "go", Vec::new())
            .unwrap();

        assert_eq!(transition.action(), "start");
        assert_eq!(transition.to(), "running");
    }

    #[test]
    fn dynamic_destination_to_unreachable_state_fails() {
        let mut m = machine();
        m.dynamic = Some(("go", "crashed"));
        let registry: HandlerRegistry<String, ()> = HandlerRegistry::new();

        let result = TransitionBuilder::new().build(&m, &registry, "go", Vec::new());

        assert!(matches!(
            result,
            Err(TransitionError::InvalidTargetState { ref to, .. }) if to == "crashed"
        ));
    }
}
