//! A state machine that owns its transitions.
//!
//! [`StateMachine`] is the reference owner for the transition engine: it keeps
//! the current state and action table, holds at most one current
//! [`Transition`], and supplies the callbacks that commit or abandon it.
//! Cancelling leaves the machine in `from`; completing commits `to`.

mod error;
mod table;

pub use error::MachineError;
pub use table::ActionTable;

use crate::builder::{Destination, Machine, StateMachineBuilder, TransitionBuilder};
use crate::core::{DispatchPath, Order, State};
use crate::dispatch::{
    Callbacks, Event, Handler, HandlerRegistry, IntoHandlerResult, Transition,
};
use crate::snapshot::{MachineSnapshot, PendingTransition};
use crate::sync::{lock, read, write};
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, warn};

struct Status<S> {
    state: S,
    current: Option<Transition<S>>,
}

struct Shared<S, C> {
    status: Mutex<Status<S>>,
    table: ActionTable<S, C>,
    target: Arc<C>,
    registry: RwLock<HandlerRegistry<S, C>>,
    builder: RwLock<TransitionBuilder>,
}

impl<S: State, C> Shared<S, C> {
    fn current(&self) -> Option<Transition<S>> {
        lock(&self.status).current.clone()
    }

    /// Commit the current transition's target state.
    fn commit(&self) {
        let finished = {
            let mut status = lock(&self.status);
            let Some(transition) = status.current.take() else {
                return;
            };
            status.state = transition.to().clone();
            transition
        };
        finished.clear();
        debug!(
            action = finished.action(),
            state = finished.to().name(),
            "State committed"
        );
    }

    /// Drop the current transition, staying in its source state.
    fn discard(&self) -> Option<Transition<S>> {
        let abandoned = lock(&self.status).current.take()?;
        abandoned.clear();
        debug!(
            action = abandoned.action(),
            state = abandoned.from().name(),
            "Transition abandoned"
        );
        Some(abandoned)
    }
}

/// State machine driving lifecycle handlers through the transition engine.
///
/// Cloning yields another handle to the same machine, which is how handlers
/// and timers reach it to resume a paused transition.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::{DispatchPath, Phase};
/// use lifecycle_fsm::dispatch::Event;
/// use lifecycle_fsm::machine::StateMachine;
/// use serde_json::Value;
///
/// let machine = StateMachine::<String, ()>::builder()
///     .initial("closed".to_string())
///     .target(())
///     .transition("open", "closed".to_string(), "opened".to_string())
///     .build()
///     .unwrap();
///
/// machine.on(
///     DispatchPath::named("opened", Phase::Enter),
///     |event: &Event<String>, _: &(), _: &[Value]| {
///         assert_eq!(event.from(), "closed");
///     },
/// );
///
/// machine.fire("open", Vec::new()).unwrap();
/// assert_eq!(machine.state(), "opened");
/// ```
pub struct StateMachine<S: State, C: Send + Sync + 'static> {
    shared: Arc<Shared<S, C>>,
}

impl<S: State, C: Send + Sync + 'static> Clone for StateMachine<S, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: State, C: Send + Sync + 'static> StateMachine<S, C> {
    pub fn builder() -> StateMachineBuilder<S, C> {
        StateMachineBuilder::new()
    }

    pub(crate) fn new(
        initial: S,
        table: ActionTable<S, C>,
        target: C,
        builder: TransitionBuilder,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                status: Mutex::new(Status {
                    state: initial,
                    current: None,
                }),
                table,
                target: Arc::new(target),
                registry: RwLock::new(HandlerRegistry::new()),
                builder: RwLock::new(builder),
            }),
        }
    }

    pub fn state(&self) -> S {
        lock(&self.shared.status).state.clone()
    }

    pub fn is_final(&self) -> bool {
        lock(&self.shared.status).state.is_final()
    }

    /// The in-flight transition, if any.
    pub fn current(&self) -> Option<Transition<S>> {
        self.shared.current()
    }

    pub fn is_transitioning(&self) -> bool {
        lock(&self.shared.status).current.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.current().is_some_and(|t| t.is_paused())
    }

    /// Whether the action table has an entry for `action` from the current state.
    pub fn can(&self, action: &str) -> bool {
        self.shared.table.resolve(action, &self.state()).is_some()
    }

    /// Actions available from the current state.
    pub fn actions(&self) -> Vec<String> {
        self.shared.table.actions_from(&self.state())
    }

    /// Build the transition for `action` and start dispatching it.
    ///
    /// Returns the transition, which may already be complete, cancelled or
    /// paused. If a handler fails, the partly drained transition stays
    /// current until [`StateMachine::cancel`] discards it.
    pub fn fire(&self, action: &str, params: Vec<Value>) -> Result<Transition<S>, MachineError> {
        if let Some(pending) = self.current() {
            warn!(action, pending = pending.action(), "Rejected action during transition");
            return Err(MachineError::TransitionInProgress {
                action: action.to_string(),
                pending: pending.action().to_string(),
            });
        }

        // Dynamic resolvers may touch the machine, so build outside the locks.
        let registry = read(&self.shared.registry).clone();
        let builder = read(&self.shared.builder).clone();
        let transition = builder.build(self, &registry, action, params)?;

        {
            let mut status = lock(&self.shared.status);
            if let Some(pending) = &status.current {
                return Err(MachineError::TransitionInProgress {
                    action: action.to_string(),
                    pending: pending.action().to_string(),
                });
            }
            status.current = Some(transition.clone());
        }

        transition.exec()?;
        Ok(transition)
    }

    pub fn pause(&self) -> Result<(), MachineError> {
        let transition = self.current().ok_or(MachineError::NotTransitioning)?;
        transition.pause();
        Ok(())
    }

    pub fn resume(&self) -> Result<(), MachineError> {
        let transition = self.current().ok_or(MachineError::NotTransitioning)?;
        transition.resume()?;
        Ok(())
    }

    /// Abandon the current transition without running its remaining handlers.
    pub fn cancel(&self) -> Result<Transition<S>, MachineError> {
        self.shared.discard().ok_or(MachineError::NotTransitioning)
    }

    /// Register a handler. In-flight transitions are unaffected.
    pub fn on<F, R>(&self, path: DispatchPath, f: F) -> &Self
    where
        F: Fn(&Event<S>, &C, &[Value]) -> R + Send + Sync + 'static,
        R: IntoHandlerResult,
    {
        write(&self.shared.registry).on(path, f);
        self
    }

    pub fn register(&self, path: DispatchPath, handler: Handler<S, C>) -> &Self {
        write(&self.shared.registry).register(path, handler);
        self
    }

    /// Remove every handler under `path`. In-flight transitions are unaffected.
    pub fn off(&self, path: &DispatchPath) -> usize {
        write(&self.shared.registry).off(path)
    }

    /// Replace the ordering template for transitions fired from now on.
    pub fn set_order(&self, order: Option<Order>) {
        write(&self.shared.builder).set_order(order);
    }

    pub fn order(&self) -> Order {
        read(&self.shared.builder).order().clone()
    }

    pub fn target(&self) -> &C {
        &self.shared.target
    }

    /// Point-in-time read model of the machine.
    pub fn snapshot(&self) -> MachineSnapshot<S> {
        let (state, current) = {
            let status = lock(&self.shared.status);
            (status.state.clone(), status.current.clone())
        };
        let actions = self.shared.table.actions_from(&state);
        MachineSnapshot::new(
            state,
            actions,
            current.as_ref().map(PendingTransition::from_transition),
        )
    }
}

impl<S: State, C: Send + Sync + 'static> Machine for StateMachine<S, C> {
    type State = S;
    type Target = C;

    fn state(&self) -> S {
        StateMachine::state(self)
    }

    fn resolve(&self, action: &str, from: &S) -> Option<Destination<S, C>> {
        self.shared.table.resolve(action, from)
    }

    fn action_for(&self, from: &S, to: &S) -> Option<String> {
        self.shared.table.action_for(from, to)
    }

    fn target(&self) -> Arc<C> {
        Arc::clone(&self.shared.target)
    }

    fn callbacks(&self) -> Callbacks {
        let cancel = Arc::downgrade(&self.shared);
        let pause = Arc::downgrade(&self.shared);
        let resume = Arc::downgrade(&self.shared);
        let complete = Arc::downgrade(&self.shared);

        Callbacks::new(
            move || {
                if let Some(shared) = cancel.upgrade() {
                    shared.discard();
                }
            },
            move || {
                if let Some(transition) = pause.upgrade().and_then(|shared| shared.current()) {
                    transition.pause();
                }
            },
            move || match resume.upgrade().and_then(|shared| shared.current()) {
                Some(transition) => transition.resume().map(|_| ()),
                None => Ok(()),
            },
            move || {
                if let Some(shared) = complete.upgrade() {
                    shared.commit();
                }
            },
        )
    }
}

impl<S: State, C: Send + Sync + 'static> fmt::Debug for StateMachine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = lock(&self.shared.status);
        f.debug_struct("StateMachine")
            .field("state", &status.state)
            .field("current", &status.current)
            .field("table", &self.shared.table)
            .finish_non_exhaustive()
    }
}
