//! Construction of transitions and machines.
//!
//! [`TransitionBuilder`] expands the ordering template against a concrete
//! action into a queue of bound handlers. It talks to the owning machine only
//! through the [`Machine`] trait, so any machine type can drive it.
//! [`StateMachineBuilder`] assembles the bundled [`StateMachine`](crate::machine::StateMachine).

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::State;
use crate::dispatch::Callbacks;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Computes a target state at build time from the target and the action's params.
pub type Resolver<S, C> = Arc<dyn Fn(&C, &[Value]) -> S + Send + Sync>;

/// Where an action leads from a given state.
pub enum Destination<S, C> {
    State(S),
    Dynamic(Resolver<S, C>),
}

impl<S, C> Destination<S, C> {
    pub fn dynamic<F>(resolver: F) -> Self
    where
        S: 'static,
        C: 'static,
        F: Fn(&C, &[Value]) -> S + Send + Sync + 'static,
    {
        Destination::Dynamic(Arc::new(resolver))
    }
}

impl<S: Clone, C> Clone for Destination<S, C> {
    fn clone(&self) -> Self {
        match self {
            Destination::State(state) => Destination::State(state.clone()),
            Destination::Dynamic(resolver) => Destination::Dynamic(Arc::clone(resolver)),
        }
    }
}

impl<S: fmt::Debug, C> fmt::Debug for Destination<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::State(state) => f.debug_tuple("State").field(state).finish(),
            Destination::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// What the transition builder needs from the machine that owns a transition.
pub trait Machine {
    type State: State;
    /// Execution context handed to handlers and dynamic resolvers.
    type Target: Send + Sync + 'static;

    /// Current state; becomes the transition's `from`.
    fn state(&self) -> Self::State;

    /// Destination of `action` from `from`, if the action table has one.
    fn resolve(&self, action: &str, from: &Self::State)
        -> Option<Destination<Self::State, Self::Target>>;

    /// The action leading from `from` to `to`, used to re-resolve dynamic destinations.
    fn action_for(&self, from: &Self::State, to: &Self::State) -> Option<String>;

    fn target(&self) -> Arc<Self::Target>;

    /// Control operations bound to this machine, one bundle per transition.
    fn callbacks(&self) -> Callbacks;
}
