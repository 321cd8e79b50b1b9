//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Order, State};
use crate::machine::{ActionTable, StateMachine};
use serde_json::Value;

/// Builder for constructing state machines with a fluent API.
pub struct StateMachineBuilder<S: State, C: Send + Sync + 'static> {
    initial: Option<S>,
    target: Option<C>,
    table: ActionTable<S, C>,
    order: Option<Order>,
}

impl<S: State, C: Send + Sync + 'static> StateMachineBuilder<S, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            target: None,
            table: ActionTable::new(),
            order: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the execution target handed to handlers (required).
    pub fn target(mut self, target: C) -> Self {
        self.target = Some(target);
        self
    }

    /// Add an action with a fixed destination.
    pub fn transition(mut self, action: impl Into<String>, from: S, to: S) -> Self {
        self.table.add(action, from, to);
        self
    }

    /// Add an action whose destination is computed when it fires.
    pub fn dynamic<F>(mut self, action: impl Into<String>, from: S, resolver: F) -> Self
    where
        F: Fn(&C, &[Value]) -> S + Send + Sync + 'static,
    {
        self.table.add_dynamic(action, from, resolver);
        self
    }

    /// Use a custom ordering template instead of the default.
    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<S, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;

        if self.table.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut builder = TransitionBuilder::new();
        builder.set_order(self.order);

        Ok(StateMachine::new(initial, self.table, target, builder))
    }
}

impl<S: State, C: Send + Sync + 'static> Default for StateMachineBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}
