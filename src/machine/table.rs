//! Action table: which action leads where from which state.

use crate::builder::Destination;
use crate::core::State;
use serde_json::Value;
use std::fmt;

struct Entry<S, C> {
    action: String,
    from: S,
    destination: Destination<S, C>,
}

/// Ordered list of `(action, from, destination)` entries.
///
/// The first entry matching an `(action, from)` pair wins.
pub struct ActionTable<S, C> {
    entries: Vec<Entry<S, C>>,
}

impl<S: State, C> ActionTable<S, C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// `action` moves from `from` to the fixed state `to`.
    pub fn add(&mut self, action: impl Into<String>, from: S, to: S) -> &mut Self {
        self.entries.push(Entry {
            action: action.into(),
            from,
            destination: Destination::State(to),
        });
        self
    }

    /// `action` moves from `from` to whatever `resolver` returns.
    pub fn add_dynamic<F>(&mut self, action: impl Into<String>, from: S, resolver: F) -> &mut Self
    where
        C: 'static,
        F: Fn(&C, &[Value]) -> S + Send + Sync + 'static,
    {
        self.entries.push(Entry {
            action: action.into(),
            from,
            destination: Destination::dynamic(resolver),
        });
        self
    }

    pub fn resolve(&self, action: &str, from: &S) -> Option<Destination<S, C>> {
        self.entries
            .iter()
            .find(|entry| entry.action == action && &entry.from == from)
            .map(|entry| entry.destination.clone())
    }

    /// First action with a fixed destination leading from `from` to `to`.
    pub fn action_for(&self, from: &S, to: &S) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| {
                &entry.from == from
                    && matches!(&entry.destination, Destination::State(dest) if dest == to)
            })
            .map(|entry| entry.action.clone())
    }

    /// Actions available from `from`, in table order without duplicates.
    pub fn actions_from(&self, from: &S) -> Vec<String> {
        let mut actions: Vec<String> = Vec::new();
        for entry in self.entries.iter().filter(|entry| &entry.from == from) {
            if !actions.contains(&entry.action) {
                actions.push(entry.action.clone());
            }
        }
        actions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State, C> Default for ActionTable<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, C> fmt::Debug for ActionTable<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .iter()
                    .map(|entry| (&entry.action, &entry.from, &entry.destination)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Light {
            Red,
            Green,
            Yellow,
        }
    }

    fn table() -> ActionTable<Light, ()> {
        let mut table = ActionTable::new();
        table
            .add("go", Light::Red, Light::Green)
            .add("slow", Light::Green, Light::Yellow)
            .add("stop", Light::Yellow, Light::Red)
            .add("stop", Light::Green, Light::Red)
            .add_dynamic("panic", Light::Green, |_: &(), _: &[Value]| Light::Red);
        table
    }

    #[test]
    fn resolve_matches_action_and_source() {
        let table = table();

        assert!(matches!(
            table.resolve("go", &Light::Red),
            Some(Destination::State(Light::Green))
        ));
        assert!(table.resolve("go", &Light::Green).is_none());
        assert!(matches!(
            table.resolve("panic", &Light::Green),
            Some(Destination::Dynamic(_))
        ));
    }

    #[test]
    fn action_for_ignores_dynamic_entries() {
        let table = table();

        assert_eq!(
            table.action_for(&Light::Green, &Light::Red),
            Some("stop".to_string())
        );
        assert_eq!(table.action_for(&Light::Red, &Light::Yellow), None);
    }

    #[test]
    fn actions_from_lists_each_action_once() {
        let table = table();

        assert_eq!(
            table.actions_from(&Light::Green),
            vec!["slow", "stop", "panic"]
        );
        assert!(table.actions_from(&Light::Yellow).contains(&"stop".to_string()));
        assert_eq!(table.len(), 5);
    }
}
