//! Core State trait for state machine states.
//!
//! States are compared by value and addressed by name: the name is what the
//! handler registry keys `leave` and `enter` handlers on.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: every transition keeps its own `from` and `to`
/// - `PartialEq`: the action table matches source states by value
/// - `Debug`: states show up in logs and errors
/// - `Serialize` + `Deserialize`: states are part of machine snapshots
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Closed,
///     Open,
///     Locked,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "closed",
///             Self::Open => "open",
///             Self::Locked => "locked",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Locked)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Name used for handler lookup and display.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Plain string states, for machines whose states are only names.
impl State for String {
    fn name(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Running,
        Stopped,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "idle",
                Self::Running => "running",
                Self::Stopped => "stopped",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Stopped)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "idle");
        assert_eq!(TestState::Running.name(), "running");
        assert_eq!(TestState::Stopped.name(), "stopped");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Idle.is_final());
        assert!(!TestState::Running.is_final());
        assert!(TestState::Stopped.is_final());
    }

    #[test]
    fn string_state_uses_itself_as_name() {
        let state = String::from("green");
        assert_eq!(state.name(), "green");
        assert!(!state.is_final());
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Running;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
