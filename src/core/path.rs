//! Dispatch paths: the `(category, name, phase)` keys handlers register under.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A lifecycle moment within a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Start,
    Leave,
    Enter,
    End,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Start, Phase::Leave, Phase::Enter, Phase::End];

    /// `start` and `end` belong to the action; `leave` and `enter` to a state.
    pub fn category(self) -> Category {
        match self {
            Phase::Start | Phase::End => Category::Action,
            Phase::Leave | Phase::Enter => Category::State,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Leave => "leave",
            Phase::Enter => "enter",
            Phase::End => "end",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        Phase::ALL.into_iter().find(|phase| phase.as_str() == s)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Action,
    State,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Action => "action",
            Category::State => "state",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name part of a dispatch path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathName {
    /// `*`: fires for every transition.
    Wildcard,
    Named(String),
}

impl PathName {
    pub fn as_str(&self) -> &str {
        match self {
            PathName::Wildcard => "*",
            PathName::Named(name) => name,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, PathName::Wildcard)
    }
}

impl From<&str> for PathName {
    fn from(name: &str) -> Self {
        match name {
            "*" => PathName::Wildcard,
            other => PathName::Named(other.to_string()),
        }
    }
}

impl From<String> for PathName {
    fn from(name: String) -> Self {
        if name == "*" {
            PathName::Wildcard
        } else {
            PathName::Named(name)
        }
    }
}

impl fmt::Display for PathName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry key for lifecycle handlers.
///
/// The category is always derived from the phase, so a path can only be built
/// from a name and a phase.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::{Category, DispatchPath, Phase};
///
/// let path = DispatchPath::named("idle", Phase::Enter);
/// assert_eq!(path.category(), Category::State);
/// assert_eq!(path.to_string(), "state.idle.enter");
///
/// let any = DispatchPath::any(Phase::Start);
/// assert_eq!(any.to_string(), "action.*.start");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchPath {
    category: Category,
    name: PathName,
    phase: Phase,
}

impl DispatchPath {
    pub fn new(name: PathName, phase: Phase) -> Self {
        Self {
            category: phase.category(),
            name,
            phase,
        }
    }

    /// Wildcard path for `phase`.
    pub fn any(phase: Phase) -> Self {
        Self::new(PathName::Wildcard, phase)
    }

    /// Path for a specific action (`start`/`end`) or state (`leave`/`enter`).
    /// The name `*` yields the wildcard path.
    pub fn named(name: impl Into<PathName>, phase: Phase) -> Self {
        Self::new(name.into(), phase)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn name(&self) -> &PathName {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl fmt::Display for DispatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.category, self.name, self.phase)
    }
}
