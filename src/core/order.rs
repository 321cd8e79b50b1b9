//! Ordering template for lifecycle handlers.
//!
//! An [`Order`] is a list of `subject.verb` tokens. Expanding it against a
//! concrete action, source state and target state yields the sequence of
//! dispatch paths a transition visits.

use super::path::{DispatchPath, PathName, Phase};
use std::fmt;
use std::str::FromStr;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Errors produced while parsing order tokens.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Malformed order token '{0}', expected 'subject.verb'")]
    Malformed(String),

    #[error("Unknown subject '{subject}' in order token '{token}'")]
    UnknownSubject { token: String, subject: String },

    #[error("Unknown verb '{verb}' in order token '{token}'")]
    UnknownVerb { token: String, verb: String },
}

/// What a token's name resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    /// `*`
    Wildcard,
    /// The requested action's name
    Action,
    /// The source state's name
    From,
    /// The target state's name
    To,
}

impl Subject {
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Wildcard => "*",
            Subject::Action => "action",
            Subject::From => "from",
            Subject::To => "to",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "*" => Some(Subject::Wildcard),
            "action" => Some(Subject::Action),
            "from" => Some(Subject::From),
            "to" => Some(Subject::To),
            _ => None,
        }
    }
}

/// One `subject.verb` entry of an ordering template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrderToken {
    pub subject: Subject,
    pub verb: Phase,
}

impl OrderToken {
    pub const fn new(subject: Subject, verb: Phase) -> Self {
        Self { subject, verb }
    }

    /// Resolve this token into a concrete dispatch path.
    pub fn resolve(&self, action: &str, from: &str, to: &str) -> DispatchPath {
        let name = match self.subject {
            Subject::Wildcard => PathName::Wildcard,
            Subject::Action => PathName::Named(action.to_string()),
            Subject::From => PathName::Named(from.to_string()),
            Subject::To => PathName::Named(to.to_string()),
        };
        DispatchPath::new(name, self.verb)
    }
}

impl fmt::Display for OrderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.subject.as_str(), self.verb)
    }
}

impl FromStr for OrderToken {
    type Err = OrderError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (subject, verb) = token
            .split_once('.')
            .ok_or_else(|| OrderError::Malformed(token.to_string()))?;

        let subject = Subject::parse(subject).ok_or_else(|| OrderError::UnknownSubject {
            token: token.to_string(),
            subject: subject.to_string(),
        })?;
        let verb = Phase::parse(verb).ok_or_else(|| OrderError::UnknownVerb {
            token: token.to_string(),
            verb: verb.to_string(),
        })?;

        Ok(OrderToken::new(subject, verb))
    }
}

const DEFAULT_ORDER: [OrderToken; 8] = [
    OrderToken::new(Subject::Wildcard, Phase::Start),
    OrderToken::new(Subject::Action, Phase::Start),
    OrderToken::new(Subject::From, Phase::Leave),
    OrderToken::new(Subject::Wildcard, Phase::Leave),
    OrderToken::new(Subject::Wildcard, Phase::Enter),
    OrderToken::new(Subject::To, Phase::Enter),
    OrderToken::new(Subject::Action, Phase::End),
    OrderToken::new(Subject::Wildcard, Phase::End),
];

/// Ordered list of tokens that fixes handler sequencing across categories.
///
/// The default is
/// `*.start, action.start, from.leave, *.leave, *.enter, to.enter, action.end, *.end`.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::Order;
///
/// let order = Order::parse(["*.start", "to.enter", "*.end"]).unwrap();
/// assert_eq!(order.len(), 3);
///
/// let errors = Order::parse(["*.start", "nope", "to.exit"]).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    tokens: Vec<OrderToken>,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_ORDER.to_vec(),
        }
    }
}

impl Order {
    pub fn new(tokens: Vec<OrderToken>) -> Self {
        Self { tokens }
    }

    /// Validate textual tokens, accumulating every invalid one.
    pub fn validate<I, T>(tokens: I) -> Validation<Order, NonEmptyVec<OrderError>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let checks: Vec<Validation<OrderToken, NonEmptyVec<OrderError>>> = tokens
            .into_iter()
            .map(|token| match token.as_ref().parse::<OrderToken>() {
                Ok(token) => Validation::success(token),
                Err(e) => Validation::fail(e),
            })
            .collect();

        Validation::all_vec(checks).map(Order::new)
    }

    /// Like [`Order::validate`], as a `Result` carrying every invalid token.
    pub fn parse<I, T>(tokens: I) -> Result<Order, Vec<OrderError>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        match Self::validate(tokens) {
            Validation::Success(order) => Ok(order),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }

    pub fn tokens(&self) -> &[OrderToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Concrete dispatch paths for one transition, in template order.
    pub fn expand<'a>(
        &'a self,
        action: &'a str,
        from: &'a str,
        to: &'a str,
    ) -> impl Iterator<Item = DispatchPath> + 'a {
        self.tokens
            .iter()
            .map(move |token| token.resolve(action, from, to))
    }

    /// Tokens in their textual form.
    pub fn to_strings(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }
}
