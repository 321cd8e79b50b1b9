//! Engine configuration loaded from JSON.

use crate::builder::TransitionBuilder;
use crate::core::{Order, OrderError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid order: {}", join_errors(.0))]
    InvalidOrder(Vec<OrderError>),
}

fn join_errors(errors: &[OrderError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Settings for a [`TransitionBuilder`].
///
/// ```json
/// { "order": ["*.start", "from.leave", "to.enter", "*.end"] }
/// ```
///
/// A missing or empty `order` means the default template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_order(order: &Order) -> Self {
        Self {
            order: Some(order.to_strings()),
        }
    }

    /// The configured order, every invalid token reported at once.
    pub fn order(&self) -> Result<Option<Order>, ConfigError> {
        match &self.order {
            None => Ok(None),
            Some(tokens) if tokens.is_empty() => Ok(None),
            Some(tokens) => Order::parse(tokens)
                .map(Some)
                .map_err(ConfigError::InvalidOrder),
        }
    }

    pub fn into_builder(self) -> Result<TransitionBuilder, ConfigError> {
        let mut builder = TransitionBuilder::new();
        builder.set_order(self.order()?);
        Ok(builder)
    }
}
