use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row returned by the database: column name to value.
pub type ResultRow = HashMap<String, serde_json::Value>;

/// Rows in database return order.
pub type ResultSet = Vec<ResultRow>;

/// Completion shape requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    JsonObject,
}

/// A single system/user exchange sent to the model.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: Option<String>,
    pub response_format: ResponseFormat,
}

impl ChatRequest {
    pub fn system_only(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: None,
            response_format: ResponseFormat::Text,
        }
    }

    pub fn with_user(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: Some(user.into()),
            response_format: ResponseFormat::Text,
        }
    }

    /// Ask the provider to force a JSON-object completion.
    pub fn json_object(mut self) -> Self {
        self.response_format = ResponseFormat::JsonObject;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}
