//! Wire models for the `/human_query` endpoint.

use serde::{Deserialize, Serialize};

/// Inbound body for `POST /human_query`. The field is required: a body
/// without it is rejected as an invalid payload before any collaborator
/// call is made.
///
/// # Example Request
/// ```json
/// {
///   "human_query": "Show me all users older than 18"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HumanQueryPayload {
    pub human_query: String,
}

/// Success body: the model's phrasing of the answer, verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanQueryResponse {
    pub answer: String,
}

/// Error body returned for every failure, with one fixed message per
/// failure class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}
