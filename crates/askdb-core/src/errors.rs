use std::fmt;

/// What went wrong while answering a human query.
///
/// Each variant maps to exactly one fixed user-facing message at the HTTP
/// boundary; the wrapped detail is for logs only and must never reach the
/// client.
#[derive(Debug)]
pub enum QueryError {
    /// Schema serialization or the question-to-SQL model call failed.
    SqlSynthesis(anyhow::Error),
    /// The model completion did not decode as `{"sql_query": "<string>"}`.
    SqlParse(String),
    /// The database rejected the generated SQL.
    Execution(anyhow::Error),
    /// Result serialization or the rows-to-answer model call failed.
    AnswerSynthesis(anyhow::Error),
}

impl QueryError {
    /// Stable message safe to return to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            QueryError::SqlSynthesis(_) => "Failed to generate SQL query",
            QueryError::SqlParse(_) => "Failed to parse SQL query",
            QueryError::Execution(_) => "Failed to query database",
            QueryError::AnswerSynthesis(_) => "Failed to generate answer",
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::SqlSynthesis(e) => write!(f, "sql synthesis failed: {}", e),
            QueryError::SqlParse(msg) => write!(f, "sql parse failed: {}", msg),
            QueryError::Execution(e) => write!(f, "query execution failed: {}", e),
            QueryError::AnswerSynthesis(e) => write!(f, "answer synthesis failed: {}", e),
        }
    }
}

impl std::error::Error for QueryError {}
