use crate::model::ResultSet;

/// What the answering pipeline needs from the database: a serializable
/// schema description and literal SQL execution. The generated SQL is
/// passed through verbatim; nothing here validates it.
pub trait Database: Send + Sync {
    fn schema(&self) -> anyhow::Result<serde_json::Value>;
    fn execute(&self, sql: &str) -> anyhow::Result<ResultSet>;
}

pub mod sqlite;
