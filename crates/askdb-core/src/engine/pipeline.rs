use crate::database::Database;
use crate::errors::QueryError;
use crate::providers::llm::LlmClient;
use crate::synthesis;
use std::sync::Arc;

/// Sequences one human query through its three collaborator calls: SQL
/// synthesis, execution, answer synthesis. Stages run strictly in order,
/// each depending on the previous stage's output; nothing is retried or
/// cached, and a failure stops the sequence at that stage.
#[derive(Clone)]
pub struct QueryPipeline {
    db: Arc<dyn Database>,
    llm: Arc<dyn LlmClient>,
}

impl QueryPipeline {
    pub fn new(db: Arc<dyn Database>, llm: Arc<dyn LlmClient>) -> Self {
        Self { db, llm }
    }

    pub async fn answer(&self, human_query: &str) -> Result<String, QueryError> {
        let raw = synthesis::sql_for_question(self.llm.as_ref(), self.db.as_ref(), human_query)
            .await
            .map_err(QueryError::SqlSynthesis)?;

        let sql =
            synthesis::extract_sql(&raw).map_err(|e| QueryError::SqlParse(e.to_string()))?;
        tracing::info!(
            event = "sql_generated",
            provider = self.llm.provider_name(),
            sql = %sql
        );

        let rows = self.db.execute(&sql).map_err(QueryError::Execution)?;
        tracing::info!(event = "query_executed", rows = rows.len());

        let answer = synthesis::answer_from_rows(self.llm.as_ref(), &rows, human_query)
            .await
            .map_err(QueryError::AnswerSynthesis)?;
        tracing::info!(event = "answer_generated", bytes = answer.len());

        Ok(answer)
    }
}
