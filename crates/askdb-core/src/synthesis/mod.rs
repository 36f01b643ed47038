//! The two prompt round trips: question to SQL, rows to answer.

use crate::database::Database;
use crate::model::{ChatRequest, ResultSet};
use crate::providers::llm::LlmClient;
use serde::Deserialize;

/// Completion shape for the SQL step. Unknown sibling keys in the
/// completion are ignored; only `sql_query` is read.
#[derive(Debug, Deserialize)]
struct SqlEnvelope {
    sql_query: String,
}

/// Ask the model for a SQL query answering `human_query` against the
/// database's schema. Returns the raw completion text; [`extract_sql`]
/// decides whether it decodes as the expected envelope.
pub async fn sql_for_question(
    client: &dyn LlmClient,
    db: &dyn Database,
    human_query: &str,
) -> anyhow::Result<String> {
    let schema = db.schema()?;
    let schema_json = serde_json::to_string(&schema)?;

    let request = ChatRequest::with_user(sql_system_prompt(&schema_json), human_query).json_object();
    let resp = client.complete(&request).await?;
    Ok(resp.text)
}

/// Ask the model to phrase an answer to `human_query` from the rows the
/// database returned. An empty result set is a valid input.
pub async fn answer_from_rows(
    client: &dyn LlmClient,
    rows: &ResultSet,
    human_query: &str,
) -> anyhow::Result<String> {
    let rows_json = serde_json::to_string(rows)?;

    let request = ChatRequest::system_only(answer_system_prompt(human_query, &rows_json));
    let resp = client.complete(&request).await?;
    Ok(resp.text)
}

/// Pull the SQL string out of a completion expected to look like
/// `{"sql_query": "SELECT ..."}`.
pub fn extract_sql(raw: &str) -> anyhow::Result<String> {
    let text = strip_markdown(raw);
    let envelope: SqlEnvelope = serde_json::from_str(text).map_err(|e| {
        anyhow::anyhow!("completion is not a JSON object with a string \"sql_query\" field: {}", e)
    })?;
    Ok(envelope.sql_query)
}

fn sql_system_prompt(schema_json: &str) -> String {
    format!(
        r#"Given the following schema, write a SQL query that retrieves the requested information.
Return the SQL query inside a JSON structure with the key "sql_query".
<example>{{
    "sql_query": "SELECT * FROM users WHERE age > 18;"
}}
</example>
<schema>
{}
</schema>"#,
        schema_json
    )
}

fn answer_system_prompt(human_query: &str, rows_json: &str) -> String {
    format!(
        r#"Given a users question and the SQL rows response from the database from which the user wants to get the answer,
write a response to the user's question.
<user_question>
{}
</user_question>
<sql_response>
{}
</sql_response>"#,
        human_query, rows_json
    )
}

/// Strip a ```json / ``` fence if the model wrapped its output in one.
fn strip_markdown(text: &str) -> &str {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let body_start = rest.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &rest[body_start..];
        let body_end = body.rfind("```").unwrap_or(body.len());
        return body[..body_end].trim();
    }
    text
}
