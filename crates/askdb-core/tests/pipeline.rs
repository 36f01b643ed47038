use askdb_core::database::sqlite::SqliteDatabase;
use askdb_core::database::Database;
use askdb_core::engine::QueryPipeline;
use askdb_core::errors::QueryError;
use askdb_core::model::{ResponseFormat, ResultSet};
use askdb_core::providers::llm::fake::FakeLlmClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const QUESTION: &str = "Show me all users older than 18";
const SQL_ENVELOPE: &str = r#"{"sql_query": "SELECT name, age FROM users WHERE age > 18;"}"#;
const FINAL_ANSWER: &str = "There is one user older than 18: Alice, age 30.";

fn seeded_db() -> SqliteDatabase {
    let db = SqliteDatabase::open_in_memory().unwrap();
    db.execute_batch(
        "CREATE TABLE users (name TEXT NOT NULL, age INTEGER NOT NULL);
         INSERT INTO users (name, age) VALUES ('Alice', 30);
         INSERT INTO users (name, age) VALUES ('Bob', 17);",
    )
    .unwrap();
    db
}

/// Wrapper that counts executions so tests can assert the executor was or
/// was not reached.
struct CountingDb {
    inner: SqliteDatabase,
    executes: AtomicUsize,
}

impl CountingDb {
    fn new(inner: SqliteDatabase) -> Self {
        Self {
            inner,
            executes: AtomicUsize::new(0),
        }
    }

    fn execute_count(&self) -> usize {
        self.executes.load(Ordering::SeqCst)
    }
}

impl Database for CountingDb {
    fn schema(&self) -> anyhow::Result<serde_json::Value> {
        self.inner.schema()
    }

    fn execute(&self, sql: &str) -> anyhow::Result<ResultSet> {
        self.executes.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(sql)
    }
}

#[tokio::test]
async fn test_round_trip() {
    let fake = Arc::new(FakeLlmClient::scripted([SQL_ENVELOPE, FINAL_ANSWER]));
    let db = Arc::new(CountingDb::new(seeded_db()));
    let pipeline = QueryPipeline::new(db.clone(), fake.clone());

    let answer = pipeline.answer(QUESTION).await.unwrap();
    assert_eq!(answer, FINAL_ANSWER);
    assert_eq!(db.execute_count(), 1);

    let requests = fake.requests();
    assert_eq!(requests.len(), 2);

    // First call: schema + question, JSON-object completion requested.
    assert_eq!(requests[0].user.as_deref(), Some(QUESTION));
    assert_eq!(requests[0].response_format, ResponseFormat::JsonObject);
    assert!(requests[0].system.contains("sql_query"));
    assert!(requests[0].system.contains("users"));

    // Second call: question + rows embedded in the system message, no user
    // message, plain text completion.
    assert!(requests[1].user.is_none());
    assert_eq!(requests[1].response_format, ResponseFormat::Text);
    assert!(requests[1].system.contains(QUESTION));
    assert!(requests[1].system.contains("Alice"));
    assert!(!requests[1].system.contains("Bob"));
}

#[tokio::test]
async fn test_synthesis_failure_stops_before_database() {
    let fake = Arc::new(FakeLlmClient::default());
    let db = Arc::new(CountingDb::new(seeded_db()));
    let pipeline = QueryPipeline::new(db.clone(), fake.clone());

    let err = pipeline.answer(QUESTION).await.unwrap_err();
    assert!(matches!(err, QueryError::SqlSynthesis(_)));
    assert_eq!(db.execute_count(), 0);
}

#[tokio::test]
async fn test_unparseable_completion_stops_before_database() {
    let fake = Arc::new(FakeLlmClient::scripted(["SELECT name FROM users;"]));
    let db = Arc::new(CountingDb::new(seeded_db()));
    let pipeline = QueryPipeline::new(db.clone(), fake.clone());

    let err = pipeline.answer(QUESTION).await.unwrap_err();
    assert!(matches!(err, QueryError::SqlParse(_)));
    assert_eq!(db.execute_count(), 0);
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn test_execution_failure_stops_before_answer() {
    let fake = Arc::new(FakeLlmClient::scripted([
        r#"{"sql_query": "SELECT * FROM missing_table;"}"#,
    ]));
    let db = Arc::new(CountingDb::new(seeded_db()));
    let pipeline = QueryPipeline::new(db.clone(), fake.clone());

    let err = pipeline.answer(QUESTION).await.unwrap_err();
    assert!(matches!(err, QueryError::Execution(_)));
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn test_empty_result_set_still_answers() {
    let fake = Arc::new(FakeLlmClient::scripted([
        r#"{"sql_query": "SELECT name FROM users WHERE age > 100;"}"#,
        "No users are older than 100.",
    ]));
    let db = Arc::new(CountingDb::new(seeded_db()));
    let pipeline = QueryPipeline::new(db.clone(), fake.clone());

    let answer = pipeline.answer("Who is older than 100?").await.unwrap();
    assert_eq!(answer, "No users are older than 100.");

    // The rows prompt embeds an empty JSON array, not an error.
    let requests = fake.requests();
    assert!(requests[1].system.contains("[]"));
}

#[tokio::test]
async fn test_identical_inputs_yield_identical_answers() {
    for _ in 0..2 {
        let fake = Arc::new(FakeLlmClient::scripted([SQL_ENVELOPE, FINAL_ANSWER]));
        let db = Arc::new(CountingDb::new(seeded_db()));
        let pipeline = QueryPipeline::new(db, fake);
        assert_eq!(pipeline.answer(QUESTION).await.unwrap(), FINAL_ANSWER);
    }
}
