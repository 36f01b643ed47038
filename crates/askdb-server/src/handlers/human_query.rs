//! Handler for the `POST /human_query` endpoint.

use crate::models::{ErrorBody, HumanQueryPayload, HumanQueryResponse};
use actix_web::error::InternalError;
use actix_web::{post, web, HttpResponse, Responder};
use askdb_core::engine::QueryPipeline;
use askdb_core::errors::QueryError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static RID: AtomicU64 = AtomicU64::new(1);

fn next_rid() -> String {
    let n = RID.fetch_add(1, Ordering::Relaxed);
    format!("r-{n:06}")
}

/// Json extractor failures (body not JSON, missing `human_query`) must
/// still produce the service's error body, so the default actix error
/// response is replaced here.
pub fn json_error_handler() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let resp = HttpResponse::BadRequest().json(ErrorBody::new("Invalid request payload"));
        InternalError::from_response(err, resp).into()
    })
}

/// POST /human_query - answer a natural-language question
///
/// Translates the question to SQL via the model, runs the SQL against the
/// database, and asks the model to phrase an answer from the rows. The
/// three calls run strictly in sequence; the first failure stops the
/// request with that stage's fixed error message.
///
/// # Example Response (Success)
/// ```json
/// {
///   "answer": "There is one user older than 18: Alice, age 30."
/// }
/// ```
///
/// # Example Response (Error)
/// ```json
/// {
///   "error": "Failed to generate SQL query"
/// }
/// ```
#[post("/human_query")]
pub async fn human_query(
    payload: web::Json<HumanQueryPayload>,
    pipeline: web::Data<Arc<QueryPipeline>>,
) -> impl Responder {
    let rid = next_rid();
    tracing::info!(
        event = "human_query_start",
        rid = %rid,
        bytes_in = payload.human_query.len()
    );

    match pipeline.answer(&payload.human_query).await {
        Ok(answer) => {
            tracing::info!(event = "human_query_done", rid = %rid, outcome = "ok");
            HttpResponse::Ok().json(HumanQueryResponse { answer })
        }
        Err(e) => {
            // Internal detail stays in the log; the client sees the fixed
            // message for the failed stage.
            tracing::error!(event = "human_query_failed", rid = %rid, error = %e);
            error_response(&e)
        }
    }
}

fn error_response(err: &QueryError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorBody::new(err.public_message()))
}
