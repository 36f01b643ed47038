#[path = "human_query.rs"]
mod human_query_handler;

pub use human_query_handler::{human_query, json_error_handler};
