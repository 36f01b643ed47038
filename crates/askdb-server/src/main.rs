use anyhow::Result;
use askdb_core::database::sqlite::SqliteDatabase;
use askdb_core::engine::QueryPipeline;
use askdb_core::providers::llm::openai::OpenAiClient;
use askdb_server::config::ServerConfig;
use askdb_server::server;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database to answer questions against (overrides ASKDB_DB).
    #[arg(long)]
    db: Option<PathBuf>,
}

use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[actix_web::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = ServerConfig::from_env();

    init_logging(&cfg.log_level);

    if cfg.api_key.is_empty() {
        // The service still starts; every model call will fail until the
        // key is provided, surfaced per request as synthesis errors.
        tracing::warn!(
            event = "missing_api_key",
            "OPENAI_API_KEY is not set; model calls will fail authentication"
        );
    }

    let db_path = args.db.unwrap_or_else(|| PathBuf::from(&cfg.db_path));
    let db = SqliteDatabase::open(&db_path)?;

    let llm = OpenAiClient::new(
        cfg.model.clone(),
        cfg.api_key.clone(),
        cfg.temperature,
        cfg.max_tokens,
        Duration::from_millis(cfg.llm_timeout_ms),
    )?;

    let pipeline = Arc::new(QueryPipeline::new(Arc::new(db), Arc::new(llm)));

    tracing::info!(
        event = "server_start",
        port = cfg.port,
        model = %cfg.model,
        db = %db_path.display()
    );

    server::run(cfg.port, pipeline).await
}
