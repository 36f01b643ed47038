use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub api_key: String,
    pub model: String,
    pub db_path: String,
    pub llm_timeout_ms: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            api_key: String::new(),
            model: "gpt-4".to_string(),
            db_path: "askdb.sqlite3".to_string(),
            llm_timeout_ms: 30_000,
            temperature: 0.1,
            max_tokens: 1024,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("PORT") {
            if let Ok(n) = v.parse() {
                cfg.port = n;
            }
        }
        if let Ok(v) = env::var("OPENAI_API_KEY") {
            cfg.api_key = v;
        }
        if let Ok(v) = env::var("ASKDB_MODEL") {
            cfg.model = v;
        }
        if let Ok(v) = env::var("ASKDB_DB") {
            cfg.db_path = v;
        }
        if let Ok(v) = env::var("ASKDB_LLM_TIMEOUT_MS") {
            if let Ok(n) = v.parse() {
                cfg.llm_timeout_ms = n;
            }
        }
        if let Ok(v) = env::var("ASKDB_TEMPERATURE") {
            if let Ok(n) = v.parse() {
                cfg.temperature = n;
            }
        }
        if let Ok(v) = env::var("ASKDB_MAX_TOKENS") {
            if let Ok(n) = v.parse() {
                cfg.max_tokens = n;
            }
        }
        if let Ok(v) = env::var("ASKDB_LOG") {
            cfg.log_level = v;
        }
        cfg
    }
}
