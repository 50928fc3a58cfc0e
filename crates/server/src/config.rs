use reelmark_enrich::EnrichConfig;

/// Process-level settings, read once from `REELMARK_*` variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub log_json: bool,
    pub enrich: EnrichConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind: std::env::var("REELMARK_BIND").unwrap_or_else(|_| "0.0.0.0:8787".to_string()),
            log_json: std::env::var("REELMARK_LOG_FORMAT")
                .map(|v| v.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            enrich: EnrichConfig::from_env(),
        }
    }
}
