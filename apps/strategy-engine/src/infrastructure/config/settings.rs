//! Engine Configuration Settings
//!
//! Configuration for the strategy engine, loaded from environment
//! variables. Every variable carries a default, so the engine starts
//! with no environment set at all.

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Interface the server binds to.
    pub host: String,
    /// Port the server listens on.
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8090,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// HTTP server settings.
    pub http: HttpSettings,
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to
    /// the defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = HttpSettings::default();
        let http = HttpSettings {
            host: env_or("STRATEGY_ENGINE_HTTP_HOST", &defaults.host),
            port: parse_env_u16("STRATEGY_ENGINE_HTTP_PORT", defaults.port),
        };
        Self { http }
    }

    /// Socket address string the HTTP server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http.host, self.http.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
