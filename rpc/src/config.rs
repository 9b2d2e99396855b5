//! Server configuration with TOML file support.

use serde::{Deserialize, Serialize};

/// Configuration for the Agora server.
///
/// Loadable from a TOML file (every field has a default) or built
/// programmatically for tests. The session secret intentionally has no
/// default: an empty secret fails at issuer construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// HMAC secret for session credentials.
    #[serde(default)]
    pub session_secret: String,

    /// Session credential lifetime in minutes.
    #[serde(default = "default_token_duration_mins")]
    pub token_duration_mins: u64,

    /// Voting window applied when a proposal gives no duration.
    #[serde(default = "default_proposal_duration_secs")]
    pub default_proposal_duration_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            session_secret: String::new(),
            token_duration_mins: default_token_duration_mins(),
            default_proposal_duration_secs: default_proposal_duration_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Session lifetime in seconds.
    pub fn token_duration_secs(&self) -> u64 {
        self.token_duration_mins * 60
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_port() -> u16 {
    7090
}

fn default_token_duration_mins() -> u64 {
    60
}

fn default_proposal_duration_secs() -> u64 {
    86_400
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg: ServerConfig = toml::from_str("session_secret = \"s\"").unwrap();
        assert_eq!(cfg.listen_port, 7090);
        assert_eq!(cfg.token_duration_mins, 60);
        assert_eq!(cfg.token_duration_secs(), 3600);
        assert_eq!(cfg.default_proposal_duration_secs, 86_400);
        assert_eq!(cfg.log_format, "human");
    }

    #[test]
    fn explicit_values_win() {
        let cfg: ServerConfig = toml::from_str(
            "listen_port = 8080\nsession_secret = \"s\"\ntoken_duration_mins = 5\n",
        )
        .unwrap();
        assert_eq!(cfg.listen_port, 8080);
        assert_eq!(cfg.token_duration_secs(), 300);
    }
}
