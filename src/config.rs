use crate::modules::drag::engine::AutoscrollSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client settings persisted in `config.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the media server
    pub server_url: String,

    /// Seconds between background playlist refreshes
    pub poll_interval_secs: u64,

    /// Distance from a scroll edge that triggers autoscroll while dragging
    pub autoscroll_margin: f64,

    /// Pixels scrolled per drag move near an edge
    pub autoscroll_step: f64,

    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            poll_interval_secs: 5,
            autoscroll_margin: 50.0,
            autoscroll_step: 10.0,
            request_timeout_secs: 15,
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn autoscroll(&self) -> AutoscrollSettings {
        AutoscrollSettings {
            margin: self.autoscroll_margin,
            step: self.autoscroll_step,
        }
    }

    /// Apply a `--server` override.
    pub fn with_server(mut self, server: Option<String>) -> Self {
        if let Some(url) = server {
            self.server_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let config: ClientConfig = toml::from_str("server_url = \"http://nas:9000\"").unwrap();
        assert_eq!(config.server_url, "http://nas:9000");
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.autoscroll(), AutoscrollSettings::default());
    }

    #[test]
    fn zero_interval_is_raised_to_one_second() {
        let config = ClientConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn server_override() {
        let config = ClientConfig::default().with_server(Some("http://x".into()));
        assert_eq!(config.server_url, "http://x");
        let config = ClientConfig::default().with_server(None);
        assert_eq!(config.server_url, "http://127.0.0.1:8080");
    }
}
