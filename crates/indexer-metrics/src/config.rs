use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Serve `/metrics` at all
    #[serde(default)]
    pub enabled: bool,

    /// Metrics server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Metrics server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9090
}

impl MetricsConfig {
    /// Enabled when `METRICS_ENABLED` is truthy or `METRICS_PORT` is set
    pub fn from_env() -> Self {
        let port_var = std::env::var("METRICS_PORT").ok();
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
            || port_var.is_some();

        Self {
            enabled,
            host: std::env::var("METRICS_HOST").unwrap_or_else(|_| default_host()),
            port: port_var
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_port),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        let config = MetricsConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.address(), "0.0.0.0:9090");
    }
}
