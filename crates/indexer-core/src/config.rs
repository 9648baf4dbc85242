use crate::error::{IndexerError, Result};
use alloy_primitives::Address;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Deployment configuration loaded from JSON file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DeploymentConfig {
    pub creature_factory: Address,
    #[serde(rename = "startBlock")]
    pub start_block: u64,
}

/// Runtime configuration from environment variables
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub chain_id: u64,
    pub rpc_url: String,
}

/// Complete indexer configuration
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub chain_id: u64,
    pub rpc_url: String,
    /// Factory that emits TokenCreated / TokenInitialized
    pub factory: Address,
    pub start_block: u64,
    pub sync: SyncConfig,
    pub poll: PollConfig,
}

/// Retry behaviour for RPC fetches
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl SyncConfig {
    pub fn from_env() -> Self {
        let retry_attempts = env::var("SYNC_RETRY_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let retry_delay_ms = env::var("SYNC_RETRY_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);

        Self {
            retry_attempts,
            retry_delay_ms,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Head-following configuration once historical sync is done
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between head checks (default: 2000)
    pub interval_ms: u64,
    /// Blocks to stay behind head (default: 0)
    pub confirmations: u64,
}

impl PollConfig {
    pub fn from_env() -> Self {
        let interval_ms = env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2000);

        let confirmations = env::var("POLL_CONFIRMATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        Self {
            interval_ms,
            confirmations,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let chain_id = env::var("CHAIN_ID")
            .map_err(|_| IndexerError::MissingEnvVar("CHAIN_ID".to_string()))?
            .parse::<u64>()
            .map_err(|_| IndexerError::MissingEnvVar("CHAIN_ID (invalid format)".to_string()))?;

        let rpc_url = Self::sanitize_url(
            env::var("RPC_URL").map_err(|_| IndexerError::MissingEnvVar("RPC_URL".to_string()))?,
        );

        Ok(Self { chain_id, rpc_url })
    }

    /// Sanitize URL by removing surrounding quotes and whitespace
    fn sanitize_url(url: String) -> String {
        let trimmed = url.trim();
        let without_quotes = if trimmed.starts_with('"') && trimmed.ends_with('"') {
            &trimmed[1..trimmed.len() - 1]
        } else if trimmed.starts_with('\'') && trimmed.ends_with('\'') {
            &trimmed[1..trimmed.len() - 1]
        } else {
            trimmed
        };
        without_quotes.to_string()
    }
}

impl DeploymentConfig {
    /// Load deployment configuration from JSON file
    pub fn load(chain_id: u64) -> Result<Self> {
        let path = Self::deployment_path(chain_id);
        let content = fs::read_to_string(&path)
            .map_err(|_| IndexerError::DeploymentFileNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| IndexerError::DeploymentParseError(e.to_string()))
    }

    fn deployment_path(chain_id: u64) -> PathBuf {
        PathBuf::from(format!("deployments/{}.json", chain_id))
    }
}

impl IndexerConfig {
    /// Load complete configuration from environment and deployment file
    pub fn load() -> Result<Self> {
        let env_config = EnvConfig::load()?;
        let deployment = DeploymentConfig::load(env_config.chain_id)?;

        Ok(Self {
            chain_id: env_config.chain_id,
            rpc_url: env_config.rpc_url,
            factory: deployment.creature_factory,
            start_block: deployment.start_block,
            sync: SyncConfig::default(),
            poll: PollConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_deployment() {
        let json = r#"{
            "CREATURE_FACTORY": "0x00000000000000000000000000000000000000f1",
            "startBlock": 1200
        }"#;
        let deployment = DeploymentConfig::parse(json).unwrap();
        assert_eq!(deployment.start_block, 1200);
        assert_eq!(
            deployment.creature_factory,
            "0x00000000000000000000000000000000000000f1"
                .parse::<Address>()
                .unwrap()
        );
    }

    #[test]
    fn test_parse_deployment_rejects_missing_factory() {
        let err = DeploymentConfig::parse(r#"{"startBlock": 1}"#).unwrap_err();
        assert!(matches!(err, IndexerError::DeploymentParseError(_)));
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(
            EnvConfig::sanitize_url("  \"http://localhost:8545\" ".to_string()),
            "http://localhost:8545"
        );
        assert_eq!(
            EnvConfig::sanitize_url("'http://rpc'".to_string()),
            "http://rpc"
        );
    }
}
