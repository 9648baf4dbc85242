use alloy::network::Ethereum;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{BlockNumberOrTag, Filter, Log};
use indexer_core::{IndexerError, Result};
use indexer_metrics::histograms;
use std::sync::Arc;
use std::time::Instant;

/// Boxed provider trait for HTTP connections
pub type BoxedProvider = Arc<dyn Provider<Ethereum> + Send + Sync>;

/// HTTP JSON-RPC access with timing and error mapping
pub struct ProviderManager {
    http: BoxedProvider,
}

impl ProviderManager {
    pub fn new(http_url: &str) -> Result<Self> {
        let http_url: reqwest::Url = http_url
            .parse()
            .map_err(|e| IndexerError::Rpc(format!("Invalid HTTP URL: {}", e)))?;

        let http = ProviderBuilder::new().connect_http(http_url);

        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// Get HTTP provider reference
    pub fn http(&self) -> &BoxedProvider {
        &self.http
    }

    pub async fn block_number(&self) -> Result<u64> {
        let start = Instant::now();
        let block = self
            .http
            .get_block_number()
            .await
            .map_err(|e| IndexerError::Rpc(e.to_string()))?;
        histograms::rpc_request_duration(start.elapsed(), "eth_blockNumber");
        Ok(block)
    }

    pub async fn logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        let start = Instant::now();
        let logs = self
            .http
            .get_logs(filter)
            .await
            // Debug keeps the node's error body, which carries the range hints
            .map_err(|e| IndexerError::Rpc(format!("{:?}", e)))?;
        histograms::rpc_request_duration(start.elapsed(), "eth_getLogs");
        Ok(logs)
    }

    pub async fn block_timestamp(&self, number: u64) -> Result<u64> {
        let start = Instant::now();
        let block = self
            .http
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .await
            .map_err(|e| IndexerError::Rpc(e.to_string()))?
            .ok_or_else(|| IndexerError::Rpc(format!("Block {} not found", number)))?;
        histograms::rpc_request_duration(start.elapsed(), "eth_getBlockByNumber");
        Ok(block.header.timestamp)
    }
}
