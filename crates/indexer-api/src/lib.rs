pub mod config;
pub mod server;

pub use config::ApiConfig;
pub use server::{ApiServer, StatusResponse};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
