//! # Search Client
//!
//! Main library for the document search client binary.
//!
//! This crate provides the configuration, logging setup and dependency
//! wiring used to run searches from the command line.

pub mod config;
pub mod telemetry;

pub use config::{Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur during client initialization or execution.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] search_client_repository::SearchError),
}

impl ClientError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
