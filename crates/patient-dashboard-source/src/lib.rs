//! External user-data source for the patient dashboard.
//!
//! This crate owns everything about the remote demo API: the request
//! configuration, the wire shape of a user record and the HTTP fetch. The core
//! crate only ever sees [`RawUser`] values and a [`SourceError`] on failure.

pub mod client;
pub mod config;
pub mod payload;

pub use client::*;
pub use config::*;
pub use payload::*;

use thiserror::Error;

/// Source errors.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SourceError {
    /// Human-readable message surfaced next to an empty patient list.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::Transport(_) => {
                "Could not reach the patient data service. Please check your connection.".into()
            }
            SourceError::Status { status, reason } => {
                format!("Failed to fetch patients: {} {}", status, reason)
            }
            SourceError::Json(_) | SourceError::InvalidPayload(_) => {
                "Received malformed patient data from the server.".into()
            }
            SourceError::Config(msg) => format!("Patient data source is misconfigured: {}", msg),
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
