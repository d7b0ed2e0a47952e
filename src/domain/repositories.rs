//! Domain repository traits - Abstractions for data persistence

use async_trait::async_trait;

/// Durable key-value medium that save slots are written to
///
/// This trait defines the storage contract without specifying the medium
/// (files, browser storage, a database...).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, RepositoryError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), RepositoryError>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Save slot {slot} out of range (0..{max_slots})")]
    InvalidSlot { slot: usize, max_slots: usize },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },

    #[error("Repository unavailable: {reason}")]
    Unavailable { reason: String },
}

impl RepositoryError {
    pub fn io(context: impl std::fmt::Display, error: std::io::Error) -> Self {
        Self::IoError {
            message: format!("{context}: {error}"),
        }
    }
}

