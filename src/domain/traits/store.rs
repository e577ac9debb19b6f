use async_trait::async_trait;
use std::collections::HashMap;
use crate::application::errors::StorageError;

/// Durable home of the group -> welcome text mapping
#[async_trait]
pub trait WelcomeBacking: Send + Sync {
    /// Prepare the backing before first use
    async fn init(&self) -> Result<(), StorageError> {
        Ok(())
    }

    /// `Ok(None)` means nothing has been persisted yet
    async fn read(&self) -> Result<Option<HashMap<String, String>>, StorageError>;

    /// Replaces whatever was persisted with `entries`
    async fn write(&self, entries: &HashMap<String, String>) -> Result<(), StorageError>;
}
