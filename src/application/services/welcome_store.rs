//! Per-group welcome text with a configured fallback

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::errors::{StorageError, ValidationError};
use crate::domain::traits::WelcomeBacking;

/// Group id -> welcome text, mirrored to a backing store after every change.
///
/// The default text comes from configuration and is never persisted.
pub struct WelcomeStore {
    entries: HashMap<String, String>,
    default_text: String,
    backing: Arc<dyn WelcomeBacking>,
}

impl WelcomeStore {
    /// Starts empty; call [`WelcomeStore::load`] to pull persisted entries.
    pub fn new(default_text: impl Into<String>, backing: Arc<dyn WelcomeBacking>) -> Self {
        Self {
            entries: HashMap::new(),
            default_text: default_text.into(),
            backing,
        }
    }

    /// Prepare the backing, e.g. create its directory
    pub async fn init(&self) -> Result<(), StorageError> {
        self.backing.init().await
    }

    /// Replace the in-memory mapping with what the backing holds.
    ///
    /// Nothing persisted yet means an empty mapping. On error the mapping is
    /// also left empty and the error is handed back for the caller to log.
    pub async fn load(&mut self) -> Result<usize, StorageError> {
        match self.backing.read().await {
            Ok(Some(entries)) => {
                let total = entries.len();
                self.entries = entries
                    .into_iter()
                    .filter(|(_, text)| !text.trim().is_empty())
                    .collect();
                if self.entries.len() < total {
                    tracing::warn!("Skipped {} blank welcome entries", total - self.entries.len());
                }
                Ok(self.entries.len())
            }
            Ok(None) => {
                self.entries.clear();
                Ok(0)
            }
            Err(e) => {
                self.entries.clear();
                Err(e)
            }
        }
    }

    /// Write the whole mapping out
    pub async fn save(&self) -> Result<(), StorageError> {
        self.backing.write(&self.entries).await?;
        tracing::debug!("Saved welcome config for {} groups", self.entries.len());
        Ok(())
    }

    pub fn get_welcome(&self, group_id: &str) -> &str {
        self.entries
            .get(group_id)
            .map(String::as_str)
            .unwrap_or(&self.default_text)
    }

    /// Store `text` as given (untrimmed) and persist.
    ///
    /// A failed save is logged; the new text stays in memory either way.
    pub async fn set_welcome(&mut self, group_id: &str, text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyWelcome);
        }

        self.entries.insert(group_id.to_string(), text.to_string());
        if let Err(e) = self.save().await {
            tracing::error!("Failed to save welcome config: {}", e);
        }
        Ok(())
    }

    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
