//! File-based storage implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::traits::WelcomeBacking;
use crate::application::errors::StorageError;

/// File name of the welcome mapping inside the data directory
pub const WELCOME_FILE: &str = "group_welcomes.json";

/// JSON file holding one flat `{ group_id: text }` object
pub struct JsonFileBacking {
    base_path: PathBuf,
    file: PathBuf,
}

impl JsonFileBacking {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        Self {
            file: base_path.join(WELCOME_FILE),
            base_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file
    }
}

#[async_trait]
impl WelcomeBacking for JsonFileBacking {
    /// Creates the data directory
    async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    async fn read(&self) -> Result<Option<HashMap<String, String>>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.file).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn write(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        // Sorted keys keep the file diffable
        let sorted: BTreeMap<&String, &String> = entries.iter().collect();
        let json = serde_json::to_string_pretty(&sorted)?;
        tokio::fs::write(&self.file, json).await?;
        Ok(())
    }
}

/// In-memory backing for development and tests
#[derive(Clone, Default)]
pub struct MemoryBacking {
    data: Arc<RwLock<Option<HashMap<String, String>>>>,
}

impl MemoryBacking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: HashMap<String, String>) -> Self {
        Self {
            data: Arc::new(RwLock::new(Some(entries))),
        }
    }

    /// What was last written, if anything
    pub async fn snapshot(&self) -> Option<HashMap<String, String>> {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl WelcomeBacking for MemoryBacking {
    async fn read(&self) -> Result<Option<HashMap<String, String>>, StorageError> {
        Ok(self.data.read().await.clone())
    }

    async fn write(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        *self.data.write().await = Some(entries.clone());
        Ok(())
    }
}
