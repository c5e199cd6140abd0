use std::path::{Path, PathBuf};

use log::info;
use tokio::fs;
use uuid::Uuid;

/// Writes album covers to a local directory that is also served statically.
#[derive(Debug, Clone)]
pub struct CoverStorage {
    base_path: PathBuf,
}

impl CoverStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub async fn initialize(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.base_path).await
    }

    /// Stores the bytes under a generated name and returns that name. Only
    /// the extension of the client's filename is kept.
    pub async fn write_file(&self, original_name: Option<&str>, data: &[u8]) -> std::io::Result<String> {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()));
        let filename = match extension {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        self.initialize().await?;
        fs::write(self.base_path.join(&filename), data).await?;
        info!("Stored cover {} ({} bytes)", filename, data.len());
        Ok(filename)
    }
}
