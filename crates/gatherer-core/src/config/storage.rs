//! Content store configuration.

use serde::{Deserialize, Serialize};

/// Which content store implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentBackend {
    /// Blobs are files under [`StorageConfig::upload_dir`].
    Local,
    /// Blobs live in process memory; lost on restart.
    Memory,
}

/// Content store and upload limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Content store implementation.
    #[serde(default = "default_backend")]
    pub backend: ContentBackend,
    /// Base directory for stored blobs. Created, with ancestors, at startup.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Largest accepted upload in bytes (default 50 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            upload_dir: default_upload_dir(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_backend() -> ContentBackend {
    ContentBackend::Local
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MiB
}
