//! Listing image storage configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the listing image store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Root directory where uploaded images are kept.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Public base URL under which stored images are served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Maximum number of images a listing may carry.
    #[serde(default = "default_max_images")]
    pub max_images_per_listing: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            public_base_url: default_public_base_url(),
            max_images_per_listing: default_max_images(),
        }
    }
}

fn default_root_path() -> String {
    "data/media".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

fn default_max_images() -> usize {
    6
}
