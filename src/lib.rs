//! realty-site: marketing site server for a real-estate acquisition business
//!
//! Property listings live as markdown files with YAML front matter under a
//! content directory; leads and status checks are persisted as JSON documents.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod store;

use anyhow::Result;
use std::path::Path;

/// The site application: configuration plus resolved directories
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Property listing directory
    pub content_dir: std::path::PathBuf,
    /// Document store directory
    pub data_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let data_dir = base_dir.join(&config.data_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            data_dir,
        })
    }
}
