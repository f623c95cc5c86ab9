//! Content loader - loads property listings from the content directory

use anyhow::Result;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::frontmatter::ParseError;
use super::{markdown::plain_excerpt, FrontMatter, MarkdownRenderer, Property};
use crate::Site;

/// Why a single listing failed to load. Never crosses the public boundary:
/// callers only see presence or absence, this exists for logging.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("listing file not found")]
    NotFound,
    #[error("failed to read listing file: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    FrontMatter(#[from] ParseError),
}

/// Loads property listings from the content directory
pub struct ContentLoader {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a loader for a site's content directory
    pub fn new(site: &Site) -> Self {
        Self::from_dir(&site.content_dir)
    }

    /// Create a loader for an explicit directory
    pub fn from_dir<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load every listing in the content directory, sorted by date
    /// descending. A missing directory is created and yields an empty list.
    /// Listings that fail to load are logged and omitted.
    pub fn load_all(&self) -> Result<Vec<Property>> {
        if !self.content_dir.exists() {
            fs::create_dir_all(&self.content_dir)?;
            return Ok(Vec::new());
        }

        let mut properties = Vec::new();

        for entry in fs::read_dir(&self.content_dir)?.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.try_load(slug) {
                Ok(property) => properties.push(property),
                Err(e) => {
                    tracing::warn!("Skipping listing {:?}: {}", path, e);
                }
            }
        }

        // Sort by date descending (newest first). A pair where either side
        // lacks a date compares equal; the sort is stable, so such records
        // keep their directory-enumeration order. That makes the overall
        // order enumeration-dependent when dates are missing.
        properties.sort_by(|a, b| match (&a.date, &b.date) {
            (Some(a_date), Some(b_date)) => b_date.cmp(a_date),
            _ => Ordering::Equal,
        });

        Ok(properties)
    }

    /// Load one listing by slug. Every failure mode collapses to `None`;
    /// the cause is only logged.
    pub fn load_by_slug(&self, slug: &str) -> Option<Property> {
        match self.try_load(slug) {
            Ok(property) => Some(property),
            Err(LoadError::NotFound) => {
                tracing::debug!("No listing file for slug {:?}", slug);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to load listing {:?}: {}", slug, e);
                None
            }
        }
    }

    fn try_load(&self, slug: &str) -> Result<Property, LoadError> {
        let path = self.content_dir.join(format!("{}.md", slug));
        let raw = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound
            } else {
                LoadError::Io(e)
            }
        })?;

        let (fm, body) = FrontMatter::parse(&raw)?;
        let content_html = self.renderer.render(body);
        let excerpt = plain_excerpt(body);

        Ok(Property::from_parts(
            slug.to_string(),
            fm,
            content_html,
            excerpt,
        ))
    }
}
