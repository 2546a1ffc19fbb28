pub mod timestamp;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

/// The SEO-relevant subset of a blog post, as stored in the metadata file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub author_name: String,
    pub author_role: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Nanoseconds since the epoch; `None` means draft.
    #[serde(default)]
    pub published_at: Option<u64>,
    /// Nanoseconds since the epoch.
    pub updated_at: u64,
}

impl PostMetadata {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// OG image, else featured image, else `default`.
    pub fn share_image<'a>(&'a self, default: &'a str) -> &'a str {
        self.og_image
            .as_deref()
            .or(self.featured_image.as_deref())
            .unwrap_or(default)
    }
}

/// A content-service category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// One page of published posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostMetadata>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// Only posts that may appear in public artifacts, in their original order.
pub fn published(posts: &[PostMetadata]) -> Vec<&PostMetadata> {
    posts.iter().filter(|p| p.is_published()).collect()
}

/// Read the metadata file written by the fetch step.
pub fn load_metadata(path: &Path) -> Result<Vec<PostMetadata>> {
    let raw = fs::read_to_string(path).map_err(|e| SiteError::Metadata {
        path: path.to_path_buf(),
        message: format!("{e} (run `sitegen fetch` first)"),
    })?;
    serde_json::from_str(&raw).map_err(|e| SiteError::Metadata {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
