//! Metadata fetch step: pull every post's metadata from the content service
//! and write it to the JSON file the generators read.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::canister::ContentService;
use crate::content::PostMetadata;
use crate::error::Result;
use crate::output::CommandOutput;

/// Payloads above this size risk the gateway's response limit.
pub const PAYLOAD_SOFT_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct FetchReport {
    pub path: PathBuf,
    pub posts: usize,
    pub published: usize,
    pub bytes: usize,
    pub oversized: bool,
}

impl CommandOutput for FetchReport {
    fn human_display(&self) -> String {
        format!(
            "Fetched {} posts ({} published, {:.1} KiB) -> {}",
            self.posts,
            self.published,
            self.bytes as f64 / 1024.0,
            self.path.display()
        )
    }
}

/// Query all post metadata and write it to `out`.
pub fn fetch_metadata<S: ContentService + ?Sized>(service: &S, out: &Path) -> Result<FetchReport> {
    let posts = service.list_post_metadata()?;
    tracing::info!(count = posts.len(), "fetched post metadata");
    write_metadata(&posts, out)
}

/// Serialize `posts` to `out`, replacing any previous file.
pub fn write_metadata(posts: &[PostMetadata], out: &Path) -> Result<FetchReport> {
    let json = serde_json::to_string_pretty(posts)?;
    let bytes = json.len();
    let oversized = bytes > PAYLOAD_SOFT_LIMIT;
    if oversized {
        tracing::warn!(
            bytes,
            limit = PAYLOAD_SOFT_LIMIT,
            "metadata payload exceeds the 2 MiB soft limit; the content service may start truncating responses"
        );
    }

    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, json)?;

    Ok(FetchReport {
        path: out.to_path_buf(),
        posts: posts.len(),
        published: posts.iter().filter(|p| p.is_published()).count(),
        bytes,
        oversized,
    })
}
