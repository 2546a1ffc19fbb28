//! Read-only client for the blog content canister.
//!
//! Reads go through a JSON query gateway:
//! `POST {host}/api/canister/{canister_id}/query` with `{"method", "arg"}`.
//! Queries are anonymous and never mutate state. One [`ContentClient`] is
//! built per command invocation and passed to whatever needs it.

pub mod wire;

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::content::{Category, PostMetadata, PostPage};
use crate::error::{Result, SiteError};
use wire::{Opt, QueryRequest, QueryResponse, RemoteCategory, RemotePostMetadata, RemotePostPage};

const USER_AGENT: &str = concat!("sitegen/", env!("CARGO_PKG_VERSION"));

/// The read interface of the content service.
pub trait ContentService {
    /// Every post's metadata, drafts included.
    fn list_post_metadata(&self) -> Result<Vec<PostMetadata>>;

    /// One page (1-based) of published posts.
    fn list_published_posts(&self, page: u32, per_page: u32) -> Result<PostPage>;

    fn get_post_by_slug(&self, slug: &str) -> Result<Option<PostMetadata>>;

    fn list_categories(&self) -> Result<Vec<Category>>;
}

pub struct ContentClient {
    agent: ureq::Agent,
    endpoint: String,
}

impl ContentClient {
    pub fn new(host: &str, canister_id: &str) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            endpoint: query_endpoint(host, canister_id),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query<T: DeserializeOwned>(&self, method: &str, arg: serde_json::Value) -> Result<T> {
        tracing::debug!(method, endpoint = %self.endpoint, "content service query");
        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("User-Agent", USER_AGENT)
            .send_json(QueryRequest { method, arg })
            .map_err(|e| SiteError::Transport(format!("{method}: {e}")))?;
        let envelope: QueryResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| SiteError::Transport(format!("{method}: malformed response: {e}")))?;
        wire::decode_reply(method, envelope)
    }
}

impl ContentService for ContentClient {
    fn list_post_metadata(&self) -> Result<Vec<PostMetadata>> {
        let posts: Vec<RemotePostMetadata> = self.query("list_post_metadata", json!(null))?;
        Ok(posts.into_iter().map(PostMetadata::from).collect())
    }

    fn list_published_posts(&self, page: u32, per_page: u32) -> Result<PostPage> {
        let remote: RemotePostPage = self.query(
            "list_published_posts",
            json!({ "page": page, "per_page": per_page }),
        )?;
        Ok(PostPage {
            posts: remote.posts.into_iter().map(PostMetadata::from).collect(),
            total: remote.total.0,
            page,
            per_page,
        })
    }

    fn get_post_by_slug(&self, slug: &str) -> Result<Option<PostMetadata>> {
        let remote: Opt<RemotePostMetadata> =
            self.query("get_post_by_slug", json!({ "slug": slug }))?;
        Ok(remote.0.map(PostMetadata::from))
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let remote: Vec<RemoteCategory> = self.query("list_categories", json!(null))?;
        Ok(remote.into_iter().map(Category::from).collect())
    }
}

fn query_endpoint(host: &str, canister_id: &str) -> String {
    format!(
        "{}/api/canister/{}/query",
        host.trim_end_matches('/'),
        canister_id.trim()
    )
}
