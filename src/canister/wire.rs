//! Wire encodings used by the content service's JSON query gateway.
//!
//! The gateway mirrors the canister's native types: 64-bit naturals may be
//! sent as JSON strings (they overflow a double), and optional values arrive
//! as zero- or one-element arrays. Everything here normalizes into the plain
//! types in [`crate::content`].

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use crate::content::{Category, PostMetadata};
use crate::error::{Result, SiteError};

/// A 64-bit natural, accepted as a JSON number or a decimal string
/// (`"1700000000000000000"` or `"1_700_000_000_000_000_000"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nat64(pub u64);

#[derive(Deserialize)]
#[serde(untagged)]
enum Nat64Repr {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Nat64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Nat64Repr::deserialize(deserializer)? {
            Nat64Repr::Number(n) => Ok(Nat64(n)),
            Nat64Repr::Text(s) => s
                .trim()
                .replace('_', "")
                .parse()
                .map(Nat64)
                .map_err(|e| de::Error::custom(format!("invalid nat64 '{s}': {e}"))),
        }
    }
}

/// An optional value, accepted as `[]` / `[value]` or as `null` / `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Opt<T>(pub Option<T>);

impl<T> Default for Opt<T> {
    fn default() -> Self {
        Opt(None)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptRepr<T> {
    Wrapped(Vec<T>),
    Bare(Option<T>),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Opt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match OptRepr::<T>::deserialize(deserializer)? {
            OptRepr::Wrapped(mut values) => {
                if values.len() > 1 {
                    return Err(de::Error::custom(format!(
                        "optional wrapper holds {} values",
                        values.len()
                    )));
                }
                Ok(Opt(values.pop()))
            }
            OptRepr::Bare(value) => Ok(Opt(value)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemotePostMetadata {
    pub id: Nat64,
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
    pub og_image: Opt<String>,
    #[serde(default)]
    pub featured_image: Opt<String>,
    #[serde(default)]
    pub published_at: Opt<Nat64>,
    pub updated_at: Nat64,
}

impl From<RemotePostMetadata> for PostMetadata {
    fn from(remote: RemotePostMetadata) -> Self {
        Self {
            id: remote.id.0,
            title: remote.title,
            slug: remote.slug,
            excerpt: remote.excerpt,
            author_name: remote.author_name,
            author_role: remote.author_role,
            categories: remote.categories,
            tags: remote.tags,
            og_image: remote.og_image.0,
            featured_image: remote.featured_image.0,
            published_at: remote.published_at.0.map(|n| n.0),
            updated_at: remote.updated_at.0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoteCategory {
    pub id: Nat64,
    pub name: String,
    pub slug: String,
}

impl From<RemoteCategory> for Category {
    fn from(remote: RemoteCategory) -> Self {
        Self {
            id: remote.id.0,
            name: remote.name,
            slug: remote.slug,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemotePostPage {
    pub posts: Vec<RemotePostMetadata>,
    pub total: Nat64,
}

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub method: &'a str,
    pub arg: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryResponse {
    Replied {
        reply: serde_json::Value,
    },
    Rejected {
        #[serde(default)]
        reject_code: Option<u32>,
        reject_message: String,
    },
}

/// Turn a gateway response into the expected reply type.
pub fn decode_reply<T: DeserializeOwned>(method: &str, response: QueryResponse) -> Result<T> {
    match response {
        QueryResponse::Replied { reply } => serde_json::from_value(reply)
            .map_err(|e| SiteError::Transport(format!("{method}: unexpected reply shape: {e}"))),
        QueryResponse::Rejected {
            reject_code,
            reject_message,
        } => Err(SiteError::Rejected {
            method: method.to_string(),
            message: match reject_code {
                Some(code) => format!("[{code}] {reject_message}"),
                None => reject_message,
            },
        }),
    }
}
