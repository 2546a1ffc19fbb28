use serde::Serialize;

use crate::error::Result;

/// `{"ok": true, "data": ...}` for a command result, `{"ok": false, "error": ...}`
/// for a failure.
#[derive(Debug, Serialize)]
pub struct JsonEnvelope<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> JsonEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn to_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl JsonEnvelope<()> {
    /// Failure envelope carrying the whole error chain on one line.
    pub fn failure(err: &anyhow::Error) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(format!("{err:#}")),
        }
    }
}
