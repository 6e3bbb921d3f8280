//! The `{ code, msg, data }` wrapper every endpoint answers with.

use jobscope_core::Code;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::error::{ApiError, FALLBACK_MESSAGE};

/// Text logged when a failed envelope carries no `msg`.
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    pub code: i32,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn is_ok(&self) -> bool {
        Code::is_ok(self.code)
    }

    /// `data` decoded as `T` when `code` is 200, otherwise an
    /// [`ApiError::Api`] carrying `msg` or [`FALLBACK_MESSAGE`].
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if self.is_ok() {
            return serde_json::from_value(self.data).map_err(|e| {
                error!("Unexpected data in API response: {}", e);
                ApiError::Decode(e)
            });
        }

        let msg = self.msg.filter(|m| !m.is_empty());
        error!("API Error: {}", msg.as_deref().unwrap_or(UNKNOWN_ERROR));
        Err(ApiError::Api {
            code: self.code,
            msg: msg.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        })
    }
}
