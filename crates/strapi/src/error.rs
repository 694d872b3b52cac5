use serde::{Serialize, Serializer};
use std::time::Duration;

/// Failures talking to the CMS. "Not found" is not one of them: lookups
/// return `Ok(None)` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// ネットワーク層の失敗 (接続拒否, DNS, 切断など)
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// 2xx 以外のステータス
    #[error("{message} (HTTP {status})")]
    Status {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// レスポンス全体が期待した形ではない
    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl Serialize for FetchError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
