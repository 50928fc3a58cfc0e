use std::time::Duration;

use reelmark_core::{Platform, ResultError, ResultErrorCode};
use thiserror::Error;

/// Why a strategy could not produce platform data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("no media id or title in url")]
    MissingId,
    #[error("origin refused the request with status {status}")]
    Blocked { status: u16 },
    #[error("origin returned status {status}")]
    Status { status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Parse(String),
    #[error("no metadata found")]
    NoMetadata,
    #[error("deadline of {0:?} exceeded")]
    Timeout(Duration),
}

impl EnrichmentError {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Failures worth a warning in the logs but never shown to the user.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Network(_) | Self::Parse(_)
        )
    }

    /// The user-facing error for this failure, if it gets one at all.
    pub fn result_error(&self, platform: Platform) -> Option<ResultError> {
        let (code, message) = match self {
            Self::Blocked { .. } => (
                ResultErrorCode::Blocked,
                format!("{} blocks link previews", platform.display_name()),
            ),
            Self::NoMetadata => (
                ResultErrorCode::NoMetadata,
                "No title or image found at this link".to_string(),
            ),
            Self::InvalidUrl(_) => (ResultErrorCode::InvalidUrl, "Not a valid link".to_string()),
            Self::Timeout(_) => (
                ResultErrorCode::Timeout,
                "Looking up this link took too long".to_string(),
            ),
            Self::MissingId | Self::Status { .. } | Self::Network(_) | Self::Parse(_) => {
                return None;
            }
        };
        Some(ResultError { message, code })
    }
}

impl From<reqwest::Error> for EnrichmentError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}
