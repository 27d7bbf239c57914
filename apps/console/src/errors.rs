use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Client-level error type for every network-bound operation.
/// Validation failures are a separate type (`ValidationError`) because they
/// never leave the file picker.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Server returned {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("Invalid response body: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No file selected")]
    NoFileStaged,

    #[error("An upload is already in progress")]
    UploadInProgress,
}

/// Diagnostic classification kept alongside the collapsed user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FailureKind {
    Timeout,
    Transport,
    Server { status: u16 },
    InvalidResponse,
    Precondition,
}

impl ClientError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Timeout(_) => FailureKind::Timeout,
            ClientError::Transport(_) | ClientError::FileRead { .. } => FailureKind::Transport,
            ClientError::Server { status, .. } => FailureKind::Server { status: *status },
            ClientError::InvalidResponse(_) => FailureKind::InvalidResponse,
            ClientError::NoFileStaged | ClientError::UploadInProgress => FailureKind::Precondition,
        }
    }

    /// Maps a reqwest failure, keeping timeouts distinct from other transport errors.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout)
        } else {
            ClientError::Transport(err)
        }
    }
}

/// The three network-bound operations, used to pick the banner message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListResumes,
    Upload,
    FetchDetail,
}

impl Operation {
    /// Transport and server failures collapse into one message per operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListResumes => "Failed to fetch resumes. Please try again.",
            Operation::Upload => "Failed to upload resume. Please try again.",
            Operation::FetchDetail => "Failed to fetch resume details. Please try again.",
        }
    }

    pub fn message_for(self, err: &ClientError) -> String {
        match err {
            ClientError::NoFileStaged | ClientError::UploadInProgress => err.to_string(),
            _ => self.failure_message().to_string(),
        }
    }
}
