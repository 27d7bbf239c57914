//! File gate in front of the upload endpoint.
//!
//! Trust is based solely on the declared media type and size. No magic-byte
//! sniffing is performed, so a renamed binary with a `.pdf` extension passes.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ClientError;

/// 10 MiB, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const ACCEPTED_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "application/x-pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-word.document.macroenabled.12",
    "application/vnd.oasis.opendocument.text",
];

const EXTENSION_MEDIA_TYPES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("odt", "application/vnd.oasis.opendocument.text"),
];

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum ValidationError {
    #[error("Invalid file format. Please upload a PDF or DOCX file.")]
    InvalidFormat { media_type: String },

    #[error("File is too large. Maximum size is 10MB.")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Clone)]
enum FileSource {
    Memory(Bytes),
    Disk(PathBuf),
}

/// A file the user picked, before validation.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    name: String,
    media_type: String,
    size: u64,
    source: FileSource,
}

impl CandidateFile {
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        contents: impl Into<Bytes>,
    ) -> Self {
        let contents = contents.into();
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: contents.len() as u64,
            source: FileSource::Memory(contents),
        }
    }

    /// Builds a candidate from disk without reading its contents. The declared
    /// media type comes from the extension unless `media_type` overrides it.
    pub async fn from_path(path: &Path, media_type: Option<&str>) -> Result<Self, ClientError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| ClientError::FileRead {
                path: path.display().to_string(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            media_type: media_type
                .map(str::to_string)
                .unwrap_or_else(|| media_type_for_path(path).to_string()),
            size: metadata.len(),
            source: FileSource::Disk(path.to_path_buf()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Token proving a candidate passed `validate`. Only this module can build one.
#[derive(Debug, Clone)]
pub struct AcceptedFile(CandidateFile);

impl AcceptedFile {
    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn media_type(&self) -> &str {
        self.0.media_type()
    }

    pub fn size(&self) -> u64 {
        self.0.size()
    }

    /// Loads the file body. Disk-backed files are read lazily, at upload time.
    pub async fn contents(&self) -> Result<Bytes, ClientError> {
        match &self.0.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Disk(path) => tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|source| ClientError::FileRead {
                    path: path.display().to_string(),
                    source,
                }),
        }
    }
}

/// Classifies a candidate. Format is checked before size; first failure wins.
pub fn validate(candidate: CandidateFile) -> Result<AcceptedFile, ValidationError> {
    if !is_accepted_media_type(&candidate.media_type) {
        return Err(ValidationError::InvalidFormat {
            media_type: candidate.media_type,
        });
    }

    if candidate.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size: candidate.size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(AcceptedFile(candidate))
}

pub fn is_accepted_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ACCEPTED_MEDIA_TYPES.contains(&essence.as_str())
}

fn media_type_for_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()) else {
        return FALLBACK_MEDIA_TYPE;
    };
    EXTENSION_MEDIA_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, media_type)| *media_type)
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}
