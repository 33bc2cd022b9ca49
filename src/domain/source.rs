use std::fmt;
use std::str::FromStr;

use super::invocation_id::InvocationId;

/// A raw uploaded lecture artifact plus the kind it was declared as.
///
/// The bytes are never mutated after construction. Any on-disk copy made
/// while normalizing is owned by the normalizer call that made it.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub invocation_id: InvocationId,
    pub kind: SourceKind,
    data: Vec<u8>,
}

impl Source {
    pub fn new(data: Vec<u8>, kind: SourceKind) -> Self {
        Self {
            invocation_id: InvocationId::new(),
            kind,
            data,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Document,
    Media,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Media => "media",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Document),
            m if m.starts_with("video/") || m.starts_with("audio/") => Some(Self::Media),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = filename.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Document),
            "mp4" | "mov" | "mkv" | "webm" | "avi" | "m4v" | "mp3" | "wav" | "m4a" => {
                Some(Self::Media)
            }
            _ => None,
        }
    }
}

impl FromStr for SourceKind {
    type Err = UnsupportedKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" | "pdf" => Ok(Self::Document),
            "media" | "video" => Ok(Self::Media),
            other => Err(UnsupportedKind(other.to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported source kind: {0}")]
pub struct UnsupportedKind(pub String);
