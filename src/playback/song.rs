use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SongError {
    #[error("malformed song descriptor: {0}")]
    Malformed(String),
    #[error("song id must not be empty")]
    EmptyId,
    #[error("song duration must be non-negative, got {0}")]
    NegativeDuration(i64),
}

/// Raw, unvalidated song fields as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDescriptor {
    pub id: String,
    pub title: String,
    pub duration_millis: i64,
    pub source_ref: String,
}

/// A playable track. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SongDescriptor")]
pub struct Song {
    id: String,
    title: String,
    duration_millis: u64,
    source_ref: String,
}

impl Song {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration_millis: i64,
        source_ref: impl Into<String>,
    ) -> Result<Self, SongError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SongError::EmptyId);
        }
        let duration_millis =
            u64::try_from(duration_millis).map_err(|_| SongError::NegativeDuration(duration_millis))?;

        Ok(Self {
            id,
            title: title.into(),
            duration_millis,
            source_ref: source_ref.into(),
        })
    }

    /// Parses and validates a JSON song descriptor.
    pub fn from_json(raw: &str) -> Result<Self, SongError> {
        let descriptor: SongDescriptor =
            serde_json::from_str(raw).map_err(|e| SongError::Malformed(e.to_string()))?;
        Self::try_from(descriptor)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration_millis(&self) -> u64 {
        self.duration_millis
    }

    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }
}

impl TryFrom<SongDescriptor> for Song {
    type Error = SongError;

    fn try_from(d: SongDescriptor) -> Result<Self, Self::Error> {
        Self::new(d.id, d.title, d.duration_millis, d.source_ref)
    }
}
