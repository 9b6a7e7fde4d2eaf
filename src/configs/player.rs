use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PlayerConfig {
    #[serde(default)]
    pub end_of_song: EndOfSongPolicy,
}

/// What a playing party does once the current song runs past its duration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EndOfSongPolicy {
    /// Elapsed time sticks at the song's duration until someone skips.
    #[default]
    Hold,
    /// Move on to the next queued song, carrying over the time already played past the end.
    Advance,
}

impl EndOfSongPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Advance => "advance",
        }
    }
}
