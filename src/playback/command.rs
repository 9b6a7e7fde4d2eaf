use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playback::song::Song;

/// Wire-level action selector of `POST /musicPlayer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerAction {
    StartPlayer,
    StopPlayer,
    SkipSong,
    AddSong,
    SeekTime,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 5] = [
        Self::StartPlayer,
        Self::StopPlayer,
        Self::SkipSong,
        Self::AddSong,
        Self::SeekTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartPlayer => "START_PLAYER",
            Self::StopPlayer => "STOP_PLAYER",
            Self::SkipSong => "SKIP_SONG",
            Self::AddSong => "ADD_SONG",
            Self::SeekTime => "SEEK_TIME",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action: {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for PlayerAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// A fully decoded mutation, ready to be applied to a party player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    Start,
    Stop,
    Skip,
    AddSong(Song),
    /// Target position in milliseconds; clamped by the player.
    Seek(i64),
}

impl PlayerCommand {
    pub fn action(&self) -> PlayerAction {
        match self {
            Self::Start => PlayerAction::StartPlayer,
            Self::Stop => PlayerAction::StopPlayer,
            Self::Skip => PlayerAction::SkipSong,
            Self::AddSong(_) => PlayerAction::AddSong,
            Self::Seek(_) => PlayerAction::SeekTime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        assert_eq!("START_PLAYER".parse::<PlayerAction>(), Ok(PlayerAction::StartPlayer));
        assert_eq!("SEEK_TIME".parse::<PlayerAction>(), Ok(PlayerAction::SeekTime));
    }

    #[test]
    fn action_names_are_case_sensitive() {
        assert_eq!(
            "start_player".parse::<PlayerAction>(),
            Err(UnknownAction("start_player".to_string()))
        );
        assert!("".parse::<PlayerAction>().is_err());
    }

    #[test]
    fn serde_names_match_wire_names() {
        for action in PlayerAction::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn commands_report_their_action() {
        assert_eq!(PlayerCommand::Seek(10).action(), PlayerAction::SeekTime);
        assert_eq!(PlayerCommand::Skip.action(), PlayerAction::SkipSong);
    }
}
