use serde::{Deserialize, Serialize};

use crate::{
    common::{errors::PartyError, types::PartyId},
    playback::{PlayerAction, PlayerCommand, Song},
};

pub const PARTY_ID_PARAM: &str = "party-id";
pub const ACTION_PARAM: &str = "action";
pub const SONG_JSON_PARAM: &str = "song-json";
pub const SEEK_TIME_PARAM: &str = "seek-time";

/// Query parameters of `GET /musicPlayer`.
#[derive(Debug, Default, Deserialize)]
pub struct PartyQuery {
    #[serde(rename = "party-id")]
    pub party_id: Option<String>,
}

/// Parameters of `POST /musicPlayer`, taken from the query string and the
/// url-encoded body alike.
#[derive(Debug, Default, Deserialize)]
pub struct MusicPlayerForm {
    #[serde(rename = "party-id")]
    pub party_id: Option<String>,
    pub action: Option<String>,
    /// JSON song descriptor, required by `ADD_SONG`.
    #[serde(rename = "song-json", alias = "youtube-song-json")]
    pub song_json: Option<String>,
    /// Target offset in milliseconds, required by `SEEK_TIME`.
    #[serde(rename = "seek-time")]
    pub seek_time: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, PartyError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(PartyError::MissingParameter(name))
}

pub fn parse_party_id(value: &Option<String>) -> Result<PartyId, PartyError> {
    required(value, PARTY_ID_PARAM)?
        .parse::<PartyId>()
        .map_err(|e| PartyError::invalid(PARTY_ID_PARAM, e))
}

impl MusicPlayerForm {
    /// Fills each parameter missing from `self` with the one from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            party_id: self.party_id.or(fallback.party_id),
            action: self.action.or(fallback.action),
            song_json: self.song_json.or(fallback.song_json),
            seek_time: self.seek_time.or(fallback.seek_time),
        }
    }

    pub fn party_id(&self) -> Result<PartyId, PartyError> {
        parse_party_id(&self.party_id)
    }

    pub fn action(&self) -> Result<PlayerAction, PartyError> {
        required(&self.action, ACTION_PARAM)?
            .parse::<PlayerAction>()
            .map_err(|e| PartyError::invalid(ACTION_PARAM, e))
    }

    /// Decodes the action's payload into a command. Nothing is applied here.
    pub fn command(&self, action: PlayerAction) -> Result<PlayerCommand, PartyError> {
        Ok(match action {
            PlayerAction::StartPlayer => PlayerCommand::Start,
            PlayerAction::StopPlayer => PlayerCommand::Stop,
            PlayerAction::SkipSong => PlayerCommand::Skip,
            PlayerAction::AddSong => {
                let raw = required(&self.song_json, SONG_JSON_PARAM)?;
                PlayerCommand::AddSong(Song::from_json(raw)?)
            }
            PlayerAction::SeekTime => {
                let target = required(&self.seek_time, SEEK_TIME_PARAM)?
                    .parse::<i64>()
                    .map_err(|e| PartyError::invalid(SEEK_TIME_PARAM, e))?;
                PlayerCommand::Seek(target)
            }
        })
    }
}

/// Response of `POST /parties`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedParty {
    pub party_id: PartyId,
    pub created_at: u64,
}

/// Response of `GET /v1/info`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub version: String,
    pub build_time: u64,
    pub git: GitInfo,
    pub end_of_song: String,
    pub actions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitInfo {
    pub branch: String,
    pub commit: String,
    pub commit_time: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::SongError;

    fn form(action: &str) -> MusicPlayerForm {
        MusicPlayerForm {
            party_id: Some("12".into()),
            action: Some(action.into()),
            ..Default::default()
        }
    }

    #[test]
    fn party_id_must_be_present_and_numeric() {
        assert_eq!(parse_party_id(&Some("12".into())).unwrap(), PartyId(12));
        assert!(matches!(
            parse_party_id(&None),
            Err(PartyError::MissingParameter("party-id"))
        ));
        assert!(matches!(
            parse_party_id(&Some("twelve".into())),
            Err(PartyError::InvalidInput { name: "party-id", .. })
        ));
    }

    #[test]
    fn query_parameters_take_precedence_over_body() {
        let query = MusicPlayerForm {
            party_id: Some("7".into()),
            ..Default::default()
        };
        let merged = query.or(form("START_PLAYER"));
        assert_eq!(merged.party_id().unwrap(), PartyId(7));
        assert_eq!(merged.action().unwrap(), PlayerAction::StartPlayer);
        assert!(merged.song_json.is_none());
    }

    #[test]
    fn unknown_action_is_invalid_input() {
        assert!(matches!(
            form("PAUSE").action(),
            Err(PartyError::InvalidInput { name: "action", .. })
        ));
    }

    #[test]
    fn simple_actions_need_no_payload() {
        let f = form("SKIP_SONG");
        assert_eq!(f.command(f.action().unwrap()).unwrap(), PlayerCommand::Skip);
    }

    #[test]
    fn seek_requires_an_integer_offset() {
        let mut f = form("SEEK_TIME");
        assert!(matches!(
            f.command(PlayerAction::SeekTime),
            Err(PartyError::MissingParameter("seek-time"))
        ));

        f.seek_time = Some("1.5".into());
        assert!(matches!(
            f.command(PlayerAction::SeekTime),
            Err(PartyError::InvalidInput { name: "seek-time", .. })
        ));

        f.seek_time = Some("-500".into());
        assert_eq!(
            f.command(PlayerAction::SeekTime).unwrap(),
            PlayerCommand::Seek(-500)
        );
    }

    #[test]
    fn add_song_validates_descriptor() {
        let mut f = form("ADD_SONG");
        assert!(matches!(
            f.command(PlayerAction::AddSong),
            Err(PartyError::MissingParameter("song-json"))
        ));

        f.song_json = Some(r#"{"id":"x","title":"t","durationMillis":-5,"sourceRef":"r"}"#.into());
        assert!(matches!(
            f.command(PlayerAction::AddSong),
            Err(PartyError::InvalidSong(SongError::NegativeDuration(-5)))
        ));

        f.song_json = Some(r#"{"id":"x","title":"t","durationMillis":5,"sourceRef":"r"}"#.into());
        assert!(matches!(
            f.command(PlayerAction::AddSong),
            Ok(PlayerCommand::AddSong(song)) if song.id() == "x"
        ));
    }
}
