use std::sync::Arc;

use axum::{
    extract::{
        Form, OriginalUri, Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, info};

use crate::{
    common::{
        banner::BuildInfo,
        errors::{ApiError, PartyError},
    },
    monitoring::{Stats, collect_stats},
    playback::PlayerAction,
    rest::models::*,
    server::AppState,
};

/// GET /musicPlayer?party-id=...
///
/// 200 with the snapshot, or 204 when nothing is playing.
pub async fn get_player_state(
    OriginalUri(uri): OriginalUri,
    State(state): State<Arc<AppState>>,
    Query(query): Query<PartyQuery>,
) -> Result<Response, ApiError> {
    let path = uri.path();
    let party_id = parse_party_id(&query.party_id).map_err(|e| e.at(path))?;
    let player = state.registry.player(party_id).map_err(|e| e.at(path))?;

    Ok(match player.snapshot() {
        Some(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// POST /musicPlayer
///
/// Applies exactly one action. Parameters come from the query string or a
/// url-encoded body; the query string wins when both carry one. The payload
/// is decoded before the player is touched, so a rejected request leaves the
/// party unchanged.
pub async fn update_player(
    OriginalUri(uri): OriginalUri,
    State(state): State<Arc<AppState>>,
    query: Result<Query<MusicPlayerForm>, QueryRejection>,
    body: Result<Form<MusicPlayerForm>, FormRejection>,
) -> Result<StatusCode, ApiError> {
    let path = uri.path();
    let Query(query) =
        query.map_err(|e| PartyError::invalid("query", e.body_text()).at(path))?;
    let body = match body {
        Ok(Form(body)) => body,
        // No url-encoded body: every parameter must be in the query string.
        Err(FormRejection::InvalidFormContentType(_)) => MusicPlayerForm::default(),
        Err(e) => return Err(PartyError::invalid("form", e.body_text()).at(path)),
    };
    let form = query.or(body);

    let party_id = form.party_id().map_err(|e| e.at(path))?;
    let action = form.action().map_err(|e| e.at(path))?;

    if !state.registry.contains(party_id) {
        return Err(PartyError::NotFound(party_id).at(path));
    }
    let command = form.command(action).map_err(|e| e.at(path))?;
    let player = state.registry.player(party_id).map_err(|e| e.at(path))?;

    debug!("Party {}: {}", party_id, command.action());
    player.apply(command);

    Ok(StatusCode::NO_CONTENT)
}

/// POST /parties
pub async fn create_party(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let party = state.registry.create_party();
    info!("Party {} opened via REST", party.id);
    (
        StatusCode::CREATED,
        Json(CreatedParty {
            party_id: party.id,
            created_at: party.created_at,
        }),
    )
}

/// GET /v1/info
pub async fn get_info(State(state): State<Arc<AppState>>) -> Json<Info> {
    let build = BuildInfo::default();
    Json(Info {
        version: build.version.to_string(),
        build_time: build.build_time,
        git: GitInfo {
            branch: build.branch.to_string(),
            commit: build.commit.to_string(),
            commit_time: build.commit_time,
        },
        end_of_song: state.config.player.end_of_song.as_str().to_string(),
        actions: PlayerAction::ALL.iter().map(|a| a.as_str()).collect(),
    })
}

/// GET /v1/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<Stats> {
    Json(collect_stats(&state))
}
