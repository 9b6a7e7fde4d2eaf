use serde::Serialize;

use crate::server::AppState;

/// Server statistics, as returned by `GET /v1/stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub parties: usize,
    /// Parties whose player has been created by a request.
    pub players: usize,
    /// Players that would currently return a snapshot.
    pub playing_players: usize,
    pub queued_songs: usize,
    /// Milliseconds since startup.
    pub uptime: u64,
}

pub fn collect_stats(state: &AppState) -> Stats {
    let players = state.registry.players();
    let playing_players = players.iter().filter(|p| p.is_audible()).count();
    let queued_songs = players.iter().map(|p| p.queue_len()).sum();

    Stats {
        parties: state.registry.party_count(),
        players: players.len(),
        playing_players,
        queued_songs,
        uptime: state.start_time.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::types::PartyId,
        configs::Config,
        playback::Song,
    };

    #[test]
    fn counts_parties_players_and_queue() {
        let mut config = Config::default();
        config.parties.seed = vec![1, 2, 3];
        let state = AppState::new(config);

        let one = state.registry.player(PartyId(1)).unwrap();
        one.add_song(Song::new("a", "A", 1_000_000, "ref").unwrap());
        one.add_song(Song::new("b", "B", 1_000_000, "ref").unwrap());
        one.start();
        state.registry.player(PartyId(2)).unwrap();

        let stats = collect_stats(&state);
        assert_eq!(stats.parties, 3);
        assert_eq!(stats.players, 2);
        assert_eq!(stats.playing_players, 1);
        assert_eq!(stats.queued_songs, 1);
    }
}
