use std::{collections::VecDeque, sync::Arc};

use parking_lot::Mutex;
use tracing::debug;

use crate::{
    common::types::PartyId,
    configs::EndOfSongPolicy,
    playback::{
        clock::Clock,
        command::PlayerCommand,
        snapshot::{PlaybackSnapshot, extrapolate},
        song::Song,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerMode {
    #[default]
    Stopped,
    Playing,
}

/// Everything one lock guards: queue, current song, mode and the anchor pair.
///
/// While playing, the position at wall-clock `t` is
/// `anchor_position + (t - anchor_wall_clock)`, clamped to the song length.
/// While stopped, `anchor_position` is the frozen position.
#[derive(Debug, Default)]
struct PlayerState {
    mode: PlayerMode,
    queue: VecDeque<Song>,
    current: Option<Song>,
    anchor_wall_clock: u64,
    anchor_position: u64,
}

impl PlayerState {
    fn position_at(&self, now: u64) -> u64 {
        let Some(song) = &self.current else {
            return 0;
        };
        match self.mode {
            PlayerMode::Playing => extrapolate(
                self.anchor_position,
                self.anchor_wall_clock,
                now,
                song.duration_millis(),
            ),
            PlayerMode::Stopped => self.anchor_position.min(song.duration_millis()),
        }
    }

    fn reanchor(&mut self, position: u64, now: u64) {
        self.anchor_position = position;
        self.anchor_wall_clock = now;
    }

    fn start(&mut self, now: u64) {
        if self.current.is_none() {
            self.current = self.queue.pop_front();
            self.reanchor(0, now);
        } else {
            // Resume (or re-start) from wherever the listeners currently are.
            let position = self.position_at(now);
            self.reanchor(position, now);
        }
        self.mode = PlayerMode::Playing;
    }

    fn stop(&mut self, now: u64) {
        if self.mode == PlayerMode::Stopped {
            return;
        }
        let position = self.position_at(now);
        self.reanchor(position, now);
        self.mode = PlayerMode::Stopped;
    }

    fn add_song(&mut self, song: Song) {
        self.queue.push_back(song);
    }

    fn play_next_song(&mut self, now: u64) {
        self.current = self.queue.pop_front();
        self.reanchor(0, now);
    }

    fn seek(&mut self, target_millis: i64, now: u64) {
        let Some(song) = &self.current else {
            return;
        };
        let position = (target_millis.max(0) as u64).min(song.duration_millis());
        self.reanchor(position, now);
    }

    /// Moves past every song that has already ended by `now`.
    ///
    /// Each following song is anchored at the instant its predecessor
    /// finished, so overflow time carries over instead of being lost.
    fn advance_finished(&mut self, now: u64) {
        if self.mode != PlayerMode::Playing {
            return;
        }
        while let Some(song) = &self.current {
            let remaining = song.duration_millis().saturating_sub(self.anchor_position);
            let ended_at = self.anchor_wall_clock.saturating_add(remaining);
            if now < ended_at {
                break;
            }
            self.current = self.queue.pop_front();
            self.reanchor(0, ended_at);
        }
    }

    fn snapshot(&self, now: u64) -> Option<PlaybackSnapshot> {
        if self.mode != PlayerMode::Playing {
            return None;
        }
        let song = self.current.as_ref()?;
        let elapsed_millis = self.position_at(now);
        Some(PlaybackSnapshot {
            song: song.clone(),
            elapsed_millis,
            is_playing: true,
            computed_at: now,
            finished: elapsed_millis >= song.duration_millis(),
        })
    }
}

/// The playback state machine shared by every listener of one party.
///
/// All operations take the player's lock for their whole duration and
/// read the clock while holding it, so concurrent requests observe a
/// strictly serialized history. None of them fail: empty queues, seeking
/// with nothing loaded and out-of-range offsets are absorbed.
pub struct PartyPlayer {
    party_id: PartyId,
    policy: EndOfSongPolicy,
    clock: Arc<dyn Clock>,
    state: Mutex<PlayerState>,
}

impl PartyPlayer {
    pub fn new(party_id: PartyId, policy: EndOfSongPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            party_id,
            policy,
            clock,
            state: Mutex::new(PlayerState::default()),
        }
    }

    pub fn party_id(&self) -> PartyId {
        self.party_id
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut PlayerState, u64) -> R) -> R {
        let mut state = self.state.lock();
        let now = self.clock.now_ms();
        if self.policy == EndOfSongPolicy::Advance {
            state.advance_finished(now);
        }
        f(&mut state, now)
    }

    pub fn start(&self) {
        self.with_state(|state, now| state.start(now));
        debug!("Party {}: player started", self.party_id);
    }

    pub fn stop(&self) {
        self.with_state(|state, now| state.stop(now));
        debug!("Party {}: player stopped", self.party_id);
    }

    pub fn add_song(&self, song: Song) {
        debug!("Party {}: queued song {}", self.party_id, song.id());
        self.with_state(|state, _| state.add_song(song));
    }

    pub fn play_next_song(&self) {
        let next = self.with_state(|state, now| {
            state.play_next_song(now);
            state.current.as_ref().map(|s| s.id().to_string())
        });
        debug!("Party {}: skipped to {:?}", self.party_id, next);
    }

    pub fn seek(&self, target_millis: i64) {
        self.with_state(|state, now| state.seek(target_millis, now));
        debug!("Party {}: seek to {}ms", self.party_id, target_millis);
    }

    /// Projects the current state. `None` while stopped or with nothing loaded.
    pub fn snapshot(&self) -> Option<PlaybackSnapshot> {
        self.with_state(|state, now| state.snapshot(now))
    }

    pub fn apply(&self, command: PlayerCommand) {
        match command {
            PlayerCommand::Start => self.start(),
            PlayerCommand::Stop => self.stop(),
            PlayerCommand::Skip => self.play_next_song(),
            PlayerCommand::AddSong(song) => self.add_song(song),
            PlayerCommand::Seek(target) => self.seek(target),
        }
    }

    pub fn mode(&self) -> PlayerMode {
        self.with_state(|state, _| state.mode)
    }

    pub fn current_song(&self) -> Option<Song> {
        self.with_state(|state, _| state.current.clone())
    }

    pub fn queue_len(&self) -> usize {
        self.with_state(|state, _| state.queue.len())
    }

    /// Playing with a song loaded, i.e. a read would return a snapshot.
    pub fn is_audible(&self) -> bool {
        self.with_state(|state, _| state.mode == PlayerMode::Playing && state.current.is_some())
    }
}
