use serde::Serialize;

use crate::playback::song::Song;

/// What a listener should render right now, as returned by `GET /musicPlayer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub song: Song,
    /// Playback position in milliseconds, within `[0, song.durationMillis]`.
    pub elapsed_millis: u64,
    pub is_playing: bool,
    /// Unix timestamp in milliseconds at which `elapsed_millis` was computed.
    pub computed_at: u64,
    /// True once the position has reached the end of the song.
    pub finished: bool,
}

/// Linear extrapolation from an anchor, clamped to the song bounds.
///
/// A clock reading earlier than the anchor counts as no time passed.
pub fn extrapolate(anchor_position: u64, anchor_wall_clock: u64, now: u64, duration: u64) -> u64 {
    anchor_position
        .saturating_add(now.saturating_sub(anchor_wall_clock))
        .min(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrapolates_from_anchor() {
        assert_eq!(extrapolate(1_000, 50_000, 52_500, 200_000), 3_500);
    }

    #[test]
    fn clamps_at_duration() {
        assert_eq!(extrapolate(190_000, 0, 60_000, 200_000), 200_000);
    }

    #[test]
    fn clock_behind_anchor_does_not_rewind() {
        assert_eq!(extrapolate(4_000, 10_000, 9_000, 200_000), 4_000);
    }
}
