pub mod clock;
pub mod command;
pub mod player;
pub mod snapshot;
pub mod song;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{PlayerAction, PlayerCommand, UnknownAction};
pub use player::{PartyPlayer, PlayerMode};
pub use snapshot::PlaybackSnapshot;
pub use song::{Song, SongDescriptor, SongError};
