pub mod base;
pub mod logging;
pub mod parties;
pub mod player;
pub mod server;

pub use base::*;
pub use logging::*;
pub use parties::*;
pub use player::*;
pub use server::*;
