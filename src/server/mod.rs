pub mod app_state;
pub mod party_registry;

pub use app_state::AppState;
pub use party_registry::{Party, PartyRegistry};
