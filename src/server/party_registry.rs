use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use rand::Rng;
use tracing::{debug, info};

use crate::{
    common::{errors::PartyError, types::PartyId},
    configs::EndOfSongPolicy,
    playback::{PartyPlayer, clock::Clock},
};

/// Party ids stay within the range a JSON number can carry exactly.
const MAX_PARTY_ID: u64 = (1 << 53) - 1;

#[derive(Debug, Clone)]
pub struct Party {
    pub id: PartyId,
    /// Unix timestamp in milliseconds.
    pub created_at: u64,
}

/// Known parties and their lazily created players.
///
/// Players are created on first access and live as long as the registry;
/// nothing removes them. First creation goes through the map's entry API,
/// so concurrent first requests for a party all get the same player.
pub struct PartyRegistry {
    parties: DashMap<PartyId, Party>,
    players: DashMap<PartyId, Arc<PartyPlayer>>,
    policy: EndOfSongPolicy,
    clock: Arc<dyn Clock>,
}

impl PartyRegistry {
    pub fn new(policy: EndOfSongPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            parties: DashMap::new(),
            players: DashMap::new(),
            policy,
            clock,
        }
    }

    /// Registers a party under a fresh random id.
    pub fn create_party(&self) -> Party {
        let mut rng = rand::thread_rng();
        loop {
            let id = PartyId(rng.gen_range(1..=MAX_PARTY_ID));
            if let Entry::Vacant(slot) = self.parties.entry(id) {
                let party = self.new_party(id);
                slot.insert(party.clone());
                info!("Created party {}", id);
                return party;
            }
        }
    }

    /// Registers `id` if it is not known yet. Returns whether it was added.
    pub fn register_party(&self, id: PartyId) -> bool {
        match self.parties.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(self.new_party(id));
                info!("Registered party {}", id);
                true
            }
        }
    }

    fn new_party(&self, id: PartyId) -> Party {
        Party {
            id,
            created_at: self.clock.now_ms(),
        }
    }

    pub fn contains(&self, id: PartyId) -> bool {
        self.parties.contains_key(&id)
    }

    pub fn party(&self, id: PartyId) -> Option<Party> {
        self.parties.get(&id).map(|p| p.value().clone())
    }

    pub fn party_count(&self) -> usize {
        self.parties.len()
    }

    /// Returns the party's player, creating it on first use.
    pub fn player(&self, id: PartyId) -> Result<Arc<PartyPlayer>, PartyError> {
        if !self.contains(id) {
            return Err(PartyError::NotFound(id));
        }
        if let Some(player) = self.players.get(&id) {
            return Ok(player.value().clone());
        }

        let player = self
            .players
            .entry(id)
            .or_insert_with(|| {
                debug!("Creating player for party {}", id);
                Arc::new(PartyPlayer::new(id, self.policy, self.clock.clone()))
            })
            .value()
            .clone();
        Ok(player)
    }

    /// All players created so far.
    pub fn players(&self) -> Vec<Arc<PartyPlayer>> {
        self.players.iter().map(|p| p.value().clone()).collect()
    }
}
