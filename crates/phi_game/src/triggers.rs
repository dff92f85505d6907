//! Trigger volumes and same-tick overlap resolution
//!
//! After the controller publishes the player's position, the resolver queries
//! the registry for trigger volumes touching the player. Pickups are consumed
//! immediately. Everything else reports only when the player starts touching
//! it, so standing inside a hazard hurts once.

use crate::abilities::Ability;
use phi_engine::physics::{BoundsRegistry, Volume, VolumeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Gameplay meaning of a trigger volume, stored as the registry owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerKind {
    /// Adds points
    Collectible {
        /// Score awarded
        points: u32,
    },
    /// Adds one life
    ExtraLife,
    /// Temporary damage immunity
    Invincibility {
        /// Seconds of immunity
        duration: f32,
    },
    /// Grants an ability
    Unlock(Ability),
    /// Damages the player
    Hazard {
        /// Ends the game regardless of lives and invincibility
        instakill: bool,
    },
    /// Wins the game
    Goal,
    /// Patrolling enemy; damages on contact
    Patrol,
    /// Player fireball; never affects the player
    Projectile,
}

impl TriggerKind {
    /// Consumed on first overlap?
    pub fn is_pickup(&self) -> bool {
        matches!(
            self,
            Self::Collectible { .. } | Self::ExtraLife | Self::Invincibility { .. } | Self::Unlock(_)
        )
    }
}

/// Registry type used by the game: every trigger knows its kind
pub type LevelRegistry = BoundsRegistry<TriggerKind>;

/// A trigger the player interacted with this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    /// Trigger handle (already removed for pickups)
    pub id: VolumeId,
    /// What it does
    pub kind: TriggerKind,
}

/// Tracks which triggers the player touched last tick
#[derive(Debug, Clone, Default)]
pub struct TriggerResolver {
    touching: BTreeSet<VolumeId>,
}

impl TriggerResolver {
    /// Create a resolver with no previous contacts
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the triggers overlapping `player` and return their events in
    /// handle order. Pickups are removed from the registry.
    pub fn resolve(&mut self, registry: &mut LevelRegistry, player: VolumeId) -> Vec<TriggerEvent> {
        let (center, size) = match registry.bounds(player) {
            Some(volume) => (volume.center(), volume.size()),
            None => {
                self.touching.clear();
                return Vec::new();
            }
        };

        let mut current = BTreeSet::new();
        let mut events = Vec::new();

        for id in registry.query_filtered(player, center, size, Volume::is_trigger) {
            let kind = match registry.owner(id) {
                Some(&kind) => kind,
                None => continue,
            };

            if kind.is_pickup() {
                registry.remove(id);
                log::debug!("picked up {:?} ({id})", kind);
                events.push(TriggerEvent { id, kind });
                continue;
            }
            if kind == TriggerKind::Projectile {
                continue;
            }

            // Enter events only
            if !self.touching.contains(&id) {
                log::trace!("player entered {:?} ({id})", kind);
                events.push(TriggerEvent { id, kind });
            }
            current.insert(id);
        }

        self.touching = current;
        events
    }

    /// Is the player currently inside this trigger?
    pub fn is_touching(&self, id: VolumeId) -> bool {
        self.touching.contains(&id)
    }

    /// Forget all contacts
    pub fn clear(&mut self) {
        self.touching.clear();
    }
}
