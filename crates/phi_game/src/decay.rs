//! Temporary platform decay
//!
//! The first contact with a temporary platform starts a one-shot timer for it.
//! When the timer runs out the platform goes into the registry's hidden set
//! and stays there until the world is reset.

use phi_engine::physics::{BoundsRegistry, VolumeId};
use std::collections::BTreeMap;

/// Per-handle decay timers
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDecay {
    decay_time: f32,
    timers: BTreeMap<VolumeId, f32>,
}

impl PlatformDecay {
    /// Create an empty table; every platform lasts `decay_time` seconds
    pub fn new(decay_time: f32) -> Self {
        Self {
            decay_time,
            timers: BTreeMap::new(),
        }
    }

    /// Start the timer for `id` unless one already exists.
    ///
    /// Returns `true` if a new timer was started.
    pub fn start(&mut self, id: VolumeId) -> bool {
        if self.timers.contains_key(&id) {
            return false;
        }
        self.timers.insert(id, self.decay_time);
        log::debug!("temporary platform {id} starts decaying ({:.2}s)", self.decay_time);
        true
    }

    /// Has a timer ever been started for `id` (since the last clear)?
    pub fn is_decaying(&self, id: VolumeId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Seconds left for `id`; `Some(0.0)` once it has expired
    pub fn remaining(&self, id: VolumeId) -> Option<f32> {
        self.timers.get(&id).copied()
    }

    /// Count down every timer and hide the platforms whose timer ran out.
    ///
    /// Expired entries stay in the table at zero so the same platform never
    /// starts a second timer. Returns the handles hidden this tick.
    pub fn tick<O>(&mut self, delta_time: f32, registry: &mut BoundsRegistry<O>) -> Vec<VolumeId> {
        let mut expired = Vec::new();
        for (&id, remaining) in self.timers.iter_mut() {
            if *remaining <= 0.0 {
                continue;
            }
            *remaining -= delta_time;
            if *remaining <= 0.0 {
                *remaining = 0.0;
                expired.push(id);
            }
        }

        for &id in &expired {
            registry.hide(id);
        }
        expired
    }

    /// Drop every timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Number of platforms that have started decaying
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// No timers?
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
