//! Patrolling enemies
//!
//! A patrol walks along X and turns around once it gets further than `range`
//! from where it started. Patrols are trigger volumes: they never block the
//! player, the trigger resolver turns contact into damage.

use crate::triggers::{LevelRegistry, TriggerKind};
use phi_engine::foundation::math::{sign_or, Vec3};
use phi_engine::physics::{VolumeFlags, VolumeId};

/// One patrolling enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Patrol {
    handle: VolumeId,
    origin: Vec3,
    size: Vec3,
    speed: f32,
    range: f32,
    direction: f32,
}

impl Patrol {
    /// Register a patrol at `origin`, initially walking right
    pub fn spawn(registry: &mut LevelRegistry, origin: Vec3, size: Vec3, speed: f32, range: f32) -> Self {
        let handle = registry.register_owned(origin, size, VolumeFlags::TRIGGER, TriggerKind::Patrol);
        Self {
            handle,
            origin,
            size,
            speed,
            range,
            direction: 1.0,
        }
    }

    /// Registry handle
    pub fn handle(&self) -> VolumeId {
        self.handle
    }

    /// Current walking direction (±1)
    pub fn direction(&self) -> f32 {
        self.direction
    }

    fn step(&mut self, registry: &mut LevelRegistry, delta_time: f32) {
        let mut center = match registry.bounds(self.handle) {
            Some(volume) => volume.center(),
            None => return,
        };

        center.x += self.direction * self.speed * delta_time;
        let offset = center.x - self.origin.x;
        if offset.abs() > self.range {
            self.direction = -self.direction;
            center.x = self.origin.x + sign_or(offset, 1.0) * self.range;
        }
        registry.update(self.handle, center, self.size);
    }
}

/// Every live patrol of the level
#[derive(Debug, Clone, Default)]
pub struct Patrols {
    patrols: Vec<Patrol>,
}

impl Patrols {
    /// No patrols
    pub fn new() -> Self {
        Self::default()
    }

    /// Track another patrol
    pub fn push(&mut self, patrol: Patrol) {
        self.patrols.push(patrol);
    }

    /// Move every patrol and forget the ones destroyed since last tick
    pub fn advance(&mut self, registry: &mut LevelRegistry, delta_time: f32) {
        self.patrols.retain(|patrol| registry.contains(patrol.handle));
        for patrol in &mut self.patrols {
            patrol.step(registry, delta_time);
        }
    }

    /// Patrols still alive as of the last advance
    pub fn iter(&self) -> impl Iterator<Item = &Patrol> {
        self.patrols.iter()
    }

    /// Number of tracked patrols
    pub fn len(&self) -> usize {
        self.patrols.len()
    }

    /// No patrols?
    pub fn is_empty(&self) -> bool {
        self.patrols.is_empty()
    }

    /// Forget every patrol
    pub fn clear(&mut self) {
        self.patrols.clear();
    }
}
