//! Fireball projectiles

use crate::config::AbilityConfig;
use crate::triggers::{LevelRegistry, TriggerKind};
use phi_engine::foundation::math::Vec3;
use phi_engine::foundation::time::Countdown;
use phi_engine::physics::{Volume, VolumeFlags, VolumeId};

/// Request from the controller to fire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    /// Spawn center
    pub origin: Vec3,
    /// Travel direction along X (±1)
    pub direction: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct Projectile {
    handle: VolumeId,
    velocity_x: f32,
    lifetime: Countdown,
}

/// Live fireballs
#[derive(Debug, Clone)]
pub struct Projectiles {
    speed: f32,
    lifetime: f32,
    size: Vec3,
    live: Vec<Projectile>,
}

impl Projectiles {
    /// Empty set using the fireball tuning
    pub fn new(config: &AbilityConfig) -> Self {
        Self {
            speed: config.fireball_speed,
            lifetime: config.fireball_lifetime,
            size: Vec3::repeat(config.fireball_size),
            live: Vec::new(),
        }
    }

    /// Register a new fireball
    pub fn spawn(&mut self, registry: &mut LevelRegistry, launch: Launch) -> VolumeId {
        let handle = registry.register_owned(launch.origin, self.size, VolumeFlags::TRIGGER, TriggerKind::Projectile);
        log::debug!("fireball {handle} launched at {:?}", launch.origin);
        self.live.push(Projectile {
            handle,
            velocity_x: launch.direction * self.speed,
            lifetime: Countdown::started(self.lifetime),
        });
        handle
    }

    /// Move every fireball. A fireball touching a patrol destroys it and
    /// itself; expired fireballs are removed. Returns the destroyed patrols.
    pub fn advance(&mut self, registry: &mut LevelRegistry, delta_time: f32) -> Vec<VolumeId> {
        let mut destroyed = Vec::new();
        let size = self.size;

        self.live.retain_mut(|projectile| {
            let center = match registry.bounds(projectile.handle) {
                Some(volume) => volume.center(),
                None => return false,
            };
            if projectile.lifetime.tick(delta_time) {
                registry.remove(projectile.handle);
                return false;
            }

            let center = center + Vec3::new(projectile.velocity_x * delta_time, 0.0, 0.0);
            registry.update(projectile.handle, center, size);

            let victim = registry
                .query_filtered(projectile.handle, center, size, Volume::is_trigger)
                .into_iter()
                .find(|&id| registry.owner(id) == Some(&TriggerKind::Patrol));
            match victim {
                Some(patrol) => {
                    log::debug!("fireball {} destroyed patrol {patrol}", projectile.handle);
                    registry.remove(patrol);
                    registry.remove(projectile.handle);
                    destroyed.push(patrol);
                    false
                }
                None => true,
            }
        });
        destroyed
    }

    /// Number of live fireballs
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// No live fireballs?
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Forget every fireball without touching the registry
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fire_right(registry: &mut LevelRegistry, projectiles: &mut Projectiles) -> VolumeId {
        projectiles.spawn(
            registry,
            Launch {
                origin: Vec3::zeros(),
                direction: 1.0,
            },
        )
    }

    #[test]
    fn test_fireball_travels_and_expires() {
        let mut registry = LevelRegistry::new();
        let mut projectiles = Projectiles::new(&AbilityConfig::default());
        let fireball = fire_right(&mut registry, &mut projectiles);

        projectiles.advance(&mut registry, 0.5);
        assert_relative_eq!(registry.bounds(fireball).unwrap().center().x, 5.0);
        assert_relative_eq!(registry.bounds(fireball).unwrap().size().x, 0.5);

        projectiles.advance(&mut registry, 2.0);
        assert_eq!(projectiles.len(), 1);
        projectiles.advance(&mut registry, 0.5);
        assert!(projectiles.is_empty());
        assert!(!registry.contains(fireball));
    }

    #[test]
    fn test_fireball_destroys_patrol() {
        let mut registry = LevelRegistry::new();
        let patrol = registry.register_owned(Vec3::new(3.0, 0.0, 0.0), Vec3::repeat(1.0), VolumeFlags::TRIGGER, TriggerKind::Patrol);
        let coin = registry.register_owned(Vec3::new(1.0, 0.0, 0.0), Vec3::repeat(0.5), VolumeFlags::TRIGGER, TriggerKind::Collectible { points: 100 });
        let mut projectiles = Projectiles::new(&AbilityConfig::default());
        let fireball = fire_right(&mut registry, &mut projectiles);

        // Passes the coin untouched
        assert!(projectiles.advance(&mut registry, 0.1).is_empty());
        assert!(registry.contains(coin));

        let mut destroyed = Vec::new();
        for _ in 0..5 {
            destroyed.extend(projectiles.advance(&mut registry, 0.1));
        }
        assert_eq!(destroyed, vec![patrol]);
        assert!(!registry.contains(patrol));
        assert!(!registry.contains(fireball));
        assert!(projectiles.is_empty());
    }
}
