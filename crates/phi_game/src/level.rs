//! Level layouts
//!
//! A layout lists static platforms, trigger volumes and patrols in the XY
//! plane; every box is one unit deep and centred on z = 0. Layouts are RON
//! files loaded through the engine's [`Config`] trait, or built in code.

use crate::abilities::Ability;
use crate::error::{GameError, GameResult};
use crate::patrol::{Patrol, Patrols};
use crate::triggers::{LevelRegistry, TriggerKind};
use phi_engine::config::{Config, ConfigError};
use phi_engine::foundation::math::Vec3;
use phi_engine::physics::VolumeFlags;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Depth of every level box
pub const LEVEL_DEPTH: f32 = 1.0;

fn to_center(position: (f32, f32)) -> Vec3 {
    Vec3::new(position.0, position.1, 0.0)
}

fn to_size(size: (f32, f32)) -> Vec3 {
    Vec3::new(size.0, size.1, LEVEL_DEPTH)
}

/// A static platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// Center (x, y)
    pub position: (f32, f32),
    /// Size (width, height)
    pub size: (f32, f32),
    /// Blocks only from above
    #[serde(default)]
    pub one_way: bool,
    /// Disappears after being stood on
    #[serde(default)]
    pub temporary: bool,
}

impl PlatformSpec {
    /// Registry flags for this platform
    pub fn flags(&self) -> VolumeFlags {
        let mut flags = VolumeFlags::empty();
        flags.set(VolumeFlags::ONE_WAY, self.one_way);
        flags.set(VolumeFlags::TEMPORARY, self.temporary);
        flags
    }
}

/// A trigger volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerSpec {
    /// Center (x, y)
    pub position: (f32, f32),
    /// Size (width, height)
    pub size: (f32, f32),
    /// What touching it does
    pub kind: TriggerKind,
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolSpec {
    /// Starting center (x, y)
    pub position: (f32, f32),
    /// Size (width, height)
    pub size: (f32, f32),
    /// Walking speed
    pub speed: f32,
    /// How far it walks from its start before turning
    pub range: f32,
}

/// Everything the registry is seeded with at startup and on reset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Display name
    pub name: String,
    /// Player spawn (x, y); the world config's spawn is used when absent
    pub spawn: Option<(f32, f32)>,
    /// Static platforms
    pub platforms: Vec<PlatformSpec>,
    /// Pickups, hazards and goals
    pub triggers: Vec<TriggerSpec>,
    /// Moving enemies
    pub patrols: Vec<PatrolSpec>,
}

impl LevelLayout {
    /// Empty layout
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the spawn point
    pub fn with_spawn(mut self, x: f32, y: f32) -> Self {
        self.spawn = Some((x, y));
        self
    }

    /// Add a solid platform
    pub fn platform(self, position: (f32, f32), size: (f32, f32)) -> Self {
        self.platform_with(position, size, false, false)
    }

    /// Add a one-way platform
    pub fn one_way(self, position: (f32, f32), size: (f32, f32)) -> Self {
        self.platform_with(position, size, true, false)
    }

    /// Add a temporary platform
    pub fn temporary(self, position: (f32, f32), size: (f32, f32)) -> Self {
        self.platform_with(position, size, false, true)
    }

    fn platform_with(mut self, position: (f32, f32), size: (f32, f32), one_way: bool, temporary: bool) -> Self {
        self.platforms.push(PlatformSpec {
            position,
            size,
            one_way,
            temporary,
        });
        self
    }

    /// Add a trigger
    pub fn trigger(mut self, position: (f32, f32), size: (f32, f32), kind: TriggerKind) -> Self {
        self.triggers.push(TriggerSpec { position, size, kind });
        self
    }

    /// Add a patrol
    pub fn patrol(mut self, position: (f32, f32), size: (f32, f32), speed: f32, range: f32) -> Self {
        self.patrols.push(PatrolSpec {
            position,
            size,
            speed,
            range,
        });
        self
    }

    /// The built-in level, same as `assets/levels/sketch.ron`
    pub fn sketch() -> Self {
        const COIN: (f32, f32) = (0.5, 0.5);
        const POWERUP: (f32, f32) = (0.8, 0.8);
        let coin = TriggerKind::Collectible { points: 100 };

        Self::new("sketch")
            .with_spawn(0.0, 5.0)
            .platform((0.0, 0.0), (10.0, 1.0))
            .platform((12.0, 2.0), (4.0, 1.0))
            .one_way((5.0, 4.0), (2.0, 0.5))
            .platform((18.0, 5.0), (6.0, 1.0))
            .platform((26.0, 8.0), (4.0, 1.0))
            .platform((35.0, 9.0), (5.0, 1.0))
            .temporary((40.0, 7.0), (3.0, 1.0))
            .platform((45.0, 12.0), (1.0, 15.0))
            .temporary((40.0, 15.0), (3.0, 1.0))
            .one_way((55.0, 15.0), (10.0, 1.0))
            .platform((70.0, 20.0), (10.0, 1.0))
            .trigger((-2.0, 2.0), COIN, TriggerKind::ExtraLife)
            .trigger((-4.0, 1.25), COIN, TriggerKind::Unlock(Ability::Fireball))
            .trigger((12.0, 4.0), COIN, coin)
            .trigger((5.0, 5.0), POWERUP, TriggerKind::Unlock(Ability::DoubleJump))
            .trigger((3.0, 7.0), COIN, coin)
            .trigger((18.0, 7.0), COIN, TriggerKind::ExtraLife)
            .trigger((26.0, 10.0), COIN, coin)
            .trigger((35.0, 10.0), POWERUP, TriggerKind::Unlock(Ability::WallClimb))
            .trigger((37.0, 9.75), (1.0, 0.5), TriggerKind::Hazard { instakill: false })
            .trigger((44.0, 25.0), POWERUP, TriggerKind::Unlock(Ability::Dash))
            .trigger((43.0, 20.0), COIN, coin)
            .trigger((55.0, 16.25), COIN, TriggerKind::Invincibility { duration: 5.0 })
            .trigger((60.0, 17.0), COIN, coin)
            .trigger((65.0, 20.0), COIN, coin)
            .trigger((70.0, 22.0), COIN, TriggerKind::ExtraLife)
            .trigger((73.0, 21.5), (1.0, 2.0), TriggerKind::Goal)
            .patrol((18.0, 6.0), (1.0, 1.0), 2.0, 2.0)
    }

    /// Load a layout file, reporting failures as level errors
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        Self::load_from_file(path).map_err(|e| GameError::Level(format!("{}: {e}", path.display())))
    }

    /// Register every platform, trigger and patrol. Returns the patrols so the
    /// caller can move them.
    pub fn seed(&self, registry: &mut LevelRegistry) -> Patrols {
        for platform in &self.platforms {
            registry.register(to_center(platform.position), to_size(platform.size), platform.flags());
        }
        for trigger in &self.triggers {
            registry.register_owned(
                to_center(trigger.position),
                to_size(trigger.size),
                VolumeFlags::TRIGGER,
                trigger.kind,
            );
        }

        let mut patrols = Patrols::new();
        for patrol in &self.patrols {
            patrols.push(Patrol::spawn(
                registry,
                to_center(patrol.position),
                to_size(patrol.size),
                patrol.speed,
                patrol.range,
            ));
        }

        log::info!(
            "seeded level '{}': {} platforms, {} triggers, {} patrols",
            self.name,
            self.platforms.len(),
            self.triggers.len(),
            self.patrols.len()
        );
        patrols
    }

    /// Spawn point, if the layout sets one
    pub fn spawn_position(&self) -> Option<Vec3> {
        self.spawn.map(to_center)
    }
}

fn positive_size(field: &'static str, size: (f32, f32)) -> Result<(), ConfigError> {
    if size.0 > 0.0 && size.1 > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("size must be positive, got {size:?}"),
        })
    }
}

impl Config for LevelLayout {
    fn validate(&self) -> Result<(), ConfigError> {
        for platform in &self.platforms {
            positive_size("platforms.size", platform.size)?;
            if platform.one_way && platform.temporary {
                log::warn!("platform at {:?} is both one-way and temporary", platform.position);
            }
        }
        for trigger in &self.triggers {
            positive_size("triggers.size", trigger.size)?;
        }
        for patrol in &self.patrols {
            positive_size("patrols.size", patrol.size)?;
            if patrol.speed < 0.0 || patrol.range < 0.0 {
                return Err(ConfigError::Invalid {
                    field: "patrols",
                    reason: format!("speed and range must not be negative at {:?}", patrol.position),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phi_engine::config::ConfigFormat;

    #[test]
    fn test_sketch_asset_matches_builtin() {
        let layout = LevelLayout::from_str_as(include_str!("../assets/levels/sketch.ron"), ConfigFormat::Ron).unwrap();
        assert_eq!(layout, LevelLayout::sketch());
    }

    #[test]
    fn test_seed_registers_everything() {
        let layout = LevelLayout::sketch();
        let mut registry = LevelRegistry::new();
        let patrols = layout.seed(&mut registry);

        assert_eq!(registry.len(), layout.platforms.len() + layout.triggers.len() + layout.patrols.len());
        assert_eq!(patrols.len(), 1);

        let one_way = registry.iter().filter(|volume| volume.is_one_way()).count();
        let temporary = registry.iter().filter(|volume| volume.is_temporary()).count();
        let triggers = registry.iter().filter(|volume| volume.is_trigger()).count();
        assert_eq!(one_way, 2);
        assert_eq!(temporary, 2);
        assert_eq!(triggers, layout.triggers.len() + 1);
    }

    #[test]
    fn test_platforms_come_first_in_handle_order() {
        let layout = LevelLayout::new("tiny")
            .platform((0.0, 0.0), (10.0, 1.0))
            .trigger((0.0, 2.0), (0.5, 0.5), TriggerKind::Goal);
        let mut registry = LevelRegistry::new();
        layout.seed(&mut registry);

        let volumes: Vec<_> = registry.iter().collect();
        assert!(!volumes[0].is_trigger());
        assert_eq!(volumes[0].size(), Vec3::new(10.0, 1.0, LEVEL_DEPTH));
        assert_eq!(volumes[1].id().and_then(|id| registry.owner(id)), Some(&TriggerKind::Goal));
    }

    #[test]
    fn test_minimal_ron_layout() {
        let layout = LevelLayout::from_str_as(
            "(name: \"mini\", platforms: [(position: (0.0, 0.0), size: (4.0, 1.0), one_way: true)])",
            ConfigFormat::Ron,
        )
        .unwrap();
        assert_eq!(layout.spawn, None);
        assert!(layout.platforms[0].one_way);
        assert!(!layout.platforms[0].temporary);
        assert_eq!(layout.platforms[0].flags(), VolumeFlags::ONE_WAY);
    }

    #[test]
    fn test_rejects_degenerate_platform() {
        let layout = LevelLayout::new("bad").platform((0.0, 0.0), (0.0, 1.0));
        assert!(matches!(layout.validate(), Err(ConfigError::Invalid { field: "platforms.size", .. })));
    }

    #[test]
    fn test_missing_file_is_a_level_error() {
        let result = LevelLayout::load(std::env::temp_dir().join("phi_missing_level.ron"));
        assert!(matches!(result, Err(GameError::Level(_))));
    }
}
