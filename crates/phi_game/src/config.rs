//! Game configuration
//!
//! Every tuning constant of the simulation lives here. Missing fields fall
//! back to their defaults, so a config file only needs the values it changes.

use phi_engine::config::{Config, ConfigError};
use phi_engine::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Character movement tuning
    pub player: PlayerConfig,

    /// Ability forces, durations and cooldowns
    pub abilities: AbilityConfig,

    /// Lives, invincibility and HUD timing
    pub session: SessionConfig,

    /// Spawn, void and collision tolerances
    pub world: WorldConfig,

    /// Logging defaults for the runner
    pub logging: LoggingConfig,
}

/// Character movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Collision box size
    pub size: Vec3,

    /// Horizontal speed on the ground (units/s)
    pub movement_speed: f32,

    /// Horizontal speed multiplier while airborne
    pub air_control: f32,

    /// Gravity magnitude (units/s²)
    pub gravity: f32,

    /// Gravity multiplier while rising
    pub rise_multiplier: f32,

    /// Gravity multiplier while falling
    pub fall_multiplier: f32,

    /// Vertical launch speed of a jump
    pub jump_force: f32,

    /// Maximum downward speed while sliding on a wall
    pub wall_slide_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Vec3::new(1.0, 1.0, 1.0),
            movement_speed: 5.0,
            air_control: 0.8,
            gravity: 9.8,
            rise_multiplier: 1.0,
            fall_multiplier: 1.5,
            jump_force: 7.0,
            wall_slide_speed: 1.5,
        }
    }
}

/// Ability forces, durations and cooldowns (seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    /// Horizontal speed during a dash
    pub dash_speed: f32,
    /// How long a dash lasts
    pub dash_duration: f32,
    /// Extra wait after a dash ends before the next one
    pub dash_cooldown: f32,
    /// Wait between air jumps
    pub jump_cooldown: f32,
    /// Horizontal push away from the wall
    pub wall_kick_force_x: f32,
    /// Vertical launch of a wall kick
    pub wall_kick_force_y: f32,
    /// How long the wall kick overrides horizontal control
    pub wall_kick_duration: f32,
    /// Wait between wall kicks
    pub wall_jump_cooldown: f32,
    /// Wait between fireballs
    pub fireball_cooldown: f32,
    /// Fireball travel speed
    pub fireball_speed: f32,
    /// Fireball lifetime
    pub fireball_lifetime: f32,
    /// Fireball cube edge length
    pub fireball_size: f32,
}

impl AbilityConfig {
    /// Full span covered by the dash cooldown timer
    pub fn dash_cycle(&self) -> f32 {
        self.dash_duration + self.dash_cooldown
    }
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            dash_speed: 15.0,
            dash_duration: 0.2,
            dash_cooldown: 0.8,
            jump_cooldown: 0.25,
            wall_kick_force_x: 6.0,
            wall_kick_force_y: 7.0,
            wall_kick_duration: 0.2,
            wall_jump_cooldown: 0.4,
            fireball_cooldown: 0.5,
            fireball_speed: 10.0,
            fireball_lifetime: 3.0,
            fireball_size: 0.5,
        }
    }
}

/// Lives, invincibility and HUD timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lives at the start and after a reset
    pub starting_lives: u32,
    /// Invincibility granted after a non-lethal hit
    pub damage_invincibility: f32,
    /// How long a powerup announcement stays visible
    pub announcement_duration: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            damage_invincibility: 2.0,
            announcement_duration: 3.0,
        }
    }
}

/// Spawn, void and collision tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Where the player starts and where a reset puts it back
    pub spawn_position: Vec3,
    /// Falling below this height costs a life
    pub void_threshold: f32,
    /// Seconds a temporary platform survives after first contact
    pub platform_decay_time: f32,
    /// Probe distances and tolerances
    pub collision: CollisionConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            spawn_position: Vec3::new(0.0, 5.0, 0.0),
            void_threshold: -30.0,
            platform_decay_time: 1.0,
            collision: CollisionConfig::default(),
        }
    }
}

/// Probe distances and tolerances used by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Downward probe distance deciding `grounded`
    pub ground_probe: f32,
    /// Sideways probe distance deciding `walled`
    pub wall_probe: f32,
    /// How far below a one-way top the previous bottom edge may sit and still land
    pub one_way_tolerance: f32,
    /// Downward probe distance used to find the checkpoint platform
    pub checkpoint_probe: f32,
    /// Height above the platform top added to a recorded checkpoint
    pub checkpoint_margin: f32,
    /// Gap kept between a landed character and its floor
    pub contact_skin: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            ground_probe: 0.05,
            wall_probe: 0.1,
            one_way_tolerance: 0.1,
            checkpoint_probe: 0.1,
            checkpoint_margin: 0.05,
            contact_skin: 0.02,
        }
    }
}

/// Logging defaults for the runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must not be negative, got {value}"),
        })
    }
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        positive("player.size.x", player.size.x)?;
        positive("player.size.y", player.size.y)?;
        positive("player.size.z", player.size.z)?;
        non_negative("player.movement_speed", player.movement_speed)?;
        non_negative("player.air_control", player.air_control)?;
        non_negative("player.gravity", player.gravity)?;
        non_negative("player.rise_multiplier", player.rise_multiplier)?;
        non_negative("player.fall_multiplier", player.fall_multiplier)?;
        non_negative("player.jump_force", player.jump_force)?;
        non_negative("player.wall_slide_speed", player.wall_slide_speed)?;

        let abilities = &self.abilities;
        positive("abilities.dash_duration", abilities.dash_duration)?;
        non_negative("abilities.dash_cooldown", abilities.dash_cooldown)?;
        non_negative("abilities.jump_cooldown", abilities.jump_cooldown)?;
        positive("abilities.wall_kick_duration", abilities.wall_kick_duration)?;
        non_negative("abilities.wall_jump_cooldown", abilities.wall_jump_cooldown)?;
        non_negative("abilities.fireball_cooldown", abilities.fireball_cooldown)?;
        positive("abilities.fireball_lifetime", abilities.fireball_lifetime)?;
        positive("abilities.fireball_size", abilities.fireball_size)?;

        if self.session.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "session.starting_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        non_negative("session.damage_invincibility", self.session.damage_invincibility)?;
        non_negative("session.announcement_duration", self.session.announcement_duration)?;

        positive("world.platform_decay_time", self.world.platform_decay_time)?;
        if self.world.void_threshold >= self.world.spawn_position.y {
            return Err(ConfigError::Invalid {
                field: "world.void_threshold",
                reason: "must lie below the spawn position".to_string(),
            });
        }

        let collision = &self.world.collision;
        positive("world.collision.ground_probe", collision.ground_probe)?;
        positive("world.collision.wall_probe", collision.wall_probe)?;
        non_negative("world.collision.one_way_tolerance", collision.one_way_tolerance)?;
        positive("world.collision.checkpoint_probe", collision.checkpoint_probe)?;
        non_negative("world.collision.checkpoint_margin", collision.checkpoint_margin)?;
        non_negative("world.collision.contact_skin", collision.contact_skin)?;
        if collision.contact_skin >= collision.ground_probe {
            return Err(ConfigError::Invalid {
                field: "world.collision.contact_skin",
                reason: "must be smaller than the ground probe or a landed character never reads as grounded".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phi_engine::config::ConfigFormat;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = GameConfig::from_str_as(
            "[player]\njump_force = 9.0\n\n[world]\nvoid_threshold = -50.0\n",
            ConfigFormat::Toml,
        )
        .unwrap();

        assert_eq!(config.player.jump_force, 9.0);
        assert_eq!(config.player.movement_speed, 5.0);
        assert_eq!(config.world.void_threshold, -50.0);
        assert_eq!(config.session.starting_lives, 3);
    }

    #[test]
    fn test_spawn_position_from_toml_array() {
        let config = GameConfig::from_str_as("[world]\nspawn_position = [2.0, 8.0, 0.0]\n", ConfigFormat::Toml).unwrap();
        assert_eq!(config.world.spawn_position, Vec3::new(2.0, 8.0, 0.0));
    }

    #[test]
    fn test_ron_sections() {
        let config = GameConfig::from_str_as("(session: (starting_lives: 5), logging: (level: \"debug\"))", ConfigFormat::Ron).unwrap();
        assert_eq!(config.session.starting_lives, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.abilities, AbilityConfig::default());
    }

    #[test]
    fn test_rejects_zero_lives() {
        let result = GameConfig::from_str_as("[session]\nstarting_lives = 0\n", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Invalid { field: "session.starting_lives", .. })));
    }

    #[test]
    fn test_rejects_void_above_spawn() {
        let mut config = GameConfig::default();
        config.world.void_threshold = 10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_skin_wider_than_ground_probe() {
        let mut config = GameConfig::default();
        config.world.collision.contact_skin = 0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "world.collision.contact_skin", .. })
        ));
    }
}
