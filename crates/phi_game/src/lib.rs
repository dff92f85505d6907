//! # Phi Game
//!
//! Ability-gated 2D platformer simulation on top of `phi_engine`.
//!
//! The player is a kinematic box moved one axis at a time through a world of
//! solid, one-way and temporary platforms. Pickups unlock a double jump, wall
//! kicks, a dash and fireballs; hazards and patrols cost lives; the goal ends
//! the game. Everything runs headless: hosts feed [`World::advance`] a tick
//! length plus [`InputSignals`] and read back [`World::hud`] and
//! [`World::visible_volumes`].
//!
//! ```rust
//! use phi_game::prelude::*;
//!
//! let mut world = World::new(GameConfig::default(), LevelLayout::sketch()).unwrap();
//! for _ in 0..120 {
//!     world.advance(1.0 / 60.0, InputSignals::empty());
//! }
//! assert_eq!(world.player_mode(), MotionMode::Grounded);
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod abilities;
pub mod config;
pub mod controller;
pub mod decay;
pub mod error;
pub mod hud;
pub mod input;
pub mod level;
pub mod patrol;
pub mod projectile;
pub mod session;
pub mod triggers;
pub mod world;

pub use error::{GameError, GameResult};
pub use world::World;

/// Common imports for hosts
pub mod prelude {
    pub use crate::{
        abilities::{Ability, AbilityFlags},
        config::GameConfig,
        controller::{MotionMode, MotionState},
        error::{GameError, GameResult},
        hud::HudSnapshot,
        input::InputSignals,
        level::LevelLayout,
        session::{DamageOutcome, SessionState},
        triggers::TriggerKind,
        world::World,
    };
    pub use phi_engine::prelude::*;
}

#[cfg(test)]
mod tests;
