//! # Phi Engine
//!
//! The simulation foundation shared by the Phi platformer: a broad-phase
//! registry of axis-aligned volumes, countdown timers, configuration loading
//! and logging bootstrap.
//!
//! ## Features
//!
//! - **Bounds Registry**: handle-addressed AABB store with a permanent hidden set
//! - **Broad-phase Query**: closed-interval overlap scan in deterministic handle order
//! - **Countdowns**: per-tick timers that report the tick they expire on
//! - **Config**: TOML/RON loading through a single trait
//!
//! ## Quick Start
//!
//! ```rust
//! use phi_engine::prelude::*;
//!
//! let mut registry: BoundsRegistry = BoundsRegistry::new();
//! let floor = registry.register(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 1.0, 1.0), VolumeFlags::empty());
//! let player = registry.register(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 1.0, 1.0), VolumeFlags::PLAYER);
//!
//! // Probe the player one unit above the floor: faces touch, which counts.
//! let hits = registry.query(player, Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
//! assert_eq!(hits, vec![floor]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        foundation::{
            math::{Mat4, Transform, Vec3},
            time::{Countdown, SimClock},
        },
        physics::{BoundsRegistry, Volume, VolumeFlags, VolumeId},
    };
}
