//! Physics module for collision bookkeeping
//!
//! Provides axis-aligned volumes and the registry that owns them. There is
//! no spatial partitioning: worlds hold tens of volumes, and a linear scan in
//! handle order keeps query results deterministic.

pub mod volume;
pub mod registry;

pub use volume::{Volume, VolumeFlags, VolumeId};
pub use registry::BoundsRegistry;
