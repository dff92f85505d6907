//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and the render transform
//! - Countdown timers and the simulation clock
//! - Logging bootstrap

pub mod math;
pub mod time;
pub mod logging;
