//! Whole-world scenario tests
//!
//! Each scenario builds a small level, drives `World::advance` with scripted
//! input and checks the published state.

mod damage;
mod pickups;

use crate::config::GameConfig;
use crate::input::InputSignals;
use crate::level::LevelLayout;
use crate::world::World;

/// 1/64 s keeps timer sums exact in f32
pub(crate) const DT: f32 = 1.0 / 64.0;

/// Ticks in one second
pub(crate) const SECOND: usize = 64;

/// 20-unit floor with its top at y = 0.5, spawn three units up
pub(crate) fn floor_level() -> LevelLayout {
    LevelLayout::new("floor").with_spawn(0.0, 3.0).platform((0.0, 0.0), (20.0, 1.0))
}

pub(crate) fn world_with(level: LevelLayout) -> World {
    World::new(GameConfig::default(), level).unwrap()
}

pub(crate) fn run(world: &mut World, ticks: usize, input: InputSignals) {
    for _ in 0..ticks {
        world.advance(DT, input);
    }
}

/// World with the player already resting on its first platform
pub(crate) fn settled(level: LevelLayout) -> World {
    let mut world = world_with(level);
    run(&mut world, 2 * SECOND, InputSignals::empty());
    world
}
