//! Lives, invincibility, hazards, patrols and the void

use super::{floor_level, run, settled, world_with, DT, SECOND};
use crate::input::InputSignals;
use crate::level::LevelLayout;
use crate::session::SessionState;
use crate::triggers::TriggerKind;
use phi_engine::foundation::math::Vec3;
use approx::assert_relative_eq;

fn ledge() -> LevelLayout {
    LevelLayout::new("ledge").with_spawn(0.0, 3.0).platform((0.0, 0.0), (4.0, 1.0))
}

#[test]
fn test_damage_respawns_and_grants_invincibility() {
    let mut world = settled(floor_level());
    run(&mut world, SECOND, InputSignals::MOVE_RIGHT);
    assert!(world.player().position.x > 4.0);

    world.take_damage(1);
    assert_eq!(world.lives(), 2);
    assert!(world.is_invincible());
    assert_eq!(world.player().position, world.last_safe_position());
    assert_relative_eq!(world.player().position.x, 0.0);

    // Absorbed while invincible
    world.take_damage(1);
    assert_eq!(world.lives(), 2);

    run(&mut world, 2 * SECOND + 1, InputSignals::empty());
    assert!(!world.is_invincible());
    world.take_damage(1);
    assert_eq!(world.lives(), 1);
}

#[test]
fn test_instakill_ends_the_game() {
    let mut world = settled(floor_level());
    world.set_invincibility(10.0);
    world.instakill();

    assert_eq!(world.lives(), 0);
    assert_eq!(world.state(), SessionState::GameOver);
    assert!(world.is_game_over());
}

#[test]
fn test_game_over_freezes_the_world() {
    let mut world = settled(floor_level());
    world.take_damage(3);
    assert!(world.is_game_over());

    world.take_damage(1);
    world.win();
    world.add_life();
    world.add_score(50);
    assert_eq!(world.lives(), 0);
    assert_eq!(world.points(), 0);
    assert!(!world.has_won());

    let time = world.total_play_time();
    let position = world.player().position;
    run(&mut world, SECOND, InputSignals::MOVE_RIGHT | InputSignals::JUMP);
    assert_eq!(world.total_play_time(), time);
    assert_eq!(world.player().position, position);
}

#[test]
fn test_void_fall_costs_a_life_and_respawns() {
    let mut world = settled(ledge());
    assert_relative_eq!(world.last_safe_position(), Vec3::new(0.0, 1.05, 0.0));

    let mut ticks = 0;
    while world.lives() == 3 {
        world.advance(DT, InputSignals::MOVE_RIGHT);
        ticks += 1;
        assert!(ticks < 6 * SECOND, "never reached the void");
    }

    assert_eq!(world.lives(), 2);
    assert_eq!(world.state(), SessionState::Playing);
    assert_relative_eq!(world.player().position, Vec3::new(0.0, 1.05, 0.0));
    assert_eq!(world.player().velocity, Vec3::zeros());
}

#[test]
fn test_void_fall_while_invincible_still_teleports() {
    let mut world = settled(ledge());
    world.set_invincibility(100.0);

    let mut previous = world.player().position.y;
    let mut teleported = false;
    for _ in 0..6 * SECOND {
        world.advance(DT, InputSignals::MOVE_RIGHT);
        let y = world.player().position.y;
        if previous < -20.0 && y > 0.0 {
            teleported = true;
            break;
        }
        previous = y;
    }

    assert!(teleported);
    assert_eq!(world.lives(), 3);
    assert_relative_eq!(world.player().position.x, 0.0);
}

#[test]
fn test_last_void_fall_is_game_over() {
    let mut world = settled(ledge());
    world.take_damage(2);
    run(&mut world, 2 * SECOND + 1, InputSignals::empty());
    assert_eq!(world.lives(), 1);
    assert!(!world.is_invincible());

    run(&mut world, 6 * SECOND, InputSignals::MOVE_RIGHT);
    assert!(world.is_game_over());
    assert_eq!(world.lives(), 0);
    assert!(world.player().position.y < -30.0);
}

#[test]
fn test_patrol_contact_hurts() {
    let level = floor_level().patrol((2.0, 1.0), (1.0, 1.0), 0.0, 0.0);
    let mut world = settled(level);
    assert_eq!(world.lives(), 3);

    let mut ticks = 0;
    while world.lives() == 3 {
        world.advance(DT, InputSignals::MOVE_RIGHT);
        ticks += 1;
        assert!(ticks < 2 * SECOND, "never reached the patrol");
    }

    assert_eq!(world.lives(), 2);
    assert!(world.is_invincible());
    assert_relative_eq!(world.player().position.x, 0.0);
    assert_eq!(world.patrol_count(), 1);
}

#[test]
fn test_standing_in_a_hazard_hurts_once() {
    let level = floor_level().trigger((0.0, 3.0), (4.0, 4.0), TriggerKind::Hazard { instakill: false });
    let mut world = world_with(level);

    run(&mut world, 4 * SECOND, InputSignals::empty());
    assert_eq!(world.lives(), 2);
    assert!(world.player().grounded);
}

#[test]
fn test_instakill_hazard() {
    let level = floor_level().trigger((0.0, 3.0), (2.0, 2.0), TriggerKind::Hazard { instakill: true });
    let mut world = world_with(level);
    world.set_invincibility(5.0);

    world.advance(DT, InputSignals::empty());
    assert!(world.is_game_over());
    assert_eq!(world.lives(), 0);
}
