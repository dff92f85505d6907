//! Collectibles, unlocks, the goal and fireballs

use super::{floor_level, run, settled, DT, SECOND};
use crate::abilities::Ability;
use crate::controller::MotionMode;
use crate::input::InputSignals;
use crate::session::SessionState;
use crate::triggers::TriggerKind;

fn trigger_count(world: &crate::world::World) -> usize {
    world.registry().iter().filter(|volume| volume.is_trigger()).count()
}

#[test]
fn test_coin_adds_points_and_disappears() {
    let level = floor_level().trigger((2.0, 1.25), (0.5, 0.5), TriggerKind::Collectible { points: 100 });
    let mut world = settled(level);
    assert_eq!(trigger_count(&world), 1);

    run(&mut world, SECOND, InputSignals::MOVE_RIGHT);
    assert_eq!(world.points(), 100);
    assert_eq!(trigger_count(&world), 0);

    // Walking back over the spot gives nothing
    run(&mut world, SECOND, InputSignals::MOVE_LEFT);
    assert_eq!(world.points(), 100);
}

#[test]
fn test_extra_life() {
    let level = floor_level().trigger((2.0, 1.25), (0.5, 0.5), TriggerKind::ExtraLife);
    let mut world = settled(level);

    run(&mut world, SECOND, InputSignals::MOVE_RIGHT);
    assert_eq!(world.lives(), 4);
}

#[test]
fn test_invincibility_pickup() {
    let level = floor_level().trigger((2.0, 1.25), (0.5, 0.5), TriggerKind::Invincibility { duration: 5.0 });
    let mut world = settled(level);

    run(&mut world, SECOND, InputSignals::MOVE_RIGHT);
    assert!(world.is_invincible());
    world.take_damage(1);
    assert_eq!(world.lives(), 3);

    run(&mut world, 5 * SECOND, InputSignals::empty());
    assert!(!world.is_invincible());
}

#[test]
fn test_unlock_pickup_announces_and_enables_dash() {
    let level = floor_level().trigger((2.0, 1.25), (0.5, 0.5), TriggerKind::Unlock(Ability::Dash));
    let mut world = settled(level);

    let mut ticks = 0;
    while world.announcement().is_none() {
        world.advance(DT, InputSignals::MOVE_RIGHT);
        ticks += 1;
        assert!(ticks < 2 * SECOND, "never reached the pickup");
    }
    assert_eq!(world.announcement(), Some("YOU GOT DASH"));
    assert!(world.hud().to_string().contains("YOU GOT DASH"));

    world.advance(DT, InputSignals::DASH | InputSignals::MOVE_RIGHT);
    assert_eq!(world.player_mode(), MotionMode::Dashing);

    run(&mut world, 3 * SECOND, InputSignals::empty());
    assert_eq!(world.announcement(), None);
}

#[test]
fn test_goal_wins_and_freezes_play_time() {
    let level = floor_level().trigger((3.0, 1.5), (1.0, 2.0), TriggerKind::Goal);
    let mut world = settled(level);

    run(&mut world, SECOND, InputSignals::MOVE_RIGHT);
    assert!(world.has_won());
    assert_eq!(world.state(), SessionState::Won);
    assert!(world.hud().won);

    let time = world.total_play_time();
    let position = world.player().position;
    run(&mut world, SECOND, InputSignals::MOVE_RIGHT);
    assert_eq!(world.total_play_time(), time);
    assert_eq!(world.player().position, position);

    world.take_damage(1);
    assert_eq!(world.lives(), 3);
}

#[test]
fn test_fireball_destroys_patrol() {
    let level = floor_level().patrol((5.0, 1.0), (1.0, 1.0), 0.0, 0.0);
    let mut world = settled(level);

    // Locked: nothing fires
    world.advance(DT, InputSignals::FIRE);
    assert_eq!(world.projectile_count(), 0);

    world.unlock_fireball();
    world.advance(DT, InputSignals::FIRE);
    assert_eq!(world.projectile_count(), 1);
    assert_eq!(world.patrol_count(), 1);

    run(&mut world, SECOND, InputSignals::empty());
    assert_eq!(world.patrol_count(), 0);
    assert_eq!(world.projectile_count(), 0);
    assert_eq!(trigger_count(&world), 0);
    assert_eq!(world.lives(), 3);
}

#[test]
fn test_fireball_cooldown() {
    let mut world = settled(floor_level());
    world.unlock_fireball();

    world.advance(DT, InputSignals::FIRE);
    world.advance(DT, InputSignals::FIRE);
    assert_eq!(world.projectile_count(), 1);

    run(&mut world, SECOND, InputSignals::empty());
    world.advance(DT, InputSignals::FIRE);
    assert_eq!(world.projectile_count(), 2);
}
