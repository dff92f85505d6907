//! The simulation world
//!
//! `World` owns every piece of game state: the registry, the controller, the
//! session, platform decay, patrols, projectiles and trigger tracking. Hosts
//! drive it with [`World::advance`] and read the published state afterwards.
//!
//! Per tick:
//! 1. session and platform decay timers
//! 2. patrols
//! 3. character controller (including the void check)
//! 4. projectiles
//! 5. trigger resolution against the published player bounds

use crate::abilities::Ability;
use crate::config::GameConfig;
use crate::controller::{CharacterController, MotionMode, MotionState};
use crate::decay::PlatformDecay;
use crate::error::{GameError, GameResult};
use crate::hud::HudSnapshot;
use crate::input::InputSignals;
use crate::level::LevelLayout;
use crate::patrol::Patrols;
use crate::projectile::Projectiles;
use crate::session::{DamageOutcome, Session, SessionState};
use crate::triggers::{LevelRegistry, TriggerKind, TriggerResolver};
use phi_engine::config::Config;
use phi_engine::foundation::math::{Transform, Vec3};
use phi_engine::physics::{VolumeFlags, VolumeId};

/// Owning context of one game
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    level: LevelLayout,
    registry: LevelRegistry,
    controller: CharacterController,
    session: Session,
    decay: PlatformDecay,
    patrols: Patrols,
    projectiles: Projectiles,
    triggers: TriggerResolver,
}

impl World {
    /// Validate the inputs, seed the registry and place the player at spawn
    pub fn new(config: GameConfig, level: LevelLayout) -> GameResult<Self> {
        config.validate()?;
        level
            .validate()
            .map_err(|e| GameError::Level(format!("{}: {e}", level.name)))?;

        let mut registry = LevelRegistry::new();
        let patrols = level.seed(&mut registry);
        let player = Self::register_player(&mut registry, &config, &level);
        let controller = CharacterController::attach(&registry, player, &config)?;

        log::info!("world ready, player {player} at {:?}", controller.state().position);
        Ok(Self {
            session: Session::new(config.session.clone()),
            decay: PlatformDecay::new(config.world.platform_decay_time),
            projectiles: Projectiles::new(&config.abilities),
            triggers: TriggerResolver::new(),
            config,
            level,
            registry,
            controller,
            patrols,
        })
    }

    fn register_player(registry: &mut LevelRegistry, config: &GameConfig, level: &LevelLayout) -> VolumeId {
        let spawn = level.spawn_position().unwrap_or(config.world.spawn_position);
        registry.register(spawn, config.player.size, VolumeFlags::PLAYER)
    }

    /// Run one simulation tick. Does nothing once the game is over or won.
    pub fn advance(&mut self, delta_time: f32, input: InputSignals) {
        if !self.session.is_playing() {
            return;
        }

        self.session.tick(delta_time);
        self.decay.tick(delta_time, &mut self.registry);
        self.patrols.advance(&mut self.registry, delta_time);

        let report = self.controller.advance(&mut self.registry, &mut self.decay, delta_time, input);
        if let Some(launch) = report.launch {
            self.projectiles.spawn(&mut self.registry, launch);
        }
        if report.fell_into_void {
            self.fall_into_void();
        }

        self.projectiles.advance(&mut self.registry, delta_time);
        self.resolve_triggers();
    }

    /// A void fall costs one life. Unless that ends the game, the player
    /// goes back to the last safe position, invincible or not.
    fn fall_into_void(&mut self) {
        match self.session.take_damage(1) {
            DamageOutcome::GameOver => {}
            DamageOutcome::Respawn | DamageOutcome::Ignored => self.controller.respawn(&mut self.registry),
        }
    }

    fn resolve_triggers(&mut self) {
        let events = self.triggers.resolve(&mut self.registry, self.controller.handle());
        for event in events {
            match event.kind {
                TriggerKind::Collectible { points } => self.add_score(points),
                TriggerKind::ExtraLife => self.add_life(),
                TriggerKind::Invincibility { duration } => self.set_invincibility(duration),
                TriggerKind::Unlock(ability) => self.unlock(ability),
                TriggerKind::Hazard { instakill: true } => self.instakill(),
                TriggerKind::Hazard { instakill: false } | TriggerKind::Patrol => self.take_damage(1),
                TriggerKind::Goal => self.win(),
                TriggerKind::Projectile => {}
            }
        }
    }

    /// Restore the start of the game: session, unlocks, timers, registry
    /// contents and the player at spawn.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.decay.clear();
        self.projectiles.clear();
        self.triggers.clear();
        self.session.reset();

        self.patrols = self.level.seed(&mut self.registry);
        let player = Self::register_player(&mut self.registry, &self.config, &self.level);
        match CharacterController::attach(&self.registry, player, &self.config) {
            Ok(controller) => self.controller = controller,
            Err(e) => log::error!("reset could not rebind the player: {e}"),
        }
        log::info!("world reset");
    }

    // Mutators used by trigger resolution; all are no-ops once the game ended.

    /// One more life
    pub fn add_life(&mut self) {
        self.session.add_life();
    }

    /// Damage immunity for `duration` seconds
    pub fn set_invincibility(&mut self, duration: f32) {
        self.session.set_invincibility(duration);
    }

    /// Add to the score
    pub fn add_score(&mut self, points: u32) {
        self.session.add_score(points);
    }

    /// Grant an ability and announce it
    pub fn unlock(&mut self, ability: Ability) {
        if !self.session.is_playing() {
            return;
        }
        self.controller.unlock(ability);
        self.session.announce(ability.announcement());
    }

    /// Unlock the double jump
    pub fn unlock_double_jump(&mut self) {
        self.unlock(Ability::DoubleJump);
    }

    /// Unlock wall kicks and wall slides
    pub fn unlock_wall_climb(&mut self) {
        self.unlock(Ability::WallClimb);
    }

    /// Unlock the dash
    pub fn unlock_dash(&mut self) {
        self.unlock(Ability::Dash);
    }

    /// Unlock fireballs
    pub fn unlock_fireball(&mut self) {
        self.unlock(Ability::Fireball);
    }

    /// Lose `amount` lives; a surviving player respawns at the last safe
    /// position
    pub fn take_damage(&mut self, amount: u32) {
        if self.session.take_damage(amount) == DamageOutcome::Respawn {
            self.controller.respawn(&mut self.registry);
        }
    }

    /// Lose all lives regardless of invincibility
    pub fn instakill(&mut self) {
        self.session.instakill();
    }

    /// Reach the goal
    pub fn win(&mut self) {
        self.session.win();
    }

    // Read access

    /// Dash cooldown in [0, 1], 0 = ready
    pub fn dash_cooldown_ratio(&self) -> f32 {
        self.controller.dash_cooldown_ratio()
    }

    /// Air jump cooldown in [0, 1], 0 = ready
    pub fn jump_cooldown_ratio(&self) -> f32 {
        self.controller.jump_cooldown_ratio()
    }

    /// Wall kick cooldown in [0, 1], 0 = ready
    pub fn wall_jump_cooldown_ratio(&self) -> f32 {
        self.controller.wall_jump_cooldown_ratio()
    }

    /// Powerup text currently shown
    pub fn announcement(&self) -> Option<&str> {
        self.session.announcement()
    }

    /// Remaining lives
    pub fn lives(&self) -> u32 {
        self.session.lives()
    }

    /// Score
    pub fn points(&self) -> u32 {
        self.session.points()
    }

    /// Damage immunity active?
    pub fn is_invincible(&self) -> bool {
        self.session.is_invincible()
    }

    /// Goal reached?
    pub fn has_won(&self) -> bool {
        self.session.has_won()
    }

    /// Out of lives?
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// Session state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Seconds spent playing
    pub fn total_play_time(&self) -> f32 {
        self.session.total_play_time()
    }

    /// Player kinematic state
    pub fn player(&self) -> &MotionState {
        self.controller.state()
    }

    /// Player vertical mode
    pub fn player_mode(&self) -> MotionMode {
        self.controller.mode()
    }

    /// Player volume handle
    pub fn player_handle(&self) -> VolumeId {
        self.controller.handle()
    }

    /// Player render transform
    pub fn player_transform(&self) -> Transform {
        self.controller.transform()
    }

    /// Read access to the registry
    pub fn registry(&self) -> &LevelRegistry {
        &self.registry
    }

    /// Platform decay table
    pub fn decay(&self) -> &PlatformDecay {
        &self.decay
    }

    /// Number of live patrols
    pub fn patrol_count(&self) -> usize {
        self.patrols.len()
    }

    /// Number of live fireballs
    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Loaded level layout
    pub fn level(&self) -> &LevelLayout {
        &self.level
    }

    /// Render instances: every non-hidden volume with its box transform
    pub fn visible_volumes(&self) -> impl Iterator<Item = (VolumeId, Transform)> + '_ {
        self.registry.iter().filter_map(|volume| {
            volume
                .id()
                .map(|id| (id, Transform::from_position_scale(volume.center(), volume.size())))
        })
    }

    /// Everything the HUD shows
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            lives: self.lives(),
            points: self.points(),
            dash_cooldown: self.dash_cooldown_ratio(),
            jump_cooldown: self.jump_cooldown_ratio(),
            wall_jump_cooldown: self.wall_jump_cooldown_ratio(),
            announcement: self.announcement().map(str::to_string),
            invincible: self.is_invincible(),
            won: self.has_won(),
            game_over: self.is_game_over(),
            play_time: self.total_play_time(),
            mode: self.player_mode(),
            position: self.player().position,
        }
    }

    /// Where the player respawns after damage
    pub fn last_safe_position(&self) -> Vec3 {
        self.controller.state().last_safe_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sketch_world_starts_playing() {
        let world = World::new(GameConfig::default(), LevelLayout::sketch()).unwrap();
        assert_eq!(world.state(), SessionState::Playing);
        assert_eq!(world.lives(), 3);
        assert_eq!(world.patrol_count(), 1);
        assert_eq!(world.player().position, Vec3::new(0.0, 5.0, 0.0));

        let player = world.registry().bounds(world.player_handle()).unwrap();
        assert!(player.is_player());
        assert_eq!(world.visible_volumes().count(), world.registry().len());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.session.starting_lives = 0;
        assert!(World::new(config, LevelLayout::sketch()).is_err());
    }

    #[test]
    fn test_hud_snapshot() {
        let mut world = World::new(GameConfig::default(), LevelLayout::sketch()).unwrap();
        world.unlock_dash();

        let hud = world.hud();
        assert_eq!(hud.announcement.as_deref(), Some("YOU GOT DASH"));
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.dash_cooldown, 0.0);
        assert!(hud.to_string().contains("YOU GOT DASH"));
    }
}
