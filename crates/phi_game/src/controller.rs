//! Character controller
//!
//! Kinematic, axis-separated motion for the player volume. Each tick the
//! controller moves along X first and then along Y, testing every candidate
//! position against the bounds registry. A blocked step is rejected as a
//! whole; there is no sliding or partial resolve.
//!
//! Tick order:
//! 1. ability timers
//! 2. facing from held input
//! 3. dash trigger
//! 4. dash step, or jump, gravity, horizontal and vertical resolution
//! 5. fireball request
//! 6. void check (reported to the caller)
//! 7. publish the new bounds to the registry

use crate::abilities::{Ability, AbilityState};
use crate::config::{AbilityConfig, CollisionConfig, GameConfig, PlayerConfig};
use crate::decay::PlatformDecay;
use crate::error::{GameError, GameResult};
use crate::input::InputSignals;
use crate::projectile::Launch;
use phi_engine::foundation::math::{sign_or, Transform, Vec3};
use phi_engine::physics::{BoundsRegistry, Volume, VolumeId};

/// Vertical mode of the player, derived from its timers and contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionMode {
    /// Standing on something
    Grounded,
    /// Jumping or falling
    Airborne,
    /// Dash in progress; gravity and normal control suspended
    Dashing,
    /// Wall kick overriding horizontal control
    WallKicking,
}

/// Kinematic state of the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Center of the player volume
    pub position: Vec3,
    /// Units per second
    pub velocity: Vec3,
    /// Standing on a blocking surface
    pub grounded: bool,
    /// Touching a solid wall in the facing (or dash) direction
    pub walled: bool,
    /// Last held horizontal direction (±1)
    pub facing: f32,
    /// Jumps used since last landing
    pub jump_charges: u32,
    /// Respawn point after damage or a void fall
    pub last_safe_position: Vec3,
}

impl MotionState {
    /// At rest at `position`, facing right
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            grounded: false,
            walled: false,
            facing: 1.0,
            jump_charges: 0,
            last_safe_position: position,
        }
    }
}

/// Outcome of one controller tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// The player ended the tick below the void threshold
    pub fell_into_void: bool,
    /// A fireball should be spawned
    pub launch: Option<Launch>,
}

/// Solid for horizontal steps, dashes and wall probes
fn is_solid(volume: &Volume) -> bool {
    !volume.is_trigger() && !volume.is_one_way()
}

/// Player character controller
#[derive(Debug, Clone)]
pub struct CharacterController {
    handle: VolumeId,
    size: Vec3,
    state: MotionState,
    abilities: AbilityState,
    player: PlayerConfig,
    ability_config: AbilityConfig,
    collision: CollisionConfig,
    void_threshold: f32,
}

impl CharacterController {
    /// Bind a controller to the player volume `handle`.
    ///
    /// The starting position and size are taken from the registered volume.
    /// Fails if the registry does not know the handle.
    pub fn attach<O>(registry: &BoundsRegistry<O>, handle: VolumeId, config: &GameConfig) -> GameResult<Self> {
        let volume = registry.bounds(handle).ok_or(GameError::PlayerNotRegistered(handle))?;
        log::debug!("controller attached to player volume {handle}");
        Ok(Self::new(handle, volume.center(), volume.size(), config))
    }

    fn new(handle: VolumeId, position: Vec3, size: Vec3, config: &GameConfig) -> Self {
        Self {
            handle,
            size,
            state: MotionState::at(position),
            abilities: AbilityState::new(),
            player: config.player.clone(),
            ability_config: config.abilities.clone(),
            collision: config.world.collision.clone(),
            void_threshold: config.world.void_threshold,
        }
    }

    /// Advance the player by one tick
    pub fn advance<O>(
        &mut self,
        registry: &mut BoundsRegistry<O>,
        decay: &mut PlatformDecay,
        delta_time: f32,
        input: InputSignals,
    ) -> TickReport {
        // Step 1: timers
        let expiry = self.abilities.timers.tick(delta_time);
        if expiry.dash_ended {
            log::trace!("dash ended at {:?}", self.state.position);
        }
        if expiry.wall_kick_ended {
            log::trace!("wall kick released");
        }

        // Step 2: facing follows held input
        let direction = input.horizontal();
        self.state.facing = sign_or(direction, self.state.facing);

        // Step 3: dash trigger
        if input.dash_pressed() && self.can_dash() {
            self.start_dash();
        }

        // Step 4: motion
        if self.abilities.timers.dash.is_running() {
            self.dash_step(registry, delta_time);
        } else {
            if input.jump_pressed() {
                self.jump();
            }
            self.apply_gravity(delta_time);
            self.resolve_horizontal(registry, delta_time, direction);
            self.apply_wall_slide(direction);
            self.resolve_vertical(registry, decay, delta_time);
        }

        // Step 5: fireball
        let launch = if input.fire_pressed() { self.fire() } else { None };

        // Step 6: void check
        let fell_into_void = self.state.position.y < self.void_threshold;
        if fell_into_void {
            log::debug!("player fell into the void at {:?}", self.state.position);
        }

        // Step 7: publish
        registry.update(self.handle, self.state.position, self.size);

        TickReport { fell_into_void, launch }
    }

    fn can_dash(&self) -> bool {
        self.abilities.has(Ability::Dash)
            && !self.abilities.timers.dash.is_running()
            && !self.abilities.timers.dash_cooldown.is_running()
    }

    fn start_dash(&mut self) {
        self.state.velocity.x = self.ability_config.dash_speed * self.state.facing;
        self.state.velocity.y = 0.0;
        self.state.grounded = false;
        self.abilities.timers.dash.start(self.ability_config.dash_duration);
        self.abilities.timers.dash_cooldown.start(self.ability_config.dash_cycle());
        log::trace!("dash towards {}", self.state.facing);
    }

    fn dash_step<O>(&mut self, registry: &BoundsRegistry<O>, delta_time: f32) {
        let velocity_x = self.state.velocity.x;
        let candidate = self.state.position + Vec3::new(velocity_x * delta_time, 0.0, 0.0);
        if !self.blocked_at(registry, candidate) {
            self.state.position = candidate;
        }
        self.state.walled = self.probe_wall(registry, sign_or(velocity_x, self.state.facing));
    }

    /// Ground jump, then wall kick, then air jump. A press that fits none of
    /// them is absorbed.
    fn jump(&mut self) {
        let force = self.player.jump_force;

        if self.state.grounded {
            self.state.velocity.y = force;
            self.state.grounded = false;
            self.state.jump_charges = 1;
            log::trace!("ground jump");
        } else if self.abilities.has(Ability::WallClimb)
            && self.state.walled
            && !self.abilities.timers.wall_jump_cooldown.is_running()
        {
            let kick = &self.ability_config;
            self.state.velocity.y = kick.wall_kick_force_y;
            self.state.velocity.x = -self.state.facing * kick.wall_kick_force_x;
            self.abilities.timers.wall_kick.start(kick.wall_kick_duration);
            self.abilities.timers.wall_jump_cooldown.start(kick.wall_jump_cooldown);
            self.state.jump_charges = 1;
            log::trace!("wall kick away from {}", self.state.facing);
        } else if self.state.jump_charges < self.abilities.allowed_jump_charges()
            && !self.abilities.timers.jump_cooldown.is_running()
        {
            self.state.velocity.y = force;
            self.abilities.timers.jump_cooldown.start(self.ability_config.jump_cooldown);
            self.state.jump_charges += 1;
            log::trace!("air jump {}", self.state.jump_charges);
        }
    }

    fn apply_gravity(&mut self, delta_time: f32) {
        if self.state.grounded {
            return;
        }
        let multiplier = if self.state.velocity.y < 0.0 {
            self.player.fall_multiplier
        } else {
            self.player.rise_multiplier
        };
        self.state.velocity.y -= self.player.gravity * multiplier * delta_time;
    }

    fn resolve_horizontal<O>(&mut self, registry: &BoundsRegistry<O>, delta_time: f32, direction: f32) {
        let target_vx = if self.abilities.timers.wall_kick.is_running() {
            self.state.velocity.x
        } else {
            let control = if self.state.grounded { 1.0 } else { self.player.air_control };
            direction * self.player.movement_speed * control
        };
        self.state.velocity.x = target_vx;

        if target_vx != 0.0 {
            let candidate = self.state.position + Vec3::new(target_vx * delta_time, 0.0, 0.0);
            if !self.blocked_at(registry, candidate) {
                self.state.position = candidate;
            }
        }
        self.state.walled = self.probe_wall(registry, self.state.facing);
    }

    /// Pushing into a wall with wall climb unlocked caps the fall speed
    fn apply_wall_slide(&mut self, direction: f32) {
        let sliding = self.abilities.has(Ability::WallClimb)
            && self.state.walled
            && !self.state.grounded
            && direction != 0.0
            && direction == self.state.facing;
        if sliding && self.state.velocity.y < -self.player.wall_slide_speed {
            self.state.velocity.y = -self.player.wall_slide_speed;
        }
    }

    fn resolve_vertical<O>(&mut self, registry: &BoundsRegistry<O>, decay: &mut PlatformDecay, delta_time: f32) {
        let vy = self.state.velocity.y;
        let half_height = self.size.y * 0.5;
        let previous_bottom = self.state.position.y - half_height;
        let candidate = self.state.position + Vec3::new(0.0, vy * delta_time, 0.0);

        // Decay only reaches volumes up to the first block; the landing
        // surface is the highest blocking top among all hits.
        let mut blocking_top: Option<f32> = None;
        for id in registry.query_filtered(self.handle, candidate, self.size, |volume| !volume.is_trigger()) {
            let volume = match registry.bounds(id) {
                Some(volume) => volume,
                None => continue,
            };
            if blocking_top.is_none() && volume.is_temporary() && vy <= 0.0 {
                decay.start(id);
            }
            if self.blocks_from_above(volume, vy, previous_bottom) {
                blocking_top = Some(blocking_top.map_or(volume.top(), |top| top.max(volume.top())));
            }
        }

        match blocking_top {
            Some(top) => {
                self.state.velocity.y = 0.0;
                if vy < 0.0 {
                    self.land(registry, top);
                }
            }
            None => {
                self.state.position.y = candidate.y;
                if vy <= 0.0 {
                    let grounded = self.probe_ground(registry, decay);
                    if grounded && !self.state.grounded {
                        self.state.jump_charges = 0;
                    }
                    self.state.grounded = grounded;
                } else {
                    self.state.grounded = false;
                }
            }
        }
    }

    /// Whether `volume` stops a vertical step. One-way platforms only stop a
    /// descending player whose bottom was at or above their top.
    fn blocks_from_above(&self, volume: &Volume, vy: f32, bottom: f32) -> bool {
        if volume.is_one_way() {
            vy <= 0.0 && bottom >= volume.top() - self.collision.one_way_tolerance
        } else {
            true
        }
    }

    /// Rest on the surface at `top`, keeping the contact skin as a gap. The
    /// snap never moves the player up and never into a solid volume.
    fn land<O>(&mut self, registry: &BoundsRegistry<O>, top: f32) {
        let rest_y = top + self.size.y * 0.5 + self.collision.contact_skin;
        let rest = Vec3::new(self.state.position.x, rest_y, self.state.position.z);
        if rest_y <= self.state.position.y && !self.blocked_at(registry, rest) {
            self.state.position.y = rest_y;
        }
        self.state.grounded = true;
        self.state.jump_charges = 0;
        self.record_checkpoint(registry);
    }

    /// Remember the highest permanent surface under the player's feet. Ties
    /// go to the earliest handle.
    fn record_checkpoint<O>(&mut self, registry: &BoundsRegistry<O>) {
        let position = self.state.position;
        let feet = position.y - self.size.y * 0.5 + self.collision.one_way_tolerance;
        let probe = position - Vec3::new(0.0, self.collision.checkpoint_probe, 0.0);
        let platform = registry
            .query_filtered(self.handle, probe, self.size, |volume| {
                !volume.is_trigger() && !volume.is_temporary() && volume.top() <= feet
            })
            .into_iter()
            .filter_map(|id| registry.bounds(id))
            .fold(None, |best: Option<&Volume>, volume| match best {
                Some(best) if best.top() >= volume.top() => Some(best),
                _ => Some(volume),
            });

        if let Some(platform) = platform {
            let height = platform.top() + self.size.y * 0.5 + self.collision.checkpoint_margin;
            self.state.last_safe_position = Vec3::new(position.x, height, position.z);
            log::trace!("checkpoint {:?}", self.state.last_safe_position);
        }
    }

    /// Probe just below the player. Every temporary platform under the probe
    /// starts decaying, so walking onto one counts as contact.
    fn probe_ground<O>(&self, registry: &BoundsRegistry<O>, decay: &mut PlatformDecay) -> bool {
        let probe = self.state.position - Vec3::new(0.0, self.collision.ground_probe, 0.0);
        let bottom = self.state.position.y - self.size.y * 0.5;

        let mut grounded = false;
        for id in registry.query_filtered(self.handle, probe, self.size, |volume| !volume.is_trigger()) {
            if let Some(volume) = registry.bounds(id) {
                if volume.is_temporary() {
                    decay.start(id);
                }
                grounded |= self.blocks_from_above(volume, 0.0, bottom);
            }
        }
        grounded
    }

    fn probe_wall<O>(&self, registry: &BoundsRegistry<O>, direction: f32) -> bool {
        let probe = self.state.position + Vec3::new(direction * self.collision.wall_probe, 0.0, 0.0);
        self.blocked_at(registry, probe)
    }

    fn blocked_at<O>(&self, registry: &BoundsRegistry<O>, center: Vec3) -> bool {
        !registry.query_filtered(self.handle, center, self.size, is_solid).is_empty()
    }

    fn fire(&mut self) -> Option<Launch> {
        if !self.abilities.has(Ability::Fireball) || self.abilities.timers.fireball_cooldown.is_running() {
            return None;
        }
        self.abilities.timers.fireball_cooldown.start(self.ability_config.fireball_cooldown);
        Some(Launch {
            origin: self.state.position + Vec3::new(self.state.facing, 0.0, 0.0),
            direction: self.state.facing,
        })
    }

    /// Teleport to the last safe position with zero velocity and no jumps
    /// used. Dashes and wall kicks in progress are cancelled.
    pub fn respawn<O>(&mut self, registry: &mut BoundsRegistry<O>) {
        self.state.position = self.state.last_safe_position;
        self.state.velocity = Vec3::zeros();
        self.state.grounded = false;
        self.state.walled = false;
        self.state.jump_charges = 0;
        self.abilities.timers.dash.clear();
        self.abilities.timers.wall_kick.clear();
        registry.update(self.handle, self.state.position, self.size);
        log::debug!("respawned at {:?}", self.state.position);
    }

    /// Grant an ability; `true` if it is new
    pub fn unlock(&mut self, ability: Ability) -> bool {
        let newly = self.abilities.unlock(ability);
        if newly {
            log::debug!("unlocked {:?}", ability);
        }
        newly
    }

    /// Player volume handle
    pub fn handle(&self) -> VolumeId {
        self.handle
    }

    /// Player volume size
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Current kinematic state
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Unlocks and timers
    pub fn abilities(&self) -> &AbilityState {
        &self.abilities
    }

    /// Current vertical mode
    pub fn mode(&self) -> MotionMode {
        let timers = &self.abilities.timers;
        if timers.dash.is_running() {
            MotionMode::Dashing
        } else if timers.wall_kick.is_running() {
            MotionMode::WallKicking
        } else if self.state.grounded {
            MotionMode::Grounded
        } else {
            MotionMode::Airborne
        }
    }

    /// Render transform of the player box
    pub fn transform(&self) -> Transform {
        Transform::from_position_scale(self.state.position, self.size)
    }

    /// Dash cooldown remaining in [0, 1]
    pub fn dash_cooldown_ratio(&self) -> f32 {
        self.abilities.dash_cooldown_ratio(&self.ability_config)
    }

    /// Air jump cooldown remaining in [0, 1]
    pub fn jump_cooldown_ratio(&self) -> f32 {
        self.abilities.jump_cooldown_ratio(&self.ability_config)
    }

    /// Wall kick cooldown remaining in [0, 1]
    pub fn wall_jump_cooldown_ratio(&self) -> f32 {
        self.abilities.wall_jump_cooldown_ratio(&self.ability_config)
    }
}
