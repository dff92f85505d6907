//! Ability unlocks and cooldowns
//!
//! Abilities are a fixed table selected by flag. Unlocking one only sets its
//! bit; the controller decides what each bit allows.

use crate::config::AbilityConfig;
use phi_engine::foundation::time::Countdown;
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Unlocked abilities. Bits are only ever added until a full reset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AbilityFlags: u8 {
        /// A second jump while airborne
        const DOUBLE_JUMP = 1 << 0;
        /// Horizontal burst that ignores gravity
        const DASH        = 1 << 1;
        /// Wall kick and wall slide
        const WALL_CLIMB  = 1 << 2;
        /// Fireball projectiles
        const FIREBALL    = 1 << 3;
    }
}

/// One entry of the ability table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// Second air jump
    DoubleJump,
    /// Wall kick and wall slide
    WallClimb,
    /// Dash
    Dash,
    /// Fireball
    Fireball,
}

impl Ability {
    /// Every ability, in table order
    pub const ALL: [Self; 4] = [Self::DoubleJump, Self::WallClimb, Self::Dash, Self::Fireball];

    /// Flag bit granted by this ability
    pub const fn flag(self) -> AbilityFlags {
        match self {
            Self::DoubleJump => AbilityFlags::DOUBLE_JUMP,
            Self::WallClimb => AbilityFlags::WALL_CLIMB,
            Self::Dash => AbilityFlags::DASH,
            Self::Fireball => AbilityFlags::FIREBALL,
        }
    }

    /// HUD text shown when the ability is picked up
    pub const fn announcement(self) -> &'static str {
        match self {
            Self::DoubleJump => "YOU GOT DOUBLE JUMP",
            Self::WallClimb => "YOU GOT WALL JUMP",
            Self::Dash => "YOU GOT DASH",
            Self::Fireball => "YOU GOT FIREBALL",
        }
    }
}

/// Cooldown and duration timers of the abilities
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AbilityTimers {
    /// Dash in progress
    pub dash: Countdown,
    /// Covers dash duration + cooldown
    pub dash_cooldown: Countdown,
    /// Between air jumps
    pub jump_cooldown: Countdown,
    /// Wall kick overriding horizontal control
    pub wall_kick: Countdown,
    /// Between wall kicks
    pub wall_jump_cooldown: Countdown,
    /// Between fireballs
    pub fireball_cooldown: Countdown,
}

/// Timers that ran out during a [`AbilityTimers::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerExpiry {
    /// The dash ended
    pub dash_ended: bool,
    /// The wall kick released horizontal control
    pub wall_kick_ended: bool,
}

impl AbilityTimers {
    /// Decrement every timer by `delta_time`
    pub fn tick(&mut self, delta_time: f32) -> TimerExpiry {
        let expiry = TimerExpiry {
            dash_ended: self.dash.tick(delta_time),
            wall_kick_ended: self.wall_kick.tick(delta_time),
        };
        if self.dash_cooldown.tick(delta_time) {
            log::trace!("dash re-armed");
        }
        if self.jump_cooldown.tick(delta_time) {
            log::trace!("air jump re-armed");
        }
        if self.wall_jump_cooldown.tick(delta_time) {
            log::trace!("wall kick re-armed");
        }
        self.fireball_cooldown.tick(delta_time);
        expiry
    }
}

/// Unlocks plus timers; owned by the character controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AbilityState {
    unlocked: AbilityFlags,
    /// Running timers
    pub timers: AbilityTimers,
}

impl AbilityState {
    /// Nothing unlocked, all timers idle
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant an ability. Returns `true` if it was not already unlocked.
    pub fn unlock(&mut self, ability: Ability) -> bool {
        let newly = !self.unlocked.contains(ability.flag());
        self.unlocked.insert(ability.flag());
        newly
    }

    /// Is the ability unlocked?
    pub fn has(&self, ability: Ability) -> bool {
        self.unlocked.contains(ability.flag())
    }

    /// All unlocked abilities
    pub fn unlocked(&self) -> AbilityFlags {
        self.unlocked
    }

    /// Jump charges available before landing again
    pub fn allowed_jump_charges(&self) -> u32 {
        if self.has(Ability::DoubleJump) {
            2
        } else {
            1
        }
    }

    /// Dash cooldown remaining as a fraction of the full dash cycle
    pub fn dash_cooldown_ratio(&self, config: &AbilityConfig) -> f32 {
        self.timers.dash_cooldown.ratio(config.dash_cycle())
    }

    /// Air jump cooldown remaining fraction
    pub fn jump_cooldown_ratio(&self, config: &AbilityConfig) -> f32 {
        self.timers.jump_cooldown.ratio(config.jump_cooldown)
    }

    /// Wall kick cooldown remaining fraction
    pub fn wall_jump_cooldown_ratio(&self, config: &AbilityConfig) -> f32 {
        self.timers.wall_jump_cooldown.ratio(config.wall_jump_cooldown)
    }

    /// Clear unlocks and timers
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
