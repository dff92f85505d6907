//! Read-only snapshot of everything the HUD shows

use crate::controller::MotionMode;
use phi_engine::foundation::math::Vec3;
use std::fmt;

/// Values published for the UI layer after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    /// Remaining lives
    pub lives: u32,
    /// Score
    pub points: u32,
    /// Dash cooldown in [0, 1], 0 = ready
    pub dash_cooldown: f32,
    /// Air jump cooldown in [0, 1], 0 = ready
    pub jump_cooldown: f32,
    /// Wall kick cooldown in [0, 1], 0 = ready
    pub wall_jump_cooldown: f32,
    /// Powerup text currently shown
    pub announcement: Option<String>,
    /// Damage immunity active
    pub invincible: bool,
    /// Goal reached
    pub won: bool,
    /// Out of lives
    pub game_over: bool,
    /// Seconds of play
    pub play_time: f32,
    /// Player vertical mode
    pub mode: MotionMode,
    /// Player center
    pub position: Vec3,
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.2}s lives={} points={} pos=({:.2}, {:.2}) {:?} dash={:.2} jump={:.2} wall={:.2}",
            self.play_time,
            self.lives,
            self.points,
            self.position.x,
            self.position.y,
            self.mode,
            self.dash_cooldown,
            self.jump_cooldown,
            self.wall_jump_cooldown,
        )?;
        if self.invincible {
            write!(f, " [invincible]")?;
        }
        if let Some(text) = &self.announcement {
            write!(f, " \"{text}\"")?;
        }
        if self.won {
            write!(f, " WON")?;
        } else if self.game_over {
            write!(f, " GAME OVER")?;
        }
        Ok(())
    }
}
