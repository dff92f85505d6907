//! Game session state machine
//!
//! `Playing` is the only state that accepts gameplay changes. `GameOver` and
//! `Won` are terminal: every mutator turns into a no-op until [`Session::reset`].

use crate::config::SessionConfig;
use phi_engine::foundation::time::{Countdown, SimClock};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Normal play
    Playing,
    /// Out of lives
    GameOver,
    /// Goal reached
    Won,
}

/// What a damage call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Nothing changed (not playing, zero damage or invincible)
    Ignored,
    /// Lives were lost; the player must go back to the last safe position
    Respawn,
    /// The last life was lost
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
struct Announcement {
    text: String,
    visible: Countdown,
}

/// Lives, score, invincibility and the terminal states
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    lives: u32,
    points: u32,
    invincibility: Countdown,
    announcement: Option<Announcement>,
    clock: SimClock,
}

impl Session {
    /// Fresh session with the configured starting lives
    pub fn new(config: SessionConfig) -> Self {
        let lives = config.starting_lives;
        Self {
            config,
            state: SessionState::Playing,
            lives,
            points: 0,
            invincibility: Countdown::idle(),
            announcement: None,
            clock: SimClock::new(),
        }
    }

    /// Count down invincibility and the announcement, accumulate play time.
    /// Nothing moves once the session has ended.
    pub fn tick(&mut self, delta_time: f32) {
        if !self.is_playing() {
            return;
        }
        self.clock.advance(delta_time);
        if self.invincibility.tick(delta_time) {
            log::debug!("invincibility ended");
        }
        let expired = self
            .announcement
            .as_mut()
            .map_or(false, |announcement| announcement.visible.tick(delta_time));
        if expired {
            self.announcement = None;
        }
    }

    /// Lose `amount` lives.
    ///
    /// A single point of damage is ignored while invincible; larger amounts
    /// go through.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        self.apply_damage(amount, false)
    }

    /// Lose every remaining life, invincible or not
    pub fn instakill(&mut self) -> DamageOutcome {
        let lives = self.lives.max(1);
        self.apply_damage(lives, true)
    }

    fn apply_damage(&mut self, amount: u32, lethal: bool) -> DamageOutcome {
        if !self.is_playing() || amount == 0 {
            return DamageOutcome::Ignored;
        }
        if self.is_invincible() && amount <= 1 && !lethal {
            log::trace!("damage absorbed by invincibility");
            return DamageOutcome::Ignored;
        }

        self.lives = self.lives.saturating_sub(amount);
        if self.lives == 0 {
            self.state = SessionState::GameOver;
            log::info!("game over after {:.1}s with {} points", self.clock.total_time(), self.points);
            return DamageOutcome::GameOver;
        }

        self.invincibility.start(self.config.damage_invincibility);
        log::debug!("took {amount} damage, {} lives left", self.lives);
        DamageOutcome::Respawn
    }

    /// Enter the won state. Returns `true` on the transition.
    pub fn win(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.state = SessionState::Won;
        log::info!("level won in {:.1}s with {} points", self.clock.total_time(), self.points);
        true
    }

    /// One more life
    pub fn add_life(&mut self) {
        if self.is_playing() {
            self.lives += 1;
            log::debug!("extra life, {} lives", self.lives);
        }
    }

    /// Add to the score
    pub fn add_score(&mut self, points: u32) {
        if self.is_playing() {
            self.points = self.points.saturating_add(points);
        }
    }

    /// Become invincible for `duration` seconds, replacing any running timer
    pub fn set_invincibility(&mut self, duration: f32) {
        if self.is_playing() {
            self.invincibility.start(duration);
            log::debug!("invincible for {duration:.1}s");
        }
    }

    /// Show `text` for the configured announcement time
    pub fn announce(&mut self, text: impl Into<String>) {
        if self.is_playing() {
            self.announcement = Some(Announcement {
                text: text.into(),
                visible: Countdown::started(self.config.announcement_duration),
            });
        }
    }

    /// Back to a fresh `Playing` session
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Still playing?
    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    /// Out of lives?
    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Goal reached?
    pub fn has_won(&self) -> bool {
        self.state == SessionState::Won
    }

    /// Remaining lives (never negative)
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Score
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Damage immunity active?
    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_running()
    }

    /// Text of the visible announcement, if any
    pub fn announcement(&self) -> Option<&str> {
        self.announcement.as_ref().map(|announcement| announcement.text.as_str())
    }

    /// Seconds spent in `Playing`
    pub fn total_play_time(&self) -> f32 {
        self.clock.total_time()
    }
}
