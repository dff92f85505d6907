//! Abstract input signals
//!
//! Device binding happens outside the simulation. The host translates keys or
//! buttons into these flags once per tick: movement is a held level, the
//! action buttons are edges ("pressed this tick").

bitflags::bitflags! {
    /// Input for one simulation tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputSignals: u8 {
        /// Held: move left
        const MOVE_LEFT  = 1 << 0;
        /// Held: move right
        const MOVE_RIGHT = 1 << 1;
        /// Edge: jump pressed this tick
        const JUMP       = 1 << 2;
        /// Edge: dash pressed this tick
        const DASH       = 1 << 3;
        /// Edge: fire pressed this tick
        const FIRE       = 1 << 4;
    }
}

impl InputSignals {
    /// Held horizontal direction: -1, 0 or +1 (both held cancel out)
    pub fn horizontal(self) -> f32 {
        let mut direction = 0.0;
        if self.contains(Self::MOVE_LEFT) {
            direction -= 1.0;
        }
        if self.contains(Self::MOVE_RIGHT) {
            direction += 1.0;
        }
        direction
    }

    /// Jump edge?
    pub fn jump_pressed(self) -> bool {
        self.contains(Self::JUMP)
    }

    /// Dash edge?
    pub fn dash_pressed(self) -> bool {
        self.contains(Self::DASH)
    }

    /// Fire edge?
    pub fn fire_pressed(self) -> bool {
        self.contains(Self::FIRE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_direction() {
        assert_eq!(InputSignals::empty().horizontal(), 0.0);
        assert_eq!(InputSignals::MOVE_LEFT.horizontal(), -1.0);
        assert_eq!(InputSignals::MOVE_RIGHT.horizontal(), 1.0);
        assert_eq!((InputSignals::MOVE_LEFT | InputSignals::MOVE_RIGHT).horizontal(), 0.0);
    }

    #[test]
    fn test_edges() {
        let input = InputSignals::JUMP | InputSignals::MOVE_RIGHT;
        assert!(input.jump_pressed());
        assert!(!input.dash_pressed());
        assert!(!input.fire_pressed());
    }
}
