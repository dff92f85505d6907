//! Headless Phi runner
//!
//! Plays a short scripted input sequence through the built-in level (or a
//! level file) and logs the HUD once per simulated second.
//!
//! ```text
//! phi [config.toml|config.ron] [level.ron]
//! ```

use phi_engine::config::Config;
use phi_engine::foundation::logging;
use phi_game::prelude::*;
use std::path::PathBuf;

const TICK: f32 = 1.0 / 60.0;
const TICKS_PER_SECOND: u32 = 60;

/// Held input for `seconds`, with edge signals sent only on the first tick
struct Step {
    seconds: f32,
    held: InputSignals,
    pressed: InputSignals,
}

impl Step {
    const fn new(seconds: f32, held: InputSignals, pressed: InputSignals) -> Self {
        Self { seconds, held, pressed }
    }
}

fn script() -> Vec<Step> {
    let none = InputSignals::empty();
    vec![
        Step::new(2.0, none, none),
        Step::new(1.0, InputSignals::MOVE_LEFT, none),
        Step::new(0.5, none, InputSignals::FIRE),
        Step::new(1.5, InputSignals::MOVE_RIGHT, none),
        Step::new(0.8, InputSignals::MOVE_RIGHT, InputSignals::JUMP),
        Step::new(1.0, InputSignals::MOVE_RIGHT, InputSignals::JUMP),
        Step::new(2.0, InputSignals::MOVE_RIGHT, InputSignals::JUMP),
        Step::new(2.0, none, none),
    ]
}

fn run() -> GameResult<()> {
    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let config_path = args.next();
    let level_path = args.next();

    let config = GameConfig::load_or_default(config_path.as_deref())?;
    logging::init(&config.logging.level);

    let level = match level_path {
        Some(path) => LevelLayout::load(path)?,
        None => LevelLayout::sketch(),
    };
    log::info!("starting level '{}'", level.name);

    let mut world = World::new(config, level)?;
    let mut tick_count: u32 = 0;

    'script: for step in script() {
        let ticks = (step.seconds * TICKS_PER_SECOND as f32).round() as u32;
        for tick in 0..ticks {
            let input = if tick == 0 { step.held | step.pressed } else { step.held };
            world.advance(TICK, input);
            tick_count += 1;

            if tick_count % TICKS_PER_SECOND == 0 {
                log::info!("{}", world.hud());
            }
            if !matches!(world.state(), SessionState::Playing) {
                break 'script;
            }
        }
    }

    log::info!("final: {}", world.hud());
    log::info!("{} volumes visible", world.visible_volumes().count());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("phi: {e}");
        std::process::exit(1);
    }
}
