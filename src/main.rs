//! Duodrop entry point
//!
//! Headless demo driver: runs a two-player session at the fixed timestep
//! with a scripted random-walk input stream per side, logs the outbound
//! notifications a presentation layer would consume, and prints the final
//! scores and result text.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use duodrop::consts::SIM_DT;
use duodrop::sim::{GameEvent, GameState, Side, TickInput, tick};
use duodrop::ui;
use duodrop::Tuning;

/// Safety cap so a stalemate session still terminates
const MAX_TICKS: u64 = 400_000;
/// How often each demo player issues a step command
const INPUT_PERIOD_TICKS: u64 = 18;

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(2) else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => match tuning.validate() {
                Ok(()) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(why) => {
                    log::error!("Rejected tuning from {}: {}", path, why);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::error!("Failed to parse tuning {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read tuning {}: {} - using defaults", path, e);
            Tuning::default()
        }
    }
}

fn log_events(state: &mut GameState) {
    for event in state.drain_events() {
        match event {
            GameEvent::ScoreChanged { side, score } => {
                log::info!("score: {}", ui::score_line(side, score));
            }
            GameEvent::NextPieceChanged { side, kind } => {
                log::debug!("{} next piece: {:?}", side.label(), kind);
            }
            GameEvent::GameOver { side } => {
                log::info!("{} player is out", side.label());
            }
            GameEvent::BothLost => {
                log::info!("both players are out");
            }
        }
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0xd00d)
        });

    let tuning = load_tuning();
    log::info!("Duodrop starting with seed {}", seed);

    let mut state = GameState::with_tuning(seed, tuning);
    // Demo input stream is seeded separately so it never perturbs the
    // session's own piece draws
    let mut drive = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

    while !state.both_lost() && state.time_ticks < MAX_TICKS {
        let mut input = TickInput::default();
        if state.time_ticks % INPUT_PERIOD_TICKS == 0 {
            input.left_step = drive.random_range(-1i8..=1);
            input.right_step = drive.random_range(-1i8..=1);
        }
        tick(&mut state, &input, SIM_DT);
        log_events(&mut state);
    }

    if !state.both_lost() {
        log::warn!("Session hit the tick cap before both sides topped out");
    }

    println!("{}", ui::score_line(Side::Left, state.session(Side::Left).score));
    println!(
        "{}",
        ui::score_line(Side::Right, state.session(Side::Right).score)
    );
    println!("{}", ui::session_result_text(&state));
}
