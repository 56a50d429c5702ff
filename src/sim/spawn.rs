//! Spawn / game-over arbiter
//!
//! Decides whether a new piece may enter a side's well, or whether the
//! spawn point is blocked by that side's own stack (the loss condition).
//! The per-side state machine is Playing -> GameOver, one-way; there is no
//! reset short of a new session.

use rand::Rng;
use rand_pcg::Pcg32;

use super::piece::Piece;
use super::state::{GameEvent, GameState, PieceKind, Side};

/// Outcome of a spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A new piece entered the well
    Spawned,
    /// The side's own stack reached the spawn point; side is out
    GameOverForSide,
    /// Side was already game-over; nothing happened
    Blocked,
}

/// Uniform draw from the configured piece set
pub fn draw_kind(rng: &mut Pcg32) -> PieceKind {
    PieceKind::ALL[rng.random_range(0..PieceKind::ALL.len())]
}

/// Try to spawn the previously-chosen piece for `side`.
///
/// Occupancy is a fixed small bounding-box probe at the spawn point against
/// the side's OWN pieces; the opponent's stack lives in the other well and
/// never blocks a spawn.
pub fn try_spawn(state: &mut GameState, side: Side) -> SpawnOutcome {
    if state.session(side).game_over {
        return SpawnOutcome::Blocked;
    }

    let probe = state.well(side).spawn_probe();
    let occupied = state
        .pieces
        .iter()
        .any(|p| p.side == side && p.collider_enabled && p.aabb.overlaps(&probe));

    if occupied {
        let other_already_out = state.session(side.other()).game_over;
        state.session_mut(side).game_over = true;
        state.push_event(GameEvent::GameOver { side });
        log::info!("{} side topped out", side.label());
        if other_already_out {
            state.push_event(GameEvent::BothLost);
            log::info!("both sides topped out - session over");
        }
        return SpawnOutcome::GameOverForSide;
    }

    let kind = state.next_kind[side.index()];
    let spawn_pos = state.well(side).spawn;
    let id = state.next_entity_id();
    state.pieces.push(Piece::new(id, kind, side, spawn_pos));

    let next = draw_kind(&mut state.rng);
    state.next_kind[side.index()] = next;
    state.push_event(GameEvent::NextPieceChanged { side, kind: next });

    SpawnOutcome::Spawned
}
