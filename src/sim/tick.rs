//! Fixed timestep simulation tick
//!
//! One call advances the whole session by one step: shift commands, piece
//! integration, transform sync, landing detection, and the deferred
//! resolve-then-spawn sequence. Everything runs synchronously on the
//! caller's frame; nothing blocks, suspends, or cancels.

use super::state::{GameState, Side};
use super::{lines, spawn, world};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Discrete horizontal step for the left piece: -1, 0, or +1
    pub left_step: i8,
    /// Discrete horizontal step for the right piece: -1, 0, or +1
    pub right_step: i8,
}

impl TickInput {
    pub fn step_for(&self, side: Side) -> i8 {
        match side {
            Side::Left => self.left_step,
            Side::Right => self.right_step,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.both_lost() {
        return;
    }
    state.time_ticks += 1;
    let tuning = state.tuning;

    // Count down the deferred land notifications armed on earlier ticks; on
    // expiry, resolve lines and arbitrate the next spawn for that side.
    // This runs first so a landing never fires its notification in the same
    // frame the body froze - resolution must read flushed transforms.
    let mut due: Vec<Side> = Vec::new();
    for piece in &mut state.pieces {
        if let Some(ticks) = piece.notify_ticks.as_mut() {
            *ticks -= 1;
            if *ticks == 0 {
                piece.notify_ticks = None;
                due.push(piece.side);
            }
        }
    }
    for side in due {
        lines::resolve(state, side);
        spawn::try_spawn(state, side);
    }

    // Shift commands - only the side's own falling piece ever moves
    for side in Side::BOTH {
        let step = input.step_for(side);
        if step == 0 || state.session(side).game_over {
            continue;
        }
        let well = state.well(side).clone();
        if let Some(idx) = state.active_piece_index(side) {
            state.pieces[idx].request_shift(step, &well, &tuning);
        }
    }

    // Integrate falling pieces, then flush transforms so this frame's
    // overlap queries see where everything actually is
    for piece in &mut state.pieces {
        piece.integrate(dt, &tuning);
    }
    world::sync_transforms(&mut state.pieces);

    // Landing detection
    let mut landed_any = false;
    for side in Side::BOTH {
        let Some(idx) = state.active_piece_index(side) else {
            continue;
        };
        let well = state.well(side).clone();
        if let Some(contact) = world::probe_support(idx, &state.pieces, &well) {
            let piece = &mut state.pieces[idx];
            // Rest the body on the supporting surface before freezing it
            piece.pos.y = contact.surface_y + piece.kind.half_extents().y;
            piece.on_contact();
            landed_any = true;
        }
    }
    if landed_any {
        world::sync_transforms(&mut state.pieces);
    }

    // Ensure deterministic ordering
    state.normalize_order();
}
