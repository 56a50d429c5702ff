//! Line resolution: full-row detection and gravity compaction
//!
//! There is no grid to consult. Row membership is inferred fresh on every
//! call by quantizing each settled piece's y position; nothing here is
//! cached across frames, so membership can change between calls as new
//! pieces land without any stale-row bugs.
//!
//! All full rows found in one call are cleared in a single pass, and
//! compaction accounts for every cleared row below a survivor at once - a
//! piece two rows above two full rows drops by exactly two cell heights,
//! not by iterative re-resolution.

use std::collections::{BTreeMap, HashSet};

use super::state::{GameEvent, GameState, Side};
use super::world;
use crate::row_index;

/// Scan `side`'s settled pieces, clear every full row, compact survivors.
///
/// Returns the number of rows cleared (0 for an empty well or no full rows).
pub fn resolve(state: &mut GameState, side: Side) -> u32 {
    let cell = state.tuning.cell_height;
    let threshold = state.tuning.line_clear_threshold as usize;
    let well = state.well(side).clone();

    // Settled pieces for this side, inside the well's wall faces (inclusive)
    let settled: Vec<usize> = state
        .pieces
        .iter()
        .enumerate()
        .filter(|(_, p)| p.side == side && p.landed && well.contains_x(p.pos.x))
        .map(|(i, _)| i)
        .collect();
    if settled.is_empty() {
        return 0;
    }

    // Bucket by inferred row; BTreeMap keeps row iteration deterministic
    let mut rows: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for &i in &settled {
        rows.entry(row_index(state.pieces[i].pos.y, cell))
            .or_default()
            .push(i);
    }

    let full: Vec<i32> = rows
        .iter()
        .filter(|(_, bucket)| bucket.len() >= threshold)
        .map(|(&row, _)| row)
        .collect();
    if full.is_empty() {
        return 0;
    }
    let cleared = full.len() as u32;

    // Matched pieces stop interacting while they are removed
    let mut doomed: HashSet<u32> = HashSet::new();
    for row in &full {
        for &i in &rows[row] {
            state.pieces[i].collider_enabled = false;
            doomed.insert(state.pieces[i].id);
        }
    }

    // Settle-after-clear: survivors drop by one cell height per full row
    // strictly below their own row, all rows accounted for at once
    let mut relocations: Vec<(u32, f32)> = Vec::new();
    for (&row, bucket) in &rows {
        if full.contains(&row) {
            continue;
        }
        let rows_below = full.iter().filter(|&&f| f < row).count();
        if rows_below == 0 {
            continue;
        }
        for &i in bucket {
            let piece = &state.pieces[i];
            relocations.push((piece.id, piece.pos.y - rows_below as f32 * cell));
        }
    }

    // Destroy matched pieces (irreversible)
    state.pieces.retain(|p| !doomed.contains(&p.id));
    log::info!(
        "{} side cleared {} row(s): {:?}",
        side.label(),
        cleared,
        full
    );

    // Re-enable collider, make dynamic, then reposition - this ordering is
    // load-bearing (see DESIGN.md) and the forced sync below keeps any
    // one-frame overlap inside this call
    for (id, new_y) in relocations {
        if let Some(piece) = state.pieces.iter_mut().find(|p| p.id == id) {
            piece.collider_enabled = true;
            piece.kinetic = true;
            piece.pos.y = new_y;
        }
    }
    world::sync_transforms(&mut state.pieces);

    let points = state.tuning.points_per_line;
    let session = state.session_mut(side);
    session.score += points * cleared as u64;
    let score = session.score;
    state.push_event(GameEvent::ScoreChanged { side, score });

    cleared
}
