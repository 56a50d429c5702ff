//! HUD and result text
//!
//! The presentation layer renders these strings; the core never reads
//! anything back from it.

use crate::sim::{GameState, Side};

/// One side's score line
pub fn score_line(side: Side, score: u64) -> String {
    format!("{}: {}", side.label(), score)
}

/// Final win/lose/tie text, derived by comparing the two session scores
pub fn final_result_text(left_score: u64, right_score: u64) -> &'static str {
    use std::cmp::Ordering;
    match left_score.cmp(&right_score) {
        Ordering::Greater => "Left Player Wins!",
        Ordering::Less => "Right Player Wins!",
        Ordering::Equal => "Tie Game!",
    }
}

/// Result text for a finished session
pub fn session_result_text(state: &GameState) -> &'static str {
    final_result_text(
        state.session(Side::Left).score,
        state.session(Side::Right).score,
    )
}
