//! Duodrop - a two-player physics-driven falling-block duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (piece physics, line resolution, spawning)
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD and result text consumed by the presentation layer
//!
//! There is no grid. Pieces are rigid bodies with continuous positions; row
//! membership is inferred by quantizing a settled piece's y position against
//! a fixed cell height each time lines are resolved.

pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Vertical quantum used to infer row membership from continuous y
    pub const CELL_HEIGHT: f32 = 0.32;
    /// Horizontal distance of one discrete shift command
    pub const SHIFT_STEP: f32 = 0.32;
    /// Exponential smoothing rate toward the horizontal target (per second)
    pub const SHIFT_SMOOTHING: f32 = 14.0;
    /// Constant fall speed while a piece is airborne (units/s)
    pub const FALL_SPEED: f32 = 1.6;
    /// Contact tolerance for landing detection
    pub const CONTACT_SKIN: f32 = 0.01;

    /// Settled pieces in one inferred row needed to clear it
    pub const LINE_CLEAR_THRESHOLD: usize = 12;
    /// Score awarded per cleared row
    pub const POINTS_PER_LINE: u64 = 100;
    /// Delay between landing and the land notification (0.1 s at 120 Hz),
    /// so physics transforms flush before resolution reads positions
    pub const LANDING_NOTIFY_TICKS: u32 = 12;

    /// Well dimensions - each side gets its own play area
    pub const WELL_HALF_WIDTH: f32 = 2.08;
    pub const WELL_CENTER_OFFSET: f32 = 2.5;
    pub const WALL_THICKNESS: f32 = 0.2;
    pub const FLOOR_Y: f32 = 0.0;
    pub const SPAWN_Y: f32 = 6.4;
}

/// Quantize a continuous y position to an inferred row index
#[inline]
pub fn row_index(y: f32, cell_height: f32) -> i32 {
    (y / cell_height).round() as i32
}

/// Snap a coordinate to two-decimal precision (applied when a piece lands)
#[inline]
pub fn snap_hundredths(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
