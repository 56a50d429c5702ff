//! Piece controller: horizontal-target tracking, constant fall, landing
//!
//! A piece never snaps to its horizontal target; it smooths toward it every
//! tick. Vertical motion is a constant downward velocity until the first
//! qualifying contact, which freezes the body for good.

use glam::Vec2;

use super::state::{PieceKind, Side};
use super::world::{Aabb, Well};
use crate::consts::LANDING_NOTIFY_TICKS;
use crate::snap_hundredths;
use crate::tuning::Tuning;

/// A falling or settled rigid body
#[derive(Debug, Clone)]
pub struct Piece {
    pub id: u32,
    pub kind: PieceKind,
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Desired horizontal resting position, moved by discrete step commands
    pub target_x: f32,
    /// False while falling, true once resting; one-way
    pub landed: bool,
    /// Whether physics still integrates this body
    pub kinetic: bool,
    pub collider_enabled: bool,
    /// Cached bounding box, refreshed by `world::sync_transforms`
    pub aabb: Aabb,
    /// Countdown to the deferred land notification, armed on landing
    pub notify_ticks: Option<u32>,
}

impl Piece {
    pub fn new(id: u32, kind: PieceKind, side: Side, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            side,
            pos,
            vel: Vec2::ZERO,
            target_x: pos.x,
            landed: false,
            kinetic: true,
            collider_enabled: true,
            aabb: Aabb::new(pos, kind.half_extents()),
            notify_ticks: None,
        }
    }

    /// Bounding box this piece would occupy at `pos`
    pub fn aabb_at(&self, pos: Vec2) -> Aabb {
        Aabb::new(pos, self.kind.half_extents())
    }

    /// Handle a discrete step command (-1, 0, +1).
    ///
    /// The tentative target is probed against wall geometry only - settled
    /// pieces are deliberately not consulted, so a piece can be steered into
    /// a gap narrower than itself. See DESIGN.md before changing this.
    ///
    /// Returns true if the target moved.
    pub fn request_shift(&mut self, dir: i8, well: &Well, tuning: &Tuning) -> bool {
        if self.landed || dir == 0 {
            return false;
        }
        let tentative = self.target_x + dir as f32 * tuning.shift_step;
        let probe = self.aabb_at(Vec2::new(tentative, self.pos.y));
        if well.boundary_blocks(&probe) {
            return false;
        }
        self.target_x = tentative;
        true
    }

    /// Advance this body by one timestep: smooth x toward the target,
    /// fall at constant speed. Settled and frozen bodies do not move.
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) {
        if self.landed || !self.kinetic {
            return;
        }
        let blend = 1.0 - (-tuning.shift_smoothing * dt).exp();
        self.pos.x += (self.target_x - self.pos.x) * blend;
        self.vel.y = -tuning.fall_speed;
        self.pos.y += self.vel.y * dt;
    }

    /// First qualifying contact: freeze the body and arm the deferred land
    /// notification. Repeated contacts for the same landing are no-ops.
    pub fn on_contact(&mut self) {
        if self.landed {
            return;
        }
        self.vel = Vec2::ZERO;
        self.kinetic = false;
        self.pos.y = snap_hundredths(self.pos.y);
        self.landed = true;
        self.notify_ticks = Some(LANDING_NOTIFY_TICKS);
        log::debug!(
            "piece {} ({:?}) landed at ({:.2}, {:.2})",
            self.id,
            self.side,
            self.pos.x,
            self.pos.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SHIFT_STEP, SIM_DT};

    fn falling_piece(well: &Well) -> Piece {
        Piece::new(1, PieceKind::Cube, well.side, well.spawn)
    }

    #[test]
    fn test_shift_updates_target_by_exactly_one_step() {
        let well = Well::standard(Side::Left);
        let tuning = Tuning::default();
        let mut piece = falling_piece(&well);
        let before = piece.target_x;

        assert!(piece.request_shift(1, &well, &tuning));
        assert_eq!(piece.target_x, before + SHIFT_STEP);
        assert!(piece.request_shift(-1, &well, &tuning));
        assert!(piece.request_shift(-1, &well, &tuning));
        assert_eq!(piece.target_x, before - SHIFT_STEP);
    }

    #[test]
    fn test_shift_rejected_at_boundary() {
        let well = Well::standard(Side::Left);
        let tuning = Tuning::default();
        let mut piece = falling_piece(&well);

        // Walk into the right wall until blocked
        let mut moved = 0;
        while piece.request_shift(1, &well, &tuning) {
            moved += 1;
            assert!(moved < 100, "shift never hit the wall");
        }
        let at_wall = piece.target_x;
        assert!(!piece.request_shift(1, &well, &tuning));
        assert_eq!(piece.target_x, at_wall);
        // Flush placement: piece edge at the wall face, not inside it
        assert!(at_wall + piece.kind.half_extents().x <= well.right_wall_x + 1e-4);
    }

    #[test]
    fn test_shift_ignored_once_landed() {
        let well = Well::standard(Side::Left);
        let tuning = Tuning::default();
        let mut piece = falling_piece(&well);
        piece.on_contact();
        let target = piece.target_x;
        assert!(!piece.request_shift(1, &well, &tuning));
        assert_eq!(piece.target_x, target);
    }

    #[test]
    fn test_integrate_smooths_toward_target() {
        let well = Well::standard(Side::Left);
        let tuning = Tuning::default();
        let mut piece = falling_piece(&well);
        piece.request_shift(1, &well, &tuning);

        let start_x = piece.pos.x;
        piece.integrate(SIM_DT, &tuning);
        // Moved toward the target but not snapped onto it
        assert!(piece.pos.x > start_x);
        assert!(piece.pos.x < piece.target_x);
        // And fell
        assert!(piece.pos.y < well.spawn.y);

        for _ in 0..600 {
            piece.integrate(SIM_DT, &tuning);
        }
        assert!((piece.pos.x - piece.target_x).abs() < 1e-3);
    }

    #[test]
    fn test_landing_is_idempotent() {
        let well = Well::standard(Side::Left);
        let mut piece = falling_piece(&well);
        piece.pos.y = 0.163_456;
        piece.vel.y = -1.6;

        piece.on_contact();
        assert!(piece.landed);
        assert!(!piece.kinetic);
        assert_eq!(piece.vel, Vec2::ZERO);
        assert_eq!(piece.pos.y, 0.16);
        assert_eq!(piece.notify_ticks, Some(LANDING_NOTIFY_TICKS));

        // Second qualifying contact for the same landing: no-op
        piece.notify_ticks = Some(3);
        piece.on_contact();
        assert!(piece.landed);
        assert_eq!(piece.notify_ticks, Some(3));
    }

    #[test]
    fn test_frozen_piece_does_not_integrate() {
        let well = Well::standard(Side::Left);
        let tuning = Tuning::default();
        let mut piece = falling_piece(&well);
        piece.on_contact();
        let pos = piece.pos;
        piece.integrate(SIM_DT, &tuning);
        assert_eq!(piece.pos, pos);
    }
}
