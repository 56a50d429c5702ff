//! Overlap queries and contact detection for axis-aligned bodies
//!
//! This is the physics backend the rest of the simulation invokes: bounding
//! box overlap tests against wall geometry, landing-contact probes against
//! settled pieces, and an explicit transform-sync primitive. Queries read the
//! *cached* AABB on each piece, so callers that mutate positions must call
//! [`sync_transforms`] before issuing same-frame queries.

use glam::Vec2;

use super::piece::Piece;
use super::state::Side;
use crate::consts::*;

/// Axis-aligned bounding box (center + half extents)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap test - touching edges do not count, so a piece can
    /// rest flush against a wall without the probe reporting a hit
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_min = self.min();
        let a_max = self.max();
        let b_min = other.min();
        let b_max = other.max();
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// What a falling piece came to rest on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTag {
    Ground,
    Piece,
    OpponentPiece,
}

/// A landing contact: the supporting surface and what it belongs to
#[derive(Debug, Clone, Copy)]
pub struct SupportContact {
    pub surface_y: f32,
    pub tag: ContactTag,
}

/// One side's play area: two walls, a floor, and a spawn point
#[derive(Debug, Clone)]
pub struct Well {
    pub side: Side,
    /// Inner face of the left wall
    pub left_wall_x: f32,
    /// Inner face of the right wall
    pub right_wall_x: f32,
    pub floor_y: f32,
    pub spawn: Vec2,
}

impl Well {
    /// The standard arena layout: two wells mirrored about x = 0
    pub fn standard(side: Side) -> Self {
        let center_x = match side {
            Side::Left => -WELL_CENTER_OFFSET,
            Side::Right => WELL_CENTER_OFFSET,
        };
        Self {
            side,
            left_wall_x: center_x - WELL_HALF_WIDTH,
            right_wall_x: center_x + WELL_HALF_WIDTH,
            floor_y: FLOOR_Y,
            spawn: Vec2::new(center_x, SPAWN_Y),
        }
    }

    /// Wall slabs as AABBs (extending outward from the inner faces)
    pub fn wall_aabbs(&self) -> [Aabb; 2] {
        let half = Vec2::new(WALL_THICKNESS / 2.0, SPAWN_Y);
        [
            Aabb::new(
                Vec2::new(self.left_wall_x - WALL_THICKNESS / 2.0, SPAWN_Y / 2.0),
                half,
            ),
            Aabb::new(
                Vec2::new(self.right_wall_x + WALL_THICKNESS / 2.0, SPAWN_Y / 2.0),
                half,
            ),
        ]
    }

    /// Does this probe box overlap boundary-tagged geometry (the walls)?
    pub fn boundary_blocks(&self, probe: &Aabb) -> bool {
        self.wall_aabbs().iter().any(|wall| probe.overlaps(wall))
    }

    /// Inclusive x-range membership, used when collecting pieces for
    /// line resolution
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left_wall_x && x <= self.right_wall_x
    }

    /// Fixed small occupancy probe at the spawn point
    pub fn spawn_probe(&self) -> Aabb {
        Aabb::new(self.spawn, Vec2::new(0.16, 0.16))
    }
}

/// Refresh every piece's cached AABB from its current position.
///
/// This is the transform-sync primitive: resolution moves pieces and then
/// forces a sync so overlap queries later in the same frame see the updated
/// boxes instead of stale ones.
pub fn sync_transforms(pieces: &mut [Piece]) {
    for piece in pieces.iter_mut() {
        piece.aabb = Aabb::new(piece.pos, piece.kind.half_extents());
    }
}

/// Probe beneath the falling piece at `index` for a supporting surface.
///
/// Returns the first qualifying contact: the floor, or the top of any settled
/// collider-enabled piece whose x-range overlaps and whose top edge is within
/// the contact skin of (or slightly penetrated by) the falling piece's bottom.
pub fn probe_support(index: usize, pieces: &[Piece], well: &Well) -> Option<SupportContact> {
    let falling = &pieces[index];
    let bottom = falling.aabb.min().y;

    if bottom <= well.floor_y + CONTACT_SKIN {
        return Some(SupportContact {
            surface_y: well.floor_y,
            tag: ContactTag::Ground,
        });
    }

    for (i, other) in pieces.iter().enumerate() {
        if i == index || !other.landed || !other.collider_enabled {
            continue;
        }
        let o_min = other.aabb.min();
        let o_max = other.aabb.max();
        let x_overlap = falling.aabb.min().x < o_max.x && falling.aabb.max().x > o_min.x;
        if !x_overlap {
            continue;
        }
        // Resting contact: bottom at or just below the other's top, but not
        // so deep that we are beside it rather than on top of it
        let gap = bottom - o_max.y;
        if gap <= CONTACT_SKIN && gap >= -CELL_HEIGHT / 2.0 {
            let tag = if other.side == falling.side {
                ContactTag::Piece
            } else {
                ContactTag::OpponentPiece
            };
            return Some(SupportContact {
                surface_y: o_max.y,
                tag,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PieceKind;

    fn landed_at(id: u32, side: Side, pos: Vec2) -> Piece {
        let mut p = Piece::new(id, PieceKind::Cube, side, pos);
        p.landed = true;
        p.kinetic = false;
        p.vel = Vec2::ZERO;
        p
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(0.16, 0.16));
        let touching = Aabb::new(Vec2::new(0.32, 0.0), Vec2::new(0.16, 0.16));
        let overlapping = Aabb::new(Vec2::new(0.3, 0.0), Vec2::new(0.16, 0.16));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
    }

    #[test]
    fn test_boundary_blocks_at_wall() {
        let well = Well::standard(Side::Left);
        // Flush against the left wall: allowed
        let flush = Aabb::new(
            Vec2::new(well.left_wall_x + 0.16, 1.0),
            Vec2::new(0.16, 0.16),
        );
        assert!(!well.boundary_blocks(&flush));
        // One step further: inside the wall slab
        let inside = Aabb::new(
            Vec2::new(well.left_wall_x - 0.16, 1.0),
            Vec2::new(0.16, 0.16),
        );
        assert!(well.boundary_blocks(&inside));
    }

    #[test]
    fn test_probe_support_floor() {
        let well = Well::standard(Side::Left);
        let mut pieces = vec![Piece::new(
            1,
            PieceKind::Cube,
            Side::Left,
            Vec2::new(well.spawn.x, 0.165),
        )];
        sync_transforms(&mut pieces);
        let contact = probe_support(0, &pieces, &well).expect("should touch floor");
        assert_eq!(contact.tag, ContactTag::Ground);
        assert_eq!(contact.surface_y, well.floor_y);
    }

    #[test]
    fn test_probe_support_on_settled_piece() {
        let well = Well::standard(Side::Left);
        let x = well.spawn.x;
        let mut pieces = vec![
            landed_at(1, Side::Left, Vec2::new(x, 0.16)),
            Piece::new(2, PieceKind::Cube, Side::Left, Vec2::new(x, 0.485)),
        ];
        sync_transforms(&mut pieces);
        let contact = probe_support(1, &pieces, &well).expect("should rest on piece");
        assert_eq!(contact.tag, ContactTag::Piece);
        assert!((contact.surface_y - 0.32).abs() < 1e-4);
    }

    #[test]
    fn test_probe_support_misses_when_airborne() {
        let well = Well::standard(Side::Left);
        let mut pieces = vec![Piece::new(
            1,
            PieceKind::Cube,
            Side::Left,
            Vec2::new(well.spawn.x, 3.0),
        )];
        sync_transforms(&mut pieces);
        assert!(probe_support(0, &pieces, &well).is_none());
    }

    #[test]
    fn test_probe_ignores_collision_disabled_pieces() {
        let well = Well::standard(Side::Left);
        let x = well.spawn.x;
        let mut support = landed_at(1, Side::Left, Vec2::new(x, 0.16));
        support.collider_enabled = false;
        let mut pieces = vec![
            support,
            Piece::new(2, PieceKind::Cube, Side::Left, Vec2::new(x, 0.485)),
        ];
        sync_transforms(&mut pieces);
        assert!(probe_support(1, &pieces, &well).is_none());
    }
}
