//! Game state and core simulation types
//!
//! Session score and game-over flags live on [`GameState`], owned explicitly
//! and passed by reference - there is no process-wide state. Each side's
//! score is written only by that side's own resolution/spawn path.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::spawn;
use super::world::Well;
use crate::tuning::Tuning;

/// Which player a piece or session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// The configured piece set, chosen uniformly at random on spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Cube,
    Slab,
    Column,
    Brick,
}

impl PieceKind {
    pub const ALL: [PieceKind; 4] = [
        PieceKind::Cube,
        PieceKind::Slab,
        PieceKind::Column,
        PieceKind::Brick,
    ];

    /// Collider half extents in world units
    pub fn half_extents(self) -> Vec2 {
        match self {
            PieceKind::Cube => Vec2::new(0.16, 0.16),
            PieceKind::Slab => Vec2::new(0.32, 0.16),
            PieceKind::Column => Vec2::new(0.16, 0.32),
            PieceKind::Brick => Vec2::new(0.32, 0.32),
        }
    }

    /// Child-part offsets from the body origin, one per visual sub-block.
    /// Used by the presentation layer for next-piece previews.
    pub fn parts(self) -> &'static [Vec2] {
        const CUBE: [Vec2; 1] = [Vec2::ZERO];
        const SLAB: [Vec2; 2] = [Vec2::new(-0.16, 0.0), Vec2::new(0.16, 0.0)];
        const COLUMN: [Vec2; 2] = [Vec2::new(0.0, -0.16), Vec2::new(0.0, 0.16)];
        const BRICK: [Vec2; 4] = [
            Vec2::new(-0.16, -0.16),
            Vec2::new(0.16, -0.16),
            Vec2::new(-0.16, 0.16),
            Vec2::new(0.16, 0.16),
        ];
        match self {
            PieceKind::Cube => &CUBE,
            PieceKind::Slab => &SLAB,
            PieceKind::Column => &COLUMN,
            PieceKind::Brick => &BRICK,
        }
    }
}

/// Per-side session: score and terminal game-over flag.
///
/// Score only ever increases; `game_over` only ever flips false to true.
/// Neither resets without a new session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Session {
    pub score: u64,
    pub game_over: bool,
}

/// Outbound notification for the presentation layer.
///
/// The core never reads UI state back; it pushes these onto a queue that the
/// caller drains once per frame via [`GameState::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { side: Side, score: u64 },
    NextPieceChanged { side: Side, kind: PieceKind },
    GameOver { side: Side },
    BothLost,
}

/// Complete game state for one two-player session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub wells: [Well; 2],
    pub sessions: [Session; 2],
    /// All live pieces, both sides (sorted by id for determinism)
    pub pieces: Vec<Piece>,
    /// Upcoming piece kind per side, re-drawn on every spawn
    pub next_kind: [PieceKind; 2],
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_kind = [spawn::draw_kind(&mut rng), spawn::draw_kind(&mut rng)];
        let mut state = Self {
            seed,
            rng,
            tuning,
            wells: [Well::standard(Side::Left), Well::standard(Side::Right)],
            sessions: [Session::default(), Session::default()],
            pieces: Vec::new(),
            next_kind,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };

        // First piece for each side
        for side in Side::BOTH {
            spawn::try_spawn(&mut state, side);
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn session(&self, side: Side) -> &Session {
        &self.sessions[side.index()]
    }

    pub fn session_mut(&mut self, side: Side) -> &mut Session {
        &mut self.sessions[side.index()]
    }

    pub fn well(&self, side: Side) -> &Well {
        &self.wells[side.index()]
    }

    /// The one falling piece for this side, if any
    pub fn active_piece_index(&self, side: Side) -> Option<usize> {
        self.pieces.iter().position(|p| p.side == side && !p.landed)
    }

    pub fn both_lost(&self) -> bool {
        self.sessions.iter().all(|s| s.game_over)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the queued notifications to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure pieces are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.pieces.sort_by_key(|p| p.id);
    }
}
