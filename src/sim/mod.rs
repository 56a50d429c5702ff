//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by piece ID)
//! - No rendering or platform dependencies
//!
//! Pieces are continuous-position rigid bodies; rows are inferred from
//! position on demand, never stored.

pub mod lines;
pub mod piece;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod world;

pub use lines::resolve;
pub use piece::Piece;
pub use spawn::{SpawnOutcome, try_spawn};
pub use state::{GameEvent, GameState, PieceKind, Session, Side};
pub use tick::{TickInput, tick};
pub use world::{Aabb, ContactTag, Well, sync_transforms};
