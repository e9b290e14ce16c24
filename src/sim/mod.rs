//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Stable iteration order (blocks by id, players by index)
//! - No windowing or platform dependencies beyond the collaborator traits

pub mod block;
pub mod collision;
pub mod game;
pub mod layout;
pub mod mechanism;
pub mod state;
pub mod tick;

pub use block::{Block, BlockId};
pub use collision::{BlockContact, CollisionDirector, CollisionReport, DirectorStats};
pub use game::Game;
pub use layout::grow_layout;
pub use mechanism::{Bounds, Mechanism, MechanismId};
pub use state::{
    Action, CONTROL_SCHEMES, ControlScheme, GamePhase, LoopState, ObjectId, TickOutcome,
    is_valid,
};
