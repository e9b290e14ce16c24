//! Error taxonomy for the arena
//!
//! Every variant is a precondition violation surfaced at the call site.
//! Collision detection never errors: "no collision" is a normal result.

use crate::sim::{BlockId, MechanismId, ObjectId};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A mechanism must hold at least one block
    #[error("mechanism {0:?} has no blocks; center of mass is undefined")]
    EmptyMechanism(MechanismId),

    #[error("mechanism {mechanism:?} contains block {block:?} more than once")]
    DuplicateBlock {
        mechanism: MechanismId,
        block: BlockId,
    },

    #[error("mechanism {mechanism:?} core {core:?} is not one of its blocks")]
    UnknownCore {
        mechanism: MechanismId,
        core: BlockId,
    },

    #[error("mechanism {0:?} cannot be its own opponent")]
    SelfOpponent(MechanismId),

    #[error("players must be two distinct mechanisms, both were {0:?}")]
    DuplicatePlayers(MechanismId),

    #[error("the game needs 2 players to run, found {found}")]
    NotEnoughPlayers { found: usize },

    #[error("player {0} does not exist")]
    NoSuchPlayer(usize),

    #[error("mechanism {0:?} has no opponent set")]
    OpponentNotSet(MechanismId),

    /// A's opponent is B but B's opponent is not A
    #[error("opponent wiring is not symmetric between {a:?} and {b:?}")]
    AsymmetricOpponents { a: MechanismId, b: MechanismId },

    #[error("object id space exhausted")]
    ObjectIdsExhausted,

    #[error("object {0:?} is not in the game")]
    ObjectNotFound(ObjectId),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
