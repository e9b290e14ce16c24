//! Game phases, loop state and player commands

use serde::{Deserialize, Serialize};

use super::collision::CollisionReport;
use crate::platform::{Key, KeySet};

/// Higher-level game phase. Not consulted by the loop itself yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players assemble their mechanisms
    #[default]
    Build,
    /// Active fighting
    Play,
}

/// Loop control state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    /// Terminal, reached on a quit event
    Stopped,
}

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CoreMoveUp,
    CoreMoveDown,
    CoreMoveLeft,
    CoreMoveRight,
}

/// Four keys bound to one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheme {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
}

impl ControlScheme {
    pub const WASD: ControlScheme = ControlScheme {
        up: Key::W,
        down: Key::S,
        left: Key::A,
        right: Key::D,
    };

    pub const ARROWS: ControlScheme = ControlScheme {
        up: Key::Up,
        down: Key::Down,
        left: Key::Left,
        right: Key::Right,
    };

    /// Actions for the pressed keys, always in up, down, left, right order
    pub fn actions(&self, keys: &KeySet) -> Vec<Action> {
        [
            (self.up, Action::CoreMoveUp),
            (self.down, Action::CoreMoveDown),
            (self.left, Action::CoreMoveLeft),
            (self.right, Action::CoreMoveRight),
        ]
        .into_iter()
        .filter(|(key, _)| keys.is_pressed(*key))
        .map(|(_, action)| action)
        .collect()
    }
}

/// Player index -> control scheme. The arena is strictly two-player
pub const CONTROL_SCHEMES: [ControlScheme; 2] = [ControlScheme::WASD, ControlScheme::ARROWS];

/// Whether `action` is allowed during `phase`.
///
/// Always true: no phase restricts movement yet.
pub fn is_valid(_phase: GamePhase, _action: Action) -> bool {
    true
}

/// Transient object identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Any mechanism pair collided; input was ignored this tick
    pub collided: bool,
    pub reports: Vec<CollisionReport>,
    /// Loop state after the tick
    pub state: LoopState,
}
