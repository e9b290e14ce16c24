//! Blocks: the indivisible parts of a mechanism

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Block identity, unique within its mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// A block entity (circle of `radius` around `pos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    pos: Vec2,
    radius: f32,
}

impl Block {
    pub fn new(id: BlockId, pos: Vec2, radius: f32) -> Self {
        Self { id, pos, radius }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Current position in normalized units
    #[inline]
    pub fn get_coordinate(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Move the block. Only the owning mechanism may do this
    #[inline]
    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// True if the two block circles overlap when placed at the given positions
    #[inline]
    pub fn overlaps_at(&self, pos: Vec2, other: &Block, other_pos: Vec2) -> bool {
        let reach = self.radius + other.radius;
        pos.distance_squared(other_pos) < reach * reach
    }
}
