//! Controllable mechanisms: rigid assemblies of blocks
//!
//! A mechanism moves as a whole. Directional commands translate every block
//! by the same displacement, and drift from `velocity` is integrated by
//! [`Mechanism::move_by_physics`]. Blocks are keyed in a `BTreeMap` so every
//! iteration over them is in ascending id order.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::block::{Block, BlockId};
use crate::consts::*;
use crate::error::{GameError, Result};
use crate::renderer::{MARKER_RADIUS_PX, Paint, Renderable, Surface};
use crate::to_screen;

/// Mechanism identity, unique within a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MechanismId(pub u32);

/// Axis-aligned bounds in normalized units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Bounds shifted by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Bounds {
        Bounds {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Smallest bounds containing both
    #[inline]
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// A player-controlled composite body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mechanism {
    id: MechanismId,
    /// Never empty after construction
    blocks: BTreeMap<BlockId, Block>,
    /// Reference block for directional commands
    core: BlockId,
    /// Ongoing drift, units/second
    velocity: Vec2,
    /// Directional move speed, units/second
    pub core_speed: f32,
    /// Fraction of velocity kept after one second
    pub damping: f32,
    /// Non-owning back-reference to the opposing mechanism
    opponent: Option<MechanismId>,
}

impl Mechanism {
    /// Build a mechanism from its blocks. `core` must be one of them
    pub fn new(id: MechanismId, core: BlockId, blocks: Vec<Block>) -> Result<Self> {
        if blocks.is_empty() {
            return Err(GameError::EmptyMechanism(id));
        }

        let mut map = BTreeMap::new();
        for block in blocks {
            let block_id = block.id();
            if map.insert(block_id, block).is_some() {
                return Err(GameError::DuplicateBlock {
                    mechanism: id,
                    block: block_id,
                });
            }
        }
        if !map.contains_key(&core) {
            return Err(GameError::UnknownCore {
                mechanism: id,
                core,
            });
        }

        Ok(Self {
            id,
            blocks: map,
            core,
            velocity: Vec2::ZERO,
            core_speed: CORE_SPEED,
            damping: DAMPING,
            opponent: None,
        })
    }

    /// Build a mechanism at `at` from block offsets. The first offset is the core
    pub fn from_layout(
        id: MechanismId,
        at: Vec2,
        offsets: &[Vec2],
        block_radius: f32,
    ) -> Result<Self> {
        let blocks: Vec<Block> = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| Block::new(BlockId(i as u32), at + *offset, block_radius))
            .collect();
        Self::new(id, BlockId(0), blocks)
    }

    /// Set movement parameters (builder style)
    pub fn with_motion(mut self, core_speed: f32, damping: f32) -> Self {
        self.core_speed = core_speed;
        self.damping = damping;
        self
    }

    pub fn id(&self) -> MechanismId {
        self.id
    }

    /// Read-only view of the blocks
    pub fn get_blocks(&self) -> &BTreeMap<BlockId, Block> {
        &self.blocks
    }

    pub fn core(&self) -> BlockId {
        self.core
    }

    pub fn core_position(&self) -> Vec2 {
        // The core is validated at construction and blocks are never removed
        self.blocks
            .get(&self.core)
            .map(Block::get_coordinate)
            .unwrap_or_else(|| self.get_center_of_mass())
    }

    /// Mean of all block positions, recomputed on every call
    pub fn get_center_of_mass(&self) -> Vec2 {
        let sum: Vec2 = self.blocks.values().map(Block::get_coordinate).sum();
        sum / self.blocks.len() as f32
    }

    /// Box enclosing every block circle
    pub fn bounds(&self) -> Bounds {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for block in self.blocks.values() {
            let r = Vec2::splat(block.radius());
            min = min.min(block.get_coordinate() - r);
            max = max.max(block.get_coordinate() + r);
        }
        Bounds { min, max }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    /// Stop all drift (collision response)
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    pub fn opponent(&self) -> Option<MechanismId> {
        self.opponent
    }

    /// Record the opposing mechanism. The caller must wire both sides
    pub fn set_opponent(&mut self, other: MechanismId) -> Result<()> {
        if other == self.id {
            return Err(GameError::SelfOpponent(self.id));
        }
        self.opponent = Some(other);
        Ok(())
    }

    fn translate(&mut self, delta: Vec2) {
        for block in self.blocks.values_mut() {
            block.translate(delta);
        }
    }

    fn core_move(&mut self, direction: Vec2, dt: f32) {
        self.translate(direction * self.core_speed * dt);
    }

    /// +y is down, so up decreases y
    pub fn core_move_up(&mut self, dt: f32) {
        self.core_move(Vec2::NEG_Y, dt);
    }

    pub fn core_move_down(&mut self, dt: f32) {
        self.core_move(Vec2::Y, dt);
    }

    pub fn core_move_left(&mut self, dt: f32) {
        self.core_move(Vec2::NEG_X, dt);
    }

    pub fn core_move_right(&mut self, dt: f32) {
        self.core_move(Vec2::X, dt);
    }

    /// Integrate drift for `dt`, then decay it
    pub fn move_by_physics(&mut self, dt: f32) {
        if self.velocity == Vec2::ZERO {
            return;
        }
        self.translate(self.velocity * dt);
        self.velocity *= self.damping.powf(dt);
        if self.velocity.length_squared() < MIN_DRIFT_SPEED * MIN_DRIFT_SPEED {
            self.velocity = Vec2::ZERO;
        }
    }
}

impl Renderable for Mechanism {
    fn render(&self, surface: &mut dyn Surface, origin: Vec2, unit_size: f32) {
        for block in self.blocks.values() {
            surface.draw_circle(
                to_screen(origin, unit_size, block.get_coordinate()),
                block.radius() * unit_size,
                Paint::Block,
            );
        }
        surface.draw_circle(
            to_screen(origin, unit_size, self.get_center_of_mass()),
            MARKER_RADIUS_PX,
            Paint::CenterOfMass,
        );
    }
}
