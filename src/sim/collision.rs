//! Collision detection and response between mechanisms
//!
//! Every block of one mechanism is tested against every block of the other,
//! so the cost is `|blocks_a| * |blocks_b|` per pair once the bounding boxes
//! overlap. Blocks are circles; a pair collides if the circles overlap now
//! or would overlap after drifting for one more `dt`.

use std::fmt;

use glam::Vec2;

use super::block::{Block, BlockId};
use super::mechanism::{Mechanism, MechanismId};

/// One overlapping block pair
#[derive(Debug, Clone, PartialEq)]
pub struct BlockContact {
    pub block_a: BlockId,
    pub block_b: BlockId,
    /// Unit vector from block_a toward block_b
    pub normal: Vec2,
    /// How far the circles overlap (0 for a predicted-only contact)
    pub penetration: f32,
}

/// Result of a pairwise test that found at least one contact
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionReport {
    pub mechanism_a: MechanismId,
    pub mechanism_b: MechanismId,
    /// Sorted by (block_a, block_b)
    pub contacts: Vec<BlockContact>,
}

impl fmt::Display for CollisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collision {:?} <-> {:?}: {} contact(s)",
            self.mechanism_a,
            self.mechanism_b,
            self.contacts.len()
        )?;
        for contact in &self.contacts {
            write!(
                f,
                " [{:?}x{:?} depth {:.3}]",
                contact.block_a, contact.block_b, contact.penetration
            )?;
        }
        Ok(())
    }
}

/// Running detection counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectorStats {
    /// Mechanism pairs tested
    pub checks: u64,
    /// Pairs that passed the bounding-box test
    pub narrow_checks: u64,
    /// Pairs that collided
    pub hits: u64,
}

/// Pairwise collision detection with a halt response
#[derive(Debug, Default)]
pub struct CollisionDirector {
    stats: DirectorStats,
}

impl CollisionDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DirectorStats {
        self.stats
    }

    /// Test two mechanisms and, on contact, halt both.
    ///
    /// Returns `None` when no block pair overlaps; nothing is mutated then.
    pub fn detect_and_effect_collision(
        &mut self,
        a: &mut Mechanism,
        b: &mut Mechanism,
        dt: f32,
    ) -> Option<CollisionReport> {
        let report = self.detect(a, b, dt)?;
        a.halt();
        b.halt();
        Some(report)
    }

    /// Detection only
    pub fn detect(&mut self, a: &Mechanism, b: &Mechanism, dt: f32) -> Option<CollisionReport> {
        self.stats.checks += 1;

        let step_a = a.velocity() * dt;
        let step_b = b.velocity() * dt;

        // Broad phase: swept boxes
        let (bounds_a, bounds_b) = (a.bounds(), b.bounds());
        let swept_a = bounds_a.union(&bounds_a.translated(step_a));
        let swept_b = bounds_b.union(&bounds_b.translated(step_b));
        if !swept_a.overlaps(&swept_b) {
            return None;
        }
        self.stats.narrow_checks += 1;

        let mut contacts = Vec::new();
        for block_a in a.get_blocks().values() {
            for block_b in b.get_blocks().values() {
                if let Some(contact) = block_contact(block_a, step_a, block_b, step_b) {
                    contacts.push(contact);
                }
            }
        }

        if contacts.is_empty() {
            return None;
        }
        self.stats.hits += 1;

        Some(CollisionReport {
            mechanism_a: a.id(),
            mechanism_b: b.id(),
            contacts,
        })
    }
}

/// Check a block pair at current and predicted positions
fn block_contact(a: &Block, step_a: Vec2, b: &Block, step_b: Vec2) -> Option<BlockContact> {
    let (pos_a, pos_b) = (a.get_coordinate(), b.get_coordinate());

    let hit_now = a.overlaps_at(pos_a, b, pos_b);
    let hit_next = !hit_now && a.overlaps_at(pos_a + step_a, b, pos_b + step_b);
    if !(hit_now || hit_next) {
        return None;
    }

    let delta = pos_b - pos_a;
    let distance = delta.length();
    let penetration = if hit_now {
        a.radius() + b.radius() - distance
    } else {
        0.0
    };
    // Coincident centers have no direction; fall back to +x so the result is stable
    let normal = delta.try_normalize().unwrap_or(Vec2::X);

    Some(BlockContact {
        block_a: a.id(),
        block_b: b.id(),
        normal,
        penetration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn at(id: u32, pos: Vec2, offsets: &[Vec2]) -> Mechanism {
        Mechanism::from_layout(MechanismId(id), pos, offsets, 0.5).unwrap()
    }

    #[test]
    fn test_far_apart_is_none() {
        let mut director = CollisionDirector::new();
        let mut a = at(1, Vec2::ZERO, &[Vec2::ZERO]);
        let mut b = at(2, Vec2::new(5.0, 0.0), &[Vec2::ZERO]);

        assert!(director.detect_and_effect_collision(&mut a, &mut b, SIM_DT).is_none());
        assert_eq!(director.stats().checks, 1);
        assert_eq!(director.stats().narrow_checks, 0);
    }

    #[test]
    fn test_boxes_overlap_but_blocks_do_not() {
        // L shapes whose boxes overlap while no circles touch
        let mut director = CollisionDirector::new();
        let a = at(1, Vec2::ZERO, &[Vec2::ZERO, Vec2::new(3.0, 0.0)]);
        let b = at(2, Vec2::new(1.5, 1.8), &[Vec2::ZERO, Vec2::new(0.0, -1.0)]);

        assert!(director.detect(&a, &b, SIM_DT).is_none());
        assert_eq!(director.stats().narrow_checks, 1);
    }

    #[test]
    fn test_same_position_collides_and_halts() {
        let mut director = CollisionDirector::new();
        let mut a = at(1, Vec2::ZERO, &[Vec2::ZERO]);
        let mut b = at(2, Vec2::ZERO, &[Vec2::ZERO]);
        a.apply_impulse(Vec2::new(1.0, 0.0));
        b.apply_impulse(Vec2::new(-1.0, 0.0));

        let report = director
            .detect_and_effect_collision(&mut a, &mut b, SIM_DT)
            .expect("overlapping blocks must collide");
        assert_eq!(report.mechanism_a, MechanismId(1));
        assert_eq!(report.mechanism_b, MechanismId(2));
        assert_eq!(report.contacts.len(), 1);
        assert_eq!(report.contacts[0].normal, Vec2::X);
        assert!((report.contacts[0].penetration - 1.0).abs() < 1e-6);

        assert_eq!(a.velocity(), Vec2::ZERO);
        assert_eq!(b.velocity(), Vec2::ZERO);
        assert_eq!(director.stats().hits, 1);
    }

    #[test]
    fn test_reports_every_pair_in_order() {
        let mut director = CollisionDirector::new();
        let a = at(1, Vec2::ZERO, &[Vec2::ZERO, Vec2::new(0.0, 1.0)]);
        let b = at(2, Vec2::new(0.6, 0.0), &[Vec2::ZERO, Vec2::new(0.0, 1.0)]);

        let report = director.detect(&a, &b, SIM_DT).unwrap();
        let pairs: Vec<(u32, u32)> = report
            .contacts
            .iter()
            .map(|c| (c.block_a.0, c.block_b.0))
            .collect();
        assert_eq!(pairs, vec![(0, 0), (1, 1)]);
        assert!(report.contacts.iter().all(|c| c.normal.x > 0.99));
    }

    #[test]
    fn test_predicted_contact() {
        // Gap of 0.2 closed by drift within one dt
        let mut director = CollisionDirector::new();
        let mut a = at(1, Vec2::ZERO, &[Vec2::ZERO]);
        let b = at(2, Vec2::new(1.2, 0.0), &[Vec2::ZERO]);

        assert!(director.detect(&a, &b, 0.1).is_none());

        a.apply_impulse(Vec2::new(3.0, 0.0));
        let report = director.detect(&a, &b, 0.1).unwrap();
        assert_eq!(report.contacts[0].penetration, 0.0);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let mut director = CollisionDirector::new();
        let offsets = [Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ONE];
        let a = at(1, Vec2::ZERO, &offsets);
        let b = at(2, Vec2::new(0.5, 0.5), &offsets);

        let first = director.detect(&a, &b, SIM_DT);
        let second = director.detect(&a, &b, SIM_DT);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_display() {
        let report = CollisionReport {
            mechanism_a: MechanismId(1),
            mechanism_b: MechanismId(2),
            contacts: vec![BlockContact {
                block_a: BlockId(0),
                block_b: BlockId(3),
                normal: Vec2::X,
                penetration: 0.25,
            }],
        };
        let text = report.to_string();
        assert!(text.contains("1 contact(s)"));
        assert!(text.contains("BlockId(0)xBlockId(3)"));
    }
}
