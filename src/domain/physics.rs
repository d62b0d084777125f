/// Collision queries: single source of truth for "is this side blocked?".
///
/// ## Architecture
///
/// Two layers:
///   1. BROAD PHASE: which blocks are close enough to test at all
///   2. PROBES:      do the sample points on one side of an entity land
///                    inside any of those blocks
///
/// ## Broad phase
///
/// A block qualifies when the Euclidean distance between its origin and
/// the probing rectangle's origin is below the broad-phase radius (40 by
/// default). This is a proximity filter on origins, not AABB overlap, so
/// it can accept or reject blocks inexactly near the threshold. The
/// `BlockIndex` buckets blocks by tile coordinate so a query only visits
/// the cells the radius can reach, but it applies the exact same distance
/// test and therefore accepts exactly the blocks a linear scan would.
///
/// ## Probes
///
/// For a direction, two points sit 1 unit outside the side facing it,
/// inset 1 unit from each corner of that side:
///   - UP    : (x+1, y-1)     (x+w-1, y-1)
///   - RIGHT : (x+w+1, y+1)   (x+w+1, y+h-1)
///   - DOWN  : (x+1, y+h+1)   (x+w-1, y+h+1)
///   - LEFT  : (x-1, y+1)     (x-1, y+h-1)
///
/// The side is blocked if either point lies inside a qualifying block.

use std::collections::HashMap;

use thiserror::Error;

use super::entity::Direction;
use super::tile::{tile_of, Block, Rect};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    #[error("invalid collision direction: {0:?}")]
    InvalidDirection(Direction),
}

// ══════════════════════════════════════════════════════════════
// Layer 1: Broad phase (grid buckets keyed by tile coordinate)
// ══════════════════════════════════════════════════════════════

/// Collidable blocks bucketed by grid cell. Built once per session.
///
/// Several blocks may share a cell (overlapping islands); all of them are
/// kept, matching the world's block list one-for-one.
#[derive(Clone, Debug, Default)]
pub struct BlockIndex {
    blocks: Vec<Block>,
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

impl BlockIndex {
    pub fn new(blocks: &[Block]) -> Self {
        let mut index = BlockIndex::default();
        for block in blocks.iter().filter(|b| b.is_collidable()) {
            index.buckets
                .entry(block.grid())
                .or_default()
                .push(index.blocks.len());
            index.blocks.push(*block);
        }
        index
    }

    /// Number of indexed (collidable) blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks whose origin lies strictly within `radius` of `(x, y)`.
    pub fn near(&self, x: f32, y: f32, radius: f32) -> impl Iterator<Item = &Block> + '_ {
        let (gx0, gx1, gy0, gy1) = if radius > 0.0 {
            (tile_of(x - radius), tile_of(x + radius), tile_of(y - radius), tile_of(y + radius))
        } else {
            (0, -1, 0, -1)
        };
        (gy0..=gy1)
            .flat_map(move |gy| (gx0..=gx1).map(move |gx| (gx, gy)))
            .filter_map(move |cell| self.buckets.get(&cell))
            .flatten()
            .map(move |&i| &self.blocks[i])
            .filter(move |b| b.rect().origin_distance(x, y) < radius)
    }
}

// ══════════════════════════════════════════════════════════════
// Layer 2: Probes
// ══════════════════════════════════════════════════════════════

/// The two sample points just outside `rect` on the side facing `direction`.
pub fn sample_points(rect: &Rect, direction: Direction) -> Result<[(f32, f32); 2], PhysicsError> {
    let Rect { x, y, width: w, height: h } = *rect;
    let points = match direction {
        Direction::Up => [(x + 1.0, y - 1.0), (x + w - 1.0, y - 1.0)],
        Direction::Right => [(x + w + 1.0, y + 1.0), (x + w + 1.0, y + h - 1.0)],
        Direction::Down => [(x + 1.0, y + h + 1.0), (x + w - 1.0, y + h + 1.0)],
        Direction::Left => [(x - 1.0, y + 1.0), (x - 1.0, y + h - 1.0)],
        Direction::None => return Err(PhysicsError::InvalidDirection(direction)),
    };
    Ok(points)
}

/// Is the `direction` side of `probe` blocked by a nearby block?
///
/// `probe` is normally the entity's rectangle moved to its prospective
/// position; the broad phase is centered on the same origin.
pub fn is_colliding(
    index: &BlockIndex,
    probe: &Rect,
    direction: Direction,
    radius: f32,
) -> Result<bool, PhysicsError> {
    let points = sample_points(probe, direction)?;
    Ok(index
        .near(probe.x, probe.y, radius)
        .any(|b| points.iter().any(|&(px, py)| b.rect().contains(px, py))))
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
