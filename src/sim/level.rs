/// Procedural level generator.
///
/// ## Layout
///
///   1. Optional border ring, one tile thick: rows `y = 0` and `y = height`
///      for `x ∈ [0, width]`, columns `x = 0` and `x = width` for
///      `y ∈ [1, height-1]`.
///   2. A grid of island centers (20 × 20 by default). Row `r`, column `i`
///      sits at `(10·i + U(-8,8), 5 + 3·r + U(-8,8))`.
///   3. Each island has `U(1,3)` layers. Layer `L` spans
///      `[cx - w/2, cx + w/2)` on row `cy + L`, with `w = U(-(10-2L), 10-2L)`.
///      Negative widths give an inverted, empty range and emit nothing.
///      Cells on or outside the border rows/columns are skipped.
///
/// ## Determinism
///
/// The random source is seeded from the session seed and drawn in a fixed
/// order: row → column → (cx, cy, layer count) → one width per layer.
/// The width scan draws nothing. Changing this order changes every level
/// for a given seed.
///
/// Overlapping islands are kept as-is: the same cell may appear twice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::tile::{Block, BlockColor};

const ISLAND_SPACING_X: i32 = 10;
const ISLAND_SPACING_Y: i32 = 3;
const ISLAND_TOP_Y: i32 = 5;
const CENTER_JITTER: i32 = 8;
const MAX_ISLAND_LAYERS: i32 = 3;
const LAYER_SPAN: i32 = 10;         // width bound at layer 0
const LAYER_SPAN_SHRINK: i32 = 2;   // per layer

/// How many island centers to scatter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IslandLayout {
    pub rows: u32,
    pub columns: u32,
}

impl Default for IslandLayout {
    fn default() -> Self {
        IslandLayout { rows: 20, columns: 20 }
    }
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Generate the blocks of a `width × height` level from `seed`.
pub fn generate(width: i32, height: i32, border: bool, seed: u64) -> Vec<Block> {
    generate_with_layout(width, height, border, seed, IslandLayout::default())
}

/// Same as [`generate`] with an explicit island grid.
pub fn generate_with_layout(
    width: i32,
    height: i32,
    border: bool,
    seed: u64,
    layout: IslandLayout,
) -> Vec<Block> {
    let mut blocks = Vec::new();

    if border {
        push_border(&mut blocks, width, height);
    }
    let border_count = blocks.len();

    let mut rng = StdRng::seed_from_u64(seed);
    for row in 0..layout.rows as i32 {
        for col in 0..layout.columns as i32 {
            let cx = ISLAND_SPACING_X * col + uniform(&mut rng, -CENTER_JITTER, CENTER_JITTER);
            let cy = ISLAND_TOP_Y + ISLAND_SPACING_Y * row + uniform(&mut rng, -CENTER_JITTER, CENTER_JITTER);
            push_island(&mut blocks, &mut rng, cx, cy, width, height);
        }
    }

    debug!(
        width, height, border, seed,
        border_blocks = border_count,
        island_blocks = blocks.len() - border_count,
        "level generated"
    );
    blocks
}

// ══════════════════════════════════════════════════════════════
// Internal
// ══════════════════════════════════════════════════════════════

fn push_border(blocks: &mut Vec<Block>, width: i32, height: i32) {
    for x in 0..=width {
        blocks.push(Block::new(x, 0, BlockColor::Border, true));
        blocks.push(Block::new(x, height, BlockColor::Border, true));
    }
    for y in 1..height {
        blocks.push(Block::new(0, y, BlockColor::Border, true));
        blocks.push(Block::new(width, y, BlockColor::Border, true));
    }
}

fn push_island(
    blocks: &mut Vec<Block>,
    rng: &mut StdRng,
    cx: i32,
    cy: i32,
    width: i32,
    height: i32,
) {
    let layers = uniform(rng, 1, MAX_ISLAND_LAYERS);
    for layer in 0..layers {
        let span = LAYER_SPAN - LAYER_SPAN_SHRINK * layer;
        let island_width = uniform(rng, -span, span);
        let y = cy + layer;
        if y <= 0 || y >= height {
            continue;
        }
        // Half-open: an inverted range is simply empty.
        for x in (cx - island_width / 2)..(cx + island_width / 2) {
            if x > 0 && x < width {
                blocks.push(Block::solid(x, y));
            }
        }
    }
}

/// Uniform integer in `[lo, hi]`. An inverted range yields 0 without drawing.
fn uniform(rng: &mut StdRng, lo: i32, hi: i32) -> i32 {
    if lo > hi {
        return 0;
    }
    rng.random_range(lo..=hi)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
