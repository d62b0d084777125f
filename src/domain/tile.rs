/// Tiles and the rectangle geometry shared by blocks and entities.
/// Blocks are grid-aligned and immutable once built; their properties
/// are queried via methods so tile semantics stay centralized here.

/// Edge length of one grid cell, in world units.
pub const TILE_SIZE: f32 = 40.0;

/// Offset added to a tile's origin when an entity is pushed back out of
/// a RIGHT or DOWN collision.
pub const SNAP_INSET: f32 = 10.0;

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not.
    #[inline]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width
            && py >= self.y && py < self.y + self.height
    }

    /// Euclidean distance between the two rectangles' origins.
    #[inline]
    pub fn origin_distance(&self, x: f32, y: f32) -> f32 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

/// Display tag carried for the renderer. Physics never reads it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BlockColor {
    /// Outer ring around the playfield.
    Border,
    /// Floating island terrain.
    #[default]
    Island,
}

impl BlockColor {
    /// RGBA suggestion for renderers.
    pub fn rgba(self) -> [u8; 4] {
        match self {
            BlockColor::Border => [80, 80, 80, 255],
            BlockColor::Island => [0, 158, 47, 255],
        }
    }
}

/// One grid tile of terrain.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Block {
    gx: i32,
    gy: i32,
    rect: Rect,
    color: BlockColor,
    collidable: bool,
}

impl Block {
    pub fn new(gx: i32, gy: i32, color: BlockColor, collidable: bool) -> Self {
        Block {
            gx,
            gy,
            rect: Rect::new(gx as f32 * TILE_SIZE, gy as f32 * TILE_SIZE, TILE_SIZE, TILE_SIZE),
            color,
            collidable,
        }
    }

    /// A collidable island tile.
    pub fn solid(gx: i32, gy: i32) -> Self {
        Block::new(gx, gy, BlockColor::Island, true)
    }

    pub fn grid(&self) -> (i32, i32) {
        (self.gx, self.gy)
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    /// Does this block stop entities?
    pub fn is_collidable(&self) -> bool {
        self.collidable
    }
}

/// Grid cell containing world coordinate `v` (floor division by tile size).
#[inline]
pub fn tile_of(v: f32) -> i32 {
    (v / TILE_SIZE).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_world_position_follows_grid() {
        let b = Block::solid(3, 7);
        assert_eq!(b.grid(), (3, 7));
        assert_eq!(b.rect().x, 120.0);
        assert_eq!(b.rect().y, 280.0);
        assert_eq!(b.rect().width, TILE_SIZE);
        assert_eq!(b.rect().height, TILE_SIZE);
        assert!(b.is_collidable());
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 40.0, 40.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(39.9, 39.9));
        assert!(!r.contains(40.0, 10.0));
        assert!(!r.contains(10.0, 40.0));
        assert!(!r.contains(-0.1, 10.0));
    }

    #[test]
    fn tile_of_floors_negative_coordinates() {
        assert_eq!(tile_of(0.0), 0);
        assert_eq!(tile_of(39.9), 0);
        assert_eq!(tile_of(40.0), 1);
        assert_eq!(tile_of(-0.5), -1);
    }

    #[test]
    fn origin_distance_is_euclidean() {
        let r = Rect::new(30.0, 40.0, 1.0, 1.0);
        assert!((r.origin_distance(0.0, 0.0) - 50.0).abs() < 1e-4);
    }
}
