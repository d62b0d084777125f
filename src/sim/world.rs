/// World, player and camera: the state a play session is made of.
///
/// ## World
///
/// The world is generated once from its config and never mutated
/// afterwards. Its blocks feed a `BlockIndex` that the resolver queries
/// every frame.
///
/// ## Camera / Viewport
///
/// World coordinates and screen coordinates are separate:
///   - `camera.target`: world point shown at the viewport center
///   - Renderer maps: `screen = world - target + view / 2`
///   - The camera re-centers on the player after every physics step

use crate::config::{PhysicsConfig, PlayerConfig, WorldConfig};
use crate::domain::entity::{Entity, FrameInput};
use crate::domain::physics::{BlockIndex, PhysicsError};
use crate::domain::tile::{Block, Rect, TILE_SIZE};
use super::event::PhysicsEvent;
use super::level;
use super::step;

#[derive(Clone, Debug)]
pub struct World {
    blocks: Vec<Block>,
    width: i32,
    height: i32,
    border: bool,
    seed: u64,
}

impl World {
    pub fn generate(config: &WorldConfig) -> Self {
        World {
            blocks: level::generate_with_layout(
                config.width, config.height, config.border, config.seed, config.islands,
            ),
            width: config.width,
            height: config.height,
            border: config.border,
            seed: config.seed,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Width in tiles.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Size in world units, including the border row/column at `width`/`height`.
    pub fn extent(&self) -> (f32, f32) {
        (
            (self.width.max(0) + 1) as f32 * TILE_SIZE,
            (self.height.max(0) + 1) as f32 * TILE_SIZE,
        )
    }

    pub fn index(&self) -> BlockIndex {
        BlockIndex::new(&self.blocks)
    }
}

/// Viewport that follows a target.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// World point shown at the center of the viewport.
    pub target: (f32, f32),
    pub view_w: f32,
    pub view_h: f32,
}

impl Camera {
    pub fn new(view_w: f32, view_h: f32) -> Self {
        Camera { target: (0.0, 0.0), view_w, view_h }
    }

    /// Center the viewport on the middle of `rect`.
    pub fn follow(&mut self, rect: &Rect) {
        self.target = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
    }

    /// Screen-space offset added to world coordinates when drawing.
    pub fn offset(&self) -> (f32, f32) {
        (self.view_w / 2.0 - self.target.0, self.view_h / 2.0 - self.target.1)
    }

    pub fn world_to_view(&self, wx: f32, wy: f32) -> (f32, f32) {
        let (ox, oy) = self.offset();
        (wx + ox, wy + oy)
    }
}

/// The controllable entity. After every step the camera is told where it went.
#[derive(Clone, Debug)]
pub struct Player {
    pub entity: Entity,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        let mut entity = Entity::new(config.spawn_x, config.spawn_y, config.width, config.height);
        entity.health = config.health;
        Player { entity }
    }

    /// Jump (if requested), integrate and resolve one frame, then move the camera.
    pub fn update(
        &mut self,
        blocks: &BlockIndex,
        physics: &PhysicsConfig,
        input: FrameInput,
        camera: &mut Camera,
    ) -> Result<Vec<PhysicsEvent>, PhysicsError> {
        let mut events = Vec::new();
        if input.jump {
            events.extend(step::jump(&mut self.entity, blocks, physics)?);
        }
        events.extend(step::step(&mut self.entity, blocks, physics, input.dx, input.dy)?);
        camera.follow(&self.entity.rect);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::level::IslandLayout;

    #[test]
    fn world_generation_matches_level_generator() {
        let cfg = GameConfig::default().world;
        let world = World::generate(&cfg);
        assert_eq!(
            world.blocks(),
            level::generate(cfg.width, cfg.height, cfg.border, cfg.seed).as_slice(),
        );
        assert_eq!(world.index().len(), world.blocks().len());
    }

    #[test]
    fn extent_covers_border() {
        let cfg = WorldConfig {
            width: 10,
            height: 5,
            border: true,
            seed: 0,
            islands: IslandLayout { rows: 0, columns: 0 },
        };
        let world = World::generate(&cfg);
        assert_eq!(world.extent(), (440.0, 240.0));
        assert_eq!(world.blocks().len(), 2 * 11 + 2 * 4);
    }

    #[test]
    fn camera_centers_on_rect() {
        let mut cam = Camera::new(800.0, 450.0);
        cam.follow(&Rect::new(100.0, 200.0, 30.0, 30.0));
        assert_eq!(cam.target, (115.0, 215.0));
        assert_eq!(cam.world_to_view(115.0, 215.0), (400.0, 225.0));
        assert_eq!(cam.offset(), (285.0, 10.0));
    }

    #[test]
    fn player_update_moves_camera() {
        let mut player = Player::new(&GameConfig::default().player);
        let mut cam = Camera::new(800.0, 450.0);
        let events = player.update(
            &BlockIndex::default(),
            &PhysicsConfig::default(),
            FrameInput::default(),
            &mut cam,
        ).unwrap();
        assert!(events.is_empty());
        assert_eq!(cam.target.0, 55.0);
        assert!((cam.target.1 - 295.3).abs() < 1e-3);
    }

    #[test]
    fn player_jump_input_is_applied_before_step() {
        let mut player = Player::new(&GameConfig::default().player);
        player.entity.can_double_jump = true;
        let mut cam = Camera::new(800.0, 450.0);
        let input = FrameInput { jump: true, ..FrameInput::default() };
        let events = player.update(&BlockIndex::default(), &PhysicsConfig::default(), input, &mut cam).unwrap();
        assert_eq!(events, vec![PhysicsEvent::DoubleJumped]);
        assert!((player.entity.dy - -11.7).abs() < 1e-4);
    }
}
