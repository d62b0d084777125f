/// Session: everything one play session owns.
///
/// Created once at startup (the world is generated here, before the first
/// frame) and then advanced one frame at a time. Nothing outlives it.

use tracing::{debug, trace};

use crate::config::{GameConfig, PhysicsConfig};
use crate::domain::entity::FrameInput;
use crate::domain::physics::{BlockIndex, PhysicsError};
use super::event::PhysicsEvent;
use super::world::{Camera, Player, World};

pub struct Session {
    pub world: World,
    pub player: Player,
    pub camera: Camera,
    pub physics: PhysicsConfig,
    blocks: BlockIndex,
    frame: u64,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        let world = World::generate(&config.world);
        let blocks = world.index();
        let player = Player::new(&config.player);
        let mut camera = Camera::new(config.session.viewport_width, config.session.viewport_height);
        camera.follow(&player.entity.rect);

        debug!(
            seed = world.seed(),
            blocks = blocks.len(),
            "session ready"
        );

        Session {
            world,
            player,
            camera,
            physics: config.physics.clone(),
            blocks,
            frame: 0,
        }
    }

    /// Advance one frame.
    pub fn advance(&mut self, input: FrameInput) -> Result<Vec<PhysicsEvent>, PhysicsError> {
        self.frame += 1;
        let events = self.player.update(&self.blocks, &self.physics, input, &mut self.camera)?;
        for event in &events {
            trace!(frame = self.frame, ?event, "physics event");
        }
        Ok(events)
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn blocks(&self) -> &BlockIndex {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::IslandLayout;

    fn flat_config() -> GameConfig {
        // Border only: the player spawns above the bottom row and falls onto it.
        let mut cfg = GameConfig::default();
        cfg.world.width = 20;
        cfg.world.height = 10;
        cfg.world.islands = IslandLayout { rows: 0, columns: 0 };
        cfg.player.spawn_x = 200.0;
        cfg.player.spawn_y = 200.0;
        cfg
    }

    #[test]
    fn new_session_generates_once() {
        let cfg = GameConfig::default();
        let a = Session::new(&cfg);
        let b = Session::new(&cfg);
        assert_eq!(a.world.blocks(), b.world.blocks());
        assert_eq!(a.frame(), 0);
        assert_eq!(a.blocks().len(), a.world.blocks().len());
    }

    #[test]
    fn player_falls_and_lands_on_floor() {
        let mut session = Session::new(&flat_config());
        let mut landed = false;
        for _ in 0..300 {
            let events = session.advance(FrameInput::default()).unwrap();
            if events.contains(&PhysicsEvent::Landed) {
                landed = true;
                break;
            }
        }
        assert!(landed);
        // Floor row y=10 starts at 400 → snapped y is 9·40 + 10.
        assert_eq!(session.player.entity.y(), 370.0);
        assert!(session.player.entity.can_double_jump);
        assert_eq!(session.camera.target, (215.0, 385.0));
    }

    #[test]
    fn jump_then_double_jump_then_nothing() {
        let mut session = Session::new(&flat_config());
        while !session.player.entity.grounded {
            session.advance(FrameInput::default()).unwrap();
        }
        let jump = FrameInput { jump: true, ..FrameInput::default() };

        assert_eq!(session.advance(jump).unwrap(), vec![PhysicsEvent::Jumped]);
        assert_eq!(session.advance(jump).unwrap(), vec![PhysicsEvent::DoubleJumped]);
        assert!(!session.player.entity.can_double_jump);
        let dy = session.player.entity.dy;
        assert!(session.advance(jump).unwrap().is_empty());
        // Only gravity acted on the third frame.
        assert!((session.player.entity.dy - (dy + 0.3)).abs() < 1e-4);
    }

    #[test]
    fn frame_counter_advances() {
        let mut session = Session::new(&flat_config());
        for _ in 0..5 {
            session.advance(FrameInput::default()).unwrap();
        }
        assert_eq!(session.frame(), 5);
    }
}
