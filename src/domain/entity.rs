/// Entities: moving rectangles driven by the resolver.
/// The vertical state machine is tiny: Grounded, Rising, Falling,
/// plus one double-jump token that only a landing restores.

use super::tile::Rect;

/// Collision probe direction.
///
/// `None` is the "no direction" sentinel; probing with it is a
/// programmer error and the resolver rejects it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    None,
    Up,
    Right,
    Down,
    Left,
}

/// Vertical motion state, derived from the last resolved frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MotionState {
    Grounded,
    Rising,
    Falling,
}

/// Per-frame input from the input collaborator.
/// Horizontal intent is continuous; `jump` is edge-triggered (fresh press).
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct FrameInput {
    pub dx: f32,
    pub dy: f32,
    pub jump: bool,
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub rect: Rect,
    pub dx: f32,
    pub dy: f32,
    pub health: i32,        // not read by physics
    pub can_double_jump: bool,
    /// Set when the last vertical resolution ended on a DOWN collision.
    pub grounded: bool,
}

impl Entity {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Entity {
            rect: Rect::new(x, y, width, height),
            dx: 0.0,
            dy: 0.0,
            health: 100,
            can_double_jump: false,
            grounded: false,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.rect.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.rect.y
    }

    pub fn motion_state(&self) -> MotionState {
        if self.grounded {
            MotionState::Grounded
        } else if self.dy < 0.0 {
            MotionState::Rising
        } else {
            MotionState::Falling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entity_is_at_rest() {
        let e = Entity::new(40.0, 280.0, 30.0, 30.0);
        assert_eq!(e.x(), 40.0);
        assert_eq!(e.y(), 280.0);
        assert_eq!(e.dx, 0.0);
        assert_eq!(e.dy, 0.0);
        assert!(!e.can_double_jump);
        assert_eq!(e.motion_state(), MotionState::Falling);
    }

    #[test]
    fn motion_state_follows_velocity() {
        let mut e = Entity::new(0.0, 0.0, 30.0, 30.0);
        e.dy = -4.0;
        assert_eq!(e.motion_state(), MotionState::Rising);
        e.dy = 2.0;
        assert_eq!(e.motion_state(), MotionState::Falling);
        e.grounded = true;
        e.dy = 0.0;
        assert_eq!(e.motion_state(), MotionState::Grounded);
    }
}
