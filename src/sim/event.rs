/// Events emitted during a simulation step.
/// The presentation layer consumes these for animation/sound.

use crate::domain::entity::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PhysicsEvent {
    /// DOWN collision ended a fall; the double jump is restored.
    Landed,
    /// Horizontal probe hit a block (`Left` or `Right`).
    HitWall { direction: Direction },
    HitCeiling,
    Jumped,
    DoubleJumped,
}
