/// Input state tracker.
///
/// Turns "what is held right now" into a per-frame `FrameInput`:
///   - Continuous horizontal intent while a direction is held
///   - Edge-triggered jump (only fires on the frame the button goes down)
///
/// Device polling lives outside this crate; callers report held state.

use crate::domain::entity::FrameInput;

/// Held state for one frame, as reported by the input device layer.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Analog stick X in `[-1, 1]`, added on top of the digital keys.
    pub axis_x: f32,
}

pub struct InputState {
    run_accel: f32,
    jump_was_held: bool,
}

impl InputState {
    pub fn new(run_accel: f32) -> Self {
        InputState { run_accel, jump_was_held: false }
    }

    /// Build this frame's input. Call exactly once per simulated frame.
    pub fn frame(&mut self, held: HeldKeys) -> FrameInput {
        let mut dx = held.axis_x.clamp(-1.0, 1.0) * self.run_accel;
        if held.left {
            dx -= self.run_accel;
        }
        if held.right {
            dx += self.run_accel;
        }

        let jump = held.jump && !self.jump_was_held;
        self.jump_was_held = held.jump;

        FrameInput { dx, dy: 0.0, jump }
    }
}
