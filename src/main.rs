/// Entry point: headless session runner.
///
/// Generates the world, then drives the player with a scripted input
/// pattern (run right, tap jump periodically, hold it a few frames to
/// exercise edge detection) and logs what happens.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use island_hopper::config::GameConfig;
use island_hopper::sim::event::PhysicsEvent;
use island_hopper::sim::session::Session;
use island_hopper::ui::input::{HeldKeys, InputState};

const JUMP_PERIOD: u32 = 45;   // frames between jump presses
const JUMP_HOLD: u32 = 6;      // frames the jump button stays down
const DOUBLE_JUMP_DELAY: u32 = 20;

#[derive(Default)]
struct Tally {
    jumps: u32,
    double_jumps: u32,
    landings: u32,
    wall_hits: u32,
    ceiling_hits: u32,
}

fn main() -> ExitCode {
    init_tracing();

    let config = GameConfig::load();
    let mut session = Session::new(&config);
    let mut input = InputState::new(config.player.run_accel);
    let mut tally = Tally::default();

    info!(
        width = session.world.width(),
        height = session.world.height(),
        seed = session.world.seed(),
        blocks = session.world.blocks().len(),
        "world generated"
    );

    for frame in 0..config.session.frames {
        let held = scripted_keys(frame);
        let events = match session.advance(input.frame(held)) {
            Ok(events) => events,
            Err(e) => {
                error!(frame, "simulation failed: {e}");
                return ExitCode::FAILURE;
            }
        };
        for event in events {
            match event {
                PhysicsEvent::Jumped => tally.jumps += 1,
                PhysicsEvent::DoubleJumped => tally.double_jumps += 1,
                PhysicsEvent::Landed => tally.landings += 1,
                PhysicsEvent::HitWall { .. } => tally.wall_hits += 1,
                PhysicsEvent::HitCeiling => tally.ceiling_hits += 1,
            }
        }
    }

    let e = &session.player.entity;
    info!(
        frames = session.frame(),
        x = e.x(),
        y = e.y(),
        dx = e.dx,
        dy = e.dy,
        state = ?e.motion_state(),
        jumps = tally.jumps,
        double_jumps = tally.double_jumps,
        landings = tally.landings,
        wall_hits = tally.wall_hits,
        ceiling_hits = tally.ceiling_hits,
        "session finished"
    );
    ExitCode::SUCCESS
}

fn scripted_keys(frame: u32) -> HeldKeys {
    let phase = frame % JUMP_PERIOD;
    HeldKeys {
        right: true,
        jump: phase < JUMP_HOLD
            || (DOUBLE_JUMP_DELAY..DOUBLE_JUMP_DELAY + JUMP_HOLD).contains(&phase),
        ..HeldKeys::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
