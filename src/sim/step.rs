/// The step function: advances one entity by one frame.
///
/// Processing order:
///   1. Gravity (+ external vertical delta)
///   2. Horizontal input, clamp to the run speed, damping
///   3. Terminal fall speed clamp (no clamp on ascent)
///   4. Horizontal resolution
///   5. Vertical resolution
///
/// Probes look at the prospective rectangle `(x + dx, y + dy)` while only
/// one axis is mutated at a time. Snap targets are tile-relative and are
/// computed from the *current* coordinate:
///   - RIGHT : x = floor(x/40)·40 + 10, dx = 0
///   - LEFT  : x = (floor(x/40)+1)·40, dx kept
///   - DOWN  : y = floor(y/40)·40 + 10, dy = 0, double jump restored
///   - UP    : y = (floor(y/40)+1)·40, dy = 0
///
/// The LEFT branch deliberately leaves `dx` alone, unlike RIGHT. Entities
/// pushed off a left wall keep drifting into it on the next frame.

use tracing::trace;

use crate::config::PhysicsConfig;
use crate::domain::entity::{Direction, Entity};
use crate::domain::physics::{is_colliding, BlockIndex, PhysicsError};
use crate::domain::tile::{tile_of, Rect, SNAP_INSET, TILE_SIZE};
use super::event::PhysicsEvent;

// ══════════════════════════════════════════════════════════════
// Main entry points
// ══════════════════════════════════════════════════════════════

pub fn step(
    entity: &mut Entity,
    blocks: &BlockIndex,
    physics: &PhysicsConfig,
    input_dx: f32,
    input_dy: f32,
) -> Result<Vec<PhysicsEvent>, PhysicsError> {
    let mut events = Vec::new();

    integrate_velocity(entity, physics, input_dx, input_dy);
    resolve_horizontal(entity, blocks, physics, &mut events)?;
    resolve_vertical(entity, blocks, physics, &mut events)?;

    Ok(events)
}

/// Jump (edge-triggered). Grounded → full jump, keeping the double jump.
/// Airborne with the token → consume it. Otherwise nothing happens.
pub fn jump(
    entity: &mut Entity,
    blocks: &BlockIndex,
    physics: &PhysicsConfig,
) -> Result<Option<PhysicsEvent>, PhysicsError> {
    if probe(entity, blocks, physics, Direction::Down)? {
        entity.dy = physics.jump_velocity;
        entity.grounded = false;
        trace!(x = entity.x(), y = entity.y(), "jump");
        Ok(Some(PhysicsEvent::Jumped))
    } else if entity.can_double_jump {
        entity.can_double_jump = false;
        entity.dy = physics.jump_velocity;
        trace!(x = entity.x(), y = entity.y(), "double jump");
        Ok(Some(PhysicsEvent::DoubleJumped))
    } else {
        Ok(None)
    }
}

// ══════════════════════════════════════════════════════════════
// Velocity
// ══════════════════════════════════════════════════════════════

fn integrate_velocity(entity: &mut Entity, physics: &PhysicsConfig, input_dx: f32, input_dy: f32) {
    entity.dy += physics.gravity;
    entity.dy += input_dy;

    let max = physics.max_run_speed;
    entity.dx = (entity.dx + input_dx).max(-max).min(max);
    entity.dx *= physics.damping;

    entity.dy = entity.dy.min(physics.terminal_fall_speed);
}

// ══════════════════════════════════════════════════════════════
// Collision resolution (axis-separated)
// ══════════════════════════════════════════════════════════════

fn prospective(entity: &Entity) -> Rect {
    Rect {
        x: entity.rect.x + entity.dx,
        y: entity.rect.y + entity.dy,
        ..entity.rect
    }
}

fn probe(
    entity: &Entity,
    blocks: &BlockIndex,
    physics: &PhysicsConfig,
    direction: Direction,
) -> Result<bool, PhysicsError> {
    is_colliding(blocks, &prospective(entity), direction, physics.broad_phase_radius)
}

fn resolve_horizontal(
    entity: &mut Entity,
    blocks: &BlockIndex,
    physics: &PhysicsConfig,
    events: &mut Vec<PhysicsEvent>,
) -> Result<(), PhysicsError> {
    if entity.dx > 0.0 {
        if probe(entity, blocks, physics, Direction::Right)? {
            entity.rect.x = tile_of(entity.rect.x) as f32 * TILE_SIZE + SNAP_INSET;
            entity.dx = 0.0;
            events.push(PhysicsEvent::HitWall { direction: Direction::Right });
        } else {
            entity.rect.x += entity.dx;
        }
    } else if entity.dx < 0.0 {
        if probe(entity, blocks, physics, Direction::Left)? {
            entity.rect.x = (tile_of(entity.rect.x) + 1) as f32 * TILE_SIZE;
            // dx intentionally untouched
            events.push(PhysicsEvent::HitWall { direction: Direction::Left });
        } else {
            entity.rect.x += entity.dx;
        }
    }
    Ok(())
}

fn resolve_vertical(
    entity: &mut Entity,
    blocks: &BlockIndex,
    physics: &PhysicsConfig,
    events: &mut Vec<PhysicsEvent>,
) -> Result<(), PhysicsError> {
    if entity.dy > 0.0 {
        if probe(entity, blocks, physics, Direction::Down)? {
            entity.rect.y = tile_of(entity.rect.y) as f32 * TILE_SIZE + SNAP_INSET;
            entity.dy = 0.0;
            entity.can_double_jump = true;
            if !entity.grounded {
                trace!(x = entity.x(), y = entity.y(), "landed");
                events.push(PhysicsEvent::Landed);
            }
            entity.grounded = true;
        } else {
            entity.rect.y += entity.dy;
            entity.grounded = false;
        }
    } else if entity.dy < 0.0 {
        entity.grounded = false;
        if probe(entity, blocks, physics, Direction::Up)? {
            entity.rect.y = (tile_of(entity.rect.y) + 1) as f32 * TILE_SIZE;
            entity.dy = 0.0;
            events.push(PhysicsEvent::HitCeiling);
        } else {
            entity.rect.y += entity.dy;
        }
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
