/// Pure game-logic functions.
///
/// `tick` takes an immutable reference to the current `GameState` plus the
/// frame's held-key `Input` and returns a brand-new `GameState`; it never
/// mutates its argument. The smaller pieces it is built from — velocity
/// update, contact classification, movement integration, removal
/// processing — are exposed for direct testing.

use crate::entities::{
    Bounds, CollisionState, Entity, EntityId, EntityKind, GameState, GameStatus, Input, Point,
};
use crate::level::{default_size, Level};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Horizontal inset keeping entities off the extreme left/right edges.
pub const EDGE_MARGIN: i32 = 20;
/// Horizontal velocity while a direction key is held.
pub const WALK_SPEED: i32 = 8;
/// Upward impulse applied when a grounded player jumps.
pub const JUMP_SPEED: i32 = 30;
/// Added to vertical velocity every airborne frame. The screen y axis grows
/// downward, so positive velocity falls; fall speed is deliberately uncapped.
pub const GRAVITY: i32 = 2;
/// Horizontal speed of a patrolling monster.
pub const PATROL_SPEED: i32 = 1;
/// Health at session start; every monster contact costs one.
pub const START_HEALTH: u32 = 2;

// ── Session construction ─────────────────────────────────────────────────────

/// Build the initial session state from parsed level data. The level is
/// expected to contain exactly one player spawn (`parse_level` enforces it).
pub fn init_state(level: &Level) -> GameState {
    let mut entities = Vec::with_capacity(level.spawns.len());
    for (i, spawn) in level.spawns.iter().enumerate() {
        let velocity = match spawn.kind {
            // Monsters start their patrol immediately; everything else
            // spawns at rest.
            EntityKind::Monster => Point::new(PATROL_SPEED, 0),
            _ => Point::new(0, 0),
        };
        entities.push(Entity {
            id: EntityId(i as u32),
            kind: spawn.kind,
            position: spawn.position,
            velocity,
            hitbox: spawn.size.unwrap_or_else(|| default_size(spawn.kind)),
            collision: CollisionState::default(),
        });
    }

    let player_id = entities
        .iter()
        .find(|e| e.kind == EntityKind::Player)
        .map(|e| e.id)
        .unwrap_or(EntityId(0));
    let coins_total = entities
        .iter()
        .filter(|e| e.kind == EntityKind::Coin)
        .count() as u32;

    GameState {
        entities,
        player_id,
        bounds: level.bounds,
        health: START_HEALTH,
        coins_collected: 0,
        coins_total,
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Velocity update (per-kind dispatch) ──────────────────────────────────────

fn step_toward_zero(v: i32) -> i32 {
    match v {
        v if v > 0 => v - 1,
        v if v < 0 => v + 1,
        _ => 0,
    }
}

fn player_velocity(e: &Entity, input: &Input) -> Point {
    let mut vx = step_toward_zero(e.velocity.x);
    let mut vy = step_toward_zero(e.velocity.y);

    let grounded = e.collision.bottom;
    if !grounded {
        vy += GRAVITY;
    }

    // Held keys override the decayed velocity for this frame.
    if input.left {
        vx = -WALK_SPEED;
    }
    if input.right {
        vx = WALK_SPEED;
    }
    if input.up && grounded {
        vy = -JUMP_SPEED;
    }

    Point::new(vx, vy)
}

fn monster_velocity(e: &Entity) -> Point {
    // Patrol at constant height, reversing on a blocked side.
    if e.collision.left {
        Point::new(PATROL_SPEED, 0)
    } else if e.collision.right {
        Point::new(-PATROL_SPEED, 0)
    } else {
        e.velocity
    }
}

/// New velocity for one entity, given this frame's collision flags and held
/// keys. Static kinds never move.
pub fn update_velocity(e: &Entity, input: &Input) -> Point {
    match e.kind {
        EntityKind::Player => player_velocity(e, input),
        EntityKind::Monster => monster_velocity(e),
        _ => Point::new(0, 0),
    }
}

// ── Contact detection ────────────────────────────────────────────────────────

/// Classify which sides of `a`'s box touch `b`'s box. All four sides are
/// tested independently; a corner overlap sets two flags at once.
///
/// A side fires when `a`'s box straddles the opposing edge of `b`'s box
/// (inclusive, so resting exactly on a surface counts) and the boxes
/// strictly overlap on the perpendicular axis (so a floor does not flag the
/// sides of an entity standing on it).
pub fn contact_sides(a: &Entity, b: &Entity) -> CollisionState {
    let a_left = a.position.x;
    let a_right = a.position.x + a.hitbox.x;
    let a_top = a.position.y;
    let a_bottom = a.position.y + a.hitbox.y;

    let b_left = b.position.x;
    let b_right = b.position.x + b.hitbox.x;
    let b_top = b.position.y;
    let b_bottom = b.position.y + b.hitbox.y;

    let x_overlap = a_left < b_right && a_right > b_left;
    let y_overlap = a_top < b_bottom && a_bottom > b_top;

    CollisionState {
        left: a_left <= b_right && a_right >= b_right && y_overlap,
        right: a_left <= b_left && a_right >= b_left && y_overlap,
        top: a_top <= b_bottom && a_bottom >= b_bottom && x_overlap,
        bottom: a_top <= b_top && a_bottom >= b_top && x_overlap,
    }
}

fn touches(sides: CollisionState) -> bool {
    sides.left || sides.right || sides.top || sides.bottom
}

// ── Movement integration ─────────────────────────────────────────────────────

/// One frame of movement: position plus velocity, clamped to the world
/// rectangle, then rejected per axis when a blocked side faces the move.
pub fn integrate(e: &Entity, bounds: &Bounds) -> Point {
    let x = (e.position.x + e.velocity.x)
        .max(bounds.left + EDGE_MARGIN)
        .min(bounds.right - EDGE_MARGIN - e.hitbox.x);
    let y = (e.position.y + e.velocity.y)
        .max(bounds.top)
        .min(bounds.bottom - e.hitbox.y);

    let x = if (e.collision.right && x > e.position.x) || (e.collision.left && x < e.position.x) {
        e.position.x
    } else {
        x
    };
    let y = if (e.collision.bottom && y > e.position.y) || (e.collision.top && y < e.position.y) {
        e.position.y
    } else {
        y
    };

    Point::new(x, y)
}

// ── Removal processing ───────────────────────────────────────────────────────

/// Consume a pending-removal set: monsters cost one health, coins score one,
/// and every named entity leaves the collection. Duplicate and already-absent
/// ids are silent no-ops.
pub fn apply_removals(state: &mut GameState, trash: &[EntityId]) {
    let mut ids = trash.to_vec();
    ids.sort();
    ids.dedup();

    for id in &ids {
        let kind = state.entities.iter().find(|e| e.id == *id).map(|e| e.kind);
        match kind {
            Some(EntityKind::Monster) => state.health = state.health.saturating_sub(1),
            Some(EntityKind::Coin) => state.coins_collected += 1,
            _ => {}
        }
    }
    state.entities.retain(|e| !ids.contains(&e.id));
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. `Won` and `Lost` are terminal: the
/// state is returned unchanged once either is reached.
pub fn tick(state: &GameState, input: &Input) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Reset collision flags ─────────────────────────────────────────────
    for e in &mut next.entities {
        e.collision = CollisionState::default();
    }

    // ── 2. Contact detection ─────────────────────────────────────────────────
    // The player acts against every other entity, then each monster against
    // every entity but itself. Flags land on the acting side only and
    // accumulate across pairs; the player's coin/monster contacts fill the
    // pending-removal set. Detection runs before the velocity update so the
    // flags driving gravity suppression, jumps and patrol reversal describe
    // last frame's resting positions.
    let mut acting: Vec<usize> = Vec::new();
    if let Some(i) = next.entities.iter().position(|e| e.id == next.player_id) {
        acting.push(i);
    }
    acting.extend(
        next.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind == EntityKind::Monster)
            .map(|(i, _)| i),
    );

    let mut trash: Vec<EntityId> = Vec::new();
    for &i in &acting {
        for j in 0..next.entities.len() {
            if i == j {
                continue;
            }
            let sides = contact_sides(&next.entities[i], &next.entities[j]);
            if !touches(sides) {
                continue;
            }
            if next.entities[i].kind == EntityKind::Player {
                match next.entities[j].kind {
                    EntityKind::Coin | EntityKind::Monster => trash.push(next.entities[j].id),
                    _ => {}
                }
            }
            let c = &mut next.entities[i].collision;
            c.left |= sides.left;
            c.right |= sides.right;
            c.top |= sides.top;
            c.bottom |= sides.bottom;
        }
    }

    // ── 3. Velocity update ───────────────────────────────────────────────────
    for e in &mut next.entities {
        if matches!(e.kind, EntityKind::Player | EntityKind::Monster) {
            e.velocity = update_velocity(e, input);
        }
    }

    // ── 4. Movement integration ──────────────────────────────────────────────
    let bounds = next.bounds;
    for e in &mut next.entities {
        if matches!(e.kind, EntityKind::Player | EntityKind::Monster) {
            e.position = integrate(e, &bounds);
        }
    }

    // ── 5. Consume the pending-removal set ───────────────────────────────────
    apply_removals(&mut next, &trash);

    // ── 6. Session outcome ───────────────────────────────────────────────────
    if next.health == 0 {
        next.status = GameStatus::Lost;
    } else if next.coins_collected >= next.coins_total {
        next.status = GameStatus::Won;
    }

    next
}
