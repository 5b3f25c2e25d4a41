//! player body: input, gravity & per‑axis tile collision
//!
//! World space is y‑down; `pos` is the body's top‑left corner.

use bevy::math::Vec2;

use crate::constants::*;
use crate::terrain::{solid, Terrain};
use crate::tile::{tile_span, world_to_tile};

/// how far right `spawn` looks for a column without a tree
const SPAWN_SEARCH_COLUMNS: i64 = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

impl PlayerBody {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            on_ground: false,
        }
    }

    /// two tiles above the surface of the first tree‑free column at or
    /// right of `preferred_col`
    pub fn spawn(terrain: &Terrain, preferred_col: i64) -> Self {
        let gen = terrain.generator();
        let col = (preferred_col..preferred_col.saturating_add(SPAWN_SEARCH_COLUMNS))
            .find(|&c| !gen.tree_spawn_at(c))
            .unwrap_or(preferred_col);
        let row = gen.ground_tile_y(col) - 3;
        let y = (row as f32 * TILE_SIZE).max(0.0);
        Self::new(Vec2::new(col as f32 * TILE_SIZE, y))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// does the body currently share area with any solid tile
    pub fn overlaps_solid(&self, terrain: &Terrain) -> bool {
        let (c0, c1) = tile_span(self.pos.x, self.size.x);
        let (r0, r1) = tile_span(self.pos.y, self.size.y);
        (c0..=c1).any(|tx| (r0..=r1).any(|ty| solid(terrain, tx, ty)))
    }
}

/* ===========================================================
   input
   =========================================================== */
/// horizontal speed is set, not accumulated; jumping needs ground
pub fn apply_input(body: &mut PlayerBody, left: bool, right: bool, jump: bool) {
    body.vel.x = match (left, right) {
        (true, false) => -WALK_SPEED,
        (false, true) => WALK_SPEED,
        _ => 0.0,
    };
    if jump && body.on_ground {
        body.vel.y = -JUMP_SPEED;
        body.on_ground = false;
    }
}

/* ===========================================================
   physics & collision
   =========================================================== */
/// gravity, then a horizontal and a vertical sweep against resolved tiles
///
/// Each sweep checks every tile the leading edge passes through, nearest
/// first, so a single step can't skip a one‑tile wall however large `dt` is.
pub fn physics_and_collision(body: &mut PlayerBody, terrain: &Terrain, dt: f32) {
    body.vel.y += GRAVITY * dt;
    sweep_horizontal(body, terrain, dt);
    sweep_vertical(body, terrain, dt);
}

fn sweep_horizontal(body: &mut PlayerBody, terrain: &Terrain, dt: f32) {
    if body.vel.x == 0.0 {
        return;
    }
    let mut next_x = body.pos.x + body.vel.x * dt;
    let (r0, r1) = tile_span(body.pos.y, body.size.y);
    let (c0, c1) = tile_span(body.pos.x, body.size.x);
    let blocked = |tx: i64| (r0..=r1).any(|ty| solid(terrain, tx, ty));

    if body.vel.x > 0.0 {
        let far = world_to_tile(next_x + body.size.x - EDGE_EPSILON);
        if let Some(tx) = (c1 + 1..=far).find(|&tx| blocked(tx)) {
            next_x = tx as f32 * TILE_SIZE - body.size.x;
            body.vel.x = 0.0;
        }
    } else {
        let far = world_to_tile(next_x);
        if let Some(tx) = (far..c0).rev().find(|&tx| blocked(tx)) {
            next_x = (tx + 1) as f32 * TILE_SIZE;
            body.vel.x = 0.0;
        }
    }
    body.pos.x = next_x;
}

/// no vertical motion keeps the previous `on_ground`
fn sweep_vertical(body: &mut PlayerBody, terrain: &Terrain, dt: f32) {
    if body.vel.y == 0.0 {
        return;
    }
    body.on_ground = false;
    let mut next_y = body.pos.y + body.vel.y * dt;
    let (c0, c1) = tile_span(body.pos.x, body.size.x);
    let (r0, r1) = tile_span(body.pos.y, body.size.y);
    let blocked = |ty: i64| (c0..=c1).any(|tx| solid(terrain, tx, ty));

    if body.vel.y > 0.0 {
        // falling
        let far = world_to_tile(next_y + body.size.y - EDGE_EPSILON);
        if let Some(ty) = (r1 + 1..=far).find(|&ty| blocked(ty)) {
            next_y = ty as f32 * TILE_SIZE - body.size.y;
            body.vel.y = 0.0;
            body.on_ground = true;
        }
    } else {
        let far = world_to_tile(next_y);
        if let Some(ty) = (far..r0).rev().find(|&ty| blocked(ty)) {
            next_y = (ty + 1) as f32 * TILE_SIZE;
            body.vel.y = 0.0;
        }
    }
    body.pos.y = next_y;
}
