//! falling pickups left behind by broken tiles
use bevy::log::debug;
use bevy::math::Vec2;

use crate::constants::*;
use crate::inventory::{BlockKind, Inventory, ItemKind};
use crate::terrain::{solid, Terrain};
use crate::tile::{world_to_tile, TileKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drop {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: TileKind,
    pub picked: bool,
}

impl Drop {
    pub fn new(pos: Vec2, vel: Vec2, kind: TileKind) -> Self {
        Self {
            pos,
            vel,
            kind,
            picked: false,
        }
    }
}

/// gravity, then a swept ceiling / ground test in the drop's column;
/// `true` when it touched ground
///
/// Only rows entered this step are tested, never the one the drop started in.
pub fn fall(drop: &mut Drop, terrain: &Terrain, dt: f32) -> bool {
    let old_row = world_to_tile(drop.pos.y);
    drop.vel.y += GRAVITY * dt;
    drop.pos += drop.vel * dt;

    let tx = world_to_tile(drop.pos.x);
    let new_row = world_to_tile(drop.pos.y);

    if drop.vel.y < 0.0 {
        // rising: stop under the first ceiling
        if let Some(ty) = (new_row..old_row).rev().find(|&ty| solid(terrain, tx, ty)) {
            drop.pos.y = (ty + 1) as f32 * TILE_SIZE;
            drop.vel.y = 0.0;
        }
        return false;
    }

    let Some(ty) = (old_row + 1..=new_row).find(|&ty| solid(terrain, tx, ty)) else {
        return false;
    };
    drop.pos.y = ty as f32 * TILE_SIZE - DROP_REST_OFFSET;
    drop.vel.y = 0.0;
    drop.vel.x *= DROP_GROUND_DAMPING;
    true
}

/// move every live drop, hand the ones near the player to the inventory and
/// forget them; returns how many were picked up
pub fn update_drops(
    drops: &mut Vec<Drop>,
    terrain: &Terrain,
    player_center: Vec2,
    inventory: &mut impl Inventory,
    dt: f32,
) -> usize {
    let mut picked = 0;
    for drop in drops.iter_mut().filter(|d| !d.picked) {
        fall(drop, terrain, dt);

        if drop.pos.distance_squared(player_center) <= PICKUP_RADIUS * PICKUP_RADIUS {
            drop.picked = true;
            picked += 1;
            if let Some(block) = BlockKind::from_broken(drop.kind) {
                inventory.add_item(ItemKind::Block(block), 1);
            }
            debug!(kind = ?drop.kind, pos = ?drop.pos, "drop picked up");
        }
    }
    // removal only after the pass so no drop is skipped
    drops.retain(|d| !d.picked);
    picked
}
