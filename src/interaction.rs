//! pointer‑driven mining & block placement
use bevy::log::trace;
use bevy::math::Vec2;

use crate::constants::MINE_RANGE;
use crate::inventory::ToolKind;
use crate::player::PlayerBody;
use crate::terrain::Terrain;
use crate::tile::{TileCoord, TileKind};

/// what the mining interaction is doing this step
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MiningState {
    #[default]
    Idle,
    /// `progress` stays in `[0, 1)`; reaching 1 breaks the tile
    Targeting { target: TileCoord, progress: f32 },
}

impl MiningState {
    pub fn target(&self) -> Option<TileCoord> {
        match *self {
            MiningState::Idle => None,
            MiningState::Targeting { target, .. } => Some(target),
        }
    }

    pub fn progress(&self) -> f32 {
        match *self {
            MiningState::Idle => 0.0,
            MiningState::Targeting { progress, .. } => progress,
        }
    }
}

/// a tile that just broke; `kind` is what it was before turning to air
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinedTile {
    pub coord: TileCoord,
    pub kind: TileKind,
}

/// break speed (progress per second) for `tile` with `tool` in hand,
/// `None` when the tool can't break it at all
pub fn mining_speed(tile: TileKind, tool: Option<ToolKind>) -> Option<f32> {
    match tile {
        TileKind::Stone => (tool == Some(ToolKind::Pickaxe)).then_some(1.0),
        TileKind::TreeTrunk => (tool == Some(ToolKind::Axe)).then_some(1.2),
        TileKind::Dirt | TileKind::Grass => {
            Some(if tool == Some(ToolKind::Shovel) { 1.2 } else { 0.9 })
        }
        TileKind::WoodPlanks | TileKind::StoneBricks => Some(1.0),
        TileKind::Air | TileKind::Water | TileKind::Leaves => None,
    }
}

#[inline]
fn in_reach(player: &PlayerBody, pointer: Vec2) -> bool {
    player.center().distance_squared(pointer) <= MINE_RANGE * MINE_RANGE
}

/// advance the mining state machine by one step
///
/// Returns the broken tile when progress reaches 1; the terrain has already
/// been updated by then.
pub fn update_mining(
    state: &mut MiningState,
    terrain: &mut Terrain,
    player: &PlayerBody,
    pointer: Vec2,
    held: bool,
    tool: Option<ToolKind>,
    dt: f32,
) -> Option<MinedTile> {
    let target = TileCoord::from_world(pointer);
    let tile = terrain.resolve(target);

    if !held || !in_reach(player, pointer) || !tile.is_minable() {
        *state = MiningState::Idle;
        return None;
    }

    let Some(speed) = mining_speed(tile, tool) else {
        // wrong tool: keep the target but hold progress at zero
        trace!(?target, ?tile, ?tool, "tool can't break tile");
        *state = MiningState::Targeting { target, progress: 0.0 };
        return None;
    };

    let progress = match *state {
        MiningState::Targeting { target: prev, progress } if prev == target => progress,
        _ => 0.0,
    } + speed * dt;

    if progress >= 1.0 {
        let kind = terrain.mine(target);
        *state = MiningState::Idle;
        return Some(MinedTile { coord: target, kind });
    }
    *state = MiningState::Targeting { target, progress };
    None
}

/// why a placement attempt was turned down
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceRejection {
    OverlapsPlayer,
    Occupied(TileKind),
}

/// put `kind` into the tile under the pointer
///
/// Only air or water can be replaced and never a tile the player stands in.
pub fn try_place(
    terrain: &mut Terrain,
    player: &PlayerBody,
    pointer: Vec2,
    kind: TileKind,
) -> Result<TileCoord, PlaceRejection> {
    let target = TileCoord::from_world(pointer);
    if target.overlaps_rect(player.pos, player.size) {
        return Err(PlaceRejection::OverlapsPlayer);
    }
    let current = terrain.resolve(target);
    if !current.is_replaceable() {
        return Err(PlaceRejection::Occupied(current));
    }
    terrain.place(target, kind);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TILE_SIZE;

    /// player standing in open sky with a stone tile right next to them
    fn setup() -> (Terrain, PlayerBody, TileCoord) {
        let mut terrain = Terrain::new(42);
        let stone = TileCoord::new(2, -20);
        terrain.place(stone, TileKind::Stone);
        let player = PlayerBody::new(Vec2::new(0.0, -20.0 * TILE_SIZE));
        (terrain, player, stone)
    }

    #[test]
    fn pickaxe_breaks_stone_in_one_second() {
        let (mut terrain, player, stone) = setup();
        let mut state = MiningState::Idle;
        let mined = update_mining(
            &mut state,
            &mut terrain,
            &player,
            stone.center(),
            true,
            Some(ToolKind::Pickaxe),
            1.0,
        );
        assert_eq!(mined, Some(MinedTile { coord: stone, kind: TileKind::Stone }));
        assert_eq!(state, MiningState::Idle);
        assert_eq!(terrain.resolve(stone), TileKind::Air);
    }

    #[test]
    fn progress_rises_monotonically_then_fires() {
        let (mut terrain, player, stone) = setup();
        let mut state = MiningState::Idle;
        let mut last = 0.0;
        let mut steps = 0;
        loop {
            steps += 1;
            assert!(steps < 100, "never broke");
            let mined = update_mining(
                &mut state,
                &mut terrain,
                &player,
                stone.center(),
                true,
                Some(ToolKind::Pickaxe),
                0.1,
            );
            if mined.is_some() {
                break;
            }
            let p = state.progress();
            assert!(p > last && p < 1.0, "{last} → {p}");
            assert_eq!(state.target(), Some(stone));
            last = p;
        }
        assert!((10..=11).contains(&steps));
        assert_eq!(state.progress(), 0.0);
        assert_eq!(terrain.resolve(stone), TileKind::Air);
    }

    #[test]
    fn stone_without_pickaxe_never_advances() {
        let (mut terrain, player, stone) = setup();
        for tool in [None, Some(ToolKind::Axe), Some(ToolKind::Shovel)] {
            let mut state = MiningState::Idle;
            for dt in [0.01, 0.5, 5.0, 1000.0] {
                let mined = update_mining(
                    &mut state, &mut terrain, &player, stone.center(), true, tool, dt,
                );
                assert_eq!(mined, None);
                assert_eq!(state, MiningState::Targeting { target: stone, progress: 0.0 });
            }
        }
        assert_eq!(terrain.resolve(stone), TileKind::Stone);
    }

    #[test]
    fn switching_target_restarts_progress() {
        let (mut terrain, player, stone) = setup();
        let other = TileCoord::new(2, -19);
        terrain.place(other, TileKind::Dirt);
        let mut state = MiningState::Idle;
        let tool = Some(ToolKind::Pickaxe);

        update_mining(&mut state, &mut terrain, &player, stone.center(), true, tool, 0.6);
        assert!((state.progress() - 0.6).abs() < 1e-6);
        // dirt with a pickaxe: default 0.9/s
        update_mining(&mut state, &mut terrain, &player, other.center(), true, tool, 0.5);
        assert_eq!(state.target(), Some(other));
        assert!((state.progress() - 0.45).abs() < 1e-6);
        // back to stone starts over
        update_mining(&mut state, &mut terrain, &player, stone.center(), true, tool, 0.5);
        assert!((state.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn release_range_and_untargetable_go_idle() {
        let (mut terrain, player, stone) = setup();
        let tool = Some(ToolKind::Pickaxe);
        let mut state = MiningState::Idle;

        update_mining(&mut state, &mut terrain, &player, stone.center(), true, tool, 0.3);
        update_mining(&mut state, &mut terrain, &player, stone.center(), false, tool, 0.3);
        assert_eq!(state, MiningState::Idle);

        let far = TileCoord::new(20, -20);
        terrain.place(far, TileKind::Stone);
        update_mining(&mut state, &mut terrain, &player, far.center(), true, tool, 0.3);
        assert_eq!(state, MiningState::Idle);

        let leaves = TileCoord::new(1, -21);
        terrain.place(leaves, TileKind::Leaves);
        update_mining(&mut state, &mut terrain, &player, leaves.center(), true, tool, 0.3);
        assert_eq!(state, MiningState::Idle);
        assert_eq!(terrain.resolve(leaves), TileKind::Leaves);
    }

    #[test]
    fn tool_speed_table() {
        assert_eq!(mining_speed(TileKind::Grass, Some(ToolKind::Shovel)), Some(1.2));
        assert_eq!(mining_speed(TileKind::Dirt, None), Some(0.9));
        assert_eq!(mining_speed(TileKind::TreeTrunk, Some(ToolKind::Axe)), Some(1.2));
        assert_eq!(mining_speed(TileKind::TreeTrunk, Some(ToolKind::Pickaxe)), None);
        assert_eq!(mining_speed(TileKind::Stone, Some(ToolKind::Pickaxe)), Some(1.0));
        assert_eq!(mining_speed(TileKind::WoodPlanks, None), Some(1.0));
        assert_eq!(mining_speed(TileKind::Water, Some(ToolKind::Shovel)), None);
    }

    #[test]
    fn placement_rules() {
        let (mut terrain, player, stone) = setup();

        // occupied
        let before = terrain.override_count();
        assert_eq!(
            try_place(&mut terrain, &player, stone.center(), TileKind::Dirt),
            Err(PlaceRejection::Occupied(TileKind::Stone))
        );
        // inside the player
        assert_eq!(
            try_place(&mut terrain, &player, player.center(), TileKind::Dirt),
            Err(PlaceRejection::OverlapsPlayer)
        );
        assert_eq!(terrain.override_count(), before);
        assert_eq!(terrain.resolve(stone), TileKind::Stone);

        // open air works, water too
        let air = TileCoord::new(3, -20);
        assert_eq!(try_place(&mut terrain, &player, air.center(), TileKind::WoodPlanks), Ok(air));
        assert_eq!(terrain.resolve(air), TileKind::WoodPlanks);

        let pool = TileCoord::new(4, -20);
        terrain.place(pool, TileKind::Water);
        assert_eq!(try_place(&mut terrain, &player, pool.center(), TileKind::Stone), Ok(pool));
        assert_eq!(terrain.resolve(pool), TileKind::Stone);
    }

    #[test]
    fn flush_neighbour_tile_is_placeable() {
        let mut terrain = Terrain::new(42);
        // body spans exactly column 0 and rows -20..-18
        let mut player = PlayerBody::new(Vec2::new(0.0, -20.0 * TILE_SIZE));
        player.size = Vec2::new(TILE_SIZE, 2.0 * TILE_SIZE);
        let right = TileCoord::new(1, -20);
        let below = TileCoord::new(0, -18);
        assert!(try_place(&mut terrain, &player, right.center(), TileKind::Dirt).is_ok());
        assert!(try_place(&mut terrain, &player, below.center(), TileKind::Dirt).is_ok());
    }
}
