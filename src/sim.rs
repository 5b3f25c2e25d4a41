//! the simulation aggregate & its single mutating entry point
//!
//! Hosts feed one [`StepInput`] per frame into [`Simulation::step`]; nothing
//! in here reads a clock or an input device. Callers clamp `dt` to
//! [`MAX_STEP_DT`](crate::constants::MAX_STEP_DT) so a step moves bodies a
//! few tiles at most.

use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::*;
use crate::drops::{update_drops, Drop};
use crate::interaction::{try_place, update_mining, MinedTile, MiningState};
use crate::inventory::Inventory;
use crate::player::{apply_input, physics_and_collision, PlayerBody};
use crate::terrain::Terrain;

/* ===========================================================
   inputs
   =========================================================== */

/// screen → world mapping supplied by the renderer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub camera_x: f32,
    pub zoom: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            camera_x: 0.0,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl ViewTransform {
    /// horizontally centred on `world_x` for a screen `screen_w` pixels wide
    pub fn centered_on(world_x: f32, screen_w: f32, zoom: f32) -> Self {
        Self {
            camera_x: world_x - screen_w / zoom * 0.5,
            zoom,
        }
    }

    #[inline]
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x / self.zoom + self.camera_x, p.y / self.zoom)
    }

    #[inline]
    pub fn world_to_screen(&self, w: Vec2) -> Vec2 {
        Vec2::new((w.x - self.camera_x) * self.zoom, w.y * self.zoom)
    }
}

/// everything the host samples once per frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// cursor in screen pixels, origin top‑left
    pub pointer: Vec2,
    pub screen: Vec2,
    pub mine_held: bool,
    pub place_held: bool,
    pub view: ViewTransform,
}

impl StepInput {
    #[inline]
    pub fn pointer_world(&self) -> Vec2 {
        self.view.screen_to_world(self.pointer)
    }
}

/* ===========================================================
   simulation
   =========================================================== */
#[derive(Resource, Debug)]
pub struct Simulation {
    terrain: Terrain,
    player: PlayerBody,
    drops: Vec<Drop>,
    mining: MiningState,
    rng: StdRng,
}

impl Simulation {
    /// fresh world with the player dropped near column 0
    pub fn new(seed: i64) -> Self {
        let terrain = Terrain::new(seed);
        let player = PlayerBody::spawn(&terrain, 0);
        info!(seed, spawn = ?player.pos, "world created");
        Self::from_parts(terrain, player)
    }

    pub fn from_parts(terrain: Terrain, player: PlayerBody) -> Self {
        let rng = StdRng::seed_from_u64(terrain.seed() as u64);
        Self {
            terrain,
            player,
            drops: Vec::new(),
            mining: MiningState::Idle,
            rng,
        }
    }

    /* ---------- read‑only views ---------- */

    #[inline]
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    #[inline]
    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    #[inline]
    pub fn drops(&self) -> &[Drop] {
        &self.drops
    }

    #[inline]
    pub fn mining(&self) -> MiningState {
        self.mining
    }

    /* ---------- stepping ---------- */

    /// advance one frame: player → mining & placing → drops
    pub fn step(&mut self, dt: f32, input: &StepInput, inventory: &mut impl Inventory) {
        debug_assert!(dt.is_finite() && dt >= 0.0, "bad dt {dt}");
        self.move_player(dt, input);
        self.interact(dt, input, inventory);
        self.update_drops(dt, inventory);
    }

    pub fn move_player(&mut self, dt: f32, input: &StepInput) {
        apply_input(&mut self.player, input.left, input.right, input.jump);
        physics_and_collision(&mut self.player, &self.terrain, dt);
        debug_assert!(self.player.pos.is_finite());
    }

    /// mining first, then placement, both aimed by the pointer
    pub fn interact(&mut self, dt: f32, input: &StepInput, inventory: &mut impl Inventory) {
        let pointer = input.pointer_world();

        if let Some(mined) = update_mining(
            &mut self.mining,
            &mut self.terrain,
            &self.player,
            pointer,
            input.mine_held,
            inventory.selected_tool(),
            dt,
        ) {
            self.spawn_drop(mined);
        }

        if !input.place_held {
            return;
        }
        let Some(block) = inventory.selected_block() else {
            return;
        };
        if let Ok(coord) = try_place(&mut self.terrain, &self.player, pointer, block.tile()) {
            inventory.consume_selected_block_one();
            debug!(?coord, ?block, "block placed");
        }
    }

    pub fn update_drops(&mut self, dt: f32, inventory: &mut impl Inventory) {
        let center = self.player.center();
        update_drops(&mut self.drops, &self.terrain, center, inventory, dt);
    }

    fn spawn_drop(&mut self, mined: MinedTile) {
        let vel = Vec2::new(
            self.rng.gen_range(DROP_POP_SPEED_X),
            self.rng.gen_range(DROP_POP_SPEED_Y),
        );
        let kind = mined.kind.drop_kind();
        debug!(coord = ?mined.coord, broken = ?mined.kind, ?kind, "tile broken");
        self.drops.push(Drop::new(mined.coord.center(), vel, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{BlockKind, ItemKind, ToolKind};
    use crate::tile::{world_to_tile, TileCoord, TileKind};

    /// inventory holding exactly one thing in hand
    struct Hand {
        tool: Option<ToolKind>,
        block: Option<(BlockKind, u32)>,
        added: Vec<ItemKind>,
    }

    impl Hand {
        fn tool(tool: ToolKind) -> Self {
            Self { tool: Some(tool), block: None, added: Vec::new() }
        }
        fn block(block: BlockKind, count: u32) -> Self {
            Self { tool: None, block: Some((block, count)), added: Vec::new() }
        }
    }

    impl Inventory for Hand {
        fn selected_tool(&self) -> Option<ToolKind> {
            self.tool
        }
        fn selected_block(&self) -> Option<BlockKind> {
            self.block.map(|(b, _)| b)
        }
        fn consume_selected_block_one(&mut self) {
            if let Some((b, n)) = self.block {
                self.block = (n > 1).then(|| (b, n - 1));
            }
        }
        fn add_item(&mut self, item: ItemKind, count: u32) {
            for _ in 0..count {
                self.added.push(item);
            }
        }
    }

    /// player floating in open sky at tile (0, -20), 1:1 view at x = 0
    fn sky_sim() -> Simulation {
        let terrain = Terrain::new(42);
        let player = PlayerBody::new(Vec2::new(0.0, -20.0 * TILE_SIZE));
        Simulation::from_parts(terrain, player)
    }

    fn aim(at: Vec2) -> StepInput {
        StepInput {
            pointer: at,
            view: ViewTransform { camera_x: 0.0, zoom: 1.0 },
            ..Default::default()
        }
    }

    #[test]
    fn pointer_maps_through_zoom_and_camera() {
        let view = ViewTransform { camera_x: 100.0, zoom: 2.0 };
        let w = view.screen_to_world(Vec2::new(40.0, 60.0));
        assert_eq!(w, Vec2::new(120.0, 30.0));
        assert_eq!(view.world_to_screen(w), Vec2::new(40.0, 60.0));

        let centred = ViewTransform::centered_on(500.0, 1280.0, 2.0);
        assert_eq!(centred.screen_to_world(Vec2::new(640.0, 0.0)).x, 500.0);
    }

    #[test]
    fn mining_stone_spawns_one_drop_at_tile_centre() {
        let mut terrain = Terrain::new(42);
        let stone = TileCoord::new(2, -20);
        terrain.place(stone, TileKind::Stone);
        let mut sim = Simulation::from_parts(terrain, PlayerBody::new(Vec2::new(0.0, -20.0 * TILE_SIZE)));
        let mut hand = Hand::tool(ToolKind::Pickaxe);

        let input = StepInput { mine_held: true, ..aim(stone.center()) };
        sim.interact(1.0, &input, &mut hand);

        assert_eq!(sim.terrain().resolve(stone), TileKind::Air);
        assert_eq!(sim.mining(), MiningState::Idle);
        assert_eq!(sim.drops().len(), 1);
        let drop = sim.drops()[0];
        assert_eq!(drop.kind, TileKind::Stone);
        assert_eq!(drop.pos, stone.center());
        assert!(!drop.picked);
    }

    #[test]
    fn grass_breaks_into_a_dirt_drop() {
        let mut terrain = Terrain::new(42);
        let grass = TileCoord::new(1, -20);
        terrain.place(grass, TileKind::Grass);
        let mut sim = Simulation::from_parts(terrain, PlayerBody::new(Vec2::new(0.0, -20.0 * TILE_SIZE)));
        let mut hand = Hand::tool(ToolKind::Shovel);
        let input = StepInput { mine_held: true, ..aim(grass.center()) };
        for _ in 0..2 {
            sim.interact(0.5, &input, &mut hand);
        }
        assert_eq!(sim.drops().len(), 1);
        assert_eq!(sim.drops()[0].kind, TileKind::Dirt);
    }

    #[test]
    fn placing_consumes_one_block_per_success() {
        let mut sim = sky_sim();
        let mut hand = Hand::block(BlockKind::StoneBricks, 2);
        let spot = TileCoord::new(3, -20);

        let input = StepInput { place_held: true, ..aim(spot.center()) };
        sim.interact(0.1, &input, &mut hand);
        assert_eq!(sim.terrain().resolve(spot), TileKind::StoneBricks);
        assert_eq!(hand.block, Some((BlockKind::StoneBricks, 1)));

        // same spot again: occupied, nothing consumed
        sim.interact(0.1, &input, &mut hand);
        assert_eq!(hand.block, Some((BlockKind::StoneBricks, 1)));

        // inside the player: rejected, store untouched
        let overrides = sim.terrain().override_count();
        let inside = StepInput { place_held: true, ..aim(sim.player().center()) };
        sim.interact(0.1, &inside, &mut hand);
        assert_eq!(sim.terrain().override_count(), overrides);
        assert_eq!(hand.block, Some((BlockKind::StoneBricks, 1)));
    }

    #[test]
    fn tools_are_not_placeable() {
        let mut sim = sky_sim();
        let mut hand = Hand::tool(ToolKind::Axe);
        let input = StepInput { place_held: true, ..aim(Vec2::new(30.0, -156.0)) };
        sim.interact(0.1, &input, &mut hand);
        assert_eq!(sim.terrain().override_count(), 0);
    }

    #[test]
    fn step_runs_physics_then_pickup() {
        let mut terrain = Terrain::new(42);
        for x in -5..5 {
            terrain.place(TileCoord::new(x, -18), TileKind::Stone);
        }
        let dirt = TileCoord::new(1, -19);
        terrain.place(dirt, TileKind::Dirt);
        let mut sim = Simulation::from_parts(terrain, PlayerBody::new(Vec2::new(0.0, -20.0 * TILE_SIZE)));
        let mut hand = Hand::tool(ToolKind::Shovel);

        // dirt with a shovel at 1.2/s: breaks on the second 0.5 s step;
        // the drop lands right next to the player and is collected
        let input = StepInput { mine_held: true, ..aim(dirt.center()) };
        for _ in 0..30 {
            sim.step(1.0 / 60.0, &StepInput::default(), &mut hand);
        }
        for _ in 0..20 {
            sim.step(0.05, &input, &mut hand);
        }
        assert_eq!(sim.terrain().resolve(dirt), TileKind::Air);
        assert!(sim.drops().is_empty());
        assert_eq!(hand.added, vec![ItemKind::Block(BlockKind::Dirt)]);
    }

    #[test]
    fn drops_mined_in_a_tunnel_stay_in_the_tunnel() {
        // two-high tunnel at rows -20..-19, thick rock above, wall at column 3
        let mut terrain = Terrain::new(42);
        for x in -6..=10 {
            for y in -32..=-18 {
                if !(-2..=2).contains(&x) || !(-20..=-19).contains(&y) {
                    terrain.place(TileCoord::new(x, y), TileKind::Stone);
                }
            }
        }
        let mut sim = Simulation::from_parts(terrain, PlayerBody::new(Vec2::new(0.0, -20.0 * TILE_SIZE)));
        let mut hand = Hand::tool(ToolKind::Pickaxe);
        for _ in 0..30 {
            sim.step(1.0 / 60.0, &StepInput::default(), &mut hand);
        }
        assert!(sim.player().on_ground);

        let in_tunnel = |sim: &Simulation| {
            sim.drops().iter().all(|d| (-20..=-19).contains(&world_to_tile(d.pos.y)))
        };
        for wall in [TileCoord::new(3, -20), TileCoord::new(3, -19)] {
            let input = StepInput { mine_held: true, ..aim(wall.center()) };
            let mut steps = 0;
            while sim.terrain().resolve(wall) != TileKind::Air {
                sim.step(1.0 / 60.0, &input, &mut hand);
                steps += 1;
                assert!(steps < 120, "{wall:?} never broke");
            }
            for _ in 0..60 {
                sim.step(1.0 / 60.0, &StepInput::default(), &mut hand);
                assert!(in_tunnel(&sim), "drop escaped: {:?}", sim.drops());
            }
        }

        // walk into the opening and collect both
        let walk = StepInput { right: true, ..Default::default() };
        for _ in 0..90 {
            sim.step(1.0 / 60.0, &walk, &mut hand);
            assert!(in_tunnel(&sim));
        }
        assert!(sim.drops().is_empty());
        assert_eq!(hand.added, vec![ItemKind::Block(BlockKind::Stone); 2]);
    }

    #[test]
    fn same_seed_same_drop_velocity() {
        let run = || {
            let mut terrain = Terrain::new(7);
            let c = TileCoord::new(2, -20);
            terrain.place(c, TileKind::WoodPlanks);
            let mut sim = Simulation::from_parts(terrain, PlayerBody::new(Vec2::new(0.0, -20.0 * TILE_SIZE)));
            let input = StepInput { mine_held: true, ..aim(c.center()) };
            sim.interact(1.0, &input, &mut Hand::tool(ToolKind::Axe));
            sim.drops()[0].vel
        };
        let v = run();
        assert_eq!(v, run());
        assert!(DROP_POP_SPEED_X.contains(&v.x));
        assert!(DROP_POP_SPEED_Y.contains(&v.y));
    }

    #[test]
    fn new_world_spawns_clear_of_terrain() {
        let sim = Simulation::new(42);
        assert!(!sim.player().overlaps_solid(sim.terrain()));
        assert!(sim.drops().is_empty());
        assert_eq!(sim.mining(), MiningState::Idle);
    }
}
