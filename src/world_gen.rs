//! procedural base terrain: height field, trees, stone blobs & caves
//!
//! [`WorldGen::classify`] is a pure function of `(seed, x, y)`; nothing is
//! cached, so any tile of the infinite world can be asked for in any order.

use crate::constants::SEA_LEVEL;
use crate::tile::TileKind;
use crate::value_noise::{lerp, noise2d, rand01, smoothstep};

/* ===========================================================
   tunables
   =========================================================== */
const GROUND_BASE: f64 = 20.0;
const COARSE_STEP: i64 = 8;
const COARSE_AMPLITUDE: f64 = 3.0;
const FINE_STEP: i64 = 4;
const FINE_AMPLITUDE: f64 = 1.0;
const FINE_SALT: i64 = 1337;

const TREE_SALT: i64 = 7777;
const TREE_HEIGHT_SALT: i64 = 991;
const TREE_CHANCE: f64 = 0.07;
const TREE_MIN_HEIGHT: i64 = 3;
const TREE_HEIGHT_RANGE: f64 = 4.0; // → heights 3..=6
const CANOPY_RADIUS: i64 = 2;

/// rows 0..CRUST_DEPTH below the surface never carve into caves
const CRUST_DEPTH: i64 = 3;
const DEEP_DEPTH: i64 = 10;
const DEEP_BELOW_SEA: i64 = 8;
const STONE_THRESHOLD: f64 = 0.55;
const CAVE_THRESHOLD: f64 = 0.18;

/// (weight, scale, salt) per noise layer
const STONE_LAYERS: [(f64, f64, i64); 2] = [(0.7, 0.06, 555), (0.3, 0.10, 556)];
const CAVE_LAYERS: [(f64, f64, i64); 2] = [(0.6, 0.20, 101), (0.4, 0.40, 202)];

/* ===========================================================
   generator
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldGen {
    seed: i64,
}

impl WorldGen {
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /* ---------- height field ---------- */

    /// first below‑ground row of column `x`
    pub fn ground_tile_y(&self, x: i64) -> i64 {
        let coarse = octave(self.seed, x, COARSE_STEP, COARSE_AMPLITUDE);
        let fine = octave(self.seed.wrapping_add(FINE_SALT), x, FINE_STEP, FINE_AMPLITUDE);
        ((GROUND_BASE + coarse + fine).round() as i64).max(1)
    }

    /* ---------- trees ---------- */

    pub fn tree_spawn_at(&self, x: i64) -> bool {
        rand01(self.seed.wrapping_add(TREE_SALT), x) < TREE_CHANCE
    }

    /// trunk length in tiles, always in `3..=6`
    pub fn tree_height_at(&self, x: i64) -> i64 {
        let r = rand01(self.seed.wrapping_add(TREE_HEIGHT_SALT), x);
        TREE_MIN_HEIGHT + (r * TREE_HEIGHT_RANGE) as i64
    }

    /// `(top trunk row, surface row)` of the tree growing in column `x`
    fn trunk_rows(&self, x: i64) -> Option<(i64, i64)> {
        if !self.tree_spawn_at(x) {
            return None;
        }
        let surface = self.ground_tile_y(x) - 1;
        Some((surface - (self.tree_height_at(x) - 1), surface))
    }

    pub fn is_trunk_at(&self, x: i64, y: i64) -> bool {
        self.trunk_rows(x)
            .is_some_and(|(top, surface)| (top..=surface).contains(&y))
    }

    /// diamond canopy of radius 2 centred one row above each nearby trunk
    /// top; leaves only ever grow into the sky of their own column
    pub fn is_leaf_at(&self, x: i64, y: i64) -> bool {
        let mut in_canopy = false;
        for dx in -CANOPY_RADIUS..=CANOPY_RADIUS {
            let Some((top, _)) = self.trunk_rows(x.wrapping_add(dx)) else {
                continue;
            };
            let reach = CANOPY_RADIUS - dx.abs();
            if y.checked_sub(top - 1).is_some_and(|dy| dy.unsigned_abs() <= reach.unsigned_abs()) {
                in_canopy = true;
                break;
            }
        }
        in_canopy && y < self.ground_tile_y(x)
    }

    /* ---------- classifier ---------- */

    /// base tile kind at `(x, y)` before any player edits
    pub fn classify(&self, x: i64, y: i64) -> TileKind {
        if self.is_trunk_at(x, y) {
            return TileKind::TreeTrunk;
        }
        if self.is_leaf_at(x, y) {
            return TileKind::Leaves;
        }

        let ground = self.ground_tile_y(x);
        if y < ground {
            return sky_tile(y);
        }

        let depth = y - ground;
        match depth {
            0 => TileKind::Grass,
            d if d < CRUST_DEPTH => TileKind::Dirt,
            _ => self.underground_tile(x, y, depth),
        }
    }

    fn underground_tile(&self, x: i64, y: i64, depth: i64) -> TileKind {
        let (fx, fy) = (x as f64, y as f64);

        let deep = depth > DEEP_DEPTH || y > SEA_LEVEL + DEEP_BELOW_SEA;
        let is_stone = deep && self.layered(&STONE_LAYERS, fx, fy) > STONE_THRESHOLD;

        // caves carve through dirt and stone alike
        if self.layered(&CAVE_LAYERS, fx, fy) < CAVE_THRESHOLD {
            return TileKind::Air;
        }
        if is_stone {
            TileKind::Stone
        } else {
            TileKind::Dirt
        }
    }

    fn layered(&self, layers: &[(f64, f64, i64)], x: f64, y: f64) -> f64 {
        layers
            .iter()
            .map(|&(weight, scale, salt)| weight * noise2d(self.seed, x, y, scale, salt))
            .sum()
    }
}

/// above‑ground fill: water at and below sea level, air otherwise
#[inline]
fn sky_tile(y: i64) -> TileKind {
    if y >= SEA_LEVEL {
        TileKind::Water
    } else {
        TileKind::Air
    }
}

/// one smoothstep‑interpolated octave of control‑point noise, `±amplitude`
fn octave(seed: i64, x: i64, step: i64, amplitude: f64) -> f64 {
    let i0 = x.div_euclid(step);
    let t = x.rem_euclid(step) as f64 / step as f64;
    let v0 = (rand01(seed, i0) - 0.5) * 2.0 * amplitude;
    let v1 = (rand01(seed, i0.wrapping_add(1)) - 0.5) * 2.0 * amplitude;
    lerp(v0, v1, smoothstep(t))
}
