//! tile kinds, their property tables & grid coordinates
use bevy::math::Vec2;

use crate::constants::TILE_SIZE;

/* ===========================================================
   kinds
   =========================================================== */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Air,
    Dirt,
    Water,
    TreeTrunk,
    Leaves,
    Grass,
    Stone,
    WoodPlanks,
    StoneBricks,
}

impl TileKind {
    /// blocks movement & takes part in collision
    #[inline]
    pub fn is_solid(self) -> bool {
        !matches!(self, TileKind::Air | TileKind::Water | TileKind::Leaves)
    }

    /// can be targeted by the mining interaction
    #[inline]
    pub fn is_minable(self) -> bool {
        !matches!(self, TileKind::Air | TileKind::Water | TileKind::Leaves)
    }

    /// a block may be placed into this tile
    #[inline]
    pub fn is_replaceable(self) -> bool {
        matches!(self, TileKind::Air | TileKind::Water)
    }

    /// what a broken tile leaves behind (grass crumbles to dirt)
    #[inline]
    pub fn drop_kind(self) -> TileKind {
        match self {
            TileKind::Grass => TileKind::Dirt,
            other => other,
        }
    }
}

/* ===========================================================
   coordinates
   =========================================================== */

/// one grid cell; y grows downward
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// tile containing a world‑space point
    #[inline]
    pub fn from_world(p: Vec2) -> Self {
        debug_assert!(p.is_finite(), "non-finite world position {p:?}");
        Self {
            x: world_to_tile(p.x),
            y: world_to_tile(p.y),
        }
    }

    /// top‑left corner in world space
    #[inline]
    pub fn min_corner(self) -> Vec2 {
        Vec2::new(self.x as f32 * TILE_SIZE, self.y as f32 * TILE_SIZE)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.min_corner() + Vec2::splat(TILE_SIZE * 0.5)
    }

    /// strict AABB overlap between this tile and a rectangle at `pos` of `size`
    pub fn overlaps_rect(self, pos: Vec2, size: Vec2) -> bool {
        let b0 = self.min_corner();
        let b1 = b0 + Vec2::splat(TILE_SIZE);
        let p1 = pos + size;
        !(b1.x <= pos.x || b0.x >= p1.x || b1.y <= pos.y || b0.y >= p1.y)
    }
}

/// single axis world → tile conversion
#[inline]
pub fn world_to_tile(v: f32) -> i64 {
    (v / TILE_SIZE).floor() as i64
}

/// every tile index a span `[lo, lo + len)` touches on one axis
#[inline]
pub fn tile_span(lo: f32, len: f32) -> (i64, i64) {
    (world_to_tile(lo), world_to_tile(lo + len - crate::constants::EDGE_EPSILON))
}
