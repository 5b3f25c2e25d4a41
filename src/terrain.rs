//! resolved tile world: procedural base + sparse player overrides
//!
//! Every read of the world goes through [`Terrain::resolve`] and every write
//! through [`Terrain::mine`] / [`Terrain::place`]. Only coordinates a player
//! actually touched are stored; the rest of the infinite world is recomputed
//! on demand by [`WorldGen`].

use std::collections::HashMap;

use bevy::log::trace;

use crate::tile::{TileCoord, TileKind};
use crate::world_gen::WorldGen;

#[derive(Clone, Debug)]
pub struct Terrain {
    gen: WorldGen,
    /// present key = authoritative, absent key = ask the generator;
    /// entries are only ever added or replaced, never removed
    overrides: HashMap<TileCoord, TileKind>,
    /// bumped on every edit so renderers know when to re‑resolve
    revision: u64,
}

impl Terrain {
    pub fn new(seed: i64) -> Self {
        Self {
            gen: WorldGen::new(seed),
            overrides: HashMap::new(),
            revision: 0,
        }
    }

    #[inline]
    pub fn seed(&self) -> i64 {
        self.gen.seed()
    }

    #[inline]
    pub fn generator(&self) -> &WorldGen {
        &self.gen
    }

    /// tile actually present at `coord` (override wins)
    #[inline]
    pub fn resolve(&self, coord: TileCoord) -> TileKind {
        match self.overrides.get(&coord) {
            Some(&kind) => kind,
            None => self.gen.classify(coord.x, coord.y),
        }
    }

    /// clear a tile to air; returns what was there
    pub fn mine(&mut self, coord: TileCoord) -> TileKind {
        let before = self.resolve(coord);
        self.overrides.insert(coord, TileKind::Air);
        self.revision += 1;
        trace!(?coord, ?before, "tile mined");
        before
    }

    pub fn place(&mut self, coord: TileCoord, kind: TileKind) {
        self.overrides.insert(coord, kind);
        self.revision += 1;
        trace!(?coord, ?kind, "tile placed");
    }

    #[inline]
    pub fn override_at(&self, coord: TileCoord) -> Option<TileKind> {
        self.overrides.get(&coord).copied()
    }

    /// every player edit so far (iteration order is unspecified)
    pub fn overrides(&self) -> impl Iterator<Item = (TileCoord, TileKind)> + '_ {
        self.overrides.iter().map(|(&c, &k)| (c, k))
    }

    #[inline]
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// shortcut used by physics
#[inline]
pub fn solid(terrain: &Terrain, tx: i64, ty: i64) -> bool {
    terrain.resolve(TileCoord::new(tx, ty)).is_solid()
}
