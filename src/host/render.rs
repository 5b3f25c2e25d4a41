//! resolved tiles, the player, drops & the mining overlay as coloured sprites
//!
//! Tile sprites are pooled per visible coordinate. A frame only touches
//! coordinates that scrolled into view, unless the terrain was edited, in
//! which case the whole view is re‑resolved.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use noise::{NoiseFn, Perlin};

use tileworld::constants::*;
use tileworld::tile::world_to_tile;
use tileworld::{MiningState, Simulation, Terrain, TileCoord, TileKind, ViewTransform};

use super::camera::View;
use super::components::*;

const Z_BACKDROP: f32 = -1.0;
const Z_TILE: f32     = 0.0;
const Z_DROP: f32     = 1.0;
const Z_PLAYER: f32   = 2.0;
const Z_OVERLAY: f32  = 3.0;

const DROP_SIZE: f32 = TILE_SIZE * 0.5;

/// world (y‑down) → bevy (y‑up)
#[inline]
fn to_bevy(p: Vec2, z: f32) -> Vec3 {
    Vec3::new(p.x, -p.y, z)
}

/* ===========================================================
   colours
   =========================================================== */
fn base_rgb(kind: TileKind) -> Option<Vec3> {
    Some(match kind {
        TileKind::Air         => return None,
        TileKind::Water       => Vec3::new(0.15, 0.35, 0.85),
        TileKind::Grass       => Vec3::new(0.13, 0.70, 0.08),
        TileKind::Dirt        => Vec3::new(0.55, 0.27, 0.07),
        TileKind::Stone       => Vec3::new(0.50, 0.50, 0.50),
        TileKind::TreeTrunk   => Vec3::new(0.40, 0.26, 0.13),
        TileKind::Leaves      => Vec3::new(0.18, 0.55, 0.15),
        TileKind::WoodPlanks  => Vec3::new(0.72, 0.55, 0.32),
        TileKind::StoneBricks => Vec3::new(0.62, 0.62, 0.66),
    })
}

/// dug‑out or cave air below the surface
const BACKDROP_RGB: Vec3 = Vec3::new(0.20, 0.10, 0.05);

/// coarse Perlin bands so large areas of one material don't look flat
fn band_factor(noise: &Perlin, coord: TileCoord) -> f32 {
    let raw = noise.get([
        coord.x as f64 * COLOR_NOISE_SCALE,
        coord.y as f64 * COLOR_NOISE_SCALE,
    ]) as f32;

    let step = (((raw + 1.0) * 0.5) * COLOR_VARIATION_LEVELS as f32)
        .floor()
        .clamp(0.0, (COLOR_VARIATION_LEVELS - 1) as f32);
    let norm = step / (COLOR_VARIATION_LEVELS as f32 - 1.0) * 2.0 - 1.0;
    1.0 + norm * COLOR_VARIATION_STRENGTH
}

#[inline]
fn rgb(v: Vec3, alpha: f32) -> Color {
    Color::srgba(v.x.clamp(0.0, 1.0), v.y.clamp(0.0, 1.0), v.z.clamp(0.0, 1.0), alpha)
}

/// `None` = leave the coordinate to the clear colour (open sky)
fn tile_color(noise: &Perlin, coord: TileCoord, kind: TileKind, underground: bool) -> Option<Color> {
    match kind {
        TileKind::Air if underground => Some(rgb(BACKDROP_RGB * band_factor(noise, coord), 1.0)),
        TileKind::Air => None,
        TileKind::Water => base_rgb(kind).map(|c| rgb(c, 0.8)),
        _ => base_rgb(kind).map(|c| rgb(c * band_factor(noise, coord), 1.0)),
    }
}

/* ===========================================================
   tile sprite pool
   =========================================================== */
/// inclusive window of tile coordinates on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TileRect {
    min_x: i64,
    max_x: i64,
    min_y: i64,
    max_y: i64,
}

impl TileRect {
    fn visible(view: &ViewTransform, width: f32, height: f32) -> Self {
        let top_left = view.screen_to_world(Vec2::ZERO);
        let bottom_right = view.screen_to_world(Vec2::new(width, height));
        Self {
            min_x: world_to_tile(top_left.x),
            max_x: world_to_tile(bottom_right.x),
            min_y: world_to_tile(top_left.y),
            max_y: world_to_tile(bottom_right.y),
        }
    }

    #[inline]
    fn contains(&self, c: TileCoord) -> bool {
        (self.min_x..=self.max_x).contains(&c.x) && (self.min_y..=self.max_y).contains(&c.y)
    }
}

#[derive(Resource)]
pub struct TileSprites {
    live: HashMap<TileCoord, (Entity, TileKind)>,
    free: Vec<Entity>,
    /// view & terrain revision drawn last frame
    last: Option<(TileRect, u64)>,
    color_noise: Perlin,
}

impl TileSprites {
    pub fn new(seed: i64) -> Self {
        Self {
            live: HashMap::new(),
            free: Vec::new(),
            last: None,
            color_noise: Perlin::new(seed as u32),
        }
    }

    fn recycle(&mut self, commands: &mut Commands, coord: TileCoord) {
        if let Some((e, _)) = self.live.remove(&coord) {
            commands.entity(e).insert(Visibility::Hidden);
            self.free.push(e);
        }
    }

    /// bring the sprite at `coord` in line with the resolved tile
    fn draw(&mut self, commands: &mut Commands, terrain: &Terrain, coord: TileCoord, ground: i64) {
        let kind = terrain.resolve(coord);
        if self.live.get(&coord).map(|&(_, k)| k) == Some(kind) {
            return;
        }
        let Some(color) = tile_color(&self.color_noise, coord, kind, coord.y >= ground) else {
            self.recycle(commands, coord);
            return;
        };

        let z = if kind == TileKind::Air { Z_BACKDROP } else { Z_TILE };
        let bundle = (
            Visibility::Visible,
            Sprite {
                color,
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            },
            Transform::from_translation(to_bevy(coord.center(), z)),
            TileSprite,
        );
        let reused = self.live.get(&coord).map(|&(e, _)| e).or_else(|| self.free.pop());
        let entity = match reused {
            Some(e) => {
                commands.entity(e).insert(bundle);
                e
            }
            None => commands.spawn(bundle).id(),
        };
        self.live.insert(coord, (entity, kind));
    }
}

/* ===========================================================
   tile_render_system – view differencing + pooling
   =========================================================== */
pub fn tile_render_system(
    mut commands: Commands,
    mut sprites:  ResMut<TileSprites>,
    sim:          Res<Simulation>,
    view:         Res<View>,
    window_q:     Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = window_q.get_single() else { return };
    let rect = TileRect::visible(&view, window.width(), window.height());
    let terrain = sim.terrain();
    let revision = terrain.revision();
    if sprites.last == Some((rect, revision)) {
        return;
    }
    let sprites = &mut *sprites;

    /* leaving view (re‑pool) -------------------------------------------- */
    let gone: Vec<TileCoord> = sprites.live.keys().filter(|c| !rect.contains(**c)).copied().collect();
    for coord in gone {
        sprites.recycle(&mut commands, coord);
    }

    /* entering view, or everything after an edit ------------------------ */
    let prev = match sprites.last {
        Some((prev, rev)) if rev == revision => Some(prev),
        _ => None,
    };
    for x in rect.min_x..=rect.max_x {
        let ground = terrain.generator().ground_tile_y(x);
        for y in rect.min_y..=rect.max_y {
            let coord = TileCoord::new(x, y);
            if prev.is_some_and(|p| p.contains(coord)) {
                continue;
            }
            sprites.draw(&mut commands, terrain, coord, ground);
        }
    }

    sprites.last = Some((rect, revision));
}

/* ===========================================================
   player, drops & mining overlay
   =========================================================== */
pub fn spawn_entity_sprites(mut commands: Commands) {
    commands.spawn((
        PlayerSprite,
        Sprite {
            color: Color::srgb(0.95, 0.80, 0.30),
            custom_size: Some(Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            ..default()
        },
        Transform::default(),
    ));
    commands.spawn((
        MiningOverlay,
        Sprite {
            color: Color::srgba(1.0, 1.0, 1.0, 0.0),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        },
        Transform::default(),
        Visibility::Hidden,
    ));
}

pub fn player_sprite_system(
    sim: Res<Simulation>,
    mut q: Query<&mut Transform, With<PlayerSprite>>,
) {
    let Ok(mut tf) = q.get_single_mut() else { return };
    tf.translation = to_bevy(sim.player().center(), Z_PLAYER);
}

pub fn drop_sprites_system(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut q: Query<(&DropSprite, &mut Transform, &mut Sprite, &mut Visibility)>,
) {
    let drops = sim.drops();
    // drop point is the sprite's bottom edge
    let place = |pos: Vec2| to_bevy(pos - Vec2::new(0.0, DROP_SIZE * 0.5), Z_DROP);
    let color = |kind: TileKind| rgb(base_rgb(kind).unwrap_or(Vec3::ONE), 1.0);

    let mut pooled = 0;
    for (DropSprite(i), mut tf, mut sprite, mut vis) in &mut q {
        pooled = pooled.max(*i + 1);
        match drops.get(*i) {
            Some(drop) => {
                tf.translation = place(drop.pos);
                sprite.color = color(drop.kind);
                *vis = Visibility::Visible;
            }
            None => *vis = Visibility::Hidden,
        }
    }

    for (i, drop) in drops.iter().enumerate().skip(pooled) {
        commands.spawn((
            DropSprite(i),
            Sprite {
                color: color(drop.kind),
                custom_size: Some(Vec2::splat(DROP_SIZE)),
                ..default()
            },
            Transform::from_translation(place(drop.pos)),
        ));
    }
}

pub fn mining_overlay_system(
    sim: Res<Simulation>,
    mut q: Query<(&mut Transform, &mut Sprite, &mut Visibility), With<MiningOverlay>>,
) {
    let Ok((mut tf, mut sprite, mut vis)) = q.get_single_mut() else { return };
    match sim.mining() {
        MiningState::Targeting { target, progress } => {
            tf.translation = to_bevy(target.center(), Z_OVERLAY);
            sprite.color = Color::srgba(1.0, 1.0, 1.0, 0.15 + 0.6 * progress);
            *vis = Visibility::Visible;
        }
        MiningState::Idle => *vis = Visibility::Hidden,
    }
}
