use bevy::prelude::*;

/* ===========================================================
   sprites mirroring simulation state
   =========================================================== */
#[derive(Component)]
pub struct PlayerSprite;

/// pooled; the index matches `Simulation::drops()` for this frame
#[derive(Component)]
pub struct DropSprite(pub usize);

#[derive(Component)]
pub struct MiningOverlay;

#[derive(Component)]
pub struct TileSprite;
