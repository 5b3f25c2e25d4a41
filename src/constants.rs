use std::ops::Range;

/// -------- tiles & world --------
pub const TILE_SIZE: f32 = 8.0;
pub const SEA_LEVEL: i64 = 30; // first row that fills with water above ground

/// -------- player phys (y grows downward) --------
pub const PLAYER_WIDTH: f32  = TILE_SIZE * 0.9;
pub const PLAYER_HEIGHT: f32 = TILE_SIZE * 1.8;
pub const WALK_SPEED: f32    = 9.0 * TILE_SIZE;
pub const GRAVITY: f32       = 55.0 * TILE_SIZE;
pub const JUMP_SPEED: f32    = 19.0 * TILE_SIZE;

/// shaves the far edge of a body so a flush contact doesn't count as overlap
pub const EDGE_EPSILON: f32 = 0.001;

/// callers clamp dt to this before stepping; bounds the per‑step sweep
pub const MAX_STEP_DT: f32 = 0.05;

/// -------- interaction --------
pub const MINE_RANGE: f32    = 5.0 * TILE_SIZE;
pub const PICKUP_RADIUS: f32 = 2.5 * TILE_SIZE;

/// -------- drops --------
pub const DROP_POP_SPEED_X: Range<f32> =  -30.0..  30.0;
pub const DROP_POP_SPEED_Y: Range<f32> = -140.0.. -80.0;
pub const DROP_GROUND_DAMPING: f32 = 0.7;
pub const DROP_REST_OFFSET: f32    = 1.0; // px above the tile top

/// -------- view --------
pub const DEFAULT_ZOOM: f32 = 2.0;
pub const HOTBAR_SLOTS: usize = 9;

/// -------- colour‑variation (host renderer) --------
pub const COLOR_NOISE_SCALE: f64   = 0.05;
pub const COLOR_VARIATION_LEVELS: i32 = 4;
pub const COLOR_VARIATION_STRENGTH: f32 = 0.2;
