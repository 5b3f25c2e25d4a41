//! infinite 2‑D tile world: procedural terrain, player physics, mining,
//! placing & item drops
//!
//! The library is host‑agnostic; `main.rs` wires it into a bevy app.

pub mod config;
pub mod constants;
pub mod drops;
pub mod interaction;
pub mod inventory;
pub mod player;
pub mod sim;
pub mod terrain;
pub mod tile;
pub mod value_noise;
pub mod world_gen;

pub use config::{ConfigError, GameConfig};
pub use drops::Drop;
pub use interaction::{MiningState, PlaceRejection};
pub use inventory::{BlockKind, Hotbar, Inventory, ItemKind, ItemStack, ToolKind};
pub use player::PlayerBody;
pub use sim::{Simulation, StepInput, ViewTransform};
pub use terrain::Terrain;
pub use tile::{TileCoord, TileKind};
pub use world_gen::WorldGen;
