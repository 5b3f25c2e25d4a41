//! bevy front end: samples input, steps the simulation, draws the result
pub mod camera;
pub mod components;
pub mod input;
pub mod render;
