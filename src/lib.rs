pub mod color;
pub mod config;
pub mod counter;
pub mod cursor;
pub mod field;
pub mod navbar;
pub mod particle;
pub mod renderer;
pub mod surface;
pub mod typed;
mod utils;
pub mod web;

use wasm_bindgen::prelude::*;

pub use crate::color::Color;
pub use crate::config::FieldConfig;
pub use crate::counter::CounterUp;
pub use crate::cursor::CursorFollower;
pub use crate::field::{Connection, ParticleField};
pub use crate::particle::Particle;
pub use crate::surface::Surface;
pub use crate::typed::{TypedText, TypedTiming};
pub use crate::web::HeroCanvas;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn initialize() {
    utils::set_panic_hook();
}
