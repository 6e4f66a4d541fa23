// Custom cursor: a dot glued to the pointer and an outline ring that eases
// toward it a fraction of the remaining distance every frame

use vecmath::{vec2_add, vec2_scale, vec2_sub, Vector2};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorFollower {
    target: Vector2<f64>,
    outline: Vector2<f64>,
    easing: f64,
}

impl Default for CursorFollower {
    fn default() -> Self {
        CursorFollower::new(0.12)
    }
}

#[wasm_bindgen]
impl CursorFollower {
    #[wasm_bindgen(constructor)]
    pub fn new(easing: f64) -> CursorFollower {
        CursorFollower {
            target: [0.0, 0.0],
            outline: [0.0, 0.0],
            easing,
        }
    }

    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target = [x, y];
    }

    /// Moves the outline one frame closer to the pointer.
    pub fn step(&mut self) {
        let remaining = vec2_sub(self.target, self.outline);
        self.outline = vec2_add(self.outline, vec2_scale(remaining, self.easing));
    }

    pub fn dot_x(&self) -> f64 {
        self.target[0]
    }

    pub fn dot_y(&self) -> f64 {
        self.target[1]
    }

    pub fn outline_x(&self) -> f64 {
        self.outline[0]
    }

    pub fn outline_y(&self) -> f64 {
        self.outline[1]
    }
}
