// Stat counter that climbs from zero to its target with an ease-out cubic

use wasm_bindgen::prelude::*;

pub const DEFAULT_DURATION_MS: f64 = 1800.0;

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CounterUp {
    target: u32,
    duration_ms: f64,
}

#[wasm_bindgen]
impl CounterUp {
    #[wasm_bindgen(constructor)]
    pub fn new(target: u32) -> CounterUp {
        CounterUp::with_duration(target, DEFAULT_DURATION_MS)
    }

    pub fn with_duration(target: u32, duration_ms: f64) -> CounterUp {
        CounterUp { target, duration_ms }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).max(0.0).min(1.0)
    }

    /// Displayed value `elapsed_ms` after the counter came into view.
    pub fn value_at(&self, elapsed_ms: f64) -> u32 {
        let progress = self.progress(elapsed_ms);
        if progress >= 1.0 {
            return self.target;
        }
        let eased = 1.0 - (1.0 - progress).powi(3);
        (eased * self.target as f64).floor() as u32
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}
