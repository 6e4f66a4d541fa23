//! Typed-text rotator: types a string out one character at a time, holds it,
//! backspaces it and moves on to the next one.

use wasm_bindgen::prelude::*;

pub const PORTFOLIO_ROLES: [&str; 6] = [
    "Senior Software Engineer",
    "Backend Architect",
    "Cloud Native Developer",
    "Microservices Specialist",
    "Competitive Programmer",
    "ML Enthusiast",
];

// Keeps zero or negative timings from spinning forever inside advance
const MIN_TICK_MS: f64 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TypedTiming {
    pub type_ms: f64,
    pub back_ms: f64,
    pub hold_ms: f64,
    pub looping: bool,
}

impl Default for TypedTiming {
    fn default() -> Self {
        TypedTiming {
            type_ms: 55.0,
            back_ms: 30.0,
            hold_ms: 2000.0,
            looping: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Holding,
    Deleting,
    Done,
}

#[wasm_bindgen]
pub struct TypedText {
    strings: Vec<Vec<char>>,
    index: usize,
    shown: usize,
    phase: Phase,
    pending_ms: f64,
    timing: TypedTiming,
}

impl Default for TypedText {
    fn default() -> Self {
        TypedText::new(&PORTFOLIO_ROLES, TypedTiming::default())
    }
}

impl TypedText {
    pub fn new<S: AsRef<str>>(strings: &[S], timing: TypedTiming) -> Self {
        let mut typed = TypedText {
            strings: strings.iter().map(|s| s.as_ref().chars().collect()).collect(),
            index: 0,
            shown: 0,
            phase: Phase::Typing,
            pending_ms: 0.0,
            timing,
        };
        typed.settle();
        typed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn current_len(&self) -> usize {
        self.strings.get(self.index).map_or(0, |s| s.len())
    }

    fn is_last(&self) -> bool {
        self.index + 1 >= self.strings.len()
    }

    // Phase changes that need no time to pass: fully typed strings start
    // holding, empty lists are done
    fn settle(&mut self) {
        if self.strings.is_empty() {
            self.phase = Phase::Done;
        } else if self.phase == Phase::Typing && self.shown >= self.current_len() {
            self.phase = if self.is_last() && !self.timing.looping {
                Phase::Done
            } else {
                Phase::Holding
            };
        }
    }

    fn phase_cost(&self) -> Option<f64> {
        match self.phase {
            Phase::Typing => Some(self.timing.type_ms),
            Phase::Holding => Some(self.timing.hold_ms),
            Phase::Deleting => Some(self.timing.back_ms),
            Phase::Done => None,
        }
    }

    // Time for one full rotation through every string. Empty strings still
    // cost a hold and the single backspace tick that moves past them.
    fn rotation_ms(&self) -> f64 {
        let type_ms = self.timing.type_ms.max(MIN_TICK_MS);
        let back_ms = self.timing.back_ms.max(MIN_TICK_MS);
        let hold_ms = self.timing.hold_ms.max(MIN_TICK_MS);
        self.strings
            .iter()
            .map(|s| s.len() as f64 * type_ms + hold_ms + s.len().max(1) as f64 * back_ms)
            .sum()
    }

    /// Builds a rotator from loosely typed input, rejecting missing entries.
    pub fn from_entries<I>(entries: I, timing: TypedTiming) -> Result<Self, String>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let strings = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.ok_or_else(|| format!("entry {} is not a string", i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypedText::new(&strings, timing))
    }

    fn apply_tick(&mut self) {
        match self.phase {
            Phase::Typing => self.shown += 1,
            Phase::Holding => self.phase = Phase::Deleting,
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.index = (self.index + 1) % self.strings.len();
                    self.phase = Phase::Typing;
                }
            }
            Phase::Done => {}
        }
        self.settle();
    }
}

#[wasm_bindgen]
impl TypedText {
    /// Rotator over the portfolio role strings with the default timing.
    #[wasm_bindgen(constructor)]
    pub fn portfolio() -> TypedText {
        TypedText::default()
    }

    pub fn from_strings(strings: &js_sys::Array) -> Result<TypedText, JsValue> {
        let entries = (0..strings.length()).map(|i| strings.get(i).as_string());
        TypedText::from_entries(entries, TypedTiming::default())
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Consumes `dt_ms` of wall time, possibly several characters' worth.
    /// Non-finite deltas are ignored.
    pub fn advance(&mut self, dt_ms: f64) {
        if !dt_ms.is_finite() {
            return;
        }
        self.pending_ms += dt_ms.max(0.0);
        // Whole rotations leave a looping rotator where it started
        if self.timing.looping && self.phase != Phase::Done {
            let rotation = self.rotation_ms();
            if rotation > 0.0 {
                self.pending_ms %= rotation;
            }
        }
        while let Some(cost) = self.phase_cost() {
            let cost = cost.max(MIN_TICK_MS);
            if self.pending_ms < cost {
                break;
            }
            self.pending_ms -= cost;
            self.apply_tick();
        }
        if self.phase == Phase::Done {
            self.pending_ms = 0.0;
        }
    }

    pub fn text(&self) -> String {
        self.strings
            .get(self.index)
            .map(|s| s.iter().take(self.shown).collect())
            .unwrap_or_default()
    }

    pub fn index(&self) -> u32 {
        self.index as u32
    }
}
