// Tunables for the hero particle field, exposed to js with getters/setters

use crate::color::Color;
use wasm_bindgen::prelude::*;

pub const DEFAULT_PALETTE: [u32; 5] = [
    0x7c3aedff, // violet
    0x06b6d4ff, // cyan
    0xa78bfaff, // lavender
    0xf472b6ff, // pink
    0x10b981ff, // emerald
];

#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub max_particles: u32,
    pub density_divisor: f64,
    pub connection_distance: f64,
    pub connection_opacity: f64,
    pub connection_width: f64,
    pub repulsion_radius: f64,
    pub repulsion_force: f64,
    pub damping: f64,
    /// Glow radius as a multiple of the particle radius
    pub glow_scale: f64,
    pub max_initial_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    #[wasm_bindgen(skip)]
    pub palette: Vec<Color>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            max_particles: 120,
            density_divisor: 10.0,
            connection_distance: 130.0,
            connection_opacity: 0.15,
            connection_width: 0.6,
            repulsion_radius: 100.0,
            repulsion_force: 0.3,
            damping: 0.99,
            glow_scale: 4.0,
            max_initial_speed: 0.2,
            min_radius: 0.5,
            max_radius: 2.5,
            min_alpha: 0.2,
            max_alpha: 0.7,
            palette: DEFAULT_PALETTE.iter().map(|c| Color::from_u32(*c)).collect(),
        }
    }
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldConfig {
        FieldConfig::default()
    }

    /// Replaces the palette with css hex strings. Leaves the old palette in
    /// place if any entry fails to parse or the list is empty.
    pub fn set_palette(&mut self, colors: &js_sys::Array) -> Result<(), JsValue> {
        let hex: Vec<String> = (0..colors.length())
            .filter_map(|i| colors.get(i).as_string())
            .collect();
        if hex.len() != colors.length() as usize {
            return Err(JsValue::from_str("palette entries must be strings"));
        }
        self.set_palette_hex(&hex).map_err(|e| JsValue::from_str(&e))
    }
}

impl FieldConfig {
    pub fn set_palette_hex<S: AsRef<str>>(&mut self, colors: &[S]) -> Result<(), String> {
        if colors.is_empty() {
            return Err(String::from("palette must not be empty"));
        }
        let palette = colors
            .iter()
            .map(|c| Color::from_hex(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.palette = palette;
        Ok(())
    }

    // Density heuristic: one particle per `density_divisor` px of width, capped
    pub fn particle_count(&self, width: f64) -> usize {
        if width <= 0.0 || self.density_divisor <= 0.0 {
            return 0;
        }
        let by_width = (width / self.density_divisor).floor() as usize;
        by_width.min(self.max_particles as usize)
    }

    /// Color used for connection lines, the first palette entry.
    pub fn accent(&self) -> Color {
        self.palette
            .first()
            .copied()
            .unwrap_or_else(|| Color::from_u32(DEFAULT_PALETTE[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_follows_width() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count(800.0), 80);
        assert_eq!(config.particle_count(805.0), 80);
        assert_eq!(config.particle_count(2000.0), 120);
        assert_eq!(config.particle_count(5.0), 0);
        assert_eq!(config.particle_count(0.0), 0);
    }

    #[test]
    fn palette_replacement_is_all_or_nothing() {
        let mut config = FieldConfig::default();
        assert!(config.set_palette_hex(&["#ffffff", "nope"]).is_err());
        assert_eq!(config.palette.len(), 5);

        let empty: [&str; 0] = [];
        assert!(config.set_palette_hex(&empty).is_err());

        config.set_palette_hex(&["#ff0000", "#00ff00"]).unwrap();
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.accent(), Color::from_u32(0xff0000ff));
    }
}
