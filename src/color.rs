// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a css hex string, and turned back into css for the 2d context

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Accepts "#rrggbb" or "#rrggbbaa", leading '#' optional
    pub fn from_hex(hex: &str) -> Result<Color, String> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid hex color '{}'", hex));
        }
        let num = u32::from_str_radix(digits, 16)
            .map_err(|_| format!("invalid hex color '{}'", hex))?;
        match digits.len() {
            6 => Ok(Color::from_u32((num << 8) | 0xff)),
            8 => Ok(Color::from_u32(num)),
            _ => Err(format!("invalid hex color '{}'", hex)),
        }
    }

    pub fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }

    pub fn to_css(&self) -> String {
        self.to_css_with_opacity(self.a as f64 / 255.0)
    }

    // Same rgb channels, opacity supplied by the caller instead of self.a
    pub fn to_css_with_opacity(&self, opacity: f64) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, opacity)
    }
}
