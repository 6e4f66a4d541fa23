// Navbar state derived from the scroll position: the "scrolled" style and
// which section's link gets highlighted

use wasm_bindgen::prelude::*;

pub const SCROLLED_THRESHOLD: f64 = 60.0;
// A section counts as current a bit before its top reaches the viewport top
pub const ACTIVE_LEAD: f64 = 200.0;

#[wasm_bindgen]
pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

/// Index of the last section whose top (minus the lead) has been scrolled past.
/// `offsets` are the sections' `offsetTop` values in document order.
#[wasm_bindgen]
pub fn active_section(scroll_y: f64, offsets: &[f64]) -> Option<u32> {
    offsets
        .iter()
        .rposition(|top| scroll_y >= top - ACTIVE_LEAD)
        .map(|idx| idx as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_after_threshold() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(60.0));
        assert!(is_scrolled(60.5));
    }

    #[test]
    fn active_section_uses_lead() {
        let offsets = [0.0, 700.0, 1500.0];
        assert_eq!(active_section(0.0, &offsets), Some(0));
        assert_eq!(active_section(499.0, &offsets), Some(0));
        assert_eq!(active_section(500.0, &offsets), Some(1));
        assert_eq!(active_section(5000.0, &offsets), Some(2));
    }

    #[test]
    fn nothing_active_above_first_section() {
        assert_eq!(active_section(0.0, &[400.0, 900.0]), None);
        assert_eq!(active_section(100.0, &[]), None);
    }
}
