/// A single chart color.
///
/// The host consumes CSS color strings, so a color renders either as a hex
/// triplet (`#30AD55`) or as an `rgba(...)` value with an explicit alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Solid form, e.g. `#006EFF`.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Semi-transparent form, e.g. `rgba(0, 110, 255, 0.7)`.
    pub fn rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// UniFi green (primary)
pub const PRIMARY_GREEN: Color = Color::rgb(0x30, 0xAD, 0x55);
/// UniFi blue (secondary)
pub const SECONDARY_BLUE: Color = Color::rgb(0x00, 0x6E, 0xFF);
/// Cyan/teal
pub const CYAN_TEAL: Color = Color::rgb(0x5D, 0xC0, 0xE0);
/// Amber/orange (warning)
pub const AMBER: Color = Color::rgb(0xD0, 0x8D, 0x1E);
/// Red (critical)
pub const CRITICAL_RED: Color = Color::rgb(0xCC, 0x31, 0x35);
/// Light blue
pub const LIGHT_BLUE: Color = Color::rgb(0x47, 0x97, 0xFF);

/// Ordered, never-empty color sequence, assigned to series cyclically.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: [Color; 6],
}

impl Palette {
    pub const fn new(colors: [Color; 6]) -> Self {
        Self { colors }
    }

    /// Color for the series at `index`, wrapping past the palette length.
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// The palette applied to every chart that needs no special layering.
pub const CHART_PALETTE: Palette = Palette::new([
    PRIMARY_GREEN,
    SECONDARY_BLUE,
    CYAN_TEAL,
    AMBER,
    CRITICAL_RED,
    LIGHT_BLUE,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_uppercase_with_leading_hash() {
        assert_eq!(PRIMARY_GREEN.hex(), "#30AD55");
        assert_eq!(SECONDARY_BLUE.hex(), "#006EFF");
        assert_eq!(CYAN_TEAL.hex(), "#5DC0E0");
    }

    #[test]
    fn rgba_renders_components_and_alpha() {
        assert_eq!(SECONDARY_BLUE.rgba(0.7), "rgba(0, 110, 255, 0.7)");
        assert_eq!(PRIMARY_GREEN.rgba(0.8), "rgba(48, 173, 85, 0.8)");
    }

    #[test]
    fn palette_cycles_past_its_length() {
        assert_eq!(CHART_PALETTE.len(), 6);
        assert_eq!(CHART_PALETTE.color(0), CHART_PALETTE.color(6));
        assert_eq!(CHART_PALETTE.color(1), CHART_PALETTE.color(7));
        assert_eq!(CHART_PALETTE.color(5), LIGHT_BLUE);
    }
}
