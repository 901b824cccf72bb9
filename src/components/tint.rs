//! Accent colors for fighters, bags and particles.
//!
//! Colors arrive as CSS-style hex tokens (`#ef4444`) from the configuration
//! and stay window-agnostic here; the renderer converts them to raylib colors.

/// RGBA color.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const WHITE: Tint = Tint::new(255, 255, 255, 255);

    /// Create a new Tint with the specified RGBA values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(token: &str) -> Option<Self> {
        let hex = token.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::new(it.next()??, it.next()??, it.next()??, 255))
            }
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, dropping alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Same color with alpha scaled by `factor` (clamped to `[0, 1]`).
    pub fn fade(&self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * f).round() as u8,
            ..*self
        }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::WHITE
    }
}
