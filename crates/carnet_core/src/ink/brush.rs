//! Brush model: color, stock and custom families, and the brush value type.
//!
//! # Responsibility
//! - Represent everything a stroke needs to be rendered besides its
//!   geometry.
//! - Pack colors into the 64-bit integer form used by the persisted brush
//!   record.
//!
//! # Invariants
//! - `Color::from_packed(color.to_packed())` reproduces the packed value
//!   bit-for-bit (channels are quantized to 16 bits on packing).
//! - A `Brush` is a value type; mutations go through `with_*` helpers.

const CHANNEL_MAX: f32 = 65_535.0;

/// RGBA color with f32 channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Packs the color as ARGB with 16 bits per channel.
    pub fn to_packed(self) -> i64 {
        let pack = |channel: f32| -> i64 {
            let clamped = channel.clamp(0.0, 1.0);
            (clamped * CHANNEL_MAX).round() as i64
        };
        (pack(self.alpha) << 48) | (pack(self.red) << 32) | (pack(self.green) << 16)
            | pack(self.blue)
    }

    /// Unpacks a 16-bit-per-channel ARGB value.
    pub fn from_packed(packed: i64) -> Self {
        let unpack = |shift: i64| -> f32 { ((packed >> shift) & 0xFFFF) as f32 / CHANNEL_MAX };
        Self {
            red: unpack(32),
            green: unpack(16),
            blue: unpack(0),
            alpha: unpack(48),
        }
    }
}

/// Built-in brush family behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockBrush {
    Marker,
    PressurePen,
    Highlighter,
    DashedLine,
}

/// Brush family decoded from a binary brush resource.
///
/// The shape parameters modulate the base stock behavior; only the client
/// id participates in persistence identity.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFamily {
    /// Stable identifier matched against the persisted brush record.
    pub client_brush_family_id: String,
    /// Stock behavior this family is derived from.
    pub base: StockBrush,
    /// Texture scale relative to brush size.
    pub scale: f32,
    /// Stamp spacing along the stroke path.
    pub spacing: f32,
    /// Per-stamp rotation jitter in radians.
    pub jitter: f32,
}

/// Either a stock family or a custom family from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum BrushFamily {
    Stock(StockBrush),
    Custom(CustomFamily),
}

impl BrushFamily {
    pub fn client_brush_family_id(&self) -> Option<&str> {
        match self {
            Self::Stock(_) => None,
            Self::Custom(family) => Some(family.client_brush_family_id.as_str()),
        }
    }

    pub fn is_highlighter(&self) -> bool {
        matches!(self, Self::Stock(StockBrush::Highlighter))
    }
}

/// Complete brush: family plus size, color and simplification tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub family: BrushFamily,
    pub color: Color,
    /// Brush tip size in stroke coordinate units.
    pub size: f32,
    /// Geometry simplification tolerance.
    pub epsilon: f32,
}

impl Brush {
    pub fn new(family: BrushFamily, color: Color, size: f32, epsilon: f32) -> Self {
        Self {
            family,
            color,
            size,
            epsilon,
        }
    }

    pub fn with_family(self, family: BrushFamily) -> Self {
        Self { family, ..self }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_size(self, size: f32) -> Self {
        Self { size, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::{BrushFamily, Color, CustomFamily, StockBrush};

    #[test]
    fn packed_color_round_trips_bit_for_bit() {
        let packed = Color::new(0.25, 0.5, 0.75, 0.3).to_packed();
        assert_eq!(Color::from_packed(packed).to_packed(), packed);
    }

    #[test]
    fn packed_extremes_are_exact() {
        assert_eq!(Color::from_packed(Color::WHITE.to_packed()), Color::WHITE);
        assert_eq!(Color::from_packed(Color::BLACK.to_packed()), Color::BLACK);
    }

    #[test]
    fn family_id_only_set_for_custom_families() {
        assert_eq!(
            BrushFamily::Stock(StockBrush::Marker).client_brush_family_id(),
            None
        );
        let custom = BrushFamily::Custom(CustomFamily {
            client_brush_family_id: "lace".to_string(),
            base: StockBrush::Marker,
            scale: 1.0,
            spacing: 0.5,
            jitter: 0.0,
        });
        assert_eq!(custom.client_brush_family_id(), Some("lace"));
        assert!(!custom.is_highlighter());
        assert!(BrushFamily::Stock(StockBrush::Highlighter).is_highlighter());
    }
}
