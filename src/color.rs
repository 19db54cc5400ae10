//! The greeting's color palette.
//!
//! Every color is a [`Color`] with RGBA components in the range [0.0, 1.0]. The
//! named constants are the exact hex values the scene is tuned for; use
//! [`from_hex`] when a color arrives as a packed `0xRRGGBB` integer.

pub use rgb::Rgba;

/// The color type used throughout yule3d. RGBA with f32 components in [0.0, 1.0].
pub type Color = Rgba<f32>;

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 0, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Black (0, 0, 0)</div>
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 255, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>White (255, 255, 255)</div>
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Ribbon white, for the ribbons tied around the gifts.
pub const RIBBON_WHITE: Color = WHITE;

// ============================================================================
// Scene palette
// ============================================================================

/// <div style="margin:2px 0"><span style="background-color:rgb(47, 158, 68);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Tree green (#2f9e44)</div>
///
/// Used for the tier foliage.
pub const TREE_GREEN: Color = Color::new(0.1843137, 0.6196078, 0.2666667, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(139, 90, 43);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Trunk brown (#8b5a2b)</div>
pub const TRUNK_BROWN: Color = Color::new(0.545098, 0.3529412, 0.1686275, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 210, 63);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Star gold (#ffd23f)</div>
pub const STAR_GOLD: Color = Color::new(1.0, 0.8235294, 0.2470588, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 224, 102);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Star glow (#ffe066)</div>
///
/// Used for the emissive tint of the star and its point light.
pub const STAR_GLOW: Color = Color::new(1.0, 0.8784314, 0.4, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(212, 175, 55);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Cap gold (#d4af37)</div>
///
/// Used for the metallic caps on top of the ornaments.
pub const CAP_GOLD: Color = Color::new(0.8313725, 0.6862745, 0.2156863, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(238, 242, 246);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Snow white (#eef2f6)</div>
///
/// Used for the snow field under the tree.
pub const SNOW_WHITE: Color = Color::new(0.9333333, 0.9490196, 0.9647059, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(167, 188, 204);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Horizon blue (#a7bccc)</div>
///
/// Used for the ground tint of the hemisphere light.
pub const HORIZON_BLUE: Color = Color::new(0.654902, 0.7372549, 0.8, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 77, 79);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Ornament red (#ff4d4f)</div>
pub const ORNAMENT_RED: Color = Color::new(1.0, 0.3019608, 0.3098039, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(77, 163, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Ornament blue (#4da3ff)</div>
pub const ORNAMENT_BLUE: Color = Color::new(0.3019608, 0.6392157, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(48, 196, 99);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Ornament green (#30c463)</div>
pub const ORNAMENT_GREEN: Color = Color::new(0.1882353, 0.7686275, 0.3882353, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 128, 181);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Ornament pink (#ff80b5)</div>
pub const ORNAMENT_PINK: Color = Color::new(1.0, 0.5019608, 0.7098039, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(155, 108, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Ornament violet (#9b6cff)</div>
pub const ORNAMENT_VIOLET: Color = Color::new(0.6078431, 0.4235294, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 156, 51);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Ornament orange (#ff9c33)</div>
pub const ORNAMENT_ORANGE: Color = Color::new(1.0, 0.6117647, 0.2, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(230, 57, 70);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Gift red (#e63946)</div>
pub const GIFT_RED: Color = Color::new(0.9019608, 0.2235294, 0.2745098, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(69, 123, 157);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Gift blue (#457b9d)</div>
pub const GIFT_BLUE: Color = Color::new(0.2705882, 0.4823529, 0.6156863, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(244, 162, 97);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Gift sand (#f4a261)</div>
pub const GIFT_SAND: Color = Color::new(0.9568627, 0.6352941, 0.3803922, 1.0);

/// The six ornament colors, cycled by ornament and garland bulb index.
pub const ORNAMENT_PALETTE: [Color; 6] = [
    ORNAMENT_RED,
    ORNAMENT_BLUE,
    ORNAMENT_GREEN,
    ORNAMENT_PINK,
    ORNAMENT_VIOLET,
    ORNAMENT_ORANGE,
];

/// Wrapping colors of the three gift boxes.
pub const GIFT_PALETTE: [Color; 3] = [GIFT_RED, GIFT_BLUE, GIFT_SAND];

/// Confetti colors: the ornament palette plus the star gold.
pub const CONFETTI_PALETTE: [Color; 7] = [
    ORNAMENT_RED,
    ORNAMENT_BLUE,
    ORNAMENT_GREEN,
    ORNAMENT_PINK,
    ORNAMENT_VIOLET,
    ORNAMENT_ORANGE,
    STAR_GOLD,
];

/// Converts a packed `0xRRGGBB` integer into an opaque [`Color`].
///
/// # Example
/// ```
/// # use yule3d::color::{self, from_hex};
/// assert_eq!(from_hex(0xffffff), color::WHITE);
/// ```
pub fn from_hex(hex: u32) -> Color {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Color::new(channel(16), channel(8), channel(0), 1.0)
}

/// Returns `color` with its RGB channels multiplied by `factor`. Alpha is kept.
pub fn scaled(color: Color, factor: f32) -> Color {
    Color::new(color.r * factor, color.g * factor, color.b * factor, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_matches_palette_constants() {
        let pairs = [
            (0x2f9e44, TREE_GREEN),
            (0xffd23f, STAR_GOLD),
            (0xff4d4f, ORNAMENT_RED),
            (0x457b9d, GIFT_BLUE),
        ];

        for (hex, expected) in pairs {
            let c = from_hex(hex);
            assert!((c.r - expected.r).abs() < 1.0e-6);
            assert!((c.g - expected.g).abs() < 1.0e-6);
            assert!((c.b - expected.b).abs() < 1.0e-6);
            assert_eq!(c.a, 1.0);
        }
    }

    #[test]
    fn test_scaled_keeps_alpha() {
        let c = scaled(Color::new(0.5, 0.25, 1.0, 0.3), 2.0);
        assert_eq!(c, Color::new(1.0, 0.5, 2.0, 0.3));
    }
}
