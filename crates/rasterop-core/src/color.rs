//! The RGBA color type and boundary color specifications.
//!
//! Alpha follows the standard convention throughout the crate: 0 is fully
//! transparent and 255 is fully opaque. Legacy GD-style sources use an
//! inverted 7-bit alpha channel (0 = opaque, 127 = transparent); that scale
//! is converted once, at the ingestion boundary, via [`Color::from_gd_alpha`].

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0 = fully transparent, 255 = fully opaque.
    pub a: u8,
}

impl Color {
    /// Fully transparent. RGB is black: the don't-care fill used for
    /// transparent pixels.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a packed `0xRRGGBB` integer into an opaque color.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidColorSpec` for values above
    /// `0xFF_FFFF`.
    pub fn from_packed_rgb(value: u32) -> Result<Self, TransformError> {
        if value > 0xFF_FFFF {
            return Err(TransformError::InvalidColorSpec(value));
        }
        Ok(Self::rgb(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ))
    }

    /// Convert from GD's inverted 7-bit alpha scale.
    ///
    /// GD stores alpha as 0 = opaque .. 127 = fully transparent. The mapping
    /// to the standard scale is `a = (127 - a7) * 255 / 127`, rounded;
    /// values above 127 are treated as 127.
    pub fn from_gd_alpha(r: u8, g: u8, b: u8, alpha7: u8) -> Self {
        let a7 = u32::from(alpha7.min(127));
        let a = (((127 - a7) * 255) + 63) / 127;
        Self::rgba(r, g, b, a as u8)
    }

    /// True if the color contributes nothing when composited.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    pub(crate) fn to_channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub(crate) fn from_channels(ch: [u8; 4]) -> Self {
        Self::rgba(ch[0], ch[1], ch[2], ch[3])
    }
}

/// A color specification as accepted at the API boundary.
///
/// Background and fill parameters take either a packed RGB integer or an
/// explicit request for a transparent, alpha-preserving fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpec {
    /// Packed `0xRRGGBB` integer, fully opaque.
    Rgb(u32),
    /// Fully transparent fill that preserves per-pixel alpha.
    Transparent,
}

impl Default for ColorSpec {
    /// White, the historical default background.
    fn default() -> Self {
        ColorSpec::Rgb(0xFF_FFFF)
    }
}

impl ColorSpec {
    /// Resolve the specification into a concrete color.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidColorSpec` for packed values outside
    /// the 24-bit range.
    pub fn resolve(self) -> Result<Color, TransformError> {
        match self {
            ColorSpec::Rgb(value) => Color::from_packed_rgb(value),
            ColorSpec::Transparent => Ok(Color::TRANSPARENT),
        }
    }

    pub fn is_transparent(self) -> bool {
        matches!(self, ColorSpec::Transparent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_rgb_parsing() {
        let c = Color::from_packed_rgb(0xFF8040).unwrap();
        assert_eq!(c, Color::rgb(0xFF, 0x80, 0x40));
        assert_eq!(c.a, 255);

        assert_eq!(Color::from_packed_rgb(0).unwrap(), Color::BLACK);
        assert_eq!(Color::from_packed_rgb(0xFF_FFFF).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_packed_rgb_out_of_range() {
        let err = Color::from_packed_rgb(0x100_0000).unwrap_err();
        assert!(matches!(
            err,
            TransformError::InvalidColorSpec(0x100_0000)
        ));
    }

    #[test]
    fn test_spec_resolution() {
        assert_eq!(
            ColorSpec::Rgb(0x112233).resolve().unwrap(),
            Color::rgb(0x11, 0x22, 0x33)
        );
        assert_eq!(
            ColorSpec::Transparent.resolve().unwrap(),
            Color::TRANSPARENT
        );
        assert!(ColorSpec::Rgb(u32::MAX).resolve().is_err());
    }

    #[test]
    fn test_default_background_is_white() {
        assert_eq!(ColorSpec::default().resolve().unwrap(), Color::WHITE);
    }

    #[test]
    fn test_gd_alpha_endpoints() {
        // GD 0 = opaque, 127 = fully transparent.
        assert_eq!(Color::from_gd_alpha(10, 20, 30, 0).a, 255);
        assert_eq!(Color::from_gd_alpha(10, 20, 30, 127).a, 0);
        // Out-of-range 7-bit values clamp to fully transparent.
        assert_eq!(Color::from_gd_alpha(10, 20, 30, 200).a, 0);
    }

    #[test]
    fn test_gd_alpha_monotonic() {
        let mut prev = 255u8;
        for a7 in 0..=127u8 {
            let a = Color::from_gd_alpha(0, 0, 0, a7).a;
            assert!(a <= prev, "alpha must decrease as GD alpha increases");
            prev = a;
        }
    }

    #[test]
    fn test_transparency_check() {
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(!Color::WHITE.is_transparent());
        assert!(ColorSpec::Transparent.is_transparent());
        assert!(!ColorSpec::Rgb(0).is_transparent());
    }
}
