use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty colour value")]
    Empty,
    #[error("expected 6 hex digits, got {0} characters")]
    InvalidLength(usize),
    #[error("invalid hex digits in {0:?}")]
    InvalidDigit(String),
}

/// An 8-bit-per-channel sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RgbColor {
    r: u8,
    g: u8,
    b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `RRGGBB` or `#RRGGBB`, case-insensitive. Surrounding whitespace is ignored.
    pub fn from_hex(hex: &str) -> Result<Self, ParseError> {
        let s = hex.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        let len = s.chars().count();
        if len != 6 {
            return Err(ParseError::InvalidLength(len));
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidDigit(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ParseError::InvalidDigit(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub const fn r(self) -> u8 {
        self.r
    }

    pub const fn g(self) -> u8 {
        self.g
    }

    pub const fn b(self) -> u8 {
        self.b
    }

    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Rec.601 luma in 0..=1.
    #[inline]
    pub fn luma(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    /// Whether a label drawn over this colour should be dark to stay readable.
    pub fn prefers_dark_text(self) -> bool {
        self.luma() > 0.6
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl FromStr for RgbColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// CIE L*a*b* (D65). Only produced by [`rgb_to_lab`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabColor {
    l: f64,
    a: f64,
    b: f64,
}

impl LabColor {
    pub(crate) const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    pub const fn l(&self) -> f64 {
        self.l
    }

    pub const fn a(&self) -> f64 {
        self.a
    }

    pub const fn b(&self) -> f64 {
        self.b
    }
}

/// Normalizes a user-supplied hex string to `#RRGGBB`, or `None` if it is not one.
pub fn sanitize_hex(value: &str) -> Option<String> {
    RgbColor::from_hex(value).ok().map(RgbColor::to_hex)
}

// D65 white
const REF_X: f64 = 0.95047;
const REF_Y: f64 = 1.0;
const REF_Z: f64 = 1.08883;

#[inline]
fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
pub fn rgb_to_lab(rgb: RgbColor) -> LabColor {
    let r = srgb_to_linear(rgb.r);
    let g = srgb_to_linear(rgb.g);
    let b = srgb_to_linear(rgb.b);

    let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
    let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
    let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

    let fx = lab_f(x / REF_X);
    let fy = lab_f(y / REF_Y);
    let fz = lab_f(z / REF_Z);

    LabColor::new(
        (116.0 * fy - 16.0).max(0.0),
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    )
}

pub fn hex_to_lab(hex: &str) -> Result<LabColor, ParseError> {
    RgbColor::from_hex(hex).map(rgb_to_lab)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(RgbColor::from_hex("#FF6600"), Ok(RgbColor::new(255, 102, 0)));
        assert_eq!(RgbColor::from_hex("ff6600"), Ok(RgbColor::new(255, 102, 0)));
        assert_eq!(RgbColor::from_hex("  #aBcDeF "), Ok(RgbColor::new(0xab, 0xcd, 0xef)));
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(RgbColor::from_hex(""), Err(ParseError::Empty));
        assert_eq!(RgbColor::from_hex("#"), Err(ParseError::Empty));
        assert_eq!(RgbColor::from_hex("#FFF"), Err(ParseError::InvalidLength(3)));
        assert_eq!(RgbColor::from_hex("not-a-color"), Err(ParseError::InvalidLength(11)));
        assert_eq!(
            RgbColor::from_hex("#GG0000"),
            Err(ParseError::InvalidDigit("GG0000".to_string()))
        );
        assert!(RgbColor::from_hex("##FF0000").is_err());
        assert!(RgbColor::from_hex("+F0000").is_err());
        // six bytes but not six chars
        assert!(RgbColor::from_hex("é1234").is_err());
    }

    #[test]
    fn hex_round_trips_uppercase() {
        let c: RgbColor = "#0a0b0c".parse().unwrap();
        assert_eq!(c.to_hex(), "#0A0B0C");
        assert_eq!(c.to_string(), "#0A0B0C");
        assert_eq!(sanitize_hex(" ff6600"), Some("#FF6600".to_string()));
        assert_eq!(sanitize_hex("ff660"), None);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let c = RgbColor::new(1, 2, 255);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#0102FF\"");
        let back: RgbColor = serde_json::from_str("\"0102ff\"").unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<RgbColor>("\"nope\"").is_err());
    }

    #[test]
    fn lab_reference_points() {
        let white = rgb_to_lab(RgbColor::new(255, 255, 255));
        assert!((white.l() - 100.0).abs() < 1e-4);
        assert!(white.a().abs() < 1e-3);
        assert!(white.b().abs() < 1e-3);

        let black = rgb_to_lab(RgbColor::new(0, 0, 0));
        assert_eq!(black.l(), 0.0);
        assert_eq!(black.a(), 0.0);
        assert_eq!(black.b(), 0.0);

        let red = rgb_to_lab(RgbColor::new(255, 0, 0));
        assert!((red.l() - 53.2408).abs() < 1e-3);
        assert!((red.a() - 80.0925).abs() < 1e-3);
        assert!((red.b() - 67.2032).abs() < 1e-3);

        let orange = hex_to_lab("#FF6600").unwrap();
        assert!((orange.l() - 62.3125).abs() < 1e-3);
        assert!((orange.a() - 55.0002).abs() < 1e-3);
        assert!((orange.b() - 71.3267).abs() < 1e-3);
    }

    #[test]
    fn conversion_is_bit_identical_across_calls() {
        let q = RgbColor::new(255, 102, 0);
        let first = rgb_to_lab(q);
        for _ in 0..16 {
            let again = rgb_to_lab(q);
            assert_eq!(first.l().to_bits(), again.l().to_bits());
            assert_eq!(first.a().to_bits(), again.a().to_bits());
            assert_eq!(first.b().to_bits(), again.b().to_bits());
        }
    }

    #[test]
    fn lightness_never_negative() {
        for v in 0..=255u8 {
            assert!(rgb_to_lab(RgbColor::new(v, 0, v)).l() >= 0.0);
            assert!(rgb_to_lab(RgbColor::new(0, v, 0)).l() >= 0.0);
        }
    }

    #[test]
    fn luma_picks_label_contrast() {
        assert!(RgbColor::new(255, 255, 255).prefers_dark_text());
        assert!(!RgbColor::new(4, 17, 31).prefers_dark_text());
        assert!((RgbColor::new(255, 255, 255).luma() - 1.0).abs() < 1e-12);
    }
}
