//! Stroke and background colors.
//!
//! Strokes are picked in the HLS model at fixed lightness and saturation with
//! a random integer hue, then quantized to 8-bit RGB by truncation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FlowError;
use crate::prng::Xorshift64;

/// Lightness of every stroke color.
pub const STROKE_LIGHTNESS: f64 = 0.6;
/// Saturation of every stroke color.
pub const STROKE_SATURATION: f64 = 0.7;

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// sRGB color with components in [0, 1].
///
/// Serializes as a `"#rrggbb"` hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Color from channels in [0, 1].
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    ///
    /// Returns `FlowError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Srgb, FlowError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(FlowError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|e| FlowError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// `"#rrggbb"`, rounded to the nearest 8-bit value.
    pub fn to_hex(self) -> String {
        let [r, g, b] =
            [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// 8-bit channels, truncated toward zero.
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8)
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Converts hue, lightness, saturation (all in [0, 1]) to sRGB.
///
/// The hue wraps, so 1.0 is the same as 0.0.
pub fn hls_to_srgb(h: f64, l: f64, s: f64) -> Srgb {
    if s == 0.0 {
        return Srgb::new(l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Srgb::new(
        hue_channel(m1, m2, h + ONE_THIRD),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - ONE_THIRD),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

/// Picks a stroke color: integer hue in [0, 360] degrees at fixed
/// lightness and saturation.
pub fn stroke_color(rng: &mut Xorshift64) -> [u8; 3] {
    let hue = rng.next_int_inclusive(0, 360);
    hls_to_srgb(f64::from(hue) / 360.0, STROKE_LIGHTNESS, STROKE_SATURATION).to_rgb8()
}
