//! Color derivation and parsing.
//!
//! Generated colors are CSS `hsl()` strings whose components follow the
//! ECMAScript number formatting rules, so a seed yields byte-identical color
//! strings to the JavaScript blockies library. Parsing back to RGBA is only
//! needed by raster surfaces.

use crate::error::{Error, Result};
use crate::random::SeededRandom;

/// Draw a color from `rng`.
///
/// Consumes six draws in a fixed order: hue, saturation, then four draws
/// summed for lightness. None of the components are clamped; lightness can
/// exceed 100%.
pub fn create_color(rng: &mut SeededRandom) -> String {
    let hue = (rng.next() * 360.0).floor();
    let saturation = rng.next() * 60.0 + 40.0;
    let lightness = (rng.next() + rng.next() + rng.next() + rng.next()) * 25.0;

    format!(
        "hsl({},{}%,{}%)",
        format_number(hue),
        format_number(saturation),
        format_number(lightness)
    )
}

/// Whether `color` is a `#rgb` or `#rrggbb` hex color.
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Format a number the way ECMAScript's `Number#toString` does.
///
/// Shortest round-trip digits, plain notation for magnitudes in
/// `[1e-6, 1e21)`, exponent notation with an explicit sign otherwise.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a `#rgb`, `#rrggbb` or `hsl(h,s%,l%)` color.
    pub fn parse(color: &str) -> Result<Self> {
        let color = color.trim();
        if is_hex_color(color) {
            return Ok(parse_hex(&color[1..]));
        }
        if let Some(body) = color
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_hsl(body).ok_or_else(|| Error::ColorError(color.to_string()));
        }
        Err(Error::ColorError(color.to_string()))
    }

    /// Convert HSL to RGB following CSS Color 4.
    ///
    /// Saturation and lightness are percentages clamped to `[0, 100]`; hue is
    /// taken modulo 360.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let h = hue.rem_euclid(360.0);
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        let channel = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            let a = s * l.min(1.0 - l);
            let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };

        Self::rgb(channel(0.0), channel(8.0), channel(4.0))
    }
}

fn parse_hex(digits: &str) -> Rgba {
    let nibble = |b: u8| (b as char).to_digit(16).unwrap_or(0) as u8;
    let bytes = digits.as_bytes();
    if bytes.len() == 3 {
        Rgba::rgb(nibble(bytes[0]) * 17, nibble(bytes[1]) * 17, nibble(bytes[2]) * 17)
    } else {
        let pair = |i: usize| (nibble(bytes[i]) << 4) | nibble(bytes[i + 1]);
        Rgba::rgb(pair(0), pair(2), pair(4))
    }
}

fn parse_hsl(body: &str) -> Option<Rgba> {
    let mut parts = body.split(',').map(str::trim);
    let hue: f64 = parts.next()?.trim_end_matches("deg").parse().ok()?;
    let saturation: f64 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    let lightness: f64 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgba::from_hsl(hue, saturation, lightness))
}
