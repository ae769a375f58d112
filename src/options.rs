//! Option sanitizing and resolution.
//!
//! Caller options arrive as [`RawOptions`], either built field by field or
//! converted from untrusted JSON. Only well-typed fields survive; everything
//! else is dropped without an error and later replaced by a default.
//! [`resolve`] turns raw options into immutable [`Options`], seeding the
//! PRNG and deriving any missing colors from it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::{create_color, is_hex_color};
use crate::error::Result;
use crate::random::SeededRandom;

/// Grid side length used when none is supplied
pub const DEFAULT_SIZE: u32 = 8;
/// Pixels per grid cell used when none is supplied
pub const DEFAULT_SCALE: u32 = 4;
/// Largest accepted grid side length; larger values fall back to [`DEFAULT_SIZE`]
pub const MAX_SIZE: u32 = 1024;
/// Largest accepted image side (`size * scale`); a scale that exceeds it falls
/// back to [`DEFAULT_SCALE`]
pub const MAX_DIMENSION: u32 = 32_767;

/// Exclusive upper bound of generated seeds (`10^16`).
const SEED_RANGE: u64 = 10_000_000_000_000_000;

/// Caller-supplied options before validation.
///
/// Every field is optional. Invalid values are tolerated here and discarded
/// by [`resolve`].
///
/// # Examples
///
/// ```
/// use blockies::RawOptions;
///
/// let raw = RawOptions::new().seed("alice").size(10).color("#abc");
/// assert_eq!(raw.size, Some(10));
///
/// let json: RawOptions = serde_json::from_str(r##"{"seed": 7, "color": "#123456"}"##).unwrap();
/// assert_eq!(json.seed, None);
/// assert_eq!(json.color.as_deref(), Some("#123456"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct RawOptions {
    pub seed: Option<String>,
    pub size: Option<u32>,
    pub scale: Option<u32>,
    pub color: Option<String>,
    pub bgcolor: Option<String>,
    pub spotcolor: Option<String>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn bgcolor(mut self, color: impl Into<String>) -> Self {
        self.bgcolor = Some(color.into());
        self
    }

    pub fn spotcolor(mut self, color: impl Into<String>) -> Self {
        self.spotcolor = Some(color.into());
        self
    }

    /// Parse options from JSON text.
    ///
    /// Fails only when the text is not JSON. Mistyped fields are dropped.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    /// Overlay the fields that are set in `other` on top of `self`.
    pub fn merge(mut self, other: RawOptions) -> Self {
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if other.size.is_some() {
            self.size = other.size;
        }
        if other.scale.is_some() {
            self.scale = other.scale;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.bgcolor.is_some() {
            self.bgcolor = other.bgcolor;
        }
        if other.spotcolor.is_some() {
            self.spotcolor = other.spotcolor;
        }
        self
    }
}

impl From<Value> for RawOptions {
    /// Build options from an arbitrary JSON value, keeping only the
    /// allow-listed fields with the expected types. Non-object values yield
    /// empty options.
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            log::debug!("options are not a JSON object; using defaults");
            return Self::default();
        };

        let string_field = |name: &str| match map.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                log::debug!("discarding option `{}`: expected a string, got {}", name, other);
                None
            }
            None => None,
        };
        let number_field = |name: &str| match map.get(name) {
            Some(Value::Number(n)) => n.as_f64().and_then(dimension_from_number),
            Some(other) => {
                log::debug!("discarding option `{}`: expected a number, got {}", name, other);
                None
            }
            None => None,
        };

        Self {
            seed: string_field("seed"),
            size: number_field("size"),
            scale: number_field("scale"),
            color: string_field("color").filter(|c| is_hex_color(c)),
            bgcolor: string_field("bgcolor").filter(|c| is_hex_color(c)),
            spotcolor: string_field("spotcolor").filter(|c| is_hex_color(c)),
        }
    }
}

/// Accept finite, positive, integral numbers that fit in a `u32`.
fn dimension_from_number(n: f64) -> Option<u32> {
    if n.is_finite() && n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        log::debug!("discarding dimension {}: not a positive integer", n);
        None
    }
}

/// Fully resolved, immutable icon options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub seed: String,
    pub size: u32,
    pub scale: u32,
    pub color: String,
    pub bgcolor: String,
    pub spotcolor: String,
}

impl Options {
    /// Side length of the rendered image in pixels (`size * scale`).
    pub fn dimension(&self) -> u64 {
        u64::from(self.size) * u64::from(self.scale)
    }
}

/// Resolve `raw` into [`Options`], seeding `rng` along the way.
///
/// The seed is resolved and fed to `rng` first. Missing colors are then
/// generated in the order color, bgcolor, spotcolor, each consuming draws
/// from `rng`.
///
/// A `size` above [`MAX_SIZE`] falls back to [`DEFAULT_SIZE`], and a `scale`
/// that would push `size * scale` past [`MAX_DIMENSION`] falls back to
/// [`DEFAULT_SCALE`].
pub fn resolve(raw: &RawOptions, rng: &mut SeededRandom) -> Options {
    let seed = match raw.seed.as_deref() {
        Some(seed) if !seed.is_empty() => seed.to_string(),
        _ => {
            let seed = random_seed();
            log::debug!("no seed supplied; generated {}", seed);
            seed
        }
    };
    rng.seed(&seed);

    let size = raw
        .size
        .filter(|&n| (1..=MAX_SIZE).contains(&n))
        .unwrap_or(DEFAULT_SIZE);
    let scale = raw
        .scale
        .filter(|&n| n > 0 && u64::from(n) * u64::from(size) <= u64::from(MAX_DIMENSION))
        .unwrap_or(DEFAULT_SCALE);
    if raw.size.is_some_and(|n| n != size) || raw.scale.is_some_and(|n| n != scale) {
        log::debug!("size/scale out of range; using {}x{}", size, scale);
    }

    let mut pick_color = |name: &str, supplied: Option<&str>| match supplied {
        Some(c) if is_hex_color(c) => c.to_string(),
        other => {
            if let Some(bad) = other {
                log::debug!("discarding option `{}`: {:?} is not a hex color", name, bad);
            }
            create_color(rng)
        }
    };
    let color = pick_color("color", raw.color.as_deref());
    let bgcolor = pick_color("bgcolor", raw.bgcolor.as_deref());
    let spotcolor = pick_color("spotcolor", raw.spotcolor.as_deref());

    Options {
        seed,
        size,
        scale,
        color,
        bgcolor,
        spotcolor,
    }
}

/// Generate a seed from OS randomness: a number below `10^16` in lowercase hex.
pub fn random_seed() -> String {
    let mut bytes = [0u8; 8];
    let value = match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(e) => {
            log::warn!("OS random source unavailable ({}); seeding from the clock", e);
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        }
    };
    format!("{:x}", value % SEED_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_golden_colors_for_test_seed() {
        let mut rng = SeededRandom::default();
        let opts = resolve(&RawOptions::new().seed("test"), &mut rng);
        assert_eq!(opts.seed, "test");
        assert_eq!(opts.size, 8);
        assert_eq!(opts.scale, 4);
        assert_eq!(opts.color, "hsl(0,40.00097936950624%,10.601410700473934%)");
        assert_eq!(opts.bgcolor, "hsl(4,41.99348018504679%,7.898475171532482%)");
        assert_eq!(opts.spotcolor, "hsl(197,83.21944060735404%,39.76214297581464%)");
    }

    #[test]
    fn supplied_colors_skip_generation_but_keep_order() {
        let raw = RawOptions::new()
            .seed("test")
            .color("#abc")
            .bgcolor("#ZZZ")
            .spotcolor("#aabbcc");
        let opts = resolve(&raw, &mut SeededRandom::default());
        assert_eq!(opts.color, "#abc");
        // bgcolor is generated first from the fresh stream
        assert_eq!(opts.bgcolor, "hsl(0,40.00097936950624%,10.601410700473934%)");
        assert_eq!(opts.spotcolor, "#aabbcc");
    }

    #[test]
    fn empty_options_get_defaults_and_a_random_seed() {
        let opts = resolve(&RawOptions::default(), &mut SeededRandom::default());
        assert!(!opts.seed.is_empty());
        assert!(opts.seed.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(opts.size, DEFAULT_SIZE);
        assert_eq!(opts.scale, DEFAULT_SCALE);
        for color in [&opts.color, &opts.bgcolor, &opts.spotcolor] {
            assert!(color.starts_with("hsl(") && color.ends_with("%)"), "{}", color);
        }
    }

    #[test]
    fn empty_seed_is_replaced() {
        let opts = resolve(&RawOptions::new().seed(""), &mut SeededRandom::default());
        assert!(!opts.seed.is_empty());
    }

    #[test]
    fn zero_dimensions_fall_back_to_defaults() {
        let raw = RawOptions::new().seed("z").size(0).scale(0);
        let opts = resolve(&raw, &mut SeededRandom::default());
        assert_eq!(opts.size, DEFAULT_SIZE);
        assert_eq!(opts.scale, DEFAULT_SCALE);
    }

    #[test]
    fn oversized_dimensions_fall_back_to_defaults() {
        let mut rng = SeededRandom::default();
        let opts = resolve(&RawOptions::new().seed("big").size(u32::MAX), &mut rng);
        assert_eq!(opts.size, DEFAULT_SIZE);

        let opts = resolve(&RawOptions::new().seed("big").size(MAX_SIZE + 1).scale(2), &mut rng);
        assert_eq!((opts.size, opts.scale), (DEFAULT_SIZE, 2));

        let opts = resolve(&RawOptions::new().seed("big").size(100).scale(400), &mut rng);
        assert_eq!((opts.size, opts.scale), (100, DEFAULT_SCALE));

        let opts = resolve(&RawOptions::new().seed("big").size(1).scale(u32::MAX), &mut rng);
        assert_eq!(opts.scale, DEFAULT_SCALE);
    }

    #[test]
    fn dimensions_at_the_limit_are_kept() {
        let mut rng = SeededRandom::default();
        let opts = resolve(&RawOptions::new().seed("edge").size(MAX_SIZE).scale(31), &mut rng);
        assert_eq!((opts.size, opts.scale), (MAX_SIZE, 31));
        assert!(opts.dimension() <= u64::from(MAX_DIMENSION));

        let opts = resolve(&RawOptions::new().seed("edge").size(1).scale(MAX_DIMENSION), &mut rng);
        assert_eq!(opts.scale, MAX_DIMENSION);
    }

    #[test]
    fn resolve_seeds_the_generator() {
        let mut rng = SeededRandom::new("stale state");
        let opts = resolve(
            &RawOptions::new()
                .seed("fresh")
                .color("#000")
                .bgcolor("#111")
                .spotcolor("#222"),
            &mut rng,
        );
        assert_eq!(opts.seed, "fresh");
        assert_eq!(rng, SeededRandom::new("fresh"));
    }

    #[test]
    fn json_fields_are_type_checked() {
        let raw = RawOptions::from(json!({
            "seed": 42,
            "size": "8",
            "scale": 3,
            "color": "#ZZZ",
            "bgcolor": "#abc",
            "spotcolor": ["#abc"],
            "__proto__": {"size": 99},
            "extra": true
        }));
        assert_eq!(
            raw,
            RawOptions {
                seed: None,
                size: None,
                scale: Some(3),
                color: None,
                bgcolor: Some("#abc".to_string()),
                spotcolor: None,
            }
        );
    }

    #[test]
    fn json_dimensions_must_be_positive_integers() {
        for bad in [json!(0), json!(-4), json!(2.5), json!(1e12)] {
            let raw = RawOptions::from(json!({ "size": bad }));
            assert_eq!(raw.size, None);
        }
        assert_eq!(RawOptions::from(json!({ "size": 12.0 })).size, Some(12));
    }

    #[test]
    fn non_object_json_yields_empty_options() {
        assert_eq!(RawOptions::from(json!(null)), RawOptions::default());
        assert_eq!(RawOptions::from(json!("seed")), RawOptions::default());
        assert_eq!(RawOptions::from(json!([1, 2])), RawOptions::default());
    }

    #[test]
    fn from_json_str_rejects_malformed_text_only() {
        assert!(RawOptions::from_json_str("{not json").is_err());
        let raw = RawOptions::from_json_str(r#"{"seed": "abc", "size": 5}"#).unwrap();
        assert_eq!(raw.seed.as_deref(), Some("abc"));
        assert_eq!(raw.size, Some(5));
    }

    #[test]
    fn deserialize_goes_through_the_allow_list() {
        let raw: RawOptions = serde_json::from_str(r#"{"seed": "s", "color": "red"}"#).unwrap();
        assert_eq!(raw.seed.as_deref(), Some("s"));
        assert_eq!(raw.color, None);
    }

    #[test]
    fn merge_prefers_fields_from_the_overlay() {
        let base = RawOptions::new().seed("base").size(5).color("#fff");
        let merged = base.merge(RawOptions::new().seed("top").scale(2));
        assert_eq!(merged.seed.as_deref(), Some("top"));
        assert_eq!(merged.size, Some(5));
        assert_eq!(merged.scale, Some(2));
        assert_eq!(merged.color.as_deref(), Some("#fff"));
    }

    #[test]
    fn random_seeds_are_short_hex() {
        let seed = random_seed();
        assert!(!seed.is_empty() && seed.len() <= 14);
        assert!(u64::from_str_radix(&seed, 16).unwrap() < SEED_RANGE);
    }

    #[test]
    fn dimension_is_size_times_scale() {
        let raw = RawOptions::new().seed("d").size(7).scale(3);
        let opts = resolve(&raw, &mut SeededRandom::default());
        assert_eq!(opts.dimension(), 21);
    }
}
