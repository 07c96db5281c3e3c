//! Dimension-string and scale-factor parsing.
//!
//! Manifest entries describe a rendition as a logical size string like
//! `"32x32"` plus a scale string like `"2x"`. This module turns those two
//! strings into concrete pixel targets. Fractional logical sizes (iPad
//! notification icons use `"83.5x83.5"`) and fractional scales are both
//! accepted; the projection to whole pixels happens exactly once, in
//! [`TargetDimensions::pixel_width`] / [`TargetDimensions::pixel_height`],
//! and rounds half-up.

use crate::error::{Error, Result};

/// Positive multiplier applied to a logical size to obtain physical pixels.
///
/// Parsed from the manifest's scale string: the numeric prefix of an
/// optional trailing `x` suffix. `"2x"` parses to 2.0, `"1.5x"` to 1.5,
/// and a bare `"3"` to 3.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// The 1x scale.
    pub const IDENTITY: Self = Self(1.0);

    /// Validates a raw multiplier. Must be finite and greater than zero.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::DimensionParse {
                input: value.to_string(),
                reason: "scale must be a positive finite number",
            });
        }
        Ok(Self(value))
    }

    /// Parses a manifest scale string such as `"2x"`, `"1.5x"`, or `"3"`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let numeric = trimmed.strip_suffix('x').unwrap_or(trimmed);
        let value: f64 = numeric.parse().map_err(|_| Error::DimensionParse {
            input: input.to_string(),
            reason: "scale is not numeric",
        })?;
        Self::new(value).map_err(|_| Error::DimensionParse {
            input: input.to_string(),
            reason: "scale must be a positive finite number",
        })
    }

    /// The raw multiplier.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Target width and height derived from a size string and scale factor.
///
/// Both components are guaranteed positive and finite; construction fails
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDimensions {
    width: f64,
    height: f64,
}

impl TargetDimensions {
    /// Builds a target from already-scaled components.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(Error::DimensionParse {
                input: format!("{width}x{height}"),
                reason: "dimensions must be positive finite numbers",
            });
        }
        Ok(Self { width, height })
    }

    /// Parses a `"WxH"` size string and applies `scale` to both axes.
    ///
    /// The string must contain exactly one `x` separator with a positive
    /// number on each side; anything else fails with a `DimensionParse`
    /// error that the batch generator records against the entry rather
    /// than letting it abort the run.
    pub fn from_size_string(size: &str, scale: ScaleFactor) -> Result<Self> {
        let (width, height) = split_wxh(size)?;
        Self::new(width * scale.value(), height * scale.value())
    }

    /// Scaled width before pixel rounding.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Scaled height before pixel rounding.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Width projected to whole pixels, rounding half-up (19.5 → 20).
    pub fn pixel_width(&self) -> u32 {
        round_half_up(self.width)
    }

    /// Height projected to whole pixels, rounding half-up.
    pub fn pixel_height(&self) -> u32 {
        round_half_up(self.height)
    }
}

/// Splits `"WxH"` on the literal `x` and parses both halves.
fn split_wxh(input: &str) -> Result<(f64, f64)> {
    let mut halves = input.split('x');
    let (Some(first), Some(second), None) = (halves.next(), halves.next(), halves.next()) else {
        return Err(Error::DimensionParse {
            input: input.to_string(),
            reason: "expected exactly one 'x' separator",
        });
    };

    let parse_half = |half: &str| -> Result<f64> {
        let value: f64 = half.trim().parse().map_err(|_| Error::DimensionParse {
            input: input.to_string(),
            reason: "dimension is not numeric",
        })?;
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::DimensionParse {
                input: input.to_string(),
                reason: "dimensions must be positive finite numbers",
            });
        }
        Ok(value)
    };

    Ok((parse_half(first)?, parse_half(second)?))
}

// f64::round rounds half away from zero, which for the positive values
// allowed here is exactly round-half-up.
fn round_half_up(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_with_scale() {
        let target =
            TargetDimensions::from_size_string("32x32", ScaleFactor::parse("2x").unwrap()).unwrap();
        assert_eq!(target.pixel_width(), 64);
        assert_eq!(target.pixel_height(), 64);
    }

    #[test]
    fn test_parse_size_identity_scale() {
        let target =
            TargetDimensions::from_size_string("20x20", ScaleFactor::IDENTITY).unwrap();
        assert_eq!(target.pixel_width(), 20);
        assert_eq!(target.pixel_height(), 20);
    }

    #[test]
    fn test_fractional_size() {
        let target =
            TargetDimensions::from_size_string("83.5x83.5", ScaleFactor::parse("2x").unwrap())
                .unwrap();
        assert_eq!(target.pixel_width(), 167);
        assert_eq!(target.pixel_height(), 167);
    }

    #[test]
    fn test_rounding_half_up() {
        let target = TargetDimensions::new(19.5, 19.4).unwrap();
        assert_eq!(target.pixel_width(), 20);
        assert_eq!(target.pixel_height(), 19);
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert!(TargetDimensions::from_size_string("16y16", ScaleFactor::IDENTITY).is_err());
        assert!(TargetDimensions::from_size_string("32y32", ScaleFactor::IDENTITY).is_err());
        assert!(TargetDimensions::from_size_string("bad", ScaleFactor::IDENTITY).is_err());
    }

    #[test]
    fn test_extra_separator_rejected() {
        assert!(TargetDimensions::from_size_string("32x32x2", ScaleFactor::IDENTITY).is_err());
    }

    #[test]
    fn test_empty_half_rejected() {
        assert!(TargetDimensions::from_size_string("x32", ScaleFactor::IDENTITY).is_err());
        assert!(TargetDimensions::from_size_string("32x", ScaleFactor::IDENTITY).is_err());
    }

    #[test]
    fn test_nonpositive_dimensions_rejected() {
        assert!(TargetDimensions::from_size_string("0x32", ScaleFactor::IDENTITY).is_err());
        assert!(TargetDimensions::from_size_string("-20x20", ScaleFactor::IDENTITY).is_err());
    }

    #[test]
    fn test_scale_strings() {
        assert_eq!(ScaleFactor::parse("2x").unwrap().value(), 2.0);
        assert_eq!(ScaleFactor::parse("1.5x").unwrap().value(), 1.5);
        assert_eq!(ScaleFactor::parse("3").unwrap().value(), 3.0);
    }

    #[test]
    fn test_bad_scale_strings() {
        assert!(ScaleFactor::parse("").is_err());
        assert!(ScaleFactor::parse("x").is_err());
        assert!(ScaleFactor::parse("-1x").is_err());
        assert!(ScaleFactor::parse("0x").is_err());
        assert!(ScaleFactor::parse("twox").is_err());
    }
}
