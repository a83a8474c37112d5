use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Hybrid 1-D length: absolute pixels plus a proportion of the container.
///
/// A `Length` has no concrete value on its own; it is resolved against the
/// extent of the container it is laid out in:
///
/// ```text
/// resolved = pixels + fraction * extent
/// ```
///
/// Lengths compose linearly, so `1fr - 20px` is "20 pixels from the far edge".
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Length {
    pub pixels: f32,
    pub fraction: f32,
}

impl Length {
    pub const ZERO: Length = Length::new(0.0, 0.0);

    #[inline]
    pub const fn new(pixels: f32, fraction: f32) -> Self {
        Self { pixels, fraction }
    }

    /// Absolute length in logical pixels.
    #[inline]
    pub const fn px(pixels: f32) -> Self {
        Self::new(pixels, 0.0)
    }

    /// Proportion of the container extent (`1.0` is the full extent).
    #[inline]
    pub const fn fr(fraction: f32) -> Self {
        Self::new(0.0, fraction)
    }

    /// Validated pixel length from a wide literal.
    ///
    /// Fails for NaN and for values that do not fit a finite `f32`.
    pub fn try_px(value: f64) -> Result<Self> {
        Ok(Self::px(narrow("pixel length", value)?))
    }

    /// Validated fractional length from a wide literal.
    pub fn try_fr(value: f64) -> Result<Self> {
        Ok(Self::fr(narrow("fractional length", value)?))
    }

    /// Resolves this length against a container extent in pixels.
    #[inline]
    pub fn resolve(self, extent: f32) -> f32 {
        self.pixels + self.fraction * extent
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.pixels.is_finite() && self.fraction.is_finite()
    }
}

fn narrow(what: &'static str, value: f64) -> Result<f32> {
    if value.is_nan() || value.abs() > f32::MAX as f64 {
        return Err(Error::invalid(what, value));
    }
    Ok(value as f32)
}

// ── arithmetic ────────────────────────────────────────────────────────────

impl Add for Length {
    type Output = Length;
    #[inline]
    fn add(self, rhs: Length) -> Length {
        Length::new(self.pixels + rhs.pixels, self.fraction + rhs.fraction)
    }
}

impl Sub for Length {
    type Output = Length;
    #[inline]
    fn sub(self, rhs: Length) -> Length {
        Length::new(self.pixels - rhs.pixels, self.fraction - rhs.fraction)
    }
}

impl Neg for Length {
    type Output = Length;
    #[inline]
    fn neg(self) -> Length {
        Length::new(-self.pixels, -self.fraction)
    }
}

impl Mul<f32> for Length {
    type Output = Length;
    #[inline]
    fn mul(self, rhs: f32) -> Length {
        Length::new(self.pixels * rhs, self.fraction * rhs)
    }
}

impl Mul<Length> for f32 {
    type Output = Length;
    #[inline]
    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}

impl Div<f32> for Length {
    type Output = Length;
    #[inline]
    fn div(self, rhs: f32) -> Length {
        Length::new(self.pixels / rhs, self.fraction / rhs)
    }
}

impl AddAssign for Length {
    #[inline]
    fn add_assign(&mut self, rhs: Length) {
        *self = *self + rhs;
    }
}

impl SubAssign for Length {
    #[inline]
    fn sub_assign(&mut self, rhs: Length) {
        *self = *self - rhs;
    }
}

// ── text form ─────────────────────────────────────────────────────────────

/// Formats as `<fraction>fr<sign><pixels>px`, e.g. `1fr-116px`.
impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.pixels.is_sign_negative() { '-' } else { '+' };
        write!(f, "{}fr{}{}px", self.fraction, sign, self.pixels.abs())
    }
}

/// Parses a sum of `px`/`fr` terms such as `"1fr - 20px - 96px"` or `"0.5fr+8px"`.
impl FromStr for Length {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let bad = || Error::invalid("length literal", s);

        if compact.is_empty() {
            return Err(bad());
        }

        let mut total = Length::ZERO;
        let mut rest = compact.as_str();
        let mut first = true;

        while !rest.is_empty() {
            let (sign, body) = if let Some(body) = rest.strip_prefix('+') {
                (1.0, body)
            } else if let Some(body) = rest.strip_prefix('-') {
                (-1.0, body)
            } else if first {
                (1.0, rest)
            } else {
                return Err(bad());
            };

            let digits = body
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(body.len());
            if digits == 0 {
                return Err(bad());
            }

            let value: f64 = body[..digits].parse().map_err(|_| bad())?;
            let unit = &body[digits..];

            let (term, tail) = if let Some(tail) = unit.strip_prefix("px") {
                (Length::try_px(sign * value)?, tail)
            } else if let Some(tail) = unit.strip_prefix("fr") {
                (Length::try_fr(sign * value)?, tail)
            } else {
                return Err(bad());
            };

            total += term;
            rest = tail;
            first = false;
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(pixels: f32, fraction: f32) -> Length {
        Length::new(pixels, fraction)
    }

    // ── resolve ───────────────────────────────────────────────────────────

    #[test]
    fn resolve_mixes_pixels_and_fraction() {
        assert_eq!(l(20.0, 0.5).resolve(200.0), 120.0);
        assert_eq!(Length::px(7.0).resolve(1000.0), 7.0);
        assert_eq!(Length::fr(1.0).resolve(640.0), 640.0);
    }

    #[test]
    fn resolve_is_linear() {
        let lengths = [l(0.0, 0.0), l(12.5, 0.25), l(-116.0, 1.0), l(3.0, -0.5)];
        let extents = [0.0, 1.0, 480.0, 1920.0];
        for a in lengths {
            for b in lengths {
                for e in extents {
                    let sum = (a + b).resolve(e);
                    let split = a.resolve(e) + b.resolve(e);
                    assert!((sum - split).abs() < 1e-3, "{a} + {b} @ {e}");
                }
            }
        }
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = l(10.0, 0.5);
        assert_eq!(a * 2.0, l(20.0, 1.0));
        assert_eq!(2.0 * a, l(20.0, 1.0));
        assert_eq!(a / 2.0, l(5.0, 0.25));
        assert_eq!(-a, l(-10.0, -0.5));
        assert_eq!(a - a, Length::ZERO);
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn try_px_rejects_nan() {
        assert!(matches!(Length::try_px(f64::NAN), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn try_fr_rejects_out_of_range() {
        assert!(Length::try_fr(1e39).is_err());
        assert!(Length::try_fr(f64::INFINITY).is_err());
        assert_eq!(Length::try_fr(0.25), Ok(Length::fr(0.25)));
    }

    // ── text form ─────────────────────────────────────────────────────────

    #[test]
    fn parse_sum_of_terms() {
        let parsed: Length = "1fr - 20px - 96px".parse().unwrap();
        assert_eq!(parsed, l(-116.0, 1.0));
        assert_eq!("0.5fr+8px".parse::<Length>().unwrap(), l(8.0, 0.5));
        assert_eq!("-4px".parse::<Length>().unwrap(), Length::px(-4.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Length>().is_err());
        assert!("12".parse::<Length>().is_err());
        assert!("px".parse::<Length>().is_err());
        assert!("1fr 2px".parse::<Length>().is_err());
        assert!("3em".parse::<Length>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let a = l(-116.0, 1.0);
        assert_eq!(a.to_string(), "1fr-116px");
        assert_eq!(a.to_string().parse::<Length>().unwrap(), a);
        assert_eq!(Length::px(20.0).to_string(), "0fr+20px");
    }
}
