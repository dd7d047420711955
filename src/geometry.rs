//! Scalar helpers and the canvas type shared by both element models.

use std::fmt;

/// The bounded coordinate space every element position is clamped into.
///
/// The diagram context owns the live canvas; model operations that need to
/// clamp take it by value (it is two `f64`s) rather than holding a
/// back-reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    /// Application default workspace size.
    pub const DEFAULT: Canvas = Canvas {
        width: 2000.0,
        height: 1000.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Canvas { width, height }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::DEFAULT
    }
}

/// Force `x` into `[min, max]`, saturating at the nearer bound.
///
/// When the interval is inverted (`max < min`, which happens whenever an
/// element is larger than the canvas) the result is `min`, so oversized
/// elements pin to the top-left rather than oscillating.
pub fn clamp(x: f64, min: f64, max: f64) -> f64 {
    if x < min || max < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Maximum of two coordinates.
pub fn max_of(a: f64, b: f64) -> f64 {
    if a >= b { a } else { b }
}

/// A coordinate formatted for the save format: integral values keep one
/// decimal digit (`0` prints as `0.0`), everything else uses the shortest
/// round-trippable form.
pub struct Coord(pub f64);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() && self.0 == self.0.trunc() && self.0.abs() < 1e16 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_in_bounds() {
        assert_eq!(clamp(12.8, 12.4, 12.9), 12.8);
    }

    #[test]
    fn clamp_above_bounds() {
        assert_eq!(clamp(-1.0, -25.4, -19.9), -19.9);
    }

    #[test]
    fn clamp_below_bounds() {
        assert_eq!(clamp(5.0, 12.0, 745.0), 12.0);
    }

    #[test]
    fn clamp_inverted_interval_saturates_to_min() {
        assert_eq!(clamp(50.0, 0.0, -10.0), 0.0);
    }

    #[test]
    fn max_of_doubles() {
        assert_eq!(max_of(4.0, 7.0), 7.0);
        assert_eq!(max_of(-2.0, -4.0), -2.0);
    }

    #[test]
    fn coord_prints_integral_with_decimal() {
        assert_eq!(Coord(0.0).to_string(), "0.0");
        assert_eq!(Coord(50.0).to_string(), "50.0");
        assert_eq!(Coord(-3.0).to_string(), "-3.0");
        assert_eq!(Coord(2000.0).to_string(), "2000.0");
    }

    #[test]
    fn coord_prints_fractional_as_is() {
        assert_eq!(Coord(0.5).to_string(), "0.5");
        assert_eq!(Coord(12.25).to_string(), "12.25");
    }
}
