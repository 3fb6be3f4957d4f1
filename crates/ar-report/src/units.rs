//! Fixed-point lengths.
//!
//! Layout arithmetic runs on integer thousandths of a PDF point so that
//! accumulating row heights is exact and page breaks never depend on
//! floating-point rounding.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Points per centimetre.
pub const POINTS_PER_CM: f64 = 72.0 / 2.54;

/// A length in thousandths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(i64);

impl Length {
    pub const ZERO: Length = Length(0);

    /// Convert from points, rounding to the nearest thousandth.
    pub fn from_pt(points: f64) -> Self {
        Length((points * 1000.0).round() as i64)
    }

    pub fn from_cm(cm: f64) -> Self {
        Self::from_pt(cm * POINTS_PER_CM)
    }

    pub const fn from_millipoints(value: i64) -> Self {
        Length(value)
    }

    pub fn millipoints(self) -> i64 {
        self.0
    }

    pub fn as_pt(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Half the length, rounded toward zero.
    pub fn half(self) -> Self {
        Length(self.0 / 2)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<i64> for Length {
    type Output = Length;

    fn mul(self, rhs: i64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, |acc, next| acc + next)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}pt", self.as_pt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_round_trip() {
        assert_eq!(Length::from_pt(12.0).millipoints(), 12_000);
        assert_eq!(Length::from_pt(0.0004).millipoints(), 0);
        assert_eq!(Length::from_pt(841.89).as_pt(), 841.89);
    }

    #[test]
    fn test_two_cm() {
        assert_eq!(Length::from_cm(2.0).millipoints(), 56_693);
    }

    #[test]
    fn test_sum_is_exact() {
        let row = Length::from_pt(13.7);
        let total: Length = std::iter::repeat(row).take(10).sum();
        assert_eq!(total, row * 10);
        assert_eq!(format!("{}", Length::from_pt(1.5)), "1.500pt");
    }
}
