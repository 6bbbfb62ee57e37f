//! Star ratings with one decimal of precision.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    /// The value is outside `0.0..=5.0`.
    #[error("rating must be between 0 and 5, got {0}")]
    OutOfRange(f64),
    /// The value is NaN or infinite.
    #[error("rating must be a finite number")]
    NotFinite,
}

/// An average rating between 0.0 and 5.0 stars.
///
/// Stored as tenths of a star so ratings are totally ordered and compare
/// exactly; input values are rounded to one decimal place.
///
/// ```
/// use handcraft_core::Rating;
///
/// let rating = Rating::try_from(4.84).unwrap();
/// assert_eq!(rating.to_string(), "4.8");
/// assert!(Rating::try_from(5.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(u8);

impl Rating {
    /// Highest possible rating, in tenths.
    const MAX_TENTHS: u8 = 50;

    /// Create a rating from tenths of a star (`48` is 4.8 stars).
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] above 50 tenths.
    pub fn from_tenths(tenths: u8) -> Result<Self, RatingError> {
        if tenths > Self::MAX_TENTHS {
            return Err(RatingError::OutOfRange(f64::from(tenths) / 10.0));
        }
        Ok(Self(tenths))
    }

    /// The rating in tenths of a star.
    #[must_use]
    pub const fn tenths(self) -> u8 {
        self.0
    }

    /// The rating as a floating point number of stars.
    #[must_use]
    pub fn stars(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = RatingError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(RatingError::NotFinite);
        }
        if !(0.0..=5.0).contains(&value) {
            return Err(RatingError::OutOfRange(value));
        }
        // Range checked above, so the rounded value fits in 0..=50.
        Ok(Self((value * 10.0).round() as u8))
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.stars()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}
