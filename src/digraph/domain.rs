//! Bipolar valuation domain.

use crate::error::{OutrankingError, Result};

/// Numeric interval `[min, max]` whose midpoint `med` denotes the
/// indeterminate value.
///
/// A characteristic value `r` asserts truth with credibility `r - med` when
/// `r > med` and falsity with credibility `med - r` when `r < med`.
/// Comparisons are always made against `med`, never against `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationDomain {
    min: f64,
    med: f64,
    max: f64,
}

impl ValuationDomain {
    /// Creates the domain `[min, max]` with `med = (min + max) / 2`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(OutrankingError::InvalidDomain { min, max });
        }
        Ok(Self {
            min,
            med: (min + max) / 2.0,
            max,
        })
    }

    /// The normalised domain `(-1, 0, +1)`.
    pub fn normalized() -> Self {
        Self {
            min: -1.0,
            med: 0.0,
            max: 1.0,
        }
    }

    /// The integer domain `(-W, 0, +W)` where `W` is the total criteria weight.
    pub fn integer(total_weight: f64) -> Result<Self> {
        Self::new(-total_weight, total_weight)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn med(&self) -> f64 {
        self.med
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Half-width of the domain, `max - med`.
    pub fn amplitude(&self) -> f64 {
        self.max - self.med
    }

    pub fn is_normalized(&self) -> bool {
        self.min == -1.0 && self.max == 1.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Returns `Ok(value)` when the value lies in the domain.
    pub fn check(&self, what: &'static str, value: f64) -> Result<f64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(OutrankingError::DomainOverflow {
                what,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn is_positive(&self, value: f64) -> bool {
        value > self.med
    }

    pub fn is_negative(&self, value: f64) -> bool {
        value < self.med
    }

    pub fn is_indeterminate(&self, value: f64) -> bool {
        value == self.med
    }

    /// Maps a value of this domain onto `[-1, +1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.med) / self.amplitude()
    }

    /// Maps a normalised value in `[-1, +1]` onto this domain.
    pub fn denormalize(&self, value: f64) -> f64 {
        self.med + value * self.amplitude()
    }

    /// Affine map of a value of this domain onto `target`, keeping `med`
    /// on `med`.
    pub fn rescale_to(&self, value: f64, target: &ValuationDomain) -> f64 {
        if self == target {
            return value;
        }
        target.med + (value - self.med) / self.amplitude() * target.amplitude()
    }

    /// Bipolar negation around `med`: `max - value + min`.
    pub fn negate(&self, value: f64) -> f64 {
        self.max - value + self.min
    }
}

impl Default for ValuationDomain {
    fn default() -> Self {
        Self::normalized()
    }
}
