//! Criteria, thresholds and evaluations.

use crate::error::{OutrankingError, Result};

/// Preference direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PreferenceDirection {
    /// Smaller evaluations are better.
    Min,
    /// Larger evaluations are better.
    #[default]
    Max,
}

/// Measurement scale of a criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

/// Affine discrimination threshold `constant + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    pub constant: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slope: f64,
}

impl Threshold {
    pub fn constant(value: f64) -> Self {
        Self {
            constant: value,
            slope: 0.0,
        }
    }

    pub fn linear(constant: f64, slope: f64) -> Self {
        Self { constant, slope }
    }

    /// Threshold value at evaluation `x`.
    #[inline]
    pub fn at(&self, x: f64) -> f64 {
        self.constant + self.slope * x
    }
}

/// Absent thresholds evaluate to `+∞`.
#[inline]
pub(crate) fn threshold_at(threshold: Option<Threshold>, x: f64) -> f64 {
    threshold.map_or(f64::INFINITY, |t| t.at(x))
}

/// Discrimination thresholds of a criterion.
///
/// Every threshold is optional. An absent indifference threshold is read as
/// `0` by the outranking builder (exact ties only); every other absent
/// threshold is `+∞`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Thresholds {
    pub ind: Option<Threshold>,
    pub weak_pref: Option<Threshold>,
    pub pref: Option<Threshold>,
    pub weak_veto: Option<Threshold>,
    pub veto: Option<Threshold>,
}

impl Thresholds {
    pub fn with_ind(mut self, t: Threshold) -> Self {
        self.ind = Some(t);
        self
    }

    pub fn with_weak_pref(mut self, t: Threshold) -> Self {
        self.weak_pref = Some(t);
        self
    }

    pub fn with_pref(mut self, t: Threshold) -> Self {
        self.pref = Some(t);
        self
    }

    pub fn with_weak_veto(mut self, t: Threshold) -> Self {
        self.weak_veto = Some(t);
        self
    }

    pub fn with_veto(mut self, t: Threshold) -> Self {
        self.veto = Some(t);
        self
    }

    /// Indifference threshold at `x`; `0` when absent.
    pub fn ind_at(&self, x: f64) -> f64 {
        self.ind.map_or(0.0, |t| t.at(x))
    }

    pub fn weak_pref_at(&self, x: f64) -> f64 {
        threshold_at(self.weak_pref, x)
    }

    pub fn pref_at(&self, x: f64) -> f64 {
        threshold_at(self.pref, x)
    }

    pub fn weak_veto_at(&self, x: f64) -> f64 {
        threshold_at(self.weak_veto, x)
    }

    pub fn veto_at(&self, x: f64) -> f64 {
        threshold_at(self.veto, x)
    }

    /// Checks `0 <= ind <= weakPref <= pref` and `0 <= weakVeto <= veto` at
    /// evaluation `x`. Absent thresholds are skipped.
    fn check_at(&self, criterion: &str, x: f64) -> Result<()> {
        let named = [
            ("ind", self.ind),
            ("weakPref", self.weak_pref),
            ("pref", self.pref),
            ("weakVeto", self.weak_veto),
            ("veto", self.veto),
        ];
        for (name, t) in named {
            if let Some(t) = t {
                let v = t.at(x);
                if !v.is_finite() || v < 0.0 {
                    return Err(OutrankingError::ThresholdOrder {
                        criterion: criterion.to_string(),
                        detail: format!("{name} = {v} at x = {x} is not a non-negative number"),
                    });
                }
            }
        }
        let chain = [("ind", self.ind), ("weakPref", self.weak_pref), ("pref", self.pref)];
        check_chain(criterion, x, &chain)?;
        check_chain(criterion, x, &[("weakVeto", self.weak_veto), ("veto", self.veto)])
    }
}

fn check_chain(criterion: &str, x: f64, chain: &[(&str, Option<Threshold>)]) -> Result<()> {
    let present: Vec<(&str, f64)> = chain
        .iter()
        .filter_map(|(name, t)| t.map(|t| (*name, t.at(x))))
        .collect();
    for pair in present.windows(2) {
        let (lo_name, lo) = pair[0];
        let (hi_name, hi) = pair[1];
        if lo > hi {
            return Err(OutrankingError::ThresholdOrder {
                criterion: criterion.to_string(),
                detail: format!("{lo_name} = {lo} exceeds {hi_name} = {hi} at x = {x}"),
            });
        }
    }
    Ok(())
}

/// An evaluation dimension.
///
/// # Examples
///
/// ```
/// use u_outranking::tableau::{Criterion, PreferenceDirection, Threshold};
///
/// let cost = Criterion::new("cost", 2.0)
///     .with_direction(PreferenceDirection::Min)
///     .with_scale(0.0, 500.0)
///     .with_pref(Threshold::linear(5.0, 0.1));
/// assert!(cost.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Criterion {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Positive significance weight.
    pub weight: f64,
    #[cfg_attr(feature = "serde", serde(default, rename = "preferenceDirection"))]
    pub direction: PreferenceDirection,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: Scale,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thresholds: Thresholds,
}

impl Criterion {
    /// Criterion maximising on the scale `[0, 100]` without thresholds.
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            weight,
            direction: PreferenceDirection::Max,
            scale: Scale::default(),
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_direction(mut self, direction: PreferenceDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_scale(mut self, min: f64, max: f64) -> Self {
        self.scale = Scale { min, max };
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_ind(mut self, t: Threshold) -> Self {
        self.thresholds.ind = Some(t);
        self
    }

    pub fn with_weak_pref(mut self, t: Threshold) -> Self {
        self.thresholds.weak_pref = Some(t);
        self
    }

    pub fn with_pref(mut self, t: Threshold) -> Self {
        self.thresholds.pref = Some(t);
        self
    }

    pub fn with_weak_veto(mut self, t: Threshold) -> Self {
        self.thresholds.weak_veto = Some(t);
        self
    }

    pub fn with_veto(mut self, t: Threshold) -> Self {
        self.thresholds.veto = Some(t);
        self
    }

    /// Signed performance difference of `ea` over `eb`, oriented so that a
    /// positive value favours `ea`.
    #[inline]
    pub fn difference(&self, ea: f64, eb: f64) -> f64 {
        match self.direction {
            PreferenceDirection::Max => ea - eb,
            PreferenceDirection::Min => eb - ea,
        }
    }

    /// Validates weight, scale and threshold order.
    ///
    /// Thresholds are affine, so their order is checked at both ends of
    /// the scale.
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(OutrankingError::InvalidConfig(format!(
                "criterion '{}' weight must be positive, got {}",
                self.id, self.weight
            )));
        }
        if !(self.scale.min.is_finite() && self.scale.max.is_finite())
            || self.scale.min >= self.scale.max
        {
            return Err(OutrankingError::InvalidConfig(format!(
                "criterion '{}' scale [{}, {}] is empty",
                self.id, self.scale.min, self.scale.max
            )));
        }
        self.thresholds.check_at(&self.id, self.scale.min)?;
        self.thresholds.check_at(&self.id, self.scale.max)
    }
}

/// Performance of an action on a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Evaluation {
    Number(f64),
    /// Missing on this criterion.
    #[default]
    NotApplicable,
}

impl Evaluation {
    pub fn value(self) -> Option<f64> {
        match self {
            Evaluation::Number(x) => Some(x),
            Evaluation::NotApplicable => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Evaluation::NotApplicable)
    }
}

impl From<f64> for Evaluation {
    fn from(x: f64) -> Self {
        if x.is_nan() {
            Evaluation::NotApplicable
        } else {
            Evaluation::Number(x)
        }
    }
}

impl From<Option<f64>> for Evaluation {
    fn from(x: Option<f64>) -> Self {
        x.map_or(Evaluation::NotApplicable, Evaluation::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_eval() {
        let t = Threshold::linear(2.0, 0.5);
        assert!((t.at(10.0) - 7.0).abs() < 1e-12);
        assert_eq!(threshold_at(None, 3.0), f64::INFINITY);
        assert!((Threshold::constant(4.0).at(100.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_absent_ind_is_zero() {
        let t = Thresholds::default();
        assert_eq!(t.ind_at(50.0), 0.0);
        assert_eq!(t.pref_at(50.0), f64::INFINITY);
    }

    #[test]
    fn test_difference_direction() {
        let max = Criterion::new("g", 1.0);
        let min = Criterion::new("c", 1.0).with_direction(PreferenceDirection::Min);
        assert_eq!(max.difference(5.0, 3.0), 2.0);
        assert_eq!(min.difference(5.0, 3.0), -2.0);
    }

    #[test]
    fn test_validate_ok() {
        let c = Criterion::new("g", 1.0)
            .with_ind(Threshold::constant(1.0))
            .with_weak_pref(Threshold::constant(2.0))
            .with_pref(Threshold::constant(3.0))
            .with_weak_veto(Threshold::constant(40.0))
            .with_veto(Threshold::constant(60.0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_ind_above_pref() {
        let c = Criterion::new("g", 1.0)
            .with_ind(Threshold::constant(5.0))
            .with_pref(Threshold::constant(3.0));
        assert!(matches!(
            c.validate(),
            Err(OutrankingError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_validate_weak_veto_above_veto() {
        let c = Criterion::new("g", 1.0)
            .with_weak_veto(Threshold::constant(70.0))
            .with_veto(Threshold::constant(60.0));
        assert!(matches!(
            c.validate(),
            Err(OutrankingError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn test_validate_crossing_linear_thresholds() {
        // ind overtakes pref towards the top of the scale
        let c = Criterion::new("g", 1.0)
            .with_ind(Threshold::linear(0.0, 0.2))
            .with_pref(Threshold::constant(10.0));
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_negative_threshold() {
        let c = Criterion::new("g", 1.0).with_pref(Threshold::constant(-1.0));
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_weight_and_scale() {
        assert!(Criterion::new("g", 0.0).validate().is_err());
        assert!(Criterion::new("g", 1.0)
            .with_scale(5.0, 5.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_evaluation_from() {
        assert_eq!(Evaluation::from(2.5), Evaluation::Number(2.5));
        assert!(Evaluation::from(f64::NAN).is_missing());
        assert!(Evaluation::from(None).is_missing());
        assert_eq!(Evaluation::Number(1.0).value(), Some(1.0));
    }
}
