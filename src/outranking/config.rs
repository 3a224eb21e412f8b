//! Outranking construction parameters.

use crate::error::{OutrankingError, Result};

/// How marginal discordance affects the outranking value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VetoMode {
    /// Bipolar veto cut `min(S, -w·V)` on the vetoed pair and the symmetric
    /// counter-veto `max(S, +w·V)` on the reverse pair. A pair vetoed in
    /// both directions is indeterminate.
    #[default]
    Bipolar,
    /// Discordance is ignored.
    NoVeto,
    /// A full veto polarises the value to `Min`; weak vetoes are ignored.
    ElectreVeto,
}

/// Evaluation at which the thresholds of a pair `(a, b)` are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdAnchor {
    /// `x = e[c][b]`.
    #[default]
    AtB,
    /// `x = e[c][a]`.
    AtA,
    /// `x = max(e[c][a], e[c][b])`.
    AtMax,
}

impl ThresholdAnchor {
    #[inline]
    pub fn point(self, ea: f64, eb: f64) -> f64 {
        match self {
            ThresholdAnchor::AtB => eb,
            ThresholdAnchor::AtA => ea,
            ThresholdAnchor::AtMax => ea.max(eb),
        }
    }
}

/// Shape of the marginal concordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConcordanceMode {
    /// Three-valued `{-1, 0, +1}`.
    #[default]
    Crisp,
    /// Piecewise linear on `[-p, -q]`, crossing `0` at `-wp` (or at the
    /// midpoint when no weak preference threshold is given).
    Linear,
}

/// Valuation domain of the built relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValuationMode {
    /// `(-W, 0, +W)` with `W` the total criteria weight.
    Integer,
    /// `(-1, 0, +1)`.
    #[default]
    Normalized,
}

/// Configuration for building a bipolar outranking digraph.
///
/// # Examples
///
/// ```
/// use u_outranking::outranking::{OutrankingConfig, ValuationMode, VetoMode};
///
/// let config = OutrankingConfig::default()
///     .with_valuation(ValuationMode::Integer)
///     .with_veto(VetoMode::NoVeto);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OutrankingConfig {
    pub veto: VetoMode,
    pub anchor: ThresholdAnchor,
    pub concordance: ConcordanceMode,
    pub valuation: ValuationMode,

    /// Discordance degree on the weak veto interval `(-v, -wv]`, in `(0, 1]`.
    pub weak_veto_degree: f64,

    /// Whether to compute relation rows in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature; the result is identical
    /// either way.
    pub parallel: bool,
}

impl Default for OutrankingConfig {
    fn default() -> Self {
        Self {
            veto: VetoMode::default(),
            anchor: ThresholdAnchor::default(),
            concordance: ConcordanceMode::default(),
            valuation: ValuationMode::default(),
            weak_veto_degree: 0.5,
            parallel: false,
        }
    }
}

impl OutrankingConfig {
    pub fn with_veto(mut self, veto: VetoMode) -> Self {
        self.veto = veto;
        self
    }

    pub fn with_anchor(mut self, anchor: ThresholdAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_concordance(mut self, concordance: ConcordanceMode) -> Self {
        self.concordance = concordance;
        self
    }

    pub fn with_valuation(mut self, valuation: ValuationMode) -> Self {
        self.valuation = valuation;
        self
    }

    pub fn with_weak_veto_degree(mut self, degree: f64) -> Self {
        self.weak_veto_degree = degree;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.weak_veto_degree > 0.0 && self.weak_veto_degree <= 1.0) {
            return Err(OutrankingError::DomainOverflow {
                what: "weak veto degree",
                value: self.weak_veto_degree,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OutrankingConfig::default();
        assert_eq!(config.veto, VetoMode::Bipolar);
        assert_eq!(config.anchor, ThresholdAnchor::AtB);
        assert_eq!(config.valuation, ValuationMode::Normalized);
        assert!((config.weak_veto_degree - 0.5).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_weak_veto_degree() {
        let config = OutrankingConfig::default().with_weak_veto_degree(1.5);
        assert!(matches!(
            config.validate(),
            Err(OutrankingError::DomainOverflow { .. })
        ));
        assert!(OutrankingConfig::default()
            .with_weak_veto_degree(0.0)
            .validate()
            .is_err());
        assert!(OutrankingConfig::default()
            .with_weak_veto_degree(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_anchor_point() {
        assert_eq!(ThresholdAnchor::AtB.point(3.0, 5.0), 5.0);
        assert_eq!(ThresholdAnchor::AtA.point(3.0, 5.0), 3.0);
        assert_eq!(ThresholdAnchor::AtMax.point(7.0, 5.0), 7.0);
    }
}
