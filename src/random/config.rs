//! Random generator parameters.

use crate::error::{OutrankingError, Result};

/// How criteria weights are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightDistribution {
    /// Every weight is `1`.
    #[default]
    Equisignificant,
    /// Integer weights drawn uniformly from `min..=max`.
    Random { min: u32, max: u32 },
}

/// Configuration of a random performance tableau.
///
/// Actions are named `a01, a02, …` and criteria `g1, g2, …` (zero padded
/// to the width of the largest ordinal). All criteria maximise on a common
/// scale with constant thresholds expressed in percent of the scale
/// amplitude. Evaluations follow a Beta(2, 2) law on the scale, rounded to
/// two decimals.
///
/// # Examples
///
/// ```
/// use u_outranking::random::{RandomPerformanceTableau, RandomTableauConfig};
///
/// let config = RandomTableauConfig::default().with_actions(5).with_seed(42);
/// let t = RandomPerformanceTableau::generate(&config).unwrap();
/// assert_eq!(t.order(), 5);
/// assert_eq!(t.actions()[0].id, "a1");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RandomTableauConfig {
    pub actions: usize,
    pub criteria: usize,
    pub weights: WeightDistribution,
    /// Common measurement scale `(min, max)`.
    pub scale: (f64, f64),
    /// Indifference threshold, percent of the scale amplitude.
    pub ind_percent: f64,
    /// Preference threshold, percent of the scale amplitude.
    pub pref_percent: f64,
    /// Veto threshold, percent of the scale amplitude.
    pub veto_percent: Option<f64>,
    /// Probability that an evaluation is missing.
    pub missing_probability: f64,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for RandomTableauConfig {
    fn default() -> Self {
        Self {
            actions: 13,
            criteria: 7,
            weights: WeightDistribution::Equisignificant,
            scale: (0.0, 100.0),
            ind_percent: 2.5,
            pref_percent: 5.0,
            veto_percent: Some(80.0),
            missing_probability: 0.025,
            seed: None,
        }
    }
}

impl RandomTableauConfig {
    pub fn with_actions(mut self, n: usize) -> Self {
        self.actions = n;
        self
    }

    pub fn with_criteria(mut self, m: usize) -> Self {
        self.criteria = m;
        self
    }

    pub fn with_weights(mut self, weights: WeightDistribution) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_scale(mut self, min: f64, max: f64) -> Self {
        self.scale = (min, max);
        self
    }

    pub fn with_thresholds(mut self, ind: f64, pref: f64, veto: Option<f64>) -> Self {
        self.ind_percent = ind;
        self.pref_percent = pref;
        self.veto_percent = veto;
        self
    }

    pub fn with_missing_probability(mut self, p: f64) -> Self {
        self.missing_probability = p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.criteria == 0 {
            return Err(OutrankingError::EmptyCriteria);
        }
        probability("missing data probability", self.missing_probability)?;
        if let WeightDistribution::Random { min, max } = self.weights {
            if min == 0 || min > max {
                return Err(OutrankingError::InvalidConfig(format!(
                    "weight scale must satisfy 1 <= min <= max, got [{min}, {max}]"
                )));
            }
        }
        let (lo, hi) = self.scale;
        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            return Err(OutrankingError::InvalidConfig(format!(
                "scale [{lo}, {hi}] is empty"
            )));
        }
        Ok(())
    }
}

/// Configuration of a random valued digraph.
///
/// Each off-diagonal value is positive with probability `arc_probability`.
/// Valued digraphs draw the magnitude uniformly in `[0.01, 1]` (two
/// decimals) on the normalised domain; crisp ones use `±1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RandomDigraphConfig {
    pub order: usize,
    pub arc_probability: f64,
    pub valued: bool,
    pub seed: Option<u64>,
}

impl Default for RandomDigraphConfig {
    fn default() -> Self {
        Self {
            order: 9,
            arc_probability: 0.5,
            valued: true,
            seed: None,
        }
    }
}

impl RandomDigraphConfig {
    pub fn with_order(mut self, n: usize) -> Self {
        self.order = n;
        self
    }

    pub fn with_arc_probability(mut self, p: f64) -> Self {
        self.arc_probability = p;
        self
    }

    pub fn with_valued(mut self, valued: bool) -> Self {
        self.valued = valued;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        probability("arc probability", self.arc_probability).map(|_| ())
    }
}

fn probability(what: &'static str, p: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(OutrankingError::DomainOverflow {
            what,
            value: p,
            min: 0.0,
            max: 1.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tableau_config() {
        let c = RandomTableauConfig::default();
        assert_eq!(c.actions, 13);
        assert_eq!(c.criteria, 7);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_probability() {
        let c = RandomTableauConfig::default().with_missing_probability(1.2);
        assert!(matches!(
            c.validate(),
            Err(OutrankingError::DomainOverflow { .. })
        ));
    }

    #[test]
    fn test_validate_no_criteria() {
        let c = RandomTableauConfig::default().with_criteria(0);
        assert_eq!(c.validate().unwrap_err(), OutrankingError::EmptyCriteria);
    }

    #[test]
    fn test_validate_weight_scale() {
        let c = RandomTableauConfig::default()
            .with_weights(WeightDistribution::Random { min: 3, max: 1 });
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_arc_probability() {
        assert!(RandomDigraphConfig::default().validate().is_ok());
        let c = RandomDigraphConfig::default().with_arc_probability(-0.1);
        assert!(matches!(
            c.validate(),
            Err(OutrankingError::DomainOverflow { .. })
        ));
        assert!(RandomDigraphConfig::default()
            .with_arc_probability(f64::NAN)
            .validate()
            .is_err());
    }
}
