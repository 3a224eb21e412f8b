//! Ranking rule selection and per-rule parameters.

use crate::error::{OutrankingError, Result};
use std::fmt;

/// Available ranking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankingRule {
    /// Decreasing net flows `Σ_b r(a, b) - r(b, a)`.
    #[default]
    NetFlows,
    /// Net flows recomputed on the residual actions after each pick.
    IteratedNetFlows,
    /// Net flows of the median-cut polarised relation.
    Copeland,
    /// Copeland scores recomputed on the residual actions after each pick.
    IteratedCopeland,
    /// Repeated maximin selection.
    Kohler,
    /// Lexmax Dias-Lamboray ranked pairs.
    RankedPairs,
    /// Ranked pairs seeded with the prudent cut of the codual.
    ExtendedPrudent,
    /// Exact Kemeny ranking.
    Kemeny,
    /// Kemeny ranking of the median-cut polarised relation.
    Slater,
    /// First principal axis of the relation covariance.
    Principal,
}

impl RankingRule {
    /// Every rule, in declaration order.
    pub const ALL: [RankingRule; 10] = [
        RankingRule::NetFlows,
        RankingRule::IteratedNetFlows,
        RankingRule::Copeland,
        RankingRule::IteratedCopeland,
        RankingRule::Kohler,
        RankingRule::RankedPairs,
        RankingRule::ExtendedPrudent,
        RankingRule::Kemeny,
        RankingRule::Slater,
        RankingRule::Principal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RankingRule::NetFlows => "NetFlows",
            RankingRule::IteratedNetFlows => "IteratedNetFlows",
            RankingRule::Copeland => "Copeland",
            RankingRule::IteratedCopeland => "IteratedCopeland",
            RankingRule::Kohler => "Kohler",
            RankingRule::RankedPairs => "RankedPairs",
            RankingRule::ExtendedPrudent => "ExtendedPrudent",
            RankingRule::Kemeny => "Kemeny",
            RankingRule::Slater => "Slater",
            RankingRule::Principal => "Principal",
        }
    }

    /// Whether the rule enumerates permutations and honours an order limit.
    pub fn is_exact(self) -> bool {
        matches!(self, RankingRule::Kemeny | RankingRule::Slater)
    }
}

impl fmt::Display for RankingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kemeny and Slater enumeration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KemenyConfig {
    /// Largest order enumerated exactly (`n!` permutations).
    pub order_limit: usize,

    /// Score permutations in parallel by leading action.
    /// Requires the `parallel` feature; ignored otherwise.
    pub parallel: bool,
}

impl Default for KemenyConfig {
    fn default() -> Self {
        Self {
            order_limit: 7,
            parallel: false,
        }
    }
}

impl KemenyConfig {
    pub fn with_order_limit(mut self, limit: usize) -> Self {
        self.order_limit = limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.order_limit == 0 {
            return Err(OutrankingError::InvalidConfig(
                "order_limit must be positive".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn check_order(&self, order: usize) -> Result<()> {
        if order > self.order_limit {
            return Err(OutrankingError::OrderTooHigh {
                order,
                limit: self.order_limit,
                hint: "use a heuristic rule such as NetFlows or Copeland, or raise order_limit",
            });
        }
        Ok(())
    }
}

/// Kohler rule parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KohlerConfig {
    /// Break maximin ties on the sorted row values (second minimum, then
    /// third, ...) instead of by action order.
    pub leximin: bool,
}

impl KohlerConfig {
    pub fn with_leximin(mut self, leximin: bool) -> Self {
        self.leximin = leximin;
        self
    }
}

/// Ranked pairs parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankedPairsConfig {
    /// Fix the arcs of the prudent cut of the codual before ranking the
    /// remaining pairs.
    pub prudent_seed: bool,
}

impl RankedPairsConfig {
    pub fn with_prudent_seed(mut self, prudent_seed: bool) -> Self {
        self.prudent_seed = prudent_seed;
        self
    }
}

/// Principal ordering parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrincipalConfig {
    /// Covariance of the columns (in-valuations) when `true`, of the rows
    /// (out-valuations) otherwise.
    pub column_wise: bool,

    /// Power iteration budget.
    pub max_iterations: usize,

    /// Convergence threshold on the eigenvector change.
    pub tolerance: f64,
}

impl Default for PrincipalConfig {
    fn default() -> Self {
        Self {
            column_wise: true,
            max_iterations: 1000,
            tolerance: 1e-10,
        }
    }
}

impl PrincipalConfig {
    pub fn with_column_wise(mut self, column_wise: bool) -> Self {
        self.column_wise = column_wise;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(OutrankingError::InvalidConfig(
                "max_iterations must be positive".into(),
            ));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(OutrankingError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// A ranking rule with the parameters of every parameterised rule.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RankingConfig {
    pub rule: RankingRule,
    pub kemeny: KemenyConfig,
    pub kohler: KohlerConfig,
    pub ranked_pairs: RankedPairsConfig,
    pub principal: PrincipalConfig,
}

impl RankingConfig {
    pub fn new(rule: RankingRule) -> Self {
        Self {
            rule,
            ..Self::default()
        }
    }

    pub fn with_rule(mut self, rule: RankingRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_kemeny(mut self, kemeny: KemenyConfig) -> Self {
        self.kemeny = kemeny;
        self
    }

    pub fn with_kohler(mut self, kohler: KohlerConfig) -> Self {
        self.kohler = kohler;
        self
    }

    pub fn with_ranked_pairs(mut self, ranked_pairs: RankedPairsConfig) -> Self {
        self.ranked_pairs = ranked_pairs;
        self
    }

    pub fn with_principal(mut self, principal: PrincipalConfig) -> Self {
        self.principal = principal;
        self
    }

    /// Validates the parameters the selected rule uses.
    pub fn validate(&self) -> Result<()> {
        match self.rule {
            RankingRule::Kemeny | RankingRule::Slater => self.kemeny.validate(),
            RankingRule::Principal => self.principal.validate(),
            _ => Ok(()),
        }
    }
}
