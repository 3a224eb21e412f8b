//! Circuit enumeration parameters.

use crate::error::{OutrankingError, Result};

/// Configuration for chordless circuit enumeration.
///
/// # Examples
///
/// ```
/// use u_outranking::circuits::CircuitConfig;
///
/// let config = CircuitConfig::default().with_cycle3(true).with_odd_only(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CircuitConfig {
    /// Whether circuits of length 3 are reported.
    pub cycle3: bool,

    /// Keep only circuits of odd length.
    pub odd_only: bool,

    /// Refuse digraphs above this order. `None` = no limit.
    pub order_limit: Option<usize>,

    /// Whether to explore starting vertices in parallel using rayon.
    pub parallel: bool,
}

impl CircuitConfig {
    pub fn with_cycle3(mut self, cycle3: bool) -> Self {
        self.cycle3 = cycle3;
        self
    }

    pub fn with_odd_only(mut self, odd_only: bool) -> Self {
        self.odd_only = odd_only;
        self
    }

    pub fn with_order_limit(mut self, limit: usize) -> Self {
        self.order_limit = Some(limit);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.order_limit == Some(0) {
            return Err(OutrankingError::InvalidConfig(
                "order_limit must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Fails with `OrderTooHigh` when `order` exceeds the limit.
    pub(crate) fn check_order(&self, order: usize) -> Result<()> {
        match self.order_limit {
            Some(limit) if order > limit => Err(OutrankingError::OrderTooHigh {
                order,
                limit,
                hint: "restrict the digraph with subgraph() or raise order_limit",
            }),
            _ => Ok(()),
        }
    }
}
