//! Recommendation parameters.

use crate::circuits::CircuitConfig;
use crate::error::Result;
use crate::kernels::KernelConfig;
use crate::ranking::{RankingConfig, RankingRule};

/// Configuration of a full choice recommendation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommendationConfig {
    /// Chordless circuits reported alongside the choices. Odd circuits of
    /// every length by default.
    pub circuits: CircuitConfig,

    /// Good and bad choice search.
    pub kernels: KernelConfig,

    /// Ranking rule of the accompanying ranking.
    pub ranking: RankingConfig,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            circuits: CircuitConfig::default().with_cycle3(true).with_odd_only(true),
            kernels: KernelConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl RecommendationConfig {
    pub fn with_circuits(mut self, circuits: CircuitConfig) -> Self {
        self.circuits = circuits;
        self
    }

    pub fn with_kernels(mut self, kernels: KernelConfig) -> Self {
        self.kernels = kernels;
        self
    }

    pub fn with_ranking(mut self, ranking: RankingConfig) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_ranking_rule(mut self, rule: RankingRule) -> Self {
        self.ranking.rule = rule;
        self
    }

    /// Validates every part.
    pub fn validate(&self) -> Result<()> {
        self.circuits.validate()?;
        self.kernels.validate()?;
        self.ranking.validate()
    }
}
