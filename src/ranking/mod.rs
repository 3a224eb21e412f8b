//! Ranking rules for valued digraphs.
//!
//! Every rule implements [`RankingEngine`] and returns a [`LinearRanking`]:
//! a permutation of the actions, best first, from which the crisp or
//! valued linear-order relation, the Kemeny index and the ordinal
//! correlation with the original relation can be derived.
//!
//! # Rules
//!
//! - **Score based**: [`NetFlows`], [`IteratedNetFlows`], [`Copeland`],
//!   [`IteratedCopeland`], [`Kohler`]
//! - **Pairwise**: [`RankedPairs`], with the extended prudent variant
//! - **Exact**: [`Kemeny`] and [`Slater`], bounded by an order limit
//! - **Spectral**: [`Principal`]
//!
//! [`RankingConfig::rank`] dispatches on a [`RankingRule`].
//!
//! # References
//!
//! - Kemeny (1959), "Mathematics without numbers", *Daedalus* 88
//! - Dias & Lamboray (2010), "Extensions of the prudence principle to
//!   exploit a valued outranking relation", *EJOR* 201(3)
//! - Bisdorff (2013), "On polarizing outranking relations with large
//!   performance differences", *J. Multi-Criteria Decision Analysis*

mod config;
mod engine;
mod kemeny;
mod pairs;
mod principal;
mod scores;
mod types;

pub use config::{
    KemenyConfig, KohlerConfig, PrincipalConfig, RankedPairsConfig, RankingConfig, RankingRule,
};
pub use engine::RankingEngine;
pub use kemeny::{consensus_quality, ConsensusQuality, Kemeny, Slater};
pub use pairs::RankedPairs;
pub use principal::Principal;
pub use scores::{Copeland, IteratedCopeland, IteratedNetFlows, Kohler, NetFlows};
pub use types::LinearRanking;
