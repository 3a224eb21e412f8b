//! Bipolar-valued outranking digraphs for multiple-criteria decision aid.
//!
//! Provides the building blocks of an outranking-based recommendation:
//!
//! - **Tableau**: actions evaluated on weighted criteria with affine
//!   discrimination thresholds and missing data.
//! - **Digraph**: bipolar-valued relations on a `(min, med, max)` domain,
//!   with relation algebra, strong components and ordinal correlation.
//! - **Outranking**: construction of the credibility of "a is at least as
//!   good as b" from concordance and veto terms.
//! - **Circuits**: chordless circuits, the source of Condorcet-like
//!   paradoxes.
//! - **Kernels**: maximal independent sets, dominant and absorbent
//!   prekernels, good and bad choices.
//! - **Ranking**: net flows, Copeland, Kohler, ranked pairs, Kemeny,
//!   Slater and principal orderings behind one engine trait.
//! - **Recommendation**: circuits, choices and ranking in one record.
//! - **Random**: seeded tableau and digraph generators.
//!
//! # Example
//!
//! ```
//! use u_outranking::outranking::OutrankingBuilder;
//! use u_outranking::random::{RandomPerformanceTableau, RandomTableauConfig};
//! use u_outranking::ranking::{RankingConfig, RankingRule};
//!
//! let tableau = RandomPerformanceTableau::generate(
//!     &RandomTableauConfig::default().with_actions(6).with_seed(7),
//! )
//! .unwrap();
//! let digraph = OutrankingBuilder::build_default(&tableau).unwrap();
//! let ranking = RankingConfig::new(RankingRule::Copeland).rank(&digraph).unwrap();
//! assert_eq!(ranking.len(), 6);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel`: rayon-backed relation construction, circuit search and
//!   Kemeny enumeration. Results are identical to the sequential path.
//! - `serde`: serialization of configurations and result records.

pub mod circuits;
pub mod digraph;
pub mod error;
pub mod kernels;
pub mod outranking;
pub mod random;
pub mod ranking;
pub mod recommendation;
pub mod tableau;

mod parallel;

pub use error::{OutrankingError, Result};
