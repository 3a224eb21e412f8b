//! Bipolar outranking relations.
//!
//! [`OutrankingBuilder`] turns a [`PerformanceTableau`](crate::tableau::PerformanceTableau)
//! into a [`ValuedDigraph`](crate::digraph::ValuedDigraph) whose value
//! `r(a, b)` is the credibility of "a is at least as good as b". The built
//! digraph carries an [`OutrankingProvenance`] (tableau, configuration,
//! build warnings) that outranking-specific procedures require.
//!
//! Every relation built with [`VetoMode::Bipolar`] or [`VetoMode::NoVeto`]
//! satisfies the outranking condition `r(a, b) + r(b, a) >= 2 med`.
//!
//! # References
//!
//! - Roy (1991), "The outranking approach and the foundations of ELECTRE
//!   methods", *Theory and Decision*
//! - Bisdorff, Meyer & Roubens (2008), "RUBIS: a bipolar-valued outranking
//!   method for the choice problem", *4OR*

mod builder;
mod config;
mod marginal;

pub use builder::{BuildWarning, OutrankingBuilder, OutrankingProvenance, PairTerms};
pub use config::{ConcordanceMode, OutrankingConfig, ThresholdAnchor, ValuationMode, VetoMode};
pub use marginal::{concordance, discordance};
