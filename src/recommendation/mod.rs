//! Best-choice recommendations.
//!
//! A [`Recommender`] runs the whole exploitation of an outranking digraph:
//! chordless circuits that may make the recommendation paradoxical, good
//! and bad choices from the codual prekernels, and a linear ranking by the
//! configured rule. The result is a plain [`ChoiceRecommendation`] record
//! keyed by action identifiers.

mod config;
mod recommender;

pub use config::RecommendationConfig;
pub use recommender::{ChoiceRecommendation, ChoiceRecord, Recommender};
