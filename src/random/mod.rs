//! Seeded random generators.
//!
//! Produce performance tableaux and valued digraphs with reproducible
//! content for a fixed seed. Only the output contract matters; the
//! generators are used to exercise the engine in tests and benchmarks.

mod config;
mod generator;

pub use config::{RandomDigraphConfig, RandomTableauConfig, WeightDistribution};
pub use generator::{RandomPerformanceTableau, RandomValuedDigraph};
