//! Maximal independent sets, prekernels and choice recommendations.
//!
//! A choice is a subset of actions recommended as best (or worst)
//! candidates. Good choices are independent sets of the strict outranking
//! relation that outrank every other action; bad choices are independent
//! sets outranked by every other action.
//!
//! # Key Types
//!
//! - [`KernelConfig`]: codual search and output bound
//! - [`MisIter`]: lazy maximal independent set generator
//! - [`KernelEnumerator`]: prekernels, good and bad choices
//! - [`Choice`]: a choice with its bipolar qualities

mod choice;
mod config;
mod enumerator;
mod mis;

pub use choice::Choice;
pub use config::KernelConfig;
pub use enumerator::KernelEnumerator;
pub use mis::MisIter;
