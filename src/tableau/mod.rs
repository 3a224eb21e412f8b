//! Performance tableaux.
//!
//! A [`PerformanceTableau`] evaluates a set of actions on a family of
//! weighted [`Criterion`]s. Each criterion carries a preference direction,
//! a measurement scale and affine discrimination [`Thresholds`]
//! (indifference, weak preference, preference, weak veto, veto). Missing
//! evaluations are the distinguished [`Evaluation::NotApplicable`] value.

mod performance;
mod types;

pub use performance::PerformanceTableau;
pub use types::{Criterion, Evaluation, PreferenceDirection, Scale, Threshold, Thresholds};
