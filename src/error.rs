//! Error types shared by every subsystem.

use thiserror::Error;

/// Errors surfaced at the crate API boundary.
///
/// Internal enumerations never swallow these; they are propagated with `?`
/// up to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutrankingError {
    /// The performance tableau has no criterion.
    #[error("performance tableau has no criterion")]
    EmptyCriteria,

    /// Thresholds of a criterion are not ordered `ind <= weakPref <= pref`
    /// and `weakVeto <= veto`, or a threshold evaluates negative.
    #[error("threshold order violated on criterion '{criterion}': {detail}")]
    ThresholdOrder { criterion: String, detail: String },

    /// A requested probability, degree or cut level lies outside its domain.
    #[error("{what} = {value} lies outside [{min}, {max}]")]
    DomainOverflow {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Exact enumeration requested above the configured order limit.
    #[error("digraph order {order} exceeds the limit {limit}; {hint}")]
    OrderTooHigh {
        order: usize,
        limit: usize,
        hint: &'static str,
    },

    /// An operation references an action that is not in the action set.
    #[error("action '{0}' is not in the action set")]
    MissingAction(String),

    /// Outranking-specific behaviour requested on a digraph that was not
    /// built from a performance tableau.
    #[error("not an outranking valuation: {0}")]
    NotOutrankingValuation(&'static str),

    /// Valuation domain with `min >= max` or non-finite bounds.
    #[error("invalid valuation domain [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for crate operations.
pub type Result<T> = std::result::Result<T, OutrankingError>;
