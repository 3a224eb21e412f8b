//! Bipolar-valued digraphs.
//!
//! A [`ValuedDigraph`] pairs a set of [`Action`]s with a [`ValuationDomain`]
//! and a dense characteristic relation. Values above the domain median
//! assert the arc, values below deny it, and the median itself is the
//! indeterminate value.
//!
//! # Key Types
//!
//! - [`ValuationDomain`]: the `(min, med, max)` interval
//! - [`ValuedDigraph`]: the relation with its derived gamma sets
//! - [`FusionOperator`]: epistemic disjunction / conjunction operators
//! - [`OrdinalCorrelation`]: agreement between two relations
//!
//! # Operations
//!
//! Relation algebra (dual, converse, codual, polarisation, recoding,
//! fusion) lives in `algebra`, strong components and the prudent cut
//! level in `components`, ordinal correlation in `correlation`.
//!
//! # References
//!
//! - Bisdorff (2013), "On polarizing outranking relations with large
//!   performance differences", *J. Multi-Criteria Decision Analysis*
//! - Bisdorff (2012), "On measuring and testing the ordinal correlation
//!   between valued outranking relations", *Annals of Operations Research*

mod algebra;
mod components;
mod correlation;
mod domain;
mod types;
mod valued;

pub use algebra::{fusion_all, oaverage, omax, omin, symmetric_average, FusionOperator};
pub use correlation::{kendall_tau, OrdinalCorrelation};
pub use domain::ValuationDomain;
pub use types::{Action, ActionSet, GammaSets};
pub use valued::ValuedDigraph;

pub(crate) use components::strong_components_of;
pub(crate) use correlation::linear_order;
pub(crate) use valued::build_index;
