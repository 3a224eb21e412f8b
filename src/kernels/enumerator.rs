//! Prekernels and good / bad choice recommendations.

use super::choice::{rank_choices, Choice};
use super::config::KernelConfig;
use super::mis::MisIter;
use crate::digraph::{ActionSet, ValuedDigraph};
use crate::error::Result;
use tracing::{debug, info};

/// Enumerates prekernels and choices of a valued digraph.
///
/// A *dominant prekernel* is a maximal independent set of the symmetric
/// closure in which every non-member is outranked (`r > med`) by some
/// member; an *absorbent prekernel* is one in which every non-member
/// outranks some member. Good choices are dominant prekernels and bad
/// choices absorbent prekernels of the codual (or of the relation itself
/// when [`KernelConfig::use_codual`] is off), measured on the relation.
///
/// # References
///
/// - Bisdorff, Meyer & Roubens (2008), "RUBIS: a bipolar-valued outranking
///   method for the choice problem", *4OR* 6(2)
/// - Bisdorff, Pirlot & Roubens (2006), "Choices and kernels in
///   bipolar valued digraphs", *EJOR* 175
pub struct KernelEnumerator;

impl KernelEnumerator {
    /// Maximal independent sets of the symmetric closure.
    pub fn maximal_independent_sets(
        digraph: &ValuedDigraph,
        config: &KernelConfig,
    ) -> Result<Vec<ActionSet>> {
        config.validate()?;
        let sets: Vec<ActionSet> = MisIter::new(digraph)
            .take(config.max_sets.unwrap_or(usize::MAX))
            .collect();
        debug!(event = "mis_generated", order = digraph.order(), sets = sets.len());
        Ok(sets)
    }

    /// Maximal independent sets whose members outrank every non-member.
    pub fn dominant_prekernels(
        digraph: &ValuedDigraph,
        config: &KernelConfig,
    ) -> Result<Vec<ActionSet>> {
        let gamma = digraph.gamma();
        let sets = Self::maximal_independent_sets(digraph, config)?
            .into_iter()
            .filter(|y| covers(digraph.order(), y, |x| gamma.out_set(x)))
            .collect();
        Ok(sets)
    }

    /// Maximal independent sets outranked by every non-member.
    pub fn absorbent_prekernels(
        digraph: &ValuedDigraph,
        config: &KernelConfig,
    ) -> Result<Vec<ActionSet>> {
        let gamma = digraph.gamma();
        let sets = Self::maximal_independent_sets(digraph, config)?
            .into_iter()
            .filter(|y| covers(digraph.order(), y, |x| gamma.in_set(x)))
            .collect();
        Ok(sets)
    }

    /// Good choices, best first by `outranking - outranked`.
    pub fn good_choices(digraph: &ValuedDigraph, config: &KernelConfig) -> Result<Vec<Choice>> {
        let base = Self::search_digraph(digraph, config);
        let mut choices: Vec<Choice> = Self::dominant_prekernels(&base, config)?
            .iter()
            .map(|y| Choice::measure(digraph, y))
            .collect();
        rank_choices(&mut choices, Choice::net_outranking);
        info!(
            event = "good_choices",
            order = digraph.order(),
            choices = choices.len(),
            codual = config.use_codual,
        );
        Ok(choices)
    }

    /// Bad choices, worst first by `outranked - outranking`.
    pub fn bad_choices(digraph: &ValuedDigraph, config: &KernelConfig) -> Result<Vec<Choice>> {
        let base = Self::search_digraph(digraph, config);
        let mut choices: Vec<Choice> = Self::absorbent_prekernels(&base, config)?
            .iter()
            .map(|y| Choice::measure(digraph, y))
            .collect();
        rank_choices(&mut choices, |c| -c.net_outranking());
        info!(
            event = "bad_choices",
            order = digraph.order(),
            choices = choices.len(),
            codual = config.use_codual,
        );
        Ok(choices)
    }

    fn search_digraph(digraph: &ValuedDigraph, config: &KernelConfig) -> ValuedDigraph {
        if config.use_codual {
            digraph.codual()
        } else {
            digraph.clone()
        }
    }
}

/// Every ordinal outside `y` belongs to `reach(x)` for some `x ∈ y`.
fn covers<'a>(n: usize, y: &ActionSet, reach: impl Fn(usize) -> &'a ActionSet) -> bool {
    let mut covered = y.clone();
    for x in y.iter() {
        covered.union_with(reach(x));
    }
    covered.len() == n
}
