//! Choice sets and their bipolar qualities.

use crate::digraph::{ActionSet, ValuedDigraph};

/// A candidate choice `Y ⊆ A` with its qualities measured on a digraph.
///
/// `outranking` and `outranked` are in units of the digraph's valuation
/// domain; the three bipolar characteristics are values of that domain;
/// `determinateness` lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
    /// Member ordinals in increasing order.
    pub members: Vec<usize>,
    /// Mean normalised `|r(x, y) - med|` over `x ∈ Y`, `y ≠ x`.
    pub determinateness: f64,
    /// `Σ max(r(x, y) - med, 0)` over `x ∈ Y`, `y ∉ Y`.
    pub outranking: f64,
    /// `Σ max(r(y, x) - med, 0)` over `x ∈ Y`, `y ∉ Y`.
    pub outranked: f64,
    /// `min` over distinct `x, y ∈ Y` of the negation of `r(x, y)`.
    pub independence: f64,
    /// `min` over `y ∉ Y` of `max` over `x ∈ Y` of `r(x, y)`.
    pub dominance: f64,
    /// `min` over `y ∉ Y` of `max` over `x ∈ Y` of `r(y, x)`.
    pub absorbency: f64,
}

impl Choice {
    /// Measures `members` on `digraph`.
    pub fn measure(digraph: &ValuedDigraph, members: &ActionSet) -> Self {
        let n = digraph.order();
        let domain = digraph.domain();
        let med = domain.med();
        let amplitude = domain.amplitude();
        let inside = members.to_vec();
        let outside: Vec<usize> = (0..n).filter(|&y| !members.contains(y)).collect();

        let mut spread = 0.0;
        let mut pairs = 0usize;
        for &x in &inside {
            for y in (0..n).filter(|&y| y != x) {
                spread += (digraph.get(x, y) - med).abs() / amplitude;
                pairs += 1;
            }
        }
        let determinateness = if pairs > 0 { spread / pairs as f64 } else { 0.0 };

        let mut outranking = 0.0;
        let mut outranked = 0.0;
        for &x in &inside {
            for &y in &outside {
                outranking += (digraph.get(x, y) - med).max(0.0);
                outranked += (digraph.get(y, x) - med).max(0.0);
            }
        }

        let mut independence = domain.max();
        for &x in &inside {
            for &y in &inside {
                if x != y {
                    independence = independence.min(domain.negate(digraph.get(x, y)));
                }
            }
        }

        let best_over = |y: usize, forward: bool| {
            inside
                .iter()
                .map(|&x| {
                    if forward {
                        digraph.get(x, y)
                    } else {
                        digraph.get(y, x)
                    }
                })
                .fold(domain.min(), f64::max)
        };
        let dominance = outside
            .iter()
            .map(|&y| best_over(y, true))
            .fold(domain.max(), f64::min);
        let absorbency = outside
            .iter()
            .map(|&y| best_over(y, false))
            .fold(domain.max(), f64::min);

        Self {
            members: inside,
            determinateness,
            outranking,
            outranked,
            independence,
            dominance,
            absorbency,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `outranking - outranked`.
    pub fn net_outranking(&self) -> f64 {
        self.outranking - self.outranked
    }

    /// Member identifiers.
    pub fn ids(&self, digraph: &ValuedDigraph) -> Vec<String> {
        digraph.ids_of(&self.members)
    }
}

/// Orders choices by decreasing `key`, then larger determinateness, then
/// smaller cardinality. The sort is stable.
pub(crate) fn rank_choices(choices: &mut [Choice], key: impl Fn(&Choice) -> f64) {
    choices.sort_by(|a, b| {
        key(b)
            .total_cmp(&key(a))
            .then(b.determinateness.total_cmp(&a.determinateness))
            .then(a.len().cmp(&b.len()))
    });
}
