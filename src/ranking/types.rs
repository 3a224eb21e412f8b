//! Linear rankings and the score-ordering helpers shared by the rules.

use super::config::RankingRule;
use crate::digraph::{OrdinalCorrelation, ValuedDigraph};
use crate::error::{OutrankingError, Result};
use std::fmt::Write as _;

/// Scores closer than this are tied.
pub(crate) const SCORE_EPSILON: f64 = 1e-9;

/// A linear ranking of the actions of a digraph.
///
/// Stores the ranked ordinals best first together with the action
/// identifiers, so the ranking can be applied to any digraph over the same
/// identifiers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearRanking {
    rule: RankingRule,
    order: Vec<usize>,
    ids: Vec<String>,
    scores: Option<Vec<f64>>,
}

impl LinearRanking {
    /// `order` lists ordinals of `digraph` best first; `scores`, when
    /// present, is indexed by ordinal.
    pub(crate) fn new(
        rule: RankingRule,
        digraph: &ValuedDigraph,
        order: Vec<usize>,
        scores: Option<Vec<f64>>,
    ) -> Self {
        let ids = digraph.ids_of(&order);
        Self {
            rule,
            order,
            ids,
            scores,
        }
    }

    pub fn rule(&self) -> RankingRule {
        self.rule
    }

    /// Ordinals, best first.
    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    /// Action identifiers, best first.
    pub fn ranking(&self) -> &[String] {
        &self.ids
    }

    /// Action identifiers, worst first.
    pub fn ordering(&self) -> Vec<String> {
        self.ids.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rank position (0 = best) of an action.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|x| x == id)
    }

    /// Rule scores by ordinal, for score-based rules.
    pub fn scores(&self) -> Option<&[f64]> {
        self.scores.as_deref()
    }

    /// Score table, one line per rank position.
    pub fn show_scores(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ranking", self.rule);
        let width = self.ids.iter().map(|s| s.len()).max().unwrap_or(0).max(6);
        let _ = writeln!(out, "{:>4}  {:<width$}  {:>10}", "rank", "action", "score");
        for (p, (&a, id)) in self.order.iter().zip(&self.ids).enumerate() {
            match &self.scores {
                Some(s) => {
                    let _ = writeln!(out, "{:>4}  {:<width$}  {:>+10.4}", p + 1, id, s[a]);
                }
                None => {
                    let _ = writeln!(out, "{:>4}  {:<width$}  {:>10}", p + 1, id, "-");
                }
            }
        }
        out
    }

    /// Rank position of every ordinal of `digraph`.
    fn positions(&self, digraph: &ValuedDigraph) -> Result<Vec<usize>> {
        let n = digraph.order();
        if self.ids.len() != n {
            return Err(OutrankingError::InvalidConfig(format!(
                "ranking lists {} actions, digraph has {n}",
                self.ids.len()
            )));
        }
        let mut position = vec![0usize; n];
        for (p, id) in self.ids.iter().enumerate() {
            position[digraph.action_index(id)?] = p;
        }
        Ok(position)
    }

    /// Crisp linear order in the domain of `digraph`: `max` when `a` is
    /// ranked before `b`, `min` otherwise.
    pub fn relation(&self, digraph: &ValuedDigraph) -> Result<ValuedDigraph> {
        let position = self.positions(digraph)?;
        let d = *digraph.domain();
        ValuedDigraph::from_fn(digraph.actions().to_vec(), d, |a, b| {
            if position[a] < position[b] {
                d.max()
            } else {
                d.min()
            }
        })
        .map(|g| g.with_name(format!("{}_ranked", digraph.name())))
    }

    /// Linear order keeping the values of `digraph` that agree with the
    /// ranking; disagreeing values become `med`.
    pub fn valued_relation(&self, digraph: &ValuedDigraph) -> Result<ValuedDigraph> {
        let position = self.positions(digraph)?;
        let med = digraph.med();
        ValuedDigraph::from_fn(digraph.actions().to_vec(), *digraph.domain(), |a, b| {
            if position[a] < position[b] {
                digraph.get(a, b).max(med)
            } else {
                digraph.get(a, b).min(med)
            }
        })
        .map(|g| g.with_name(format!("{}_ranked", digraph.name())))
    }

    /// `Σ_{i<j} (r(x_i, x_j) - med)` over the ranked actions.
    pub fn kemeny_index(&self, digraph: &ValuedDigraph) -> Result<f64> {
        let position = self.positions(digraph)?;
        let mut order = vec![0usize; position.len()];
        for (a, &p) in position.iter().enumerate() {
            order[p] = a;
        }
        Ok(kemeny_score(digraph, &order))
    }

    /// Ordinal correlation between `digraph` and this ranking.
    pub fn correlation(&self, digraph: &ValuedDigraph) -> Result<OrdinalCorrelation> {
        digraph.ranking_correlation(&self.ids)
    }
}

/// Kemeny score of a permutation of ordinals.
pub(crate) fn kemeny_score(digraph: &ValuedDigraph, order: &[usize]) -> f64 {
    let med = digraph.med();
    let mut score = 0.0;
    for (i, &x) in order.iter().enumerate() {
        for &y in &order[i + 1..] {
            score += digraph.get(x, y) - med;
        }
    }
    score
}

/// First candidate with the highest score; a later candidate must beat
/// the current best by more than [`SCORE_EPSILON`].
pub(crate) fn pick_best(
    candidates: impl IntoIterator<Item = usize>,
    score: impl Fn(usize) -> f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for a in candidates {
        let s = score(a);
        match best {
            Some((_, bs)) if s <= bs + SCORE_EPSILON => {}
            _ => best = Some((a, s)),
        }
    }
    best.map(|(a, _)| a)
}

/// Ordinals by decreasing score, ties in ordinal order.
pub(crate) fn order_by_scores(scores: &[f64]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..scores.len()).collect();
    let mut order = Vec::with_capacity(scores.len());
    while let Some(best) = pick_best(remaining.iter().copied(), |a| scores[a]) {
        remaining.retain(|&a| a != best);
        order.push(best);
    }
    order
}
