//! Score based ranking rules: net flows, Copeland and Kohler.

use super::config::{KohlerConfig, RankingRule};
use super::engine::RankingEngine;
use super::types::{order_by_scores, pick_best, LinearRanking, SCORE_EPSILON};
use crate::digraph::ValuedDigraph;
use crate::error::Result;
use std::cmp::Ordering;
use tracing::debug;

/// Net flow of `a` against the actions of `among`.
fn net_flow(digraph: &ValuedDigraph, a: usize, among: &[usize]) -> f64 {
    among
        .iter()
        .filter(|&&b| b != a)
        .map(|&b| digraph.get(a, b) - digraph.get(b, a))
        .sum()
}

/// Copeland score of `a` against the actions of `among`: the net flow of
/// the median-cut polarised relation in the normalised domain.
fn copeland(digraph: &ValuedDigraph, a: usize, among: &[usize]) -> f64 {
    let med = digraph.med();
    let sign = |v: f64| {
        if v > med {
            1.0
        } else if v < med {
            -1.0
        } else {
            0.0
        }
    };
    among
        .iter()
        .filter(|&&b| b != a)
        .map(|&b| sign(digraph.get(a, b)) - sign(digraph.get(b, a)))
        .sum()
}

/// Picks the best residual action by `score` until none is left. Returns
/// the order and the score each action had when it was picked.
fn iterate(
    digraph: &ValuedDigraph,
    rule: RankingRule,
    score: impl Fn(&ValuedDigraph, usize, &[usize]) -> f64,
) -> (Vec<usize>, Vec<f64>) {
    let n = digraph.order();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut order = Vec::with_capacity(n);
    let mut stage_scores = vec![0.0; n];
    while !remaining.is_empty() {
        let scores: Vec<f64> = remaining
            .iter()
            .map(|&a| score(digraph, a, &remaining))
            .collect();
        let Some(k) = pick_best(0..remaining.len(), |k| scores[k]) else {
            break;
        };
        let best = remaining.remove(k);
        debug!(
            event = "rank_pick",
            rule = %rule,
            position = order.len(),
            action = digraph.action_id(best),
            score = scores[k],
        );
        stage_scores[best] = scores[k];
        order.push(best);
    }
    (order, stage_scores)
}

/// Net flows rule: decreasing `Σ_b r(a, b) - r(b, a)`.
pub struct NetFlows;

impl NetFlows {
    /// Net flow score of every action.
    pub fn scores(digraph: &ValuedDigraph) -> Vec<f64> {
        let all: Vec<usize> = (0..digraph.order()).collect();
        all.iter().map(|&a| net_flow(digraph, a, &all)).collect()
    }
}

impl RankingEngine for NetFlows {
    fn rule(&self) -> RankingRule {
        RankingRule::NetFlows
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        let scores = Self::scores(digraph);
        let order = order_by_scores(&scores);
        Ok(LinearRanking::new(self.rule(), digraph, order, Some(scores)))
    }
}

/// Net flows recomputed on the remaining actions after every pick.
pub struct IteratedNetFlows;

impl RankingEngine for IteratedNetFlows {
    fn rule(&self) -> RankingRule {
        RankingRule::IteratedNetFlows
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        let (order, scores) = iterate(digraph, self.rule(), net_flow);
        Ok(LinearRanking::new(self.rule(), digraph, order, Some(scores)))
    }
}

/// Copeland rule: `|Γ⁺(a)| - |Γ⁻(a)|` corrected for the negated pairs,
/// i.e. net flows of the median-cut polarised relation.
pub struct Copeland;

impl Copeland {
    /// Copeland score of every action.
    pub fn scores(digraph: &ValuedDigraph) -> Vec<f64> {
        let all: Vec<usize> = (0..digraph.order()).collect();
        all.iter().map(|&a| copeland(digraph, a, &all)).collect()
    }
}

impl RankingEngine for Copeland {
    fn rule(&self) -> RankingRule {
        RankingRule::Copeland
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        let scores = Self::scores(digraph);
        let order = order_by_scores(&scores);
        Ok(LinearRanking::new(self.rule(), digraph, order, Some(scores)))
    }
}

/// Copeland scores recomputed on the remaining actions after every pick.
pub struct IteratedCopeland;

impl RankingEngine for IteratedCopeland {
    fn rule(&self) -> RankingRule {
        RankingRule::IteratedCopeland
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        let (order, scores) = iterate(digraph, self.rule(), copeland);
        Ok(LinearRanking::new(self.rule(), digraph, order, Some(scores)))
    }
}

/// Kohler rule: repeatedly rank first the remaining action whose smallest
/// outgoing value towards the other remaining actions is largest.
///
/// The recorded score of an action is that maximin value at the stage it
/// was picked; the last action, having no opponent left, scores `max`.
pub struct Kohler {
    config: KohlerConfig,
}

impl Kohler {
    pub fn new(config: KohlerConfig) -> Self {
        Self { config }
    }
}

impl RankingEngine for Kohler {
    fn rule(&self) -> RankingRule {
        RankingRule::Kohler
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        let n = digraph.order();
        let top = digraph.domain().max();
        let mut remaining: Vec<usize> = (0..n).collect();
        let mut order = Vec::with_capacity(n);
        let mut scores = vec![top; n];
        while !remaining.is_empty() {
            // ascending outgoing values of each remaining action
            let rows: Vec<Vec<f64>> = remaining
                .iter()
                .map(|&a| {
                    let mut row: Vec<f64> = remaining
                        .iter()
                        .filter(|&&b| b != a)
                        .map(|&b| digraph.get(a, b))
                        .collect();
                    row.sort_by(f64::total_cmp);
                    row
                })
                .collect();
            let minimum = |k: usize| rows[k].first().copied().unwrap_or(top);
            let mut best = 0;
            for k in 1..remaining.len() {
                let better = if self.config.leximin {
                    leximin_cmp(&rows[k], &rows[best]) == Ordering::Greater
                } else {
                    minimum(k) > minimum(best) + SCORE_EPSILON
                };
                if better {
                    best = k;
                }
            }
            let a = remaining.remove(best);
            scores[a] = minimum(best);
            order.push(a);
        }
        Ok(LinearRanking::new(self.rule(), digraph, order, Some(scores)))
    }
}

/// Lexicographic comparison of ascending rows with tolerance.
fn leximin_cmp(x: &[f64], y: &[f64]) -> Ordering {
    for (a, b) in x.iter().zip(y) {
        if a > &(b + SCORE_EPSILON) {
            return Ordering::Greater;
        }
        if b > &(a + SCORE_EPSILON) {
            return Ordering::Less;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digraph::{Action, ValuationDomain};
    use crate::outranking::{OutrankingBuilder, OutrankingConfig, ValuationMode};
    use crate::tableau::{Criterion, Evaluation, PerformanceTableau, Threshold};

    fn single_criterion() -> PerformanceTableau {
        PerformanceTableau::new(
            ["a", "b", "c"].iter().map(|id| Action::new(*id)).collect(),
            vec![Criterion::new("g", 1.0)
                .with_ind(Threshold::constant(0.0))
                .with_pref(Threshold::constant(1.0))],
            vec![[3.0, 2.0, 1.0].iter().map(|&x| Evaluation::Number(x)).collect()],
        )
        .unwrap()
    }

    fn condorcet_triple() -> PerformanceTableau {
        // g1: a > b > c, g2: b > c > a, g3: c > a > b
        let rows = [[3.0, 2.0, 1.0], [1.0, 3.0, 2.0], [2.0, 1.0, 3.0]];
        PerformanceTableau::new(
            ["a", "b", "c"].iter().map(|id| Action::new(*id)).collect(),
            (1..=3)
                .map(|i| {
                    Criterion::new(format!("g{i}"), 1.0)
                        .with_ind(Threshold::constant(0.0))
                        .with_pref(Threshold::constant(1.0))
                })
                .collect(),
            rows.iter()
                .map(|r| r.iter().map(|&x| Evaluation::Number(x)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn matrix(rows: &[Vec<f64>]) -> ValuedDigraph {
        let ids = ["a", "b", "c", "d"];
        ValuedDigraph::from_matrix(
            ids[..rows.len()].iter().map(|x| Action::new(*x)).collect(),
            ValuationDomain::normalized(),
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_netflows_single_criterion() {
        let g = OutrankingBuilder::build_default(&single_criterion()).unwrap();
        let r = NetFlows.rank(&g).unwrap();
        assert_eq!(r.ranking(), ["a", "b", "c"]);
        let s = r.scores().unwrap();
        assert!((s[0] - 4.0).abs() < 1e-12);
        assert!(s[1].abs() < 1e-12);
        assert!((s[2] + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_condorcet_triple_tie() {
        let g = OutrankingBuilder::build_default(&condorcet_triple()).unwrap();
        assert!((g.value("a", "b").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert!((g.value("b", "a").unwrap() + 1.0 / 3.0).abs() < 1e-12);
        let r = NetFlows.rank(&g).unwrap();
        assert!(r.scores().unwrap().iter().all(|s| s.abs() < 1e-9));
        assert_eq!(r.ranking(), ["a", "b", "c"]);
        let c = Copeland.rank(&g).unwrap();
        assert!(c.scores().unwrap().iter().all(|s| s.abs() < 1e-9));
    }

    #[test]
    fn test_copeland_counts_signs() {
        // a > b strongly, b > c weakly, c ~ a indeterminate
        let g = matrix(&[
            vec![0.0, 0.9, 0.0],
            vec![-0.9, 0.0, 0.1],
            vec![0.0, -0.1, 0.0],
        ]);
        assert_eq!(Copeland::scores(&g), vec![2.0, 0.0, -2.0]);
        assert_eq!(Copeland.rank(&g).unwrap().ranking(), ["a", "b", "c"]);
    }

    #[test]
    fn test_iterated_netflows_recomputes() {
        // d only beats a; once a is ranked first, d drops below b and c
        let g = matrix(&[
            vec![0.0, 1.0, 1.0, -1.0],
            vec![-1.0, 0.0, 0.2, 0.1],
            vec![-1.0, -0.2, 0.0, 0.1],
            vec![1.0, -0.1, -0.1, 0.0],
        ]);
        let nf = NetFlows::scores(&g);
        // a 2.0, b -1.4, c -2.2, d 1.6
        assert_eq!(NetFlows.rank(&g).unwrap().ranking(), ["a", "d", "b", "c"]);
        assert!(nf[3] > nf[1]);
        // residual {b, c, d}: b 0.6, c -0.2, d -0.4
        let it = IteratedNetFlows.rank(&g).unwrap();
        assert_eq!(it.ranking(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_kohler_maximin() {
        let g = matrix(&[
            vec![0.0, 0.5, -0.2],
            vec![-0.5, 0.0, 0.4],
            vec![0.2, -0.4, 0.0],
        ]);
        // row minima: a -0.2, b -0.5, c -0.4 -> a first
        // then b vs c: r(b, c) = 0.4, r(c, b) = -0.4 -> b
        let r = Kohler::new(KohlerConfig::default()).rank(&g).unwrap();
        assert_eq!(r.ranking(), ["a", "b", "c"]);
        let s = r.scores().unwrap();
        assert!((s[0] + 0.2).abs() < 1e-12);
        assert!((s[1] - 0.4).abs() < 1e-12);
        assert_eq!(s[2], 1.0);
    }

    #[test]
    fn test_kohler_leximin_breaks_ties() {
        // a and b share the row minimum -0.5; b's second value is higher
        let g = matrix(&[
            vec![0.0, -0.5, 0.1, 0.2],
            vec![0.3, 0.0, -0.5, 0.6],
            vec![-0.6, 0.5, 0.0, 0.0],
            vec![-0.7, -0.6, -0.8, 0.0],
        ]);
        let plain = Kohler::new(KohlerConfig::default()).rank(&g).unwrap();
        assert_eq!(plain.ranking()[0], "a");
        let lex = Kohler::new(KohlerConfig::default().with_leximin(true))
            .rank(&g)
            .unwrap();
        assert_eq!(lex.ranking()[0], "b");
    }

    #[test]
    fn test_integer_and_normalized_agree() {
        let t = condorcet_triple();
        let int = OutrankingBuilder::build(
            &t,
            &OutrankingConfig::default().with_valuation(ValuationMode::Integer),
        )
        .unwrap();
        let norm = OutrankingBuilder::build_default(&t).unwrap();
        for engine in [&NetFlows as &dyn RankingEngine, &Copeland, &IteratedCopeland] {
            assert_eq!(
                engine.rank(&int).unwrap().indices(),
                engine.rank(&norm).unwrap().indices()
            );
        }
    }
}
