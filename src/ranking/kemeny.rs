//! Exact Kemeny and Slater rankings and the ranking consensus quality.

use super::config::{KemenyConfig, RankingRule};
use super::engine::RankingEngine;
use super::scores::NetFlows;
use super::types::{kemeny_score, order_by_scores, LinearRanking, SCORE_EPSILON};
use crate::digraph::{kendall_tau, ValuedDigraph};
use crate::error::Result;
use crate::parallel::map_indexed;
use tracing::{debug, info};

/// Agreement of a ranking with the marginal rankings of the criteria.
///
/// Each criterion is ranked by net flows on its marginal relation; its
/// correlation is Kendall's `τ` between that order and the ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsensusQuality {
    /// `τ` per criterion, in criterion order.
    pub correlations: Vec<f64>,
    /// Weighted mean of the correlations.
    pub mean: f64,
    /// Weighted standard deviation of the correlations.
    pub standard_deviation: f64,
}

impl ConsensusQuality {
    /// `mean - standard_deviation`.
    pub fn fairness(&self) -> f64 {
        self.mean - self.standard_deviation
    }
}

/// Consensus quality of `ranking` (ordinals, best first) with respect to
/// the criteria behind an outranking digraph.
///
/// # Errors
/// `NotOutrankingValuation` when `digraph` carries no performance tableau.
pub fn consensus_quality(digraph: &ValuedDigraph, ranking: &[usize]) -> Result<ConsensusQuality> {
    let provenance = digraph.require_outranking("ranking consensus quality")?;
    let weights = provenance.criterion_weights();
    let total: f64 = weights.iter().sum();
    let correlations = provenance
        .marginal_relations()?
        .iter()
        .map(|marginal| {
            let order = order_by_scores(&NetFlows::scores(marginal));
            kendall_tau(ranking, &order)
        })
        .collect::<Vec<f64>>();
    let mean: f64 = correlations
        .iter()
        .zip(&weights)
        .map(|(t, w)| t * w / total)
        .sum();
    let variance: f64 = correlations
        .iter()
        .zip(&weights)
        .map(|(t, w)| (t - mean).powi(2) * w / total)
        .sum();
    Ok(ConsensusQuality {
        correlations,
        mean,
        standard_deviation: variance.sqrt(),
    })
}

/// Lexicographic successor of `v` in place; `false` on the last permutation.
fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }
    let mut i = v.len() - 1;
    while i > 0 && v[i - 1] >= v[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = v.len() - 1;
    while v[j] <= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

/// Best score and maximal permutations among those starting with `first`.
fn best_with_prefix(digraph: &ValuedDigraph, first: usize) -> (f64, Vec<Vec<usize>>) {
    let n = digraph.order();
    let mut perm: Vec<usize> = std::iter::once(first)
        .chain((0..n).filter(|&a| a != first))
        .collect();
    let mut best = f64::NEG_INFINITY;
    let mut maximal: Vec<Vec<usize>> = Vec::new();
    loop {
        let score = kemeny_score(digraph, &perm);
        if score > best + SCORE_EPSILON {
            best = score;
            maximal.clear();
            maximal.push(perm.clone());
        } else if score >= best - SCORE_EPSILON {
            maximal.push(perm.clone());
        }
        if !next_permutation(&mut perm[1..]) {
            break;
        }
    }
    (best, maximal)
}

/// Exact Kemeny rule.
///
/// Every permutation is scored with `Σ_{i<j} (r(x_i, x_j) - med)`; the
/// maximal ones are kept in lexicographic order. When several permutations
/// are maximal and the digraph is an outranking digraph, the one with the
/// highest [`ConsensusQuality::mean`], then the lowest standard deviation,
/// wins; otherwise the lexicographically first one.
pub struct Kemeny {
    config: KemenyConfig,
}

impl Kemeny {
    pub fn new(config: KemenyConfig) -> Self {
        Self { config }
    }

    /// Every maximal permutation (ordinals, best first) and the maximal
    /// Kemeny index.
    ///
    /// # Errors
    /// `OrderTooHigh` above [`KemenyConfig::order_limit`].
    pub fn optimal_orders(&self, digraph: &ValuedDigraph) -> Result<(Vec<Vec<usize>>, f64)> {
        self.config.validate()?;
        let n = digraph.order();
        self.config.check_order(n)?;
        if n == 0 {
            return Ok((vec![Vec::new()], 0.0));
        }
        let chunks = map_indexed(n, self.config.parallel, |first| {
            best_with_prefix(digraph, first)
        });
        let best = chunks
            .iter()
            .map(|(s, _)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        let orders: Vec<Vec<usize>> = chunks
            .into_iter()
            .filter(|(s, _)| *s >= best - SCORE_EPSILON)
            .flat_map(|(_, perms)| perms)
            .collect();
        debug!(event = "kemeny_enumerated", order = n, optimal = orders.len(), index = best);
        Ok((orders, best))
    }

    /// Ranks `scored` exactly; ties between maximal permutations are broken
    /// with the criteria behind `reference` when it has any.
    fn rank_with(
        &self,
        rule: RankingRule,
        scored: &ValuedDigraph,
        reference: &ValuedDigraph,
    ) -> Result<LinearRanking> {
        let (mut orders, index) = self.optimal_orders(scored)?;
        let ties = orders.len();
        let mut chosen = 0;
        if ties > 1 && reference.outranking().is_some() {
            let qualities = orders
                .iter()
                .map(|o| consensus_quality(reference, o))
                .collect::<Result<Vec<_>>>()?;
            for k in 1..ties {
                let (q, b) = (&qualities[k], &qualities[chosen]);
                let better = q.mean > b.mean + SCORE_EPSILON
                    || ((q.mean - b.mean).abs() <= SCORE_EPSILON
                        && q.standard_deviation < b.standard_deviation - SCORE_EPSILON);
                if better {
                    chosen = k;
                }
            }
        }
        info!(
            event = "kemeny_ranking",
            rule = %rule,
            order = scored.order(),
            index,
            ties,
        );
        let order = orders.swap_remove(chosen);
        Ok(LinearRanking::new(rule, reference, order, None))
    }
}

impl RankingEngine for Kemeny {
    fn rule(&self) -> RankingRule {
        RankingRule::Kemeny
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        self.rank_with(self.rule(), digraph, digraph)
    }
}

/// Slater rule: Kemeny on the median-cut polarised relation.
pub struct Slater {
    kemeny: Kemeny,
}

impl Slater {
    pub fn new(config: KemenyConfig) -> Self {
        Self {
            kemeny: Kemeny::new(config),
        }
    }
}

impl RankingEngine for Slater {
    fn rule(&self) -> RankingRule {
        RankingRule::Slater
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        let polarised = digraph.polarise(digraph.med(), true)?;
        self.kemeny.rank_with(self.rule(), &polarised, digraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digraph::{Action, ValuationDomain};
    use crate::error::OutrankingError;
    use crate::outranking::OutrankingBuilder;
    use crate::random::{
        RandomDigraphConfig, RandomPerformanceTableau, RandomTableauConfig, RandomValuedDigraph,
    };
    use crate::tableau::{Criterion, Evaluation, PerformanceTableau, Threshold};
    use proptest::prelude::*;

    fn kemeny_vs_netflows() -> ValuedDigraph {
        ValuedDigraph::from_matrix(
            ["a", "b", "c", "d"].iter().map(|x| Action::new(*x)).collect(),
            ValuationDomain::normalized(),
            &[
                vec![0.0, 0.1, 1.0, 1.0],
                vec![-0.1, 0.0, -0.2, 1.0],
                vec![-1.0, 0.2, 0.0, 0.1],
                vec![-1.0, -1.0, -0.1, 0.0],
            ],
        )
        .unwrap()
    }

    fn condorcet_triple() -> ValuedDigraph {
        let rows = [[3.0, 2.0, 1.0], [1.0, 3.0, 2.0], [2.0, 1.0, 3.0]];
        let t = PerformanceTableau::new(
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
        .unwrap();
        OutrankingBuilder::build_default(&t).unwrap()
    }

    #[test]
    fn test_next_permutation() {
        let mut v = vec![0, 1, 2];
        let mut all = vec![v.clone()];
        while next_permutation(&mut v) {
            all.push(v.clone());
        }
        assert_eq!(all.len(), 6);
        assert_eq!(all[1], vec![0, 2, 1]);
        assert_eq!(all[5], vec![2, 1, 0]);
    }

    #[test]
    fn test_kemeny_beats_netflows() {
        let g = kemeny_vs_netflows();
        let nf = NetFlows.rank(&g).unwrap();
        assert_eq!(nf.ranking(), ["a", "b", "c", "d"]);

        let kemeny = Kemeny::new(KemenyConfig::default());
        let (orders, index) = kemeny.optimal_orders(&g).unwrap();
        assert_eq!(orders, vec![vec![0, 2, 1, 3]]);
        assert!((index - 3.4).abs() < 1e-9);

        let r = kemeny.rank(&g).unwrap();
        assert_eq!(r.ranking(), ["a", "c", "b", "d"]);
        assert!(r.kemeny_index(&g).unwrap() > nf.kemeny_index(&g).unwrap() + 1e-9);
    }

    #[test]
    fn test_order_limit() {
        let config = RandomDigraphConfig::default().with_order(8).with_seed(1);
        let g = RandomValuedDigraph::generate(&config).unwrap();
        let err = Kemeny::new(KemenyConfig::default()).rank(&g).unwrap_err();
        assert!(matches!(
            err,
            OutrankingError::OrderTooHigh { order: 8, limit: 7, .. }
        ));
        let err = Slater::new(KemenyConfig::default()).rank(&g).unwrap_err();
        assert!(matches!(err, OutrankingError::OrderTooHigh { .. }));
    }

    #[test]
    fn test_condorcet_triple_ties() {
        let g = condorcet_triple();
        let kemeny = Kemeny::new(KemenyConfig::default());
        let (orders, index) = kemeny.optimal_orders(&g).unwrap();
        assert_eq!(orders, vec![vec![0, 1, 2], vec![1, 2, 0], vec![2, 0, 1]]);
        assert!((index - 1.0 / 3.0).abs() < 1e-9);
        // symmetric instance: every maximal order has the same consensus
        let q = consensus_quality(&g, &[0, 1, 2]).unwrap();
        assert!((q.correlations[0] - 1.0).abs() < 1e-12);
        assert!((q.correlations[1] + 1.0 / 3.0).abs() < 1e-12);
        assert!((q.mean - 1.0 / 9.0).abs() < 1e-12);
        assert_eq!(kemeny.rank(&g).unwrap().ranking(), ["a", "b", "c"]);
    }

    #[test]
    fn test_consensus_needs_outranking() {
        let g = kemeny_vs_netflows();
        assert!(matches!(
            consensus_quality(&g, &[0, 1, 2, 3]),
            Err(OutrankingError::NotOutrankingValuation(_))
        ));
    }

    #[test]
    fn test_slater_on_crisp_chain() {
        let g = ValuedDigraph::from_arcs(&["a", "b", "c"], &[("b", "a"), ("b", "c"), ("a", "c")])
            .unwrap();
        let r = Slater::new(KemenyConfig::default()).rank(&g).unwrap();
        assert_eq!(r.rule(), RankingRule::Slater);
        assert_eq!(r.ranking(), ["b", "a", "c"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = RandomDigraphConfig::default().with_order(6).with_seed(4);
        let g = RandomValuedDigraph::generate(&config).unwrap();
        let seq = Kemeny::new(KemenyConfig::default()).optimal_orders(&g).unwrap();
        let par = Kemeny::new(KemenyConfig::default().with_parallel(true))
            .optimal_orders(&g)
            .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_chosen_order_has_best_consensus() {
        for seed in 0..5 {
            let config = RandomTableauConfig::default().with_actions(5).with_seed(seed);
            let t = RandomPerformanceTableau::generate(&config).unwrap();
            let g = OutrankingBuilder::build_default(&t).unwrap();
            let kemeny = Kemeny::new(KemenyConfig::default());
            let (orders, _) = kemeny.optimal_orders(&g).unwrap();
            let chosen = kemeny.rank(&g).unwrap();
            let best = consensus_quality(&g, chosen.indices()).unwrap().mean;
            for o in &orders {
                assert!(consensus_quality(&g, o).unwrap().mean <= best + 1e-9);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_kemeny_optimal(
            (n, perm) in (2usize..7).prop_flat_map(|n| {
                (Just(n), Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
            }),
            seed in any::<u64>(),
        ) {
            let config = RandomDigraphConfig::default().with_order(n).with_seed(seed);
            let g = RandomValuedDigraph::generate(&config).unwrap();
            let r = Kemeny::new(KemenyConfig::default()).rank(&g).unwrap();
            let best = r.kemeny_index(&g).unwrap();
            prop_assert!(best >= kemeny_score(&g, &perm) - 1e-9);
        }
    }
}
