//! Ranked pairs (lexmax Dias-Lamboray) and its extended prudent variant.

use super::config::{RankedPairsConfig, RankingRule};
use super::engine::RankingEngine;
use super::types::LinearRanking;
use crate::digraph::ValuedDigraph;
use crate::error::Result;
use tracing::debug;

/// Ranked pairs rule.
///
/// Ordered pairs are visited by decreasing margin `r(a, b) - r(b, a)`
/// (stable over the action order). A pair whose two directions are still
/// open is fixed as `a` before `b` unless that closes a circuit with the
/// arcs fixed so far. The final relation is a complete acyclic tournament;
/// actions are ranked by decreasing number of actions they precede.
///
/// With [`RankedPairsConfig::prudent_seed`] the arcs of the codual cut at
/// its prudent level are fixed first. That cut is acyclic by definition of
/// the level.
pub struct RankedPairs {
    config: RankedPairsConfig,
}

impl RankedPairs {
    pub fn new(config: RankedPairsConfig) -> Self {
        Self { config }
    }
}

/// Growing strict partial order on action ordinals.
struct Tournament {
    n: usize,
    before: Vec<bool>,
}

impl Tournament {
    fn new(n: usize) -> Self {
        Self {
            n,
            before: vec![false; n * n],
        }
    }

    fn is_open(&self, a: usize, b: usize) -> bool {
        !self.before[a * self.n + b] && !self.before[b * self.n + a]
    }

    /// Whether `to` is reachable from `from` along fixed arcs.
    fn reaches(&self, from: usize, to: usize) -> bool {
        let mut seen = vec![false; self.n];
        let mut stack = vec![from];
        seen[from] = true;
        while let Some(v) = stack.pop() {
            if v == to {
                return true;
            }
            for w in 0..self.n {
                if self.before[v * self.n + w] && !seen[w] {
                    seen[w] = true;
                    stack.push(w);
                }
            }
        }
        false
    }

    /// Fixes `a` before `b` unless `b` already reaches `a`.
    fn try_fix(&mut self, a: usize, b: usize) -> bool {
        if self.reaches(b, a) {
            return false;
        }
        self.before[a * self.n + b] = true;
        true
    }

    fn out_degree(&self, a: usize) -> usize {
        (0..self.n).filter(|&b| self.before[a * self.n + b]).count()
    }
}

impl RankingEngine for RankedPairs {
    fn rule(&self) -> RankingRule {
        if self.config.prudent_seed {
            RankingRule::ExtendedPrudent
        } else {
            RankingRule::RankedPairs
        }
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        let n = digraph.order();
        let mut tournament = Tournament::new(n);

        if self.config.prudent_seed {
            let codual = digraph.codual();
            if let Some(level) = codual.prudent_beta_level() {
                let mut seeded = 0usize;
                for a in 0..n {
                    for b in 0..n {
                        if a != b && codual.get(a, b) >= level && tournament.try_fix(a, b) {
                            seeded += 1;
                        }
                    }
                }
                debug!(event = "prudent_seed", level, arcs = seeded);
            }
        }

        let mut pairs: Vec<(usize, usize, f64)> = Vec::with_capacity(n * n.saturating_sub(1));
        for a in 0..n {
            for b in 0..n {
                if a != b {
                    pairs.push((a, b, digraph.get(a, b) - digraph.get(b, a)));
                }
            }
        }
        pairs.sort_by(|x, y| y.2.total_cmp(&x.2));

        let mut rejected = 0usize;
        for &(a, b, _) in &pairs {
            if tournament.is_open(a, b) && !tournament.try_fix(a, b) {
                rejected += 1;
            }
        }
        debug!(event = "ranked_pairs", pairs = pairs.len(), rejected);

        let degrees: Vec<usize> = (0..n).map(|a| tournament.out_degree(a)).collect();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| degrees[b].cmp(&degrees[a]));
        Ok(LinearRanking::new(self.rule(), digraph, order, None))
    }
}
