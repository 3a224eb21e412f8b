//! Ordering by the first principal axis of the relation.

use super::config::{PrincipalConfig, RankingRule};
use super::engine::RankingEngine;
use super::types::{order_by_scores, LinearRanking};
use crate::digraph::ValuedDigraph;
use crate::error::Result;
use tracing::debug;

/// Principal ordering.
///
/// Every action is an observation described by its normalised in-values
/// (column-wise) or out-values (row-wise). The leading eigenvector of the
/// covariance of these variables is found by power iteration and every
/// action is scored by its projection on it. The axis has no intrinsic
/// orientation: when the induced ranking correlates negatively with the
/// relation, scores and ranking are reversed.
pub struct Principal {
    config: PrincipalConfig,
}

impl Principal {
    pub fn new(config: PrincipalConfig) -> Self {
        Self { config }
    }

    /// Projections on the first principal axis, before orientation.
    pub fn axis_scores(&self, digraph: &ValuedDigraph) -> Result<Vec<f64>> {
        self.config.validate()?;
        let n = digraph.order();
        if n == 0 {
            return Ok(Vec::new());
        }
        let domain = *digraph.domain();
        let data: Vec<Vec<f64>> = (0..n)
            .map(|a| {
                (0..n)
                    .map(|j| {
                        let v = if self.config.column_wise {
                            digraph.get(j, a)
                        } else {
                            digraph.get(a, j)
                        };
                        domain.normalize(v)
                    })
                    .collect()
            })
            .collect();

        let nf = n as f64;
        let means: Vec<f64> = (0..n)
            .map(|j| data.iter().map(|row| row[j]).sum::<f64>() / nf)
            .collect();
        let centered: Vec<Vec<f64>> = data
            .iter()
            .map(|row| row.iter().zip(&means).map(|(x, m)| x - m).collect())
            .collect();
        let mut covariance = vec![vec![0.0; n]; n];
        for j in 0..n {
            for k in j..n {
                let c = centered.iter().map(|row| row[j] * row[k]).sum::<f64>() / nf;
                covariance[j][k] = c;
                covariance[k][j] = c;
            }
        }

        let axis = self.leading_eigenvector(&covariance);
        Ok(centered
            .iter()
            .map(|row| row.iter().zip(&axis).map(|(x, v)| x * v).sum())
            .collect())
    }

    /// Power iteration from a fixed, non-symmetric start vector.
    fn leading_eigenvector(&self, matrix: &[Vec<f64>]) -> Vec<f64> {
        let n = matrix.len();
        let mut v: Vec<f64> = (0..n).map(|i| 1.0 + i as f64 / n as f64).collect();
        normalize(&mut v);
        for iteration in 0..self.config.max_iterations {
            let mut w: Vec<f64> = matrix
                .iter()
                .map(|row| row.iter().zip(&v).map(|(m, x)| m * x).sum())
                .collect();
            if !normalize(&mut w) {
                debug!(event = "principal_degenerate", iteration);
                return vec![0.0; n];
            }
            let change = w
                .iter()
                .zip(&v)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            v = w;
            if change < self.config.tolerance {
                debug!(event = "principal_converged", iterations = iteration + 1);
                return v;
            }
        }
        debug!(
            event = "principal_not_converged",
            iterations = self.config.max_iterations,
        );
        v
    }
}

/// Scales `v` to unit length; `false` for a null vector.
fn normalize(v: &mut [f64]) -> bool {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm < 1e-300 {
        return false;
    }
    v.iter_mut().for_each(|x| *x /= norm);
    true
}

impl RankingEngine for Principal {
    fn rule(&self) -> RankingRule {
        RankingRule::Principal
    }

    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        let mut scores = self.axis_scores(digraph)?;
        let ranking = LinearRanking::new(
            self.rule(),
            digraph,
            order_by_scores(&scores),
            Some(scores.clone()),
        );
        if ranking.correlation(digraph)?.correlation >= 0.0 {
            return Ok(ranking);
        }
        scores.iter_mut().for_each(|s| *s = -*s);
        let order = order_by_scores(&scores);
        Ok(LinearRanking::new(self.rule(), digraph, order, Some(scores)))
    }
}
