//! Bipolar ordinal correlation between valued relations.

use super::valued::ValuedDigraph;
use crate::error::{OutrankingError, Result};

/// Ordinal correlation `τ` between two relations together with the
/// determination of the comparison.
///
/// `correlation` lies in `[-1, +1]`; `determination` is the mean
/// `min(|r|, |o|)` over off-diagonal pairs of the normalised relations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrdinalCorrelation {
    pub correlation: f64,
    pub determination: f64,
}

impl ValuedDigraph {
    /// Ordinal correlation of this relation with `other` over the same
    /// actions.
    ///
    /// Both relations are normalised first. For every off-diagonal pair the
    /// contribution is `min(max(-r, o), max(r, -o))`, which is positive when
    /// both relations agree in sign. The sum is divided by
    /// `Σ min(|r|, |o|)`; a comparison with zero determination yields a
    /// correlation of `0`.
    ///
    /// # Errors
    /// `MissingAction` when the two digraphs do not share their action set.
    pub fn ordinal_correlation(&self, other: &ValuedDigraph) -> Result<OrdinalCorrelation> {
        if self.order() != other.order() {
            return Err(OutrankingError::InvalidConfig(format!(
                "cannot correlate digraphs of order {} and {}",
                self.order(),
                other.order()
            )));
        }
        let map = self.align(other)?;
        let n = self.order();
        let (sd, od) = (self.domain(), other.domain());
        let mut sum = 0.0;
        let mut weight = 0.0;
        for a in 0..n {
            for b in 0..n {
                if a == b {
                    continue;
                }
                let r = sd.normalize(self.get(a, b));
                let o = od.normalize(other.get(map[a], map[b]));
                sum += (-r).max(o).min(r.max(-o));
                weight += r.abs().min(o.abs());
            }
        }
        let pairs = if n < 2 { 1.0 } else { (n * (n - 1)) as f64 };
        Ok(OrdinalCorrelation {
            correlation: if weight > 0.0 { sum / weight } else { 0.0 },
            determination: weight / pairs,
        })
    }

    /// Ordinal correlation with the crisp linear order induced by `ranking`
    /// (best first).
    pub fn ranking_correlation(&self, ranking: &[String]) -> Result<OrdinalCorrelation> {
        let order = linear_order(self, ranking)?;
        self.ordinal_correlation(&order)
    }
}

/// Kendall's `τ` between two rankings of the same items, computed as the
/// ordinal correlation of the two crisp linear orders.
///
/// Returns `0` for fewer than two items.
pub fn kendall_tau(first: &[usize], second: &[usize]) -> f64 {
    let n = first.len();
    if n < 2 || second.len() != n {
        return 0.0;
    }
    let mut pos_a = vec![usize::MAX; n];
    let mut pos_b = vec![usize::MAX; n];
    for (p, &x) in first.iter().enumerate() {
        if x < n {
            pos_a[x] = p;
        }
    }
    for (p, &x) in second.iter().enumerate() {
        if x < n {
            pos_b[x] = p;
        }
    }
    let mut concordant = 0i64;
    let mut discordant = 0i64;
    for x in 0..n {
        for y in (x + 1)..n {
            let s = (pos_a[x] as i64 - pos_a[y] as i64).signum()
                * (pos_b[x] as i64 - pos_b[y] as i64).signum();
            match s {
                1 => concordant += 1,
                -1 => discordant += 1,
                _ => {}
            }
        }
    }
    let total = concordant + discordant;
    if total == 0 {
        0.0
    } else {
        (concordant - discordant) as f64 / total as f64
    }
}

/// Crisp normalised linear order: `+1` when `a` precedes `b`, `-1` otherwise.
pub(crate) fn linear_order(like: &ValuedDigraph, ranking: &[String]) -> Result<ValuedDigraph> {
    let n = like.order();
    if ranking.len() != n {
        return Err(OutrankingError::InvalidConfig(format!(
            "ranking lists {} actions, digraph has {n}",
            ranking.len()
        )));
    }
    let mut position = vec![usize::MAX; n];
    for (p, id) in ranking.iter().enumerate() {
        let a = like.action_index(id)?;
        if position[a] != usize::MAX {
            return Err(OutrankingError::InvalidConfig(format!(
                "action '{id}' ranked twice"
            )));
        }
        position[a] = p;
    }
    ValuedDigraph::from_fn(
        like.actions().to_vec(),
        super::ValuationDomain::normalized(),
        |a, b| if position[a] < position[b] { 1.0 } else { -1.0 },
    )
    .map(|g| g.with_name("linear-order"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digraph::{Action, ValuationDomain};

    fn chain() -> ValuedDigraph {
        ValuedDigraph::from_arcs(
            &["a", "b", "c"],
            &[("a", "b"), ("a", "c"), ("b", "c")],
        )
        .unwrap()
    }

    #[test]
    fn test_self_correlation_is_one() {
        let g = chain();
        let c = g.ordinal_correlation(&g).unwrap();
        assert!((c.correlation - 1.0).abs() < 1e-12);
        assert!((c.determination - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_converse_correlation_is_minus_one() {
        let g = chain();
        let c = g.ordinal_correlation(&g.converse()).unwrap();
        assert!((c.correlation + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_indeterminate_has_zero_determination() {
        let g = chain();
        let h = ValuedDigraph::indeterminate(g.actions().to_vec(), ValuationDomain::normalized())
            .unwrap();
        let c = g.ordinal_correlation(&h).unwrap();
        assert_eq!(c.correlation, 0.0);
        assert_eq!(c.determination, 0.0);
    }

    #[test]
    fn test_correlation_ignores_action_order() {
        let g = chain();
        let h = ValuedDigraph::from_arcs(
            &["c", "b", "a"],
            &[("a", "b"), ("a", "c"), ("b", "c")],
        )
        .unwrap();
        let c = g.ordinal_correlation(&h).unwrap();
        assert!((c.correlation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_missing_action() {
        let g = chain();
        let h = ValuedDigraph::from_arcs(&["a", "b", "z"], &[]).unwrap();
        assert!(matches!(
            g.ordinal_correlation(&h),
            Err(OutrankingError::MissingAction(_))
        ));
    }

    #[test]
    fn test_ranking_correlation() {
        let g = chain();
        let best: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let worst: Vec<String> = ["c", "b", "a"].iter().map(|s| s.to_string()).collect();
        assert!((g.ranking_correlation(&best).unwrap().correlation - 1.0).abs() < 1e-12);
        assert!((g.ranking_correlation(&worst).unwrap().correlation + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ranking_correlation_on_other_domain() {
        let actions = vec![Action::new("x"), Action::new("y")];
        let d = ValuationDomain::new(0.0, 10.0).unwrap();
        let g = ValuedDigraph::from_matrix(actions, d, &[vec![5.0, 7.5], vec![2.5, 5.0]]).unwrap();
        let c = g
            .ranking_correlation(&["x".to_string(), "y".to_string()])
            .unwrap();
        assert!((c.correlation - 1.0).abs() < 1e-12);
        assert!((c.determination - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_kendall_tau() {
        assert!((kendall_tau(&[0, 1, 2, 3], &[0, 1, 2, 3]) - 1.0).abs() < 1e-12);
        assert!((kendall_tau(&[0, 1, 2, 3], &[3, 2, 1, 0]) + 1.0).abs() < 1e-12);
        // one discordant pair out of three
        assert!((kendall_tau(&[0, 1, 2], &[1, 0, 2]) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(kendall_tau(&[0], &[0]), 0.0);
    }
}
