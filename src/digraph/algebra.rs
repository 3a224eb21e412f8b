//! Primitive algebra on valued digraphs: dual, converse, codual, recoding,
//! polarisation and epistemic fusion.
//!
//! # References
//!
//! Bisdorff (2013), "On polarizing outranking relations with large
//! performance differences", J. of Multi-Criteria Decision Analysis 20.

use super::domain::ValuationDomain;
use super::valued::ValuedDigraph;
use crate::error::{OutrankingError, Result};

/// Fusion operators for bipolar characteristic values.
///
/// None of them is associative. Every n-ary fusion first partitions its
/// terms by sign around `med` and then reduces each side independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FusionOperator {
    /// Epistemic disjunction: `max` of positive terms, `min` of negative
    /// terms, `med` on sign mix.
    OMax,
    /// Epistemic conjunction: `min` of positive terms, `max` of negative
    /// terms, `med` on sign mix or when any term is indeterminate.
    OMin,
    /// Weighted mean of the non-indeterminate terms when they agree in sign.
    OAverage,
    /// Weighted mean of all terms (indeterminate ones dilute the mean) when
    /// the non-indeterminate terms agree in sign.
    SymmetricAverage,
}

impl FusionOperator {
    /// Fuses a list of characteristic values.
    ///
    /// `weights`, when given, must have one entry per term; only the
    /// averaging operators use them.
    pub fn fuse(self, med: f64, terms: &[f64], weights: Option<&[f64]>) -> f64 {
        match self {
            FusionOperator::OMax => omax(med, terms),
            FusionOperator::OMin => omin(med, terms),
            FusionOperator::OAverage => oaverage(med, terms, weights),
            FusionOperator::SymmetricAverage => symmetric_average(med, terms, weights),
        }
    }
}

struct SignPartition {
    positive: Vec<usize>,
    negative: Vec<usize>,
    indeterminate: usize,
}

fn partition(med: f64, terms: &[f64]) -> SignPartition {
    let mut p = SignPartition {
        positive: Vec::new(),
        negative: Vec::new(),
        indeterminate: 0,
    };
    for (i, &t) in terms.iter().enumerate() {
        if t > med {
            p.positive.push(i);
        } else if t < med {
            p.negative.push(i);
        } else {
            p.indeterminate += 1;
        }
    }
    p
}

/// Epistemic disjunction of bipolar characteristic values.
pub fn omax(med: f64, terms: &[f64]) -> f64 {
    let p = partition(med, terms);
    match (p.positive.is_empty(), p.negative.is_empty()) {
        (false, true) => p.positive.iter().map(|&i| terms[i]).fold(f64::MIN, f64::max),
        (true, false) => p.negative.iter().map(|&i| terms[i]).fold(f64::MAX, f64::min),
        _ => med,
    }
}

/// Epistemic conjunction of bipolar characteristic values.
pub fn omin(med: f64, terms: &[f64]) -> f64 {
    let p = partition(med, terms);
    if p.indeterminate > 0 {
        return med;
    }
    match (p.positive.is_empty(), p.negative.is_empty()) {
        (false, true) => p.positive.iter().map(|&i| terms[i]).fold(f64::MAX, f64::min),
        (true, false) => p.negative.iter().map(|&i| terms[i]).fold(f64::MIN, f64::max),
        _ => med,
    }
}

fn weight_of(weights: Option<&[f64]>, i: usize) -> f64 {
    weights.map_or(1.0, |w| w[i])
}

/// Weighted mean of the same-signed terms; `med` on sign mix.
pub fn oaverage(med: f64, terms: &[f64], weights: Option<&[f64]>) -> f64 {
    let p = partition(med, terms);
    let side = match (p.positive.is_empty(), p.negative.is_empty()) {
        (false, true) => &p.positive,
        (true, false) => &p.negative,
        _ => return med,
    };
    let (sum, total) = side.iter().fold((0.0, 0.0), |(s, t), &i| {
        let w = weight_of(weights, i);
        (s + (terms[i] - med) * w, t + w)
    });
    if total > 0.0 {
        med + sum / total
    } else {
        med
    }
}

/// Weighted mean over all terms when the determined ones agree in sign.
pub fn symmetric_average(med: f64, terms: &[f64], weights: Option<&[f64]>) -> f64 {
    let p = partition(med, terms);
    let side = match (p.positive.is_empty(), p.negative.is_empty()) {
        (false, true) => &p.positive,
        (true, false) => &p.negative,
        _ => return med,
    };
    let total: f64 = (0..terms.len()).map(|i| weight_of(weights, i)).sum();
    let sum: f64 = side
        .iter()
        .map(|&i| (terms[i] - med) * weight_of(weights, i))
        .sum();
    if total > 0.0 {
        med + sum / total
    } else {
        med
    }
}

impl ValuedDigraph {
    /// Bipolar negation: valuation `max - r + min`.
    pub fn dual(&self) -> ValuedDigraph {
        let d = *self.domain();
        let n = self.order();
        let relation = (0..n * n)
            .map(|k| {
                if k / n == k % n {
                    d.med()
                } else {
                    d.negate(self.relation_slice()[k])
                }
            })
            .collect();
        self.derive(format!("dual-{}", self.name()), relation)
    }

    /// Transposed relation.
    pub fn converse(&self) -> ValuedDigraph {
        let n = self.order();
        let relation = (0..n * n).map(|k| self.get(k % n, k / n)).collect();
        self.derive(format!("converse-{}", self.name()), relation)
    }

    /// Dual of the converse: "a is not outranked by b".
    pub fn codual(&self) -> ValuedDigraph {
        self.converse()
            .dual()
            .with_name(format!("codual-{}", self.name()))
    }

    /// Affine rescale of the relation onto `[new_min, new_max]`, in place.
    ///
    /// `med` maps onto the new `med`; the outranking provenance is kept.
    pub fn recode_valuation(&mut self, new_min: f64, new_max: f64) -> Result<()> {
        let target = ValuationDomain::new(new_min, new_max)?;
        let source = *self.domain();
        for v in self.relation_mut().iter_mut() {
            *v = source.rescale_to(*v, &target);
        }
        self.set_domain(target);
        Ok(())
    }

    /// Pure counterpart of [`recode_valuation`](Self::recode_valuation).
    pub fn recoded(&self, new_min: f64, new_max: f64) -> Result<ValuedDigraph> {
        let mut g = self.clone();
        g.recode_valuation(new_min, new_max)?;
        Ok(g)
    }

    /// Copy recoded onto `(-1, 0, +1)`.
    pub fn normalized(&self) -> ValuedDigraph {
        if self.domain().is_normalized() {
            return self.clone();
        }
        let source = *self.domain();
        let target = ValuationDomain::normalized();
        let relation = self
            .relation_slice()
            .iter()
            .map(|&v| source.rescale_to(v, &target))
            .collect();
        let mut g = self.derive(self.name().to_string(), relation).with_domain(target);
        if let Some(p) = self.provenance_arc() {
            g = g.with_provenance(p);
        }
        g
    }

    /// Crisp `{min, med, max}` digraph cut at `level`.
    ///
    /// `level` lies in `[med, max]`; values at or above it (strictly above
    /// with `strict`) become `max`, values at or below the mirrored level
    /// `2·med - level` become `min`, everything else `med`.
    pub fn polarise(&self, level: f64, strict: bool) -> Result<ValuedDigraph> {
        let d = *self.domain();
        self.cut(level, strict, |v| {
            if v > d.med() {
                d.max()
            } else {
                d.min()
            }
        })
        .map(|g| g.with_name(format!("polarised-{}", self.name())))
    }

    /// Like [`polarise`](Self::polarise) but keeps the original values that
    /// survive the cut.
    pub fn polarise_valued(&self, level: f64, strict: bool) -> Result<ValuedDigraph> {
        self.cut(level, strict, |v| v)
            .map(|g| g.with_name(format!("cut-{}", self.name())))
    }

    fn cut(&self, level: f64, strict: bool, keep: impl Fn(f64) -> f64) -> Result<ValuedDigraph> {
        let d = *self.domain();
        if level < d.med() || level > d.max() {
            return Err(OutrankingError::DomainOverflow {
                what: "polarisation level",
                value: level,
                min: d.med(),
                max: d.max(),
            });
        }
        let mirrored = 2.0 * d.med() - level;
        let n = self.order();
        let relation = (0..n * n)
            .map(|k| {
                let v = self.relation_slice()[k];
                let (above, below) = if strict {
                    (v > level, v < mirrored)
                } else {
                    (v >= level, v <= mirrored)
                };
                if k / n == k % n || v == d.med() {
                    d.med()
                } else if above || below {
                    keep(v)
                } else {
                    d.med()
                }
            })
            .collect();
        Ok(self.derive(self.name().to_string(), relation))
    }

    /// Pairwise fusion with a digraph on the same action set.
    ///
    /// `other` is rescaled onto this digraph's domain first.
    pub fn fusion(&self, other: &ValuedDigraph, operator: FusionOperator) -> Result<ValuedDigraph> {
        fusion_all(&[self, other], operator, None)
    }
}

/// N-ary fusion of digraphs sharing one action set.
///
/// Result actions and domain are those of the first digraph. Terms are
/// partitioned by sign for every pair before reduction, never folded
/// pairwise.
pub fn fusion_all(
    digraphs: &[&ValuedDigraph],
    operator: FusionOperator,
    weights: Option<&[f64]>,
) -> Result<ValuedDigraph> {
    let Some(first) = digraphs.first() else {
        return Err(OutrankingError::InvalidConfig(
            "fusion needs at least one digraph".into(),
        ));
    };
    if let Some(w) = weights {
        if w.len() != digraphs.len() {
            return Err(OutrankingError::InvalidConfig(format!(
                "fusion weights: expected {}, got {}",
                digraphs.len(),
                w.len()
            )));
        }
        if w.iter().any(|&x| x < 0.0 || !x.is_finite()) {
            return Err(OutrankingError::InvalidConfig(
                "fusion weights must be finite and non-negative".into(),
            ));
        }
    }
    let alignments = digraphs
        .iter()
        .map(|g| first.align(g))
        .collect::<Result<Vec<_>>>()?;
    let domain = *first.domain();
    let n = first.order();
    let mut relation = vec![domain.med(); n * n];
    let mut terms = Vec::with_capacity(digraphs.len());
    for a in 0..n {
        for b in 0..n {
            if a == b {
                continue;
            }
            terms.clear();
            for (g, map) in digraphs.iter().zip(&alignments) {
                terms.push(g.domain().rescale_to(g.get(map[a], map[b]), &domain));
            }
            relation[a * n + b] = operator.fuse(domain.med(), &terms, weights);
        }
    }
    Ok(first.derive(format!("fusion-{}", first.name()), relation))
}
