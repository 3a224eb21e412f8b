//! Construction of the bipolar outranking relation from a performance
//! tableau.

use super::config::{OutrankingConfig, ValuationMode, VetoMode};
use super::marginal::{concordance, discordance};
use crate::digraph::{build_index, ValuationDomain, ValuedDigraph};
use crate::error::{OutrankingError, Result};
use crate::parallel::map_indexed;
use crate::tableau::PerformanceTableau;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Recoverable anomaly met while building a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildWarning {
    /// Every criterion is `NA` on at least one of the two actions; the pair
    /// was set to `med`.
    AllCriteriaMissing { a: String, b: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::AllCriteriaMissing { a, b } => {
                write!(f, "no criterion evaluates both '{a}' and '{b}'")
            }
        }
    }
}

/// Concordance and discordance terms of one ordered pair, expressed in the
/// relation's valuation domain (`med = 0`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairTerms {
    /// Overall concordance `S(a, b)`, rescaled over the present criteria.
    pub concordance: f64,
    /// Largest weighted discordance `w·V` against `(a, b)`.
    pub veto: f64,
    /// Largest weighted discordance against `(b, a)`.
    pub counter_veto: f64,
    /// Some criterion fully vetoes `(a, b)`.
    pub full_veto: bool,
    /// Sum of weights of the criteria evaluating both actions.
    pub present_weight: f64,
}

impl VetoMode {
    /// Combines concordance and discordance terms into the outranking value.
    pub fn apply(self, terms: &PairTerms, domain: &ValuationDomain) -> f64 {
        let med = domain.med();
        let s = terms.concordance;
        match self {
            VetoMode::NoVeto => s,
            VetoMode::ElectreVeto => {
                if terms.full_veto {
                    domain.min()
                } else {
                    s
                }
            }
            VetoMode::Bipolar => match (terms.veto > 0.0, terms.counter_veto > 0.0) {
                (true, false) => s.min(med - terms.veto),
                (false, true) => s.max(med + terms.counter_veto),
                (true, true) => med,
                (false, false) => s,
            },
        }
    }
}

/// Tableau, configuration and warnings behind an outranking digraph.
#[derive(Debug, Clone)]
pub struct OutrankingProvenance {
    tableau: PerformanceTableau,
    config: OutrankingConfig,
    domain: ValuationDomain,
    warnings: Vec<BuildWarning>,
}

impl OutrankingProvenance {
    pub fn tableau(&self) -> &PerformanceTableau {
        &self.tableau
    }

    pub fn config(&self) -> &OutrankingConfig {
        &self.config
    }

    /// Domain the relation was built in.
    pub fn domain(&self) -> &ValuationDomain {
        &self.domain
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    pub fn criterion_weights(&self) -> Vec<f64> {
        self.tableau.criteria().iter().map(|c| c.weight).collect()
    }

    /// Concordance and veto terms of the pair `(a, b)` by ordinals.
    pub fn pair_terms(&self, a: usize, b: usize) -> PairTerms {
        pair_terms(&self.tableau, &self.config, a, b)
    }

    /// Normalised marginal concordance relation of criterion `c`.
    ///
    /// Pairs with a missing evaluation are `med`.
    pub fn marginal_relation(&self, c: usize) -> Result<ValuedDigraph> {
        let criteria = self.tableau.criteria();
        let criterion = criteria.get(c).ok_or_else(|| {
            OutrankingError::InvalidConfig(format!(
                "criterion ordinal {c} out of range 0..{}",
                criteria.len()
            ))
        })?;
        let row = self.tableau.criterion_row(c);
        let anchor = self.config.anchor;
        let mode = self.config.concordance;
        ValuedDigraph::from_fn(
            self.tableau.actions().to_vec(),
            ValuationDomain::normalized(),
            |a, b| match (row[a].value(), row[b].value()) {
                (Some(ea), Some(eb)) => concordance(
                    criterion.difference(ea, eb),
                    &criterion.thresholds,
                    anchor.point(ea, eb),
                    mode,
                ),
                _ => 0.0,
            },
        )
        .map(|g| g.with_name(format!("marginal-{}", criterion.id)))
    }

    /// Marginal relations of every criterion, in criterion order.
    pub fn marginal_relations(&self) -> Result<Vec<ValuedDigraph>> {
        (0..self.tableau.criteria().len())
            .map(|c| self.marginal_relation(c))
            .collect()
    }
}

fn pair_terms(tableau: &PerformanceTableau, config: &OutrankingConfig, a: usize, b: usize) -> PairTerms {
    let total = tableau.total_weight();
    let mut terms = PairTerms::default();
    let mut s = 0.0;
    for (c, criterion) in tableau.criteria().iter().enumerate() {
        let (Some(ea), Some(eb)) = (
            tableau.evaluation(c, a).value(),
            tableau.evaluation(c, b).value(),
        ) else {
            continue;
        };
        let w = criterion.weight;
        let th = &criterion.thresholds;
        let d = criterion.difference(ea, eb);
        terms.present_weight += w;
        s += w * concordance(d, th, config.anchor.point(ea, eb), config.concordance);

        let v = discordance(d, th, config.anchor.point(ea, eb), config.weak_veto_degree);
        terms.veto = terms.veto.max(w * v);
        terms.full_veto |= v >= 1.0;
        let v_rev = discordance(-d, th, config.anchor.point(eb, ea), config.weak_veto_degree);
        terms.counter_veto = terms.counter_veto.max(w * v_rev);
    }
    if terms.present_weight > 0.0 && terms.present_weight < total {
        s = s * total / terms.present_weight;
    }
    if config.valuation == ValuationMode::Normalized {
        s /= total;
        terms.veto /= total;
        terms.counter_veto /= total;
    }
    terms.concordance = s;
    terms
}

/// Builds bipolar outranking digraphs.
///
/// For every ordered pair `(a, b)` the marginal concordances of the
/// criteria evaluating both actions are summed with their weights into
/// `S(a, b)`, rescaled to the full weight when some criteria are missing,
/// and combined with the marginal discordances according to the
/// [`VetoMode`]. The relation lives in `(-W, 0, +W)` or `(-1, 0, +1)`
/// depending on the [`ValuationMode`]; the diagonal is `med`.
///
/// # Examples
///
/// ```
/// use u_outranking::digraph::Action;
/// use u_outranking::outranking::{OutrankingBuilder, OutrankingConfig};
/// use u_outranking::tableau::{Criterion, Evaluation, PerformanceTableau, Threshold};
///
/// let tableau = PerformanceTableau::new(
///     vec![Action::new("a"), Action::new("b")],
///     vec![Criterion::new("g", 1.0).with_pref(Threshold::constant(1.0))],
///     vec![vec![Evaluation::Number(3.0), Evaluation::Number(1.0)]],
/// )
/// .unwrap();
/// let g = OutrankingBuilder::build(&tableau, &OutrankingConfig::default()).unwrap();
/// assert_eq!(g.value("a", "b").unwrap(), 1.0);
/// assert_eq!(g.value("b", "a").unwrap(), -1.0);
/// ```
pub struct OutrankingBuilder;

impl OutrankingBuilder {
    /// Builds the outranking digraph with the default configuration.
    pub fn build_default(tableau: &PerformanceTableau) -> Result<ValuedDigraph> {
        Self::build(tableau, &OutrankingConfig::default())
    }

    /// Builds the outranking digraph of `tableau`.
    pub fn build(tableau: &PerformanceTableau, config: &OutrankingConfig) -> Result<ValuedDigraph> {
        tableau.validate()?;
        config.validate()?;

        let n = tableau.order();
        let total = tableau.total_weight();
        let domain = match config.valuation {
            ValuationMode::Integer => ValuationDomain::integer(total)?,
            ValuationMode::Normalized => ValuationDomain::normalized(),
        };
        debug!(
            event = "outranking_start",
            actions = n,
            criteria = tableau.criteria().len(),
            total_weight = total,
            veto = ?config.veto,
            parallel = config.parallel,
        );

        let rows = map_indexed(n, config.parallel, |a| {
            let mut row = vec![domain.med(); n];
            let mut missing = Vec::new();
            for (b, cell) in row.iter_mut().enumerate() {
                if a == b {
                    continue;
                }
                let terms = pair_terms(tableau, config, a, b);
                if terms.present_weight <= 0.0 {
                    missing.push(b);
                    continue;
                }
                *cell = config
                    .veto
                    .apply(&terms, &domain)
                    .clamp(domain.min(), domain.max());
            }
            (row, missing)
        });

        let actions = tableau.actions().to_vec();
        let mut relation = Vec::with_capacity(n * n);
        let mut warnings = Vec::new();
        for (a, (row, missing)) in rows.into_iter().enumerate() {
            relation.extend(row);
            for b in missing {
                let (ia, ib) = (actions[a].id.clone(), actions[b].id.clone());
                warn!(
                    event = "all_criteria_missing",
                    a = %ia,
                    b = %ib,
                    "pair set to the indeterminate value"
                );
                warnings.push(BuildWarning::AllCriteriaMissing { a: ia, b: ib });
            }
        }

        let index = build_index(&actions)?;
        let provenance = Arc::new(OutrankingProvenance {
            tableau: tableau.clone(),
            config: config.clone(),
            domain,
            warnings,
        });
        let digraph = ValuedDigraph::assemble(actions, index, domain, relation)
            .with_name(format!("outranking-{}", tableau.name()))
            .with_provenance(provenance);

        info!(
            event = "outranking_built",
            actions = n,
            size = digraph.size(),
            determinateness = digraph.determinateness(),
            warnings = digraph.outranking().map_or(0, |p| p.warnings().len()),
        );
        Ok(digraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digraph::Action;
    use crate::outranking::{ConcordanceMode, ThresholdAnchor};
    use crate::random::{RandomPerformanceTableau, RandomTableauConfig};
    use crate::tableau::{Criterion, Evaluation, PreferenceDirection, Threshold};
    use proptest::prelude::*;

    fn actions(ids: &[&str]) -> Vec<Action> {
        ids.iter().map(|id| Action::new(*id)).collect()
    }

    fn numbers(values: &[f64]) -> Vec<Evaluation> {
        values.iter().map(|&x| Evaluation::Number(x)).collect()
    }

    fn single_criterion() -> PerformanceTableau {
        let g = Criterion::new("g", 1.0)
            .with_ind(Threshold::constant(0.0))
            .with_pref(Threshold::constant(1.0));
        PerformanceTableau::new(
            actions(&["a", "b", "c"]),
            vec![g],
            vec![numbers(&[3.0, 2.0, 1.0])],
        )
        .unwrap()
    }

    fn condorcet_triple() -> PerformanceTableau {
        let crit = |id: &str| {
            Criterion::new(id, 1.0)
                .with_ind(Threshold::constant(0.0))
                .with_pref(Threshold::constant(1.0))
        };
        // a > b > c, b > c > a, c > a > b
        PerformanceTableau::new(
            actions(&["a", "b", "c"]),
            vec![crit("g1"), crit("g2"), crit("g3")],
            vec![
                numbers(&[3.0, 2.0, 1.0]),
                numbers(&[1.0, 3.0, 2.0]),
                numbers(&[2.0, 1.0, 3.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_single_criterion_chain() {
        let g = OutrankingBuilder::build_default(&single_criterion()).unwrap();
        let pairs = [("a", "b", 1.0), ("b", "a", -1.0), ("a", "c", 1.0), ("c", "a", -1.0)];
        for (x, y, v) in pairs {
            assert!((g.value(x, y).unwrap() - v).abs() < 1e-12, "{x}{y}");
        }
        assert!((g.value("b", "c").unwrap() - 1.0).abs() < 1e-12);
        assert!((g.value("c", "b").unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(g.get(0, 0), 0.0);
        assert!(g.outranking().is_some());
    }

    #[test]
    fn test_condorcet_triple_values() {
        let g = OutrankingBuilder::build_default(&condorcet_triple()).unwrap();
        let third = 1.0 / 3.0;
        for (x, y) in [("a", "b"), ("b", "c"), ("c", "a")] {
            assert!((g.value(x, y).unwrap() - third).abs() < 1e-12);
            assert!((g.value(y, x).unwrap() + third).abs() < 1e-12);
        }
    }

    #[test]
    fn test_integer_mode_domain() {
        let config = OutrankingConfig::default().with_valuation(ValuationMode::Integer);
        let g = OutrankingBuilder::build(&condorcet_triple(), &config).unwrap();
        assert_eq!(g.domain().max(), 3.0);
        assert_eq!(g.value("a", "b").unwrap(), 1.0);
        assert_eq!(g.value("b", "a").unwrap(), -1.0);
    }

    #[test]
    fn test_min_direction_reverses() {
        let g = Criterion::new("cost", 1.0)
            .with_direction(PreferenceDirection::Min)
            .with_pref(Threshold::constant(1.0));
        let t = PerformanceTableau::new(actions(&["a", "b"]), vec![g], vec![numbers(&[1.0, 5.0])])
            .unwrap();
        let r = OutrankingBuilder::build_default(&t).unwrap();
        assert_eq!(r.value("a", "b").unwrap(), 1.0);
        assert_eq!(r.value("b", "a").unwrap(), -1.0);
    }

    #[test]
    fn test_veto_cut_literal() {
        let domain = ValuationDomain::integer(8.0).unwrap();
        let terms = PairTerms {
            concordance: 8.0,
            veto: 4.0,
            counter_veto: 0.0,
            full_veto: true,
            present_weight: 8.0,
        };
        assert_eq!(VetoMode::Bipolar.apply(&terms, &domain), -4.0);
        assert_eq!(VetoMode::NoVeto.apply(&terms, &domain), 8.0);
        assert_eq!(VetoMode::ElectreVeto.apply(&terms, &domain), -8.0);
    }

    fn veto_tableau() -> PerformanceTableau {
        // g2 has a wide indifference band but a tight veto
        let g1 = Criterion::new("g1", 4.0).with_pref(Threshold::constant(5.0));
        let g2 = Criterion::new("g2", 4.0)
            .with_ind(Threshold::constant(10.0))
            .with_pref(Threshold::constant(20.0))
            .with_veto(Threshold::constant(5.0));
        PerformanceTableau::new(
            actions(&["a", "b"]),
            vec![g1, g2],
            vec![numbers(&[10.0, 0.0]), numbers(&[0.0, 6.0])],
        )
        .unwrap()
    }

    #[test]
    fn test_veto_scenario_integer() {
        let t = veto_tableau();
        let bipolar = OutrankingConfig::default().with_valuation(ValuationMode::Integer);
        let g = OutrankingBuilder::build(&t, &bipolar).unwrap();
        let p = g.outranking().unwrap();
        assert_eq!(p.pair_terms(0, 1).concordance, 8.0);
        assert_eq!(g.value("a", "b").unwrap(), -4.0);
        // S(b, a) = 0 lifted by the counter-veto
        assert_eq!(p.pair_terms(1, 0).concordance, 0.0);
        assert_eq!(g.value("b", "a").unwrap(), 4.0);

        let no_veto = bipolar.clone().with_veto(VetoMode::NoVeto);
        let g = OutrankingBuilder::build(&t, &no_veto).unwrap();
        assert_eq!(g.value("a", "b").unwrap(), 8.0);

        let electre = bipolar.with_veto(VetoMode::ElectreVeto);
        let g = OutrankingBuilder::build(&t, &electre).unwrap();
        assert_eq!(g.value("a", "b").unwrap(), -8.0);
    }

    #[test]
    fn test_weak_veto() {
        let g1 = Criterion::new("g1", 3.0).with_pref(Threshold::constant(5.0));
        let g2 = Criterion::new("g2", 1.0)
            .with_ind(Threshold::constant(50.0))
            .with_weak_veto(Threshold::constant(5.0))
            .with_veto(Threshold::constant(50.0));
        let t = PerformanceTableau::new(
            actions(&["a", "b"]),
            vec![g1, g2],
            vec![numbers(&[10.0, 0.0]), numbers(&[0.0, 10.0])],
        )
        .unwrap();
        let config = OutrankingConfig::default().with_valuation(ValuationMode::Integer);
        let g = OutrankingBuilder::build(&t, &config).unwrap();
        // S = 4, weak veto 1 * 0.5
        assert_eq!(g.value("a", "b").unwrap(), -0.5);
        let g = OutrankingBuilder::build(&t, &config.with_veto(VetoMode::ElectreVeto)).unwrap();
        assert_eq!(g.value("a", "b").unwrap(), 4.0);
    }

    #[test]
    fn test_missing_evaluations_rescale() {
        let crit = |id: &str, w: f64| Criterion::new(id, w).with_pref(Threshold::constant(1.0));
        let t = PerformanceTableau::new(
            actions(&["a", "b"]),
            vec![crit("g1", 1.0), crit("g2", 3.0)],
            vec![
                numbers(&[2.0, 1.0]),
                vec![Evaluation::NotApplicable, Evaluation::Number(1.0)],
            ],
        )
        .unwrap();
        let g = OutrankingBuilder::build_default(&t).unwrap();
        // only g1 present; its weight is renormalised to the whole family
        assert!((g.value("a", "b").unwrap() - 1.0).abs() < 1e-12);
        assert!((g.value("b", "a").unwrap() + 1.0).abs() < 1e-12);
        assert!(g.outranking().unwrap().warnings().is_empty());
    }

    #[test]
    fn test_all_missing_yields_med_and_warning() {
        let t = PerformanceTableau::new(
            actions(&["a", "b", "c"]),
            vec![Criterion::new("g", 1.0)],
            vec![vec![
                Evaluation::Number(1.0),
                Evaluation::NotApplicable,
                Evaluation::Number(2.0),
            ]],
        )
        .unwrap();
        let g = OutrankingBuilder::build_default(&t).unwrap();
        assert_eq!(g.value("a", "b").unwrap(), 0.0);
        let warnings = g.outranking().unwrap().warnings();
        assert_eq!(warnings.len(), 4);
        assert_eq!(
            warnings[0],
            BuildWarning::AllCriteriaMissing {
                a: "a".into(),
                b: "b".into()
            }
        );
    }

    #[test]
    fn test_linear_concordance_mode() {
        let g = Criterion::new("g", 1.0)
            .with_ind(Threshold::constant(1.0))
            .with_pref(Threshold::constant(3.0));
        let t = PerformanceTableau::new(actions(&["a", "b"]), vec![g], vec![numbers(&[0.0, 1.5])])
            .unwrap();
        let crisp = OutrankingBuilder::build_default(&t).unwrap();
        let linear = OutrankingBuilder::build(
            &t,
            &OutrankingConfig::default().with_concordance(ConcordanceMode::Linear),
        )
        .unwrap();
        assert_eq!(crisp.value("a", "b").unwrap(), 0.0);
        assert!((linear.value("a", "b").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_anchor_changes_borderline_pair() {
        let g = Criterion::new("g", 1.0)
            .with_ind(Threshold::linear(0.0, 0.1))
            .with_pref(Threshold::linear(0.0, 0.2));
        let t = PerformanceTableau::new(actions(&["a", "b"]), vec![g], vec![numbers(&[10.0, 12.0])])
            .unwrap();
        let at_b = OutrankingBuilder::build_default(&t).unwrap();
        let at_a = OutrankingBuilder::build(
            &t,
            &OutrankingConfig::default().with_anchor(ThresholdAnchor::AtA),
        )
        .unwrap();
        // d = -2; at b: q = 1.2, p = 2.4 -> 0; at a: q = 1, p = 2 -> -1
        assert_eq!(at_b.value("a", "b").unwrap(), 0.0);
        assert_eq!(at_a.value("a", "b").unwrap(), -1.0);
    }

    #[test]
    fn test_marginal_relation() {
        let g = OutrankingBuilder::build_default(&condorcet_triple()).unwrap();
        let p = g.outranking().unwrap();
        let m = p.marginal_relation(1).unwrap();
        // g2: b > c > a
        assert_eq!(m.value("b", "c").unwrap(), 1.0);
        assert_eq!(m.value("a", "b").unwrap(), -1.0);
        assert_eq!(p.marginal_relations().unwrap().len(), 3);
        assert!(p.marginal_relation(7).is_err());
    }

    #[test]
    fn test_integer_mode_reproducible() {
        let config = RandomTableauConfig::default().with_seed(11).with_actions(12);
        let t = RandomPerformanceTableau::generate(&config).unwrap();
        let c = OutrankingConfig::default().with_valuation(ValuationMode::Integer);
        let g1 = OutrankingBuilder::build(&t, &c).unwrap();
        let g2 = OutrankingBuilder::build(&t, &c.clone().with_parallel(true)).unwrap();
        assert_eq!(g1, g2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_outranking_condition(
            seed in any::<u64>(),
            n in 2usize..9,
            na in 0.0f64..0.3,
            linear in any::<bool>(),
            no_veto in any::<bool>(),
        ) {
            let config = RandomTableauConfig::default()
                .with_seed(seed)
                .with_actions(n)
                .with_criteria(5)
                .with_missing_probability(na);
            let t = RandomPerformanceTableau::generate(&config).unwrap();
            let oc = OutrankingConfig::default()
                .with_concordance(if linear { ConcordanceMode::Linear } else { ConcordanceMode::Crisp })
                .with_veto(if no_veto { VetoMode::NoVeto } else { VetoMode::Bipolar });
            let g = OutrankingBuilder::build(&t, &oc).unwrap();
            for a in 0..n {
                prop_assert_eq!(g.get(a, a), 0.0);
                for b in 0..n {
                    if a != b {
                        prop_assert!(g.get(a, b) + g.get(b, a) >= -1e-9);
                    }
                }
            }
        }
    }
}
