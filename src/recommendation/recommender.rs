//! Choice recommendation: circuits, good and bad choices, ranking.

use super::config::RecommendationConfig;
use crate::circuits::CircuitEnumerator;
use crate::digraph::ValuedDigraph;
use crate::error::Result;
use crate::kernels::{Choice, KernelEnumerator};
use crate::outranking::{OutrankingBuilder, OutrankingConfig};
use crate::ranking::RankingRule;
use crate::tableau::PerformanceTableau;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

/// A choice with its members named.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceRecord {
    pub members: Vec<String>,
    pub determinateness: f64,
    pub outranking: f64,
    pub outranked: f64,
    pub independence: f64,
    pub dominance: f64,
    pub absorbency: f64,
}

impl ChoiceRecord {
    fn new(choice: &Choice, digraph: &ValuedDigraph) -> Self {
        Self {
            members: choice.ids(digraph),
            determinateness: choice.determinateness,
            outranking: choice.outranking,
            outranked: choice.outranked,
            independence: choice.independence,
            dominance: choice.dominance,
            absorbency: choice.absorbency,
        }
    }
}

/// Plain-data recommendation record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChoiceRecommendation {
    /// `relation[a][b]`, by action identifier.
    pub relation: BTreeMap<String, BTreeMap<String, f64>>,
    /// Chordless circuits kept by the circuit configuration.
    pub chordless_cycles: Vec<Vec<String>>,
    /// Good choices, best first.
    pub good_choices: Vec<ChoiceRecord>,
    /// Bad choices, worst first.
    pub bad_choices: Vec<ChoiceRecord>,
    /// Ranking, best first.
    pub ranking: Vec<String>,
    pub ranking_rule: RankingRule,
}

impl ChoiceRecommendation {
    /// Best good choice, if any.
    pub fn first_choice(&self) -> Option<&ChoiceRecord> {
        self.good_choices.first()
    }

    /// Worst bad choice, if any.
    pub fn last_choice(&self) -> Option<&ChoiceRecord> {
        self.bad_choices.first()
    }

    /// Whether chordless circuits make the recommendation paradoxical.
    pub fn has_circuits(&self) -> bool {
        !self.chordless_cycles.is_empty()
    }
}

impl fmt::Display for ChoiceRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chordless circuits: {}", self.chordless_cycles.len())?;
        for c in &self.chordless_cycles {
            writeln!(f, "  [{}]", c.join(", "))?;
        }
        for (title, choices) in [("Good choices", &self.good_choices), ("Bad choices", &self.bad_choices)] {
            writeln!(f, "{title}:")?;
            for c in choices {
                writeln!(
                    f,
                    "  {{{}}} determinateness {:.2}%, outranking {:+.3}, outranked {:+.3}",
                    c.members.join(", "),
                    c.determinateness * 100.0,
                    c.outranking,
                    c.outranked,
                )?;
            }
        }
        write!(f, "{} ranking: {}", self.ranking_rule, self.ranking.join(" > "))
    }
}

/// Composes circuit detection, choice search and ranking.
///
/// # Examples
///
/// ```
/// use u_outranking::digraph::Action;
/// use u_outranking::recommendation::{RecommendationConfig, Recommender};
/// use u_outranking::tableau::{Criterion, PerformanceTableau, Threshold};
///
/// let tableau = PerformanceTableau::new(
///     vec![Action::new("a"), Action::new("b"), Action::new("c")],
///     vec![Criterion::new("g", 1.0).with_pref(Threshold::constant(1.0))],
///     vec![vec![3.0.into(), 2.0.into(), 1.0.into()]],
/// )
/// .unwrap();
/// let rec = Recommender::from_tableau(
///     &tableau,
///     &Default::default(),
///     &RecommendationConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(rec.first_choice().unwrap().members, vec!["a"]);
/// assert_eq!(rec.ranking, vec!["a", "b", "c"]);
/// ```
pub struct Recommender;

impl Recommender {
    /// Recommendation on an existing digraph.
    pub fn recommend(
        digraph: &ValuedDigraph,
        config: &RecommendationConfig,
    ) -> Result<ChoiceRecommendation> {
        config.validate()?;

        let circuits = CircuitEnumerator::enumerate(digraph, &config.circuits)?;
        if !circuits.is_empty() {
            warn!(
                event = "chordless_circuits",
                digraph = digraph.name(),
                circuits = circuits.len(),
            );
        }
        let good = KernelEnumerator::good_choices(digraph, &config.kernels)?;
        let bad = KernelEnumerator::bad_choices(digraph, &config.kernels)?;
        let ranking = config.ranking.rank(digraph)?;

        let n = digraph.order();
        let relation = (0..n)
            .map(|a| {
                let row = (0..n)
                    .map(|b| (digraph.action_id(b).to_string(), digraph.get(a, b)))
                    .collect();
                (digraph.action_id(a).to_string(), row)
            })
            .collect();

        let recommendation = ChoiceRecommendation {
            relation,
            chordless_cycles: circuits.iter().map(|c| c.ids(digraph)).collect(),
            good_choices: good.iter().map(|c| ChoiceRecord::new(c, digraph)).collect(),
            bad_choices: bad.iter().map(|c| ChoiceRecord::new(c, digraph)).collect(),
            ranking: ranking.ranking().to_vec(),
            ranking_rule: ranking.rule(),
        };
        info!(
            event = "recommendation_done",
            digraph = digraph.name(),
            circuits = recommendation.chordless_cycles.len(),
            good = recommendation.good_choices.len(),
            bad = recommendation.bad_choices.len(),
            rule = %recommendation.ranking_rule,
        );
        Ok(recommendation)
    }

    /// Builds the outranking digraph of `tableau`, then recommends.
    pub fn from_tableau(
        tableau: &PerformanceTableau,
        outranking: &OutrankingConfig,
        config: &RecommendationConfig,
    ) -> Result<ChoiceRecommendation> {
        let digraph = OutrankingBuilder::build(tableau, outranking)?;
        Self::recommend(&digraph, config)
    }
}
