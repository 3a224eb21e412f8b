//! The performance tableau.

use super::types::{Criterion, Evaluation};
use crate::digraph::{build_index, Action};
use crate::error::{OutrankingError, Result};
use std::collections::{BTreeMap, HashMap};

/// Actions evaluated on a family of weighted criteria.
///
/// Evaluations are stored criterion-major: `evaluation(c, a)` is the
/// performance of action `a` on criterion `c`, both by ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceTableau {
    name: String,
    actions: Vec<Action>,
    criteria: Vec<Criterion>,
    evaluation: Vec<Vec<Evaluation>>,
}

impl PerformanceTableau {
    /// Builds and validates a tableau from criterion-major evaluation rows.
    ///
    /// # Errors
    ///
    /// - `EmptyCriteria` when `criteria` is empty
    /// - `ThresholdOrder` on an inconsistent threshold family
    /// - `InvalidConfig` on duplicate identifiers or mis-sized rows
    pub fn new(
        actions: Vec<Action>,
        criteria: Vec<Criterion>,
        evaluation: Vec<Vec<Evaluation>>,
    ) -> Result<Self> {
        let tableau = Self {
            name: "performance tableau".to_string(),
            actions,
            criteria,
            evaluation,
        };
        tableau.validate()?;
        Ok(tableau)
    }

    /// Builds a tableau from a `criterionId -> actionId -> evaluation` map.
    ///
    /// Unlisted entries are `NotApplicable`; identifiers absent from the
    /// action set fail with `MissingAction`.
    pub fn from_map(
        actions: Vec<Action>,
        criteria: Vec<Criterion>,
        evaluation: &BTreeMap<String, BTreeMap<String, Evaluation>>,
    ) -> Result<Self> {
        let action_index = build_index(&actions)?;
        let criterion_index = criterion_index(&criteria)?;
        let mut rows = vec![vec![Evaluation::NotApplicable; actions.len()]; criteria.len()];
        for (cid, row) in evaluation {
            let c = *criterion_index.get(cid.as_str()).ok_or_else(|| {
                OutrankingError::InvalidConfig(format!("unknown criterion '{cid}'"))
            })?;
            for (aid, &e) in row {
                let a = *action_index
                    .get(aid)
                    .ok_or_else(|| OutrankingError::MissingAction(aid.clone()))?;
                rows[c][a] = e;
            }
        }
        Self::new(actions, criteria, rows)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Checks criteria, identifiers and the evaluation shape.
    pub fn validate(&self) -> Result<()> {
        if self.criteria.is_empty() {
            return Err(OutrankingError::EmptyCriteria);
        }
        build_index(&self.actions)?;
        criterion_index(&self.criteria)?;
        for c in &self.criteria {
            c.validate()?;
        }
        if self.evaluation.len() != self.criteria.len()
            || self
                .evaluation
                .iter()
                .any(|row| row.len() != self.actions.len())
        {
            return Err(OutrankingError::InvalidConfig(format!(
                "evaluation must be {} criteria x {} actions",
                self.criteria.len(),
                self.actions.len()
            )));
        }
        for (c, row) in self.criteria.iter().zip(&self.evaluation) {
            if let Some(x) = row.iter().filter_map(|e| e.value()).find(|x| !x.is_finite()) {
                return Err(OutrankingError::InvalidConfig(format!(
                    "criterion '{}' has a non-finite evaluation {x}",
                    c.id
                )));
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn order(&self) -> usize {
        self.actions.len()
    }

    /// Evaluation of action `a` on criterion `c` (ordinals).
    #[inline]
    pub fn evaluation(&self, c: usize, a: usize) -> Evaluation {
        self.evaluation[c][a]
    }

    /// Evaluation row of criterion `c`.
    pub fn criterion_row(&self, c: usize) -> &[Evaluation] {
        &self.evaluation[c]
    }

    /// Sum of criteria weights `W`.
    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    pub fn criterion_index(&self, id: &str) -> Result<usize> {
        self.criteria
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| OutrankingError::InvalidConfig(format!("unknown criterion '{id}'")))
    }

    pub fn action_index(&self, id: &str) -> Result<usize> {
        self.actions
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| OutrankingError::MissingAction(id.to_string()))
    }

    /// Share of `NotApplicable` entries, in `[0, 1]`.
    pub fn missing_rate(&self) -> f64 {
        let total = self.criteria.len() * self.actions.len();
        if total == 0 {
            return 0.0;
        }
        let missing = self
            .evaluation
            .iter()
            .flatten()
            .filter(|e| e.is_missing())
            .count();
        missing as f64 / total as f64
    }

    /// `criterionId -> actionId -> evaluation` view.
    pub fn evaluation_map(&self) -> BTreeMap<String, BTreeMap<String, Evaluation>> {
        self.criteria
            .iter()
            .zip(&self.evaluation)
            .map(|(c, row)| {
                let inner = self
                    .actions
                    .iter()
                    .zip(row)
                    .map(|(a, &e)| (a.id.clone(), e))
                    .collect();
                (c.id.clone(), inner)
            })
            .collect()
    }

    /// Pretty-printed evaluation table (criteria as rows).
    pub fn show(&self) -> String {
        let mut out = format!("*---- {} ----*\n", self.name);
        out.push_str(&format!("{:>8} |", "criteria"));
        for a in &self.actions {
            out.push_str(&format!(" {:>8}", a.id));
        }
        out.push('\n');
        for (c, row) in self.criteria.iter().zip(&self.evaluation) {
            out.push_str(&format!("{:>8} |", c.id));
            for e in row {
                match e {
                    Evaluation::Number(x) => out.push_str(&format!(" {x:>8.2}")),
                    Evaluation::NotApplicable => out.push_str(&format!(" {:>8}", "NA")),
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(feature = "serde")]
mod record {
    //! Serialisable `{actions, criteria, evaluation}` record.

    use super::*;

    #[derive(serde::Serialize, serde::Deserialize)]
    pub(super) struct TableauRecord {
        actions: Vec<Action>,
        criteria: Vec<Criterion>,
        evaluation: BTreeMap<String, BTreeMap<String, Evaluation>>,
    }

    impl serde::Serialize for PerformanceTableau {
        fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
            TableauRecord {
                actions: self.actions.clone(),
                criteria: self.criteria.clone(),
                evaluation: self.evaluation_map(),
            }
            .serialize(s)
        }
    }

    impl<'de> serde::Deserialize<'de> for PerformanceTableau {
        fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
            let r = TableauRecord::deserialize(d)?;
            PerformanceTableau::from_map(r.actions, r.criteria, &r.evaluation)
                .map_err(serde::de::Error::custom)
        }
    }
}

fn criterion_index(criteria: &[Criterion]) -> Result<HashMap<&str, usize>> {
    let mut index = HashMap::with_capacity(criteria.len());
    for (i, c) in criteria.iter().enumerate() {
        if index.insert(c.id.as_str(), i).is_some() {
            return Err(OutrankingError::InvalidConfig(format!(
                "duplicate criterion id '{}'",
                c.id
            )));
        }
    }
    Ok(index)
}
