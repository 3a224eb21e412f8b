//! The valued digraph: actions, valuation domain and dense relation.

use super::domain::ValuationDomain;
use super::types::{Action, GammaSets};
use crate::error::{OutrankingError, Result};
use crate::outranking::OutrankingProvenance;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Bipolar-valued digraph `(A, ValuationDomain, r)`.
///
/// The relation is stored as a dense row-major matrix indexed by action
/// ordinal; `get(a, b)` is the characteristic value of "a relates to b".
/// The diagonal always holds `med`.
///
/// Gamma and not-gamma sets are derived views built lazily and dropped on
/// every mutation of the relation.
#[derive(Debug, Clone)]
pub struct ValuedDigraph {
    name: String,
    actions: Vec<Action>,
    index: HashMap<String, usize>,
    domain: ValuationDomain,
    relation: Vec<f64>,
    gamma: OnceLock<GammaSets>,
    not_gamma: OnceLock<GammaSets>,
    provenance: Option<Arc<OutrankingProvenance>>,
}

impl ValuedDigraph {
    /// Builds a digraph whose off-diagonal values are produced by `value(a, b)`.
    ///
    /// Fails when two actions share an identifier or when a value falls
    /// outside the domain.
    pub fn from_fn(
        actions: Vec<Action>,
        domain: ValuationDomain,
        mut value: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self> {
        let index = build_index(&actions)?;
        let n = actions.len();
        let mut relation = vec![domain.med(); n * n];
        for a in 0..n {
            for b in 0..n {
                if a != b {
                    relation[a * n + b] = domain.check("relation value", value(a, b))?;
                }
            }
        }
        Ok(Self::assemble(actions, index, domain, relation))
    }

    /// Builds a digraph from a square matrix of characteristic values.
    pub fn from_matrix(
        actions: Vec<Action>,
        domain: ValuationDomain,
        rows: &[Vec<f64>],
    ) -> Result<Self> {
        let n = actions.len();
        if rows.len() != n || rows.iter().any(|r| r.len() != n) {
            return Err(OutrankingError::InvalidConfig(format!(
                "relation matrix must be {n}x{n}"
            )));
        }
        Self::from_fn(actions, domain, |a, b| rows[a][b])
    }

    /// Fully indeterminate digraph (every value `med`).
    pub fn indeterminate(actions: Vec<Action>, domain: ValuationDomain) -> Result<Self> {
        let med = domain.med();
        Self::from_fn(actions, domain, |_, _| med)
    }

    /// Crisp normalised digraph: listed arcs are `+1`, every other pair `-1`.
    pub fn from_arcs(ids: &[&str], arcs: &[(&str, &str)]) -> Result<Self> {
        let actions: Vec<Action> = ids.iter().map(|id| Action::new(*id)).collect();
        let index = build_index(&actions)?;
        let n = actions.len();
        let mut arc_set = vec![false; n * n];
        for (x, y) in arcs {
            let a = lookup(&index, x)?;
            let b = lookup(&index, y)?;
            arc_set[a * n + b] = true;
        }
        Self::from_fn(actions, ValuationDomain::normalized(), |a, b| {
            if arc_set[a * n + b] {
                1.0
            } else {
                -1.0
            }
        })
    }

    pub(crate) fn assemble(
        actions: Vec<Action>,
        index: HashMap<String, usize>,
        domain: ValuationDomain,
        relation: Vec<f64>,
    ) -> Self {
        Self {
            name: "digraph".to_string(),
            actions,
            index,
            domain,
            relation,
            gamma: OnceLock::new(),
            not_gamma: OnceLock::new(),
            provenance: None,
        }
    }

    /// Same actions and domain, new relation; drops the provenance.
    pub(crate) fn derive(&self, name: impl Into<String>, relation: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            actions: self.actions.clone(),
            index: self.index.clone(),
            domain: self.domain,
            relation,
            gamma: OnceLock::new(),
            not_gamma: OnceLock::new(),
            provenance: None,
        }
    }

    pub(crate) fn with_domain(mut self, domain: ValuationDomain) -> Self {
        self.domain = domain;
        self
    }

    pub(crate) fn set_domain(&mut self, domain: ValuationDomain) {
        self.domain = domain;
    }

    pub(crate) fn with_provenance(mut self, provenance: Arc<OutrankingProvenance>) -> Self {
        self.provenance = Some(provenance);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of actions `n`.
    pub fn order(&self) -> usize {
        self.actions.len()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action_id(&self, a: usize) -> &str {
        &self.actions[a].id
    }

    pub fn action_ids(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.id.as_str())
    }

    /// Maps action ordinals to their identifiers.
    pub fn ids_of(&self, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| self.actions[i].id.clone()).collect()
    }

    pub fn domain(&self) -> &ValuationDomain {
        &self.domain
    }

    pub fn med(&self) -> f64 {
        self.domain.med()
    }

    /// Ordinal of an action identifier.
    pub fn action_index(&self, id: &str) -> Result<usize> {
        lookup(&self.index, id)
    }

    /// Characteristic value by ordinals.
    ///
    /// # Panics
    /// Panics if an ordinal is out of range.
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.relation[a * self.order() + b]
    }

    /// Characteristic value by action identifiers.
    pub fn value(&self, a: &str, b: &str) -> Result<f64> {
        Ok(self.get(self.action_index(a)?, self.action_index(b)?))
    }

    /// Row `a` of the relation.
    pub fn row(&self, a: usize) -> &[f64] {
        let n = self.order();
        &self.relation[a * n..(a + 1) * n]
    }

    pub(crate) fn relation_slice(&self) -> &[f64] {
        &self.relation
    }

    /// Sets an off-diagonal characteristic value and invalidates the gamma
    /// sets. Diagonal entries stay `med`.
    pub fn set(&mut self, a: usize, b: usize, value: f64) -> Result<()> {
        let value = self.domain.check("relation value", value)?;
        if a != b {
            let n = self.order();
            self.relation[a * n + b] = value;
            self.invalidate();
        }
        Ok(())
    }

    pub(crate) fn relation_mut(&mut self) -> &mut [f64] {
        self.invalidate();
        &mut self.relation
    }

    fn invalidate(&mut self) {
        self.gamma = OnceLock::new();
        self.not_gamma = OnceLock::new();
    }

    /// `r[a][b] > med`.
    #[inline]
    pub fn is_arc(&self, a: usize, b: usize) -> bool {
        a != b && self.get(a, b) > self.domain.med()
    }

    /// Count of off-diagonal pairs with `r > med`.
    pub fn size(&self) -> usize {
        let n = self.order();
        (0..n)
            .flat_map(|a| (0..n).map(move |b| (a, b)))
            .filter(|&(a, b)| self.is_arc(a, b))
            .count()
    }

    /// Mean of `|r - med| / (max - med)` over off-diagonal pairs, in `[0, 1]`.
    ///
    /// A digraph with fewer than two actions has determinateness `0`.
    pub fn determinateness(&self) -> f64 {
        let n = self.order();
        if n < 2 {
            return 0.0;
        }
        let med = self.domain.med();
        let mut total = 0.0;
        for a in 0..n {
            for b in 0..n {
                if a != b {
                    total += (self.get(a, b) - med).abs();
                }
            }
        }
        total / (n * (n - 1)) as f64 / self.domain.amplitude()
    }

    /// Determinateness scaled to percent.
    pub fn determinateness_percent(&self) -> f64 {
        self.determinateness() * 100.0
    }

    /// Gamma sets (`r > med`), rebuilt after any mutation.
    pub fn gamma(&self) -> &GammaSets {
        self.gamma.get_or_init(|| {
            let med = self.domain.med();
            GammaSets::build(self.order(), |a, b| self.get(a, b) > med)
        })
    }

    /// Not-gamma sets (`r < med`), rebuilt after any mutation.
    pub fn not_gamma(&self) -> &GammaSets {
        self.not_gamma.get_or_init(|| {
            let med = self.domain.med();
            GammaSets::build(self.order(), |a, b| self.get(a, b) < med)
        })
    }

    /// Restriction of the digraph to the given actions, in the given order.
    pub fn subgraph(&self, ids: &[&str]) -> Result<Self> {
        let indices = ids
            .iter()
            .map(|id| self.action_index(id))
            .collect::<Result<Vec<_>>>()?;
        let actions: Vec<Action> = indices.iter().map(|&i| self.actions[i].clone()).collect();
        let index = build_index(&actions)?;
        let m = indices.len();
        let mut relation = vec![self.domain.med(); m * m];
        for (i, &a) in indices.iter().enumerate() {
            for (j, &b) in indices.iter().enumerate() {
                if i != j {
                    relation[i * m + j] = self.get(a, b);
                }
            }
        }
        Ok(Self::assemble(actions, index, self.domain, relation)
            .with_name(format!("sub-{}", self.name)))
    }

    /// Outranking provenance, present when the digraph was built from a
    /// performance tableau.
    pub fn outranking(&self) -> Option<&OutrankingProvenance> {
        self.provenance.as_deref()
    }

    /// Outranking provenance or a `NotOutrankingValuation` error naming the
    /// requested behaviour.
    pub fn require_outranking(&self, what: &'static str) -> Result<&OutrankingProvenance> {
        self.outranking()
            .ok_or(OutrankingError::NotOutrankingValuation(what))
    }

    pub(crate) fn provenance_arc(&self) -> Option<Arc<OutrankingProvenance>> {
        self.provenance.clone()
    }

    /// Ordinal mapping of `other`'s actions onto this digraph's ordinals.
    ///
    /// Fails with `MissingAction` unless both digraphs share the same
    /// action identifiers.
    pub(crate) fn align(&self, other: &ValuedDigraph) -> Result<Vec<usize>> {
        if let Some(missing) = other.action_ids().find(|id| !self.index.contains_key(*id)) {
            return Err(OutrankingError::MissingAction(missing.to_string()));
        }
        self.action_ids()
            .map(|id| other.action_index(id))
            .collect()
    }

    /// Pretty-printed relation table.
    pub fn relation_table(&self) -> String {
        let n = self.order();
        let width = self
            .actions
            .iter()
            .map(|a| a.id.len())
            .max()
            .unwrap_or(1)
            .max(6);
        let mut out = format!("{:>width$} |", "r(x,y)");
        for a in &self.actions {
            out.push_str(&format!(" {:>width$}", a.id));
        }
        out.push('\n');
        for a in 0..n {
            out.push_str(&format!("{:>width$} |", self.actions[a].id));
            for b in 0..n {
                out.push_str(&format!(" {:>width$.2}", self.get(a, b)));
            }
            out.push('\n');
        }
        out
    }
}

impl PartialEq for ValuedDigraph {
    /// Equal action sequences, domains and relations.
    fn eq(&self, other: &Self) -> bool {
        self.actions == other.actions
            && self.domain == other.domain
            && self.relation == other.relation
    }
}

pub(crate) fn build_index(actions: &[Action]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(actions.len());
    for (i, a) in actions.iter().enumerate() {
        if index.insert(a.id.clone(), i).is_some() {
            return Err(OutrankingError::InvalidConfig(format!(
                "duplicate action id '{}'",
                a.id
            )));
        }
    }
    Ok(index)
}

fn lookup(index: &HashMap<String, usize>, id: &str) -> Result<usize> {
    index
        .get(id)
        .copied()
        .ok_or_else(|| OutrankingError::MissingAction(id.to_string()))
}
