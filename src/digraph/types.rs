//! Actions, action bitsets and neighbourhood (gamma) sets.

/// A decision alternative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    /// Opaque identifier, unique within an action set.
    pub id: String,
    /// Optional display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

impl Action {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, falling back to the identifier.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Fixed-universe bitset over action ordinals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ActionSet {
    words: Vec<u64>,
    universe: usize,
}

impl ActionSet {
    /// Empty set over the ordinals `0..universe`.
    pub fn new(universe: usize) -> Self {
        Self {
            words: vec![0; universe.div_ceil(64)],
            universe,
        }
    }

    /// Set containing every ordinal of the universe.
    pub fn full(universe: usize) -> Self {
        let mut set = Self::new(universe);
        for i in 0..universe {
            set.insert(i);
        }
        set
    }

    pub fn from_indices(universe: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(universe);
        for i in indices {
            set.insert(i);
        }
        set
    }

    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Inserts `i`; returns `true` if it was absent.
    pub fn insert(&mut self, i: usize) -> bool {
        debug_assert!(i < self.universe);
        let (w, b) = (i / 64, i % 64);
        let absent = self.words[w] & (1 << b) == 0;
        self.words[w] |= 1 << b;
        absent
    }

    /// Removes `i`; returns `true` if it was present.
    pub fn remove(&mut self, i: usize) -> bool {
        debug_assert!(i < self.universe);
        let (w, b) = (i / 64, i % 64);
        let present = self.words[w] & (1 << b) != 0;
        self.words[w] &= !(1 << b);
        present
    }

    pub fn contains(&self, i: usize) -> bool {
        i < self.universe && self.words[i / 64] & (1 << (i % 64)) != 0
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Ordinals in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    None
                } else {
                    let b = w.trailing_zeros() as usize;
                    w &= w - 1;
                    Some(wi * 64 + b)
                }
            })
        })
    }

    pub fn union_with(&mut self, other: &ActionSet) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
    }

    pub fn intersect_with(&mut self, other: &ActionSet) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= *b;
        }
    }

    pub fn difference_with(&mut self, other: &ActionSet) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !*b;
        }
    }

    pub fn intersects(&self, other: &ActionSet) -> bool {
        self.words.iter().zip(&other.words).any(|(a, b)| a & b != 0)
    }

    pub fn is_subset(&self, other: &ActionSet) -> bool {
        self.words.iter().zip(&other.words).all(|(a, b)| a & !b == 0)
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

/// Neighbourhood index of a digraph.
///
/// For the gamma sets, `out[a] = { b != a : r[a][b] > med }` (dominated
/// neighbourhood) and `inn[a] = { b != a : r[b][a] > med }` (absorbing
/// neighbourhood). The not-gamma sets use the strict `< med` test instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaSets {
    out: Vec<ActionSet>,
    inn: Vec<ActionSet>,
}

impl GammaSets {
    pub(crate) fn build(n: usize, mut test: impl FnMut(usize, usize) -> bool) -> Self {
        let mut out = vec![ActionSet::new(n); n];
        let mut inn = vec![ActionSet::new(n); n];
        for a in 0..n {
            for b in 0..n {
                if a != b && test(a, b) {
                    out[a].insert(b);
                    inn[b].insert(a);
                }
            }
        }
        Self { out, inn }
    }

    /// `Γ⁺[a]`: actions `a` relates to.
    pub fn out_set(&self, a: usize) -> &ActionSet {
        &self.out[a]
    }

    /// `Γ⁻[a]`: actions relating to `a`.
    pub fn in_set(&self, a: usize) -> &ActionSet {
        &self.inn[a]
    }

    pub fn out_degree(&self, a: usize) -> usize {
        self.out[a].len()
    }

    pub fn in_degree(&self, a: usize) -> usize {
        self.inn[a].len()
    }

    /// Underlying symmetric neighbourhood `Γ⁺[a] ∪ Γ⁻[a]`.
    pub fn neighbours(&self, a: usize) -> ActionSet {
        let mut set = self.out[a].clone();
        set.union_with(&self.inn[a]);
        set
    }

    pub fn order(&self) -> usize {
        self.out.len()
    }
}
