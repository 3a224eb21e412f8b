//! Strong components, acyclicity and the prudent cut level.

use super::valued::ValuedDigraph;

impl ValuedDigraph {
    /// Strongly connected components of the `r > med` digraph.
    ///
    /// Components are listed in topological order of the condensation
    /// (a component only has arcs towards later components); members are
    /// sorted by ordinal. Iterative Tarjan, deterministic for a fixed action
    /// order.
    pub fn strong_components(&self) -> Vec<Vec<usize>> {
        let n = self.order();
        let med = self.med();
        strong_components_of(n, |a, b| a != b && self.get(a, b) > med)
    }

    /// Whether the `r > med` digraph contains a directed circuit (including
    /// two-cycles formed by symmetric arcs).
    pub fn has_circuit(&self) -> bool {
        self.strong_components().iter().any(|c| c.len() > 1)
    }

    /// Smallest positive cut level at which the crisp cut `r >= level`
    /// contains no circuit.
    ///
    /// Candidates are the distinct values above `med`, tried in increasing
    /// order. Returns `None` when no positive value exists or when even the
    /// highest cut is cyclic.
    pub fn prudent_beta_level(&self) -> Option<f64> {
        let n = self.order();
        let med = self.med();
        let mut levels: Vec<f64> = self
            .relation_slice()
            .iter()
            .copied()
            .filter(|&v| v > med)
            .collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();
        levels.into_iter().find(|&level| {
            strong_components_of(n, |a, b| a != b && self.get(a, b) >= level)
                .iter()
                .all(|c| c.len() == 1)
        })
    }
}

/// Tarjan's algorithm over an arc predicate, with an explicit stack.
pub(crate) fn strong_components_of(
    n: usize,
    arc: impl Fn(usize, usize) -> bool,
) -> Vec<Vec<usize>> {
    const UNVISITED: usize = usize::MAX;
    let mut index = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut counter = 0usize;

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        // (vertex, next successor candidate)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        index[root] = counter;
        low[root] = counter;
        counter += 1;
        stack.push(root);
        on_stack[root] = true;

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            let mut child = None;
            while frame.1 < n {
                let w = frame.1;
                frame.1 += 1;
                if !arc(v, w) {
                    continue;
                }
                if index[w] == UNVISITED {
                    child = Some(w);
                    break;
                } else if on_stack[w] {
                    low[v] = low[v].min(index[w]);
                }
            }
            if let Some(w) = child {
                index[w] = counter;
                low[w] = counter;
                counter += 1;
                stack.push(w);
                on_stack[w] = true;
                frames.push((w, 0));
                continue;
            }
            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                low[parent] = low[parent].min(low[v]);
            }
            if low[v] == index[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                component.sort_unstable();
                components.push(component);
            }
        }
    }
    // Tarjan emits sinks first.
    components.reverse();
    components
}
