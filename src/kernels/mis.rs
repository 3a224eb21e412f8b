//! Lazy maximal independent set generation.

use crate::digraph::{ActionSet, ValuedDigraph};

/// Search node: the independent set so far, the candidates that may still
/// join it, and the excluded vertices it has not covered yet.
struct Frame {
    members: ActionSet,
    candidates: ActionSet,
    uncovered: ActionSet,
}

/// Iterator over the maximal independent sets of the symmetric closure of
/// a digraph (`a ~ b` when `r(a, b) > med` or `r(b, a) > med`).
///
/// Every vertex is branched on twice: included (its neighbourhood leaves
/// the candidates) or excluded (it joins the uncovered set and must later
/// be covered by a neighbour). A node is reported when both sets are empty
/// and abandoned as soon as an uncovered vertex has no candidate neighbour
/// left. Each maximal set is therefore produced exactly once, and no
/// non-maximal set is ever produced.
///
/// Sets come out in include-first depth-first order over increasing
/// ordinals.
pub struct MisIter {
    neighbours: Vec<ActionSet>,
    stack: Vec<Frame>,
}

impl MisIter {
    pub fn new(digraph: &ValuedDigraph) -> Self {
        let n = digraph.order();
        let gamma = digraph.gamma();
        let neighbours = (0..n).map(|a| gamma.neighbours(a)).collect();
        Self::from_neighbours(n, neighbours)
    }

    pub(crate) fn from_neighbours(n: usize, neighbours: Vec<ActionSet>) -> Self {
        let stack = vec![Frame {
            members: ActionSet::new(n),
            candidates: ActionSet::full(n),
            uncovered: ActionSet::new(n),
        }];
        Self { neighbours, stack }
    }

    fn dead_end(&self, frame: &Frame) -> bool {
        frame
            .uncovered
            .iter()
            .any(|x| !self.neighbours[x].intersects(&frame.candidates))
    }
}

impl Iterator for MisIter {
    type Item = ActionSet;

    fn next(&mut self) -> Option<ActionSet> {
        while let Some(frame) = self.stack.pop() {
            let Some(v) = frame.candidates.iter().next() else {
                if frame.uncovered.is_empty() {
                    return Some(frame.members);
                }
                continue;
            };
            if self.dead_end(&frame) {
                continue;
            }

            let mut excluded = Frame {
                members: frame.members.clone(),
                candidates: frame.candidates.clone(),
                uncovered: frame.uncovered.clone(),
            };
            excluded.candidates.remove(v);
            excluded.uncovered.insert(v);

            let mut included = frame;
            included.members.insert(v);
            included.candidates.remove(v);
            included.candidates.difference_with(&self.neighbours[v]);
            included.uncovered.difference_with(&self.neighbours[v]);

            // include branch is explored first
            self.stack.push(excluded);
            self.stack.push(included);
        }
        None
    }
}
