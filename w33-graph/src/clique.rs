// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Bounded k-clique enumeration and double-six detection.

use tracing::{debug, warn};
use w33_math::{Error, Result};

use crate::graph::Graph;

struct CliqueSearch<'a> {
    graph: &'a Graph,
    k: usize,
    budget: usize,
    nodes: usize,
    stack: Vec<usize>,
    found: Vec<Vec<usize>>,
}

impl CliqueSearch<'_> {
    fn extend(&mut self, candidates: &[usize]) -> Result<()> {
        self.nodes += 1;
        if self.nodes > self.budget {
            return Err(Error::ResourceBudgetExceeded {
                what: "clique search",
                budget: self.budget,
                explored: self.nodes - 1,
            });
        }
        if self.stack.len() == self.k {
            self.found.push(self.stack.clone());
            return Ok(());
        }
        let needed = self.k - self.stack.len();
        for (pos, &v) in candidates.iter().enumerate() {
            // not enough candidates left to finish a clique
            if candidates.len() - pos < needed {
                break;
            }
            let next: Vec<usize> = candidates[pos + 1..]
                .iter()
                .copied()
                .filter(|&u| self.graph.adjacent(v, u))
                .collect();
            self.stack.push(v);
            self.extend(&next)?;
            self.stack.pop();
        }
        Ok(())
    }
}

/// All k-cliques as ascending vertex lists, in lexicographic order.
///
/// Backtracking extends a partial clique only by higher-indexed common
/// neighbours, so each clique is produced once. Every search-tree node
/// counts against `budget`; exceeding it is `ResourceBudgetExceeded`.
pub fn enumerate_k_cliques(graph: &Graph, k: usize, budget: usize) -> Result<Vec<Vec<usize>>> {
    let mut search = CliqueSearch {
        graph,
        k,
        budget,
        nodes: 0,
        stack: Vec::with_capacity(k),
        found: Vec::new(),
    };
    let all: Vec<usize> = (0..graph.order()).collect();
    if let Err(e) = search.extend(&all) {
        warn!(k, budget, "clique search stopped: {e}");
        return Err(e);
    }
    debug!(k, cliques = search.found.len(), nodes = search.nodes, "clique search complete");
    Ok(search.found)
}

/// Is the cross adjacency between `a` and `b` a perfect matching?
fn is_double_six(graph: &Graph, a: &[usize], b: &[usize]) -> bool {
    a.len() == b.len()
        && a.iter().all(|x| !b.contains(x))
        && a.iter()
            .all(|&x| b.iter().filter(|&&y| graph.adjacent(x, y)).count() == 1)
        && b.iter()
            .all(|&y| a.iter().filter(|&&x| graph.adjacent(x, y)).count() == 1)
}

/// Unordered pairs `(i, j)`, `i < j`, of cliques forming a double-six.
pub fn double_sixes(graph: &Graph, cliques: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..cliques.len() {
        for j in (i + 1)..cliques.len() {
            if is_double_six(graph, &cliques[i], &cliques[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

pub fn double_six_count(graph: &Graph, cliques: &[Vec<usize>]) -> usize {
    double_sixes(graph, cliques).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_graph_clique_count() {
        // C(6, 3) = 20 triangles in K6
        let k6 = Graph::from_predicate(6, |_, _| true).unwrap();
        let cliques = enumerate_k_cliques(&k6, 3, 10_000).unwrap();
        assert_eq!(cliques.len(), 20);
        assert_eq!(cliques[0], vec![0, 1, 2]);
        assert!(cliques.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_triangles_agree_with_graph() {
        let g = Graph::from_predicate(8, |i, j| (i ^ j).count_ones() != 2).unwrap();
        let cliques = enumerate_k_cliques(&g, 3, 100_000).unwrap();
        let triangles: Vec<Vec<usize>> = g
            .triangles()
            .into_iter()
            .map(|(a, b, c)| vec![a, b, c])
            .collect();
        assert_eq!(cliques, triangles);
    }

    #[test]
    fn test_budget_exceeded() {
        let k8 = Graph::from_predicate(8, |_, _| true).unwrap();
        let err = enumerate_k_cliques(&k8, 4, 10).unwrap_err();
        assert!(matches!(err, Error::ResourceBudgetExceeded { budget: 10, .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_double_six_on_crown_graph() {
        // two triangles {0,1,2}, {3,4,5} joined by the matching i ~ i+3
        let g = Graph::from_predicate(6, |i, j| {
            (i < 3) == (j < 3) || i.abs_diff(j) == 3
        })
        .unwrap();
        let cliques = vec![vec![0, 1, 2], vec![3, 4, 5], vec![0, 1, 3]];
        assert_eq!(double_sixes(&g, &cliques), vec![(0, 1)]);
        assert_eq!(double_six_count(&g, &cliques), 1);
    }
}
