// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Simple graphs on `0..n` assembled from forms or predicates.
//!
//! Adjacency is kept twice: a dense boolean matrix for O(1) tests and
//! sorted neighbour lists for iteration. Edges are listed as `(i, j)` with
//! `i < j` in lexicographic order, triangles as `(i, j, k)` with `i < j < k`.
//! Every enumeration in this crate walks these orders, which is what makes
//! downstream output reproducible.

use std::collections::{HashMap, HashSet};

use w33_math::form::Form;
use w33_math::projective::ProjectivePoint;
use w33_math::{Error, Permutation, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    matrix: Vec<bool>,
    neighbors: Vec<Vec<usize>>,
}

impl Graph {
    /// `adjacent(i, j) := pred(i, j)` for `i ≠ j`.
    ///
    /// The predicate is evaluated for both orders and must agree.
    pub fn from_predicate<F>(n: usize, pred: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut matrix = vec![false; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let a = pred(i, j);
                if a != pred(j, i) {
                    return Err(Error::constraint(format!(
                        "adjacency predicate is not symmetric on ({i}, {j})"
                    )));
                }
                matrix[i * n + j] = a;
                matrix[j * n + i] = a;
            }
        }
        Ok(Self::from_matrix_unchecked(n, matrix))
    }

    /// Orthogonality graph: `p_i ~ p_j` iff `form(p_i, p_j) == 0`.
    pub fn from_form<F: Form>(points: &[ProjectivePoint], form: &F) -> Result<Self> {
        Self::from_predicate(points.len(), |i, j| {
            form.is_orthogonal(points[i].coords(), points[j].coords())
        })
    }

    /// Validate an explicit adjacency matrix.
    pub fn from_adjacency(rows: &[Vec<bool>]) -> Result<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return Err(Error::constraint("adjacency matrix is not square"));
        }
        let mut matrix = vec![false; n * n];
        for (i, row) in rows.iter().enumerate() {
            if row[i] {
                return Err(Error::constraint(format!("self-loop at vertex {i}")));
            }
            for (j, &a) in row.iter().enumerate() {
                if a != rows[j][i] {
                    return Err(Error::constraint(format!(
                        "adjacency is not symmetric on ({i}, {j})"
                    )));
                }
                matrix[i * n + j] = a;
            }
        }
        Ok(Self::from_matrix_unchecked(n, matrix))
    }

    /// Build from an edge list on `0..n`.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut matrix = vec![false; n * n];
        for &(i, j) in edges {
            if i >= n || j >= n || i == j {
                return Err(Error::constraint(format!("invalid edge ({i}, {j})")));
            }
            matrix[i * n + j] = true;
            matrix[j * n + i] = true;
        }
        Ok(Self::from_matrix_unchecked(n, matrix))
    }

    fn from_matrix_unchecked(n: usize, matrix: Vec<bool>) -> Self {
        let neighbors = (0..n)
            .map(|i| (0..n).filter(|&j| matrix[i * n + j]).collect())
            .collect();
        Self {
            n,
            matrix,
            neighbors,
        }
    }

    pub fn order(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn adjacent(&self, i: usize, j: usize) -> bool {
        self.matrix[i * self.n + j]
    }

    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }

    pub fn degree(&self, i: usize) -> usize {
        self.neighbors[i].len()
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Symmetric and irreflexive.
    pub fn is_simple(&self) -> bool {
        (0..self.n).all(|i| {
            !self.adjacent(i, i) && (0..self.n).all(|j| self.adjacent(i, j) == self.adjacent(j, i))
        })
    }

    /// Edges `(i, j)`, `i < j`, lexicographic.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for i in 0..self.n {
            for &j in &self.neighbors[i] {
                if j > i {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    /// Triangles `(i, j, k)`, `i < j < k`, lexicographic.
    pub fn triangles(&self) -> Vec<(usize, usize, usize)> {
        let mut triangles = Vec::new();
        for (i, j) in self.edges() {
            for &k in &self.neighbors[j] {
                if k > j && self.adjacent(i, k) {
                    triangles.push((i, j, k));
                }
            }
        }
        triangles
    }

    /// Vertices adjacent to both `i` and `j`, ascending.
    pub fn common_neighbors(&self, i: usize, j: usize) -> Vec<usize> {
        self.neighbors[i]
            .iter()
            .copied()
            .filter(|&k| self.adjacent(j, k))
            .collect()
    }

    /// The complement graph.
    pub fn complement(&self) -> Self {
        let n = self.n;
        let matrix = (0..n * n)
            .map(|idx| idx / n != idx % n && !self.matrix[idx])
            .collect();
        Self::from_matrix_unchecked(n, matrix)
    }

    /// Subgraph induced on `vertices`, renumbered in the given order.
    pub fn induced(&self, vertices: &[usize]) -> Self {
        let m = vertices.len();
        let mut matrix = vec![false; m * m];
        for (a, &u) in vertices.iter().enumerate() {
            for (b, &v) in vertices.iter().enumerate() {
                matrix[a * m + b] = u != v && self.adjacent(u, v);
            }
        }
        Self::from_matrix_unchecked(m, matrix)
    }

    /// Derive the lines of a partial linear space from its collinearity graph.
    ///
    /// For every edge `(i, j)` the line through it is `{i, j}` plus the common
    /// neighbours of `i` and `j`; that set must have exactly `line_size − 2`
    /// extra points and be a clique. Lines are sorted and listed once, in the
    /// order their first edge appears.
    pub fn lines(&self, line_size: usize) -> Result<Vec<Vec<usize>>> {
        if line_size < 2 {
            return Err(Error::constraint(format!("line size {line_size} is below 2")));
        }
        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for (i, j) in self.edges() {
            let common = self.common_neighbors(i, j);
            if common.len() != line_size - 2 {
                return Err(Error::constraint(format!(
                    "edge ({i}, {j}) has {} common neighbours, expected {}",
                    common.len(),
                    line_size - 2
                )));
            }
            let mut line = common;
            line.push(i);
            line.push(j);
            line.sort_unstable();
            for (a, &u) in line.iter().enumerate() {
                if line[a + 1..].iter().any(|&v| !self.adjacent(u, v)) {
                    return Err(Error::constraint(format!(
                        "line through ({i}, {j}) is not a clique"
                    )));
                }
            }
            if seen.insert(line.clone()) {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    /// Does `perm` preserve adjacency?
    pub fn is_automorphism(&self, perm: &Permutation) -> bool {
        perm.degree() == self.n
            && self.edges().iter().all(|&(i, j)| self.adjacent(perm.apply(i), perm.apply(j)))
    }

    /// Action of a vertex automorphism on edge indices (see [`Graph::edges`]).
    pub fn induced_edge_permutation(&self, perm: &Permutation) -> Result<Permutation> {
        if !self.is_automorphism(perm) {
            return Err(Error::constraint("permutation is not a graph automorphism"));
        }
        let edges = self.edges();
        let index: HashMap<(usize, usize), usize> =
            edges.iter().enumerate().map(|(k, &e)| (e, k)).collect();
        let images = edges
            .iter()
            .map(|&(i, j)| {
                let (a, b) = (perm.apply(i), perm.apply(j));
                index[&(a.min(b), a.max(b))]
            })
            .collect();
        Permutation::from_images(images)
    }
}
