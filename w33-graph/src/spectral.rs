// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Adjacency and Seidel Spectra
//!
//! Both matrices are real symmetric, so `nalgebra::SymmetricEigen` gives
//! real eigenvalues directly. Eigenvalues are sorted descending and grouped
//! into `(value, multiplicity)` pairs: a value joins the current group when
//! it lies within [`SPECTRAL_TOLERANCE`] of the group's first member. The
//! reported value is the mean of the group.
//!
//! ## Cost
//!
//! O(n³) per decomposition; n = 40 for W33 and 27 for the Schläfli graph.

use nalgebra::{DMatrix, SymmetricEigen};
use tracing::debug;

use crate::graph::Graph;

/// Absolute tolerance for every float comparison in the crate.
pub const SPECTRAL_TOLERANCE: f64 = 1e-6;

/// `(eigenvalue, multiplicity)` pairs, eigenvalues descending.
pub type Spectrum = Vec<(f64, usize)>;

/// 0/1 adjacency matrix as f64.
pub fn adjacency_matrix(graph: &Graph) -> DMatrix<f64> {
    let n = graph.order();
    DMatrix::from_fn(n, n, |i, j| if graph.adjacent(i, j) { 1.0 } else { 0.0 })
}

/// Seidel matrix `J − I − 2A`: 0 on the diagonal, −1 on edges, +1 elsewhere.
pub fn seidel_matrix(graph: &Graph) -> DMatrix<f64> {
    let n = graph.order();
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            0.0
        } else if graph.adjacent(i, j) {
            -1.0
        } else {
            1.0
        }
    })
}

fn grouped_eigenvalues(matrix: DMatrix<f64>) -> Spectrum {
    let eigen = SymmetricEigen::new(matrix);
    let mut values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    values.sort_by(|a, b| b.total_cmp(a));

    let mut groups: Vec<(f64, Vec<f64>)> = Vec::new();
    for v in values {
        let joins = groups
            .last()
            .is_some_and(|(first, _)| (first - v).abs() <= SPECTRAL_TOLERANCE);
        if !joins {
            groups.push((v, Vec::new()));
        }
        if let Some((_, members)) = groups.last_mut() {
            members.push(v);
        }
    }
    let spectrum: Spectrum = groups
        .into_iter()
        .map(|(_, members)| {
            let mean = members.iter().sum::<f64>() / members.len() as f64;
            (mean, members.len())
        })
        .collect();
    debug!(distinct = spectrum.len(), "grouped spectrum");
    spectrum
}

pub fn spectrum(graph: &Graph) -> Spectrum {
    grouped_eigenvalues(adjacency_matrix(graph))
}

pub fn seidel_spectrum(graph: &Graph) -> Spectrum {
    grouped_eigenvalues(seidel_matrix(graph))
}

/// Do two spectra agree value by value (within tolerance) and multiplicity?
pub fn spectra_match(a: &[(f64, usize)], b: &[(f64, usize)]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(&(x, m), &(y, k))| m == k && (x - y).abs() <= SPECTRAL_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(n: usize) -> Graph {
        Graph::from_predicate(n, |_, _| true).unwrap()
    }

    #[test]
    fn test_complete_graph_spectrum() {
        // K_n: n−1 once, −1 with multiplicity n−1
        let s = spectrum(&complete(6));
        assert!(spectra_match(&s, &[(5.0, 1), (-1.0, 5)]));
    }

    #[test]
    fn test_cycle_spectrum() {
        // C_4: 2, 0, 0, −2
        let c4 = Graph::from_predicate(4, |i, j| (i + 1) % 4 == j || (j + 1) % 4 == i).unwrap();
        assert!(spectra_match(&spectrum(&c4), &[(2.0, 1), (0.0, 2), (-2.0, 1)]));
    }

    #[test]
    fn test_seidel_of_complete_graph() {
        // S = I − J for K_n: 1 with multiplicity n−1, 1−n once
        let s = seidel_spectrum(&complete(5));
        assert!(spectra_match(&s, &[(1.0, 4), (-4.0, 1)]));
    }

    #[test]
    fn test_multiplicities_sum_to_order() {
        let g = Graph::from_predicate(9, |i, j| (i * j) % 3 == 1).unwrap();
        let total: usize = spectrum(&g).iter().map(|&(_, m)| m).sum();
        assert_eq!(total, 9);
    }

    #[test]
    fn test_spectra_match_rejects_multiplicity_change() {
        assert!(!spectra_match(&[(1.0, 2)], &[(1.0, 3)]));
        assert!(!spectra_match(&[(1.0, 2)], &[(1.1, 2)]));
    }
}
