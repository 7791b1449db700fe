// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Combinatorial invariants: regularity, strong regularity, triangles.
//!
//! A graph on n vertices is strongly regular with parameters (n, k, λ, μ)
//! when it is k-regular, every adjacent pair has λ common neighbours and
//! every distinct non-adjacent pair has μ. Failure is an ordinary answer,
//! returned as [`NotStronglyRegular`] with the observed counts attached.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrgParameters {
    pub n: usize,
    pub k: usize,
    pub lambda: usize,
    pub mu: usize,
}

/// Diagnostic for a graph that failed the strong-regularity test.
///
/// Each list holds the distinct observed values, ascending. A strongly
/// regular graph has exactly one value in each (μ may be empty for a
/// complete graph, λ for an edgeless one).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("not strongly regular: degrees {degrees:?}, λ counts {lambda_counts:?}, μ counts {mu_counts:?}")]
pub struct NotStronglyRegular {
    pub degrees: Vec<usize>,
    pub lambda_counts: Vec<usize>,
    pub mu_counts: Vec<usize>,
}

pub fn degree_sequence(graph: &Graph) -> Vec<usize> {
    (0..graph.order()).map(|i| graph.degree(i)).collect()
}

pub fn is_regular(graph: &Graph) -> bool {
    let degrees = degree_sequence(graph);
    degrees.windows(2).all(|w| w[0] == w[1])
}

fn distinct(mut values: Vec<usize>) -> Vec<usize> {
    values.sort_unstable();
    values.dedup();
    values
}

pub fn srg_parameters(graph: &Graph) -> Result<SrgParameters, NotStronglyRegular> {
    let n = graph.order();
    let degrees = distinct(degree_sequence(graph));

    let mut lambdas = Vec::new();
    let mut mus = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let c = graph.common_neighbors(i, j).len();
            if graph.adjacent(i, j) {
                lambdas.push(c);
            } else {
                mus.push(c);
            }
        }
    }
    let lambda_counts = distinct(lambdas);
    let mu_counts = distinct(mus);

    if degrees.len() > 1 || lambda_counts.len() > 1 || mu_counts.len() > 1 {
        return Err(NotStronglyRegular {
            degrees,
            lambda_counts,
            mu_counts,
        });
    }
    Ok(SrgParameters {
        n,
        k: degrees.first().copied().unwrap_or(0),
        lambda: lambda_counts.first().copied().unwrap_or(0),
        mu: mu_counts.first().copied().unwrap_or(0),
    })
}

/// `trace(A³) / 6`, computed in exact integer arithmetic.
pub fn triangle_count(graph: &Graph) -> u64 {
    let n = graph.order();
    let mut a2 = vec![0u64; n * n];
    for i in 0..n {
        for &k in graph.neighbors(i) {
            for &j in graph.neighbors(k) {
                a2[i * n + j] += 1;
            }
        }
    }
    // trace(A³) = Σ_ij A²[i][j] · A[j][i]
    let trace: u64 = (0..n)
        .map(|i| graph.neighbors(i).iter().map(|&j| a2[i * n + j]).sum::<u64>())
        .sum();
    trace / 6
}

/// Restricted eigenvalues of an SRG.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SrgEigenvalues {
    /// (k, 1)
    pub principal: (f64, usize),
    /// (r, f), r > 0 for a non-trivial SRG
    pub positive: (f64, f64),
    /// (s, g)
    pub negative: (f64, f64),
}

/// Eigenvalues and multiplicities determined by (n, k, λ, μ).
///
/// r, s = ((λ − μ) ± √Δ) / 2 with Δ = (λ − μ)² + 4(k − μ), and
/// f, g = ½[(n − 1) ∓ (2k + (n − 1)(λ − μ)) / (r − s)].
/// Multiplicities are left as floats; non-integral values mean no such
/// graph exists.
pub fn srg_eigenvalues(params: &SrgParameters) -> SrgEigenvalues {
    let n = params.n as f64;
    let k = params.k as f64;
    let d = params.lambda as f64 - params.mu as f64;
    let disc = (d * d + 4.0 * (k - params.mu as f64)).sqrt();
    let r = (d + disc) / 2.0;
    let s = (d - disc) / 2.0;
    let skew = if disc > 0.0 {
        (2.0 * k + (n - 1.0) * d) / disc
    } else {
        0.0
    };
    SrgEigenvalues {
        principal: (k, 1),
        positive: (r, ((n - 1.0) - skew) / 2.0),
        negative: (s, ((n - 1.0) + skew) / 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::SPECTRAL_TOLERANCE;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= SPECTRAL_TOLERANCE
    }

    fn petersen() -> Graph {
        // Kneser graph K(5, 2): 2-subsets adjacent when disjoint
        let pairs: Vec<(usize, usize)> = (0..5)
            .flat_map(|a| ((a + 1)..5).map(move |b| (a, b)))
            .collect();
        Graph::from_predicate(10, |i, j| {
            let (a, b) = pairs[i];
            let (c, d) = pairs[j];
            a != c && a != d && b != c && b != d
        })
        .unwrap()
    }

    #[test]
    fn test_petersen_is_srg() {
        let p = srg_parameters(&petersen()).unwrap();
        assert_eq!(
            p,
            SrgParameters {
                n: 10,
                k: 3,
                lambda: 0,
                mu: 1
            }
        );
        assert_eq!(triangle_count(&petersen()), 0);
    }

    #[test]
    fn test_path_is_not_srg() {
        let path = Graph::from_predicate(4, |i, j| i.abs_diff(j) == 1).unwrap();
        assert!(!is_regular(&path));
        let err = srg_parameters(&path).unwrap_err();
        assert_eq!(err.degrees, vec![1, 2]);
        assert!(err.to_string().contains("not strongly regular"));
    }

    #[test]
    fn test_triangle_count_matches_enumeration() {
        let g = Graph::from_predicate(7, |i, j| (i + j) % 3 != 0).unwrap();
        assert_eq!(triangle_count(&g), g.triangles().len() as u64);
    }

    #[test]
    fn test_srg_eigenvalues_w33_parameters() {
        let ev = srg_eigenvalues(&SrgParameters {
            n: 40,
            k: 12,
            lambda: 2,
            mu: 4,
        });
        assert_eq!(ev.principal, (12.0, 1));
        assert!(close(ev.positive.0, 2.0));
        assert!(close(ev.positive.1, 24.0));
        assert!(close(ev.negative.0, -4.0));
        assert!(close(ev.negative.1, 15.0));
    }

    #[test]
    fn test_srg_eigenvalues_petersen() {
        let ev = srg_eigenvalues(&srg_parameters(&petersen()).unwrap());
        assert!(close(ev.positive.0, 1.0));
        assert!(close(ev.positive.1, 5.0));
        assert!(close(ev.negative.0, -2.0));
        assert!(close(ev.negative.1, 4.0));
    }
}
