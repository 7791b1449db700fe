// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Edge-to-triangle coboundary and the cocycle equation `d₁ x = b`.
//!
//! Rows are the triangles `(i, j, k)` of the clique complex, columns the
//! edges, both in the lexicographic orders of [`Graph`]. The row of a
//! triangle has `+1` at `(j, k)`, `−1` at `(i, k)` and `+1` at `(i, j)`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use w33_math::linalg::{self, is_prime};
use w33_math::{Error, Result};

use crate::graph::Graph;

pub use w33_math::linalg::{CompositeSolution, LinearSolution as CocycleSolution};

/// Largest prime accepted by [`solve`].
pub const MAX_PRIME: u32 = 251;

/// Dense `d₁` with its row and column labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryMatrix {
    edges: Vec<(usize, usize)>,
    triangles: Vec<(usize, usize, usize)>,
    rows: Vec<Vec<i8>>,
}

impl BoundaryMatrix {
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn triangles(&self) -> &[(usize, usize, usize)] {
        &self.triangles
    }

    pub fn rows(&self) -> &[Vec<i8>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.edges.len()
    }

    fn widened(&self) -> Vec<Vec<i64>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|&x| x as i64).collect())
            .collect()
    }
}

pub fn boundary_d1(graph: &Graph) -> BoundaryMatrix {
    let edges = graph.edges();
    let triangles = graph.triangles();
    let column: HashMap<(usize, usize), usize> =
        edges.iter().enumerate().map(|(c, &e)| (e, c)).collect();

    let rows = triangles
        .iter()
        .map(|&(i, j, k)| {
            let mut row = vec![0i8; edges.len()];
            row[column[&(j, k)]] = 1;
            row[column[&(i, k)]] = -1;
            row[column[&(i, j)]] = 1;
            row
        })
        .collect();
    debug!(edges = edges.len(), triangles = triangles.len(), "assembled d1");
    BoundaryMatrix {
        edges,
        triangles,
        rows,
    }
}

/// `d₁ x (mod m)`.
pub fn apply_d1(d1: &BoundaryMatrix, x: &[u32], m: u32) -> Result<Vec<u32>> {
    if x.len() != d1.num_cols() {
        return Err(Error::constraint(format!(
            "cochain has {} entries for {} edges",
            x.len(),
            d1.num_cols()
        )));
    }
    if m < 2 {
        return Err(Error::constraint(format!("modulus {m} must be at least 2")));
    }
    Ok(d1
        .rows
        .iter()
        .map(|row| {
            let sum: i64 = row
                .iter()
                .zip(x.iter())
                .map(|(&a, &b)| a as i64 * b as i64)
                .sum();
            sum.rem_euclid(m as i64) as u32
        })
        .collect())
}

/// Solve `d₁ x = target (mod p)` for a prime `p ≤ MAX_PRIME`.
pub fn solve(d1: &BoundaryMatrix, target: &[i64], p: u32) -> Result<CocycleSolution> {
    if p > MAX_PRIME || !is_prime(p) {
        return Err(Error::constraint(format!(
            "modulus {p} is not a prime up to {MAX_PRIME}"
        )));
    }
    let solution = linalg::solve_mod_prime(&d1.widened(), d1.num_cols(), target, p)?;
    debug!(p, rank = solution.rank(), solvable = solution.is_solvable(), "cocycle solve");
    Ok(solution)
}

/// Solve modulo a squarefree composite such as 6, prime by prime with CRT.
pub fn solve_composite(d1: &BoundaryMatrix, target: &[i64], m: u32) -> Result<CompositeSolution> {
    let solution = linalg::solve_mod_squarefree(&d1.widened(), d1.num_cols(), target, m)?;
    debug!(m, solvable = solution.is_solvable(), "composite cocycle solve");
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k4() -> Graph {
        Graph::from_predicate(4, |_, _| true).unwrap()
    }

    #[test]
    fn test_d1_orientation() {
        let d1 = boundary_d1(&k4());
        assert_eq!(d1.num_rows(), 4);
        assert_eq!(d1.num_cols(), 6);
        // edges: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3); triangle (0,1,2)
        assert_eq!(d1.rows()[0], vec![1, -1, 0, 1, 0, 0]);
        assert!(d1.rows().iter().all(|r| r.iter().filter(|&&x| x != 0).count() == 3));
    }

    #[test]
    fn test_coboundary_of_vertex_function_is_zero() {
        // x(i,j) = f(j) − f(i) is killed by d1
        let g = Graph::from_predicate(6, |i, j| (i + j) % 4 != 1).unwrap();
        let d1 = boundary_d1(&g);
        let f = [0i64, 2, 1, 1, 0, 2];
        let x: Vec<u32> = d1
            .edges()
            .iter()
            .map(|&(i, j)| (f[j] - f[i]).rem_euclid(3) as u32)
            .collect();
        assert!(apply_d1(&d1, &x, 3).unwrap().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_round_trip_over_gf3() {
        let d1 = boundary_d1(&k4());
        let x = [1u32, 2, 0, 1, 1, 2];
        let b: Vec<i64> = apply_d1(&d1, &x, 3).unwrap().into_iter().map(i64::from).collect();
        let sol = solve(&d1, &b, 3).unwrap();
        assert_eq!(sol.rank(), 3);
        let y = sol.solution().unwrap();
        let back: Vec<i64> = apply_d1(&d1, y, 3).unwrap().into_iter().map(i64::from).collect();
        assert_eq!(back, b);
    }

    #[test]
    fn test_large_modulus_is_rejected() {
        let d1 = boundary_d1(&k4());
        assert!(solve(&d1, &[0; 4], 4_294_967_291).is_err());
        assert!(solve(&d1, &[0; 4], 257).is_err());
        assert!(solve_composite(&d1, &[0; 4], 4_294_967_291).is_err());
    }

    #[test]
    fn test_unsolvable_target() {
        // alternating sum over the boundary of the tetrahedron vanishes on the image
        let d1 = boundary_d1(&k4());
        for p in [2, 3] {
            let sol = solve(&d1, &[1, 0, 0, 0], p).unwrap();
            assert_eq!(sol, CocycleSolution::Unsolvable { rank: 3 });
        }
    }

    #[test]
    fn test_composite_round_trip() {
        let d1 = boundary_d1(&k4());
        let x = [5u32, 0, 3, 1, 4, 2];
        let b: Vec<i64> = apply_d1(&d1, &x, 6).unwrap().into_iter().map(i64::from).collect();
        match solve_composite(&d1, &b, 6).unwrap() {
            CompositeSolution::Solvable { solution, ranks } => {
                assert_eq!(ranks, vec![(2, 3), (3, 3)]);
                let back: Vec<i64> = apply_d1(&d1, &solution, 6)
                    .unwrap()
                    .into_iter()
                    .map(i64::from)
                    .collect();
                assert_eq!(back, b);
            }
            other => panic!("expected solvable, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_modulus() {
        let d1 = boundary_d1(&k4());
        assert!(solve(&d1, &[0; 4], 4).unwrap_err().is_fatal());
        assert!(solve(&d1, &[0; 4], 257).is_err());
        assert!(apply_d1(&d1, &[0; 5], 3).is_err());
    }
}
