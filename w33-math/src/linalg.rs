// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Linear systems over Z/p and squarefree Z/m.
//!
//! Gauss–Jordan elimination with the pivot taken from the lowest row index
//! that has a nonzero entry in the current column. Free variables are set
//! to 0, so each solvable system yields one canonical solution. Composite
//! moduli are split into primes and recombined by CRT.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub fn is_prime(p: u32) -> bool {
    if p < 2 {
        return false;
    }
    let mut d = 2u32;
    while d <= p / d {
        if p % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Inverse of `a` modulo `m` (extended Euclid); `None` when not coprime.
pub fn mod_inverse(a: u32, m: u32) -> Option<u32> {
    let (mut old_r, mut r) = (a as i64 % m as i64, m as i64);
    let (mut old_s, mut s) = (1i64, 0i64);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(m as i64) as u32)
}

/// Distinct prime factors of a squarefree modulus, ascending.
pub fn squarefree_factors(m: u32) -> Result<Vec<u32>> {
    if m < 2 {
        return Err(Error::constraint(format!("modulus {m} must be at least 2")));
    }
    let mut factors = Vec::new();
    let mut rest = m;
    let mut d = 2u32;
    while d <= rest / d {
        if rest % d == 0 {
            rest /= d;
            if rest % d == 0 {
                return Err(Error::constraint(format!("modulus {m} is not squarefree")));
            }
            factors.push(d);
        }
        d += 1;
    }
    if rest > 1 {
        factors.push(rest);
    }
    Ok(factors)
}

/// x ≡ a (mod m), x ≡ b (mod n) for coprime m, n; result in `0..m·n`.
pub fn crt(a: u32, m: u32, b: u32, n: u32) -> Result<u32> {
    let m_inv = mod_inverse(m % n, n)
        .ok_or_else(|| Error::constraint(format!("moduli {m} and {n} are not coprime")))?;
    // x = a + m·((b − a)·m⁻¹ mod n)
    let diff = (b as i64 - a as i64).rem_euclid(n as i64) as u64;
    let k = diff * m_inv as u64 % n as u64;
    Ok((a as u64 + m as u64 * k) as u32)
}

/// Outcome of solving `A x = b` over Z/p.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinearSolution {
    Solvable { solution: Vec<u32>, rank: usize },
    Unsolvable { rank: usize },
}

impl LinearSolution {
    pub fn is_solvable(&self) -> bool {
        matches!(self, LinearSolution::Solvable { .. })
    }

    pub fn rank(&self) -> usize {
        match self {
            LinearSolution::Solvable { rank, .. } | LinearSolution::Unsolvable { rank } => *rank,
        }
    }

    pub fn solution(&self) -> Option<&[u32]> {
        match self {
            LinearSolution::Solvable { solution, .. } => Some(solution),
            LinearSolution::Unsolvable { .. } => None,
        }
    }
}

fn reduce_rows(rows: &[Vec<i64>], cols: usize, p: u32) -> Result<Vec<Vec<u32>>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != cols {
                return Err(Error::constraint(format!(
                    "row {i} has {} entries, expected {cols}",
                    row.len()
                )));
            }
            Ok(row.iter().map(|&x| x.rem_euclid(p as i64) as u32).collect())
        })
        .collect()
}

/// Solve `A x = b (mod p)` for a prime `p`.
///
/// `rows` is the coefficient matrix (one `Vec` per equation, `cols` entries
/// each). Entries and targets may be any integers; they are reduced mod p.
pub fn solve_mod_prime(
    rows: &[Vec<i64>],
    cols: usize,
    target: &[i64],
    p: u32,
) -> Result<LinearSolution> {
    if p > 65_521 || !is_prime(p) {
        return Err(Error::constraint(format!(
            "modulus {p} is not a supported prime"
        )));
    }
    if target.len() != rows.len() {
        return Err(Error::constraint(format!(
            "target has {} entries for {} equations",
            target.len(),
            rows.len()
        )));
    }
    let mut a = reduce_rows(rows, cols, p)?;
    let mut b: Vec<u32> = target
        .iter()
        .map(|&x| x.rem_euclid(p as i64) as u32)
        .collect();
    let pp = p as u64;

    let mut pivots = Vec::new();
    let mut r = 0;
    for col in 0..cols {
        if r == a.len() {
            break;
        }
        let Some(pivot) = (r..a.len()).find(|&i| a[i][col] != 0) else {
            continue;
        };
        a.swap(r, pivot);
        b.swap(r, pivot);

        let inv = mod_inverse(a[r][col], p)
            .ok_or_else(|| Error::constraint("pivot has no inverse; modulus not prime"))?
            as u64;
        for x in a[r].iter_mut() {
            *x = (*x as u64 * inv % pp) as u32;
        }
        b[r] = (b[r] as u64 * inv % pp) as u32;

        for i in 0..a.len() {
            if i == r || a[i][col] == 0 {
                continue;
            }
            let factor = a[i][col] as u64;
            for c in col..cols {
                let sub = factor * a[r][c] as u64 % pp;
                a[i][c] = ((a[i][c] as u64 + pp - sub) % pp) as u32;
            }
            let sub = factor * b[r] as u64 % pp;
            b[i] = ((b[i] as u64 + pp - sub) % pp) as u32;
        }
        pivots.push(col);
        r += 1;
    }

    let rank = pivots.len();
    // rows past the rank are all zero; a nonzero target there is a contradiction
    if b[rank..].iter().any(|&x| x != 0) {
        return Ok(LinearSolution::Unsolvable { rank });
    }

    let mut solution = vec![0u32; cols];
    for (i, &col) in pivots.iter().enumerate() {
        solution[col] = b[i];
    }
    Ok(LinearSolution::Solvable { solution, rank })
}

/// Rank of `rows` over Z/p.
pub fn rank_mod_prime(rows: &[Vec<i64>], cols: usize, p: u32) -> Result<usize> {
    let zeros = vec![0i64; rows.len()];
    Ok(solve_mod_prime(rows, cols, &zeros, p)?.rank())
}

/// Outcome of solving over a squarefree composite modulus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeSolution {
    /// CRT-combined solution with the rank found for each prime.
    Solvable {
        solution: Vec<u32>,
        ranks: Vec<(u32, usize)>,
    },
    /// The system fails modulo `prime`.
    Unsolvable { prime: u32, ranks: Vec<(u32, usize)> },
}

impl CompositeSolution {
    pub fn is_solvable(&self) -> bool {
        matches!(self, CompositeSolution::Solvable { .. })
    }
}

/// Solve `A x = b (mod m)` for squarefree `m` prime by prime.
///
/// Solvable mod m iff solvable mod every prime factor; the per-prime
/// canonical solutions are glued componentwise with CRT.
pub fn solve_mod_squarefree(
    rows: &[Vec<i64>],
    cols: usize,
    target: &[i64],
    m: u32,
) -> Result<CompositeSolution> {
    let primes = squarefree_factors(m)?;
    let mut ranks = Vec::with_capacity(primes.len());
    let mut combined = vec![0u32; cols];
    let mut modulus = 1u32;

    for &p in &primes {
        match solve_mod_prime(rows, cols, target, p)? {
            LinearSolution::Solvable { solution, rank } => {
                ranks.push((p, rank));
                for (x, &s) in combined.iter_mut().zip(solution.iter()) {
                    *x = crt(*x, modulus, s, p)?;
                }
                modulus *= p;
            }
            LinearSolution::Unsolvable { rank } => {
                ranks.push((p, rank));
                return Ok(CompositeSolution::Unsolvable { prime: p, ranks });
            }
        }
    }
    Ok(CompositeSolution::Solvable {
        solution: combined,
        ranks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(rows: &[Vec<i64>], x: &[u32], target: &[i64], m: i64) -> bool {
        rows.iter().zip(target.iter()).all(|(row, &t)| {
            let lhs: i64 = row.iter().zip(x.iter()).map(|(&a, &b)| a * b as i64).sum();
            (lhs - t).rem_euclid(m) == 0
        })
    }

    #[test]
    fn test_primes_and_inverses() {
        assert!(is_prime(2) && is_prime(3) && is_prime(251));
        assert!(!is_prime(1) && !is_prime(6) && !is_prime(9));
        assert_eq!(mod_inverse(2, 3), Some(2));
        assert_eq!(mod_inverse(3, 7), Some(5));
        assert_eq!(mod_inverse(2, 4), None);
    }

    #[test]
    fn test_primality_near_u32_max() {
        assert!(is_prime(4_294_967_291));
        assert!(!is_prime(u32::MAX));
        assert_eq!(squarefree_factors(4_294_967_291).unwrap(), vec![4_294_967_291]);
        // both factors sit just below 2¹⁶, where d·d would overflow
        assert_eq!(squarefree_factors(65_519 * 65_521).unwrap(), vec![65_519, 65_521]);
    }

    #[test]
    fn test_large_prime_modulus_is_rejected() {
        let rows = vec![vec![1i64, 1]];
        assert!(solve_mod_prime(&rows, 2, &[0], 4_294_967_291).is_err());
        assert!(solve_mod_squarefree(&rows, 2, &[0], 4_294_967_291).is_err());
    }

    #[test]
    fn test_crt_mod_six() {
        // x ≡ a (mod 2), x ≡ b (mod 3) is x = 3a + 4b (mod 6)
        for a in 0..2 {
            for b in 0..3 {
                assert_eq!(crt(a, 2, b, 3).unwrap(), (3 * a + 4 * b) % 6);
            }
        }
    }

    #[test]
    fn test_squarefree_factors() {
        assert_eq!(squarefree_factors(6).unwrap(), vec![2, 3]);
        assert_eq!(squarefree_factors(30).unwrap(), vec![2, 3, 5]);
        assert!(squarefree_factors(12).is_err());
        assert!(squarefree_factors(1).is_err());
    }

    #[test]
    fn test_solve_simple_system() {
        // x + y = 1, y + z = 2, x + z = 0 over GF(3)
        let rows = vec![vec![1, 1, 0], vec![0, 1, 1], vec![1, 0, 1]];
        let target = vec![1, 2, 0];
        let sol = solve_mod_prime(&rows, 3, &target, 3).unwrap();
        assert_eq!(sol.rank(), 3);
        assert!(residual(&rows, sol.solution().unwrap(), &target, 3));
    }

    #[test]
    fn test_inconsistent_system() {
        // x + y = 0 and x + y = 1 over GF(2)
        let rows = vec![vec![1, 1], vec![1, 1]];
        let sol = solve_mod_prime(&rows, 2, &[0, 1], 2).unwrap();
        assert_eq!(sol, LinearSolution::Unsolvable { rank: 1 });
    }

    #[test]
    fn test_free_variables_are_zero() {
        let rows = vec![vec![1, 1, 0]];
        let sol = solve_mod_prime(&rows, 3, &[1], 2).unwrap();
        assert_eq!(sol.solution().unwrap(), &[1, 0, 0]);
    }

    #[test]
    fn test_rejects_composite_modulus() {
        assert!(solve_mod_prime(&[vec![1]], 1, &[1], 6).unwrap_err().is_fatal());
    }

    #[test]
    fn test_composite_solution_satisfies_mod_six() {
        let rows = vec![vec![1, -1, 0], vec![0, 1, -1]];
        let target = vec![5, 4];
        match solve_mod_squarefree(&rows, 3, &target, 6).unwrap() {
            CompositeSolution::Solvable { solution, ranks } => {
                assert!(residual(&rows, &solution, &target, 6));
                assert_eq!(ranks, vec![(2, 2), (3, 2)]);
            }
            other => panic!("expected solvable, got {other:?}"),
        }
    }

    #[test]
    fn test_composite_unsolvable_names_prime() {
        // 2x = 1 has no solution mod 2 but x = 2 mod 3
        let out = solve_mod_squarefree(&[vec![2]], 1, &[1], 6).unwrap();
        assert!(matches!(out, CompositeSolution::Unsolvable { prime: 2, .. }));
    }
}
