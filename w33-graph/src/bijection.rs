// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Explicit bijections between equal-size finite sets.
//!
//! Two constructions are offered. Rank pairing lines up two canonical
//! orderings; constrained matching finds a perfect matching in the
//! bipartite "allowed pair" graph with Hopcroft–Karp. Either way the
//! result is then checked for equivariance against generator lists acting
//! on both sides.

use std::collections::VecDeque;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use w33_math::{Error, Permutation, Result};

use crate::spectral::SPECTRAL_TOLERANCE;

/// `left i ↦ right forward[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bijection {
    forward: Vec<usize>,
}

impl Bijection {
    pub fn from_forward(forward: Vec<usize>) -> Result<Self> {
        Permutation::from_images(forward.clone())?;
        Ok(Self { forward })
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn apply(&self, left: usize) -> usize {
        self.forward[left]
    }

    pub fn forward(&self) -> &[usize] {
        &self.forward
    }

    pub fn inverse(&self) -> Self {
        let mut back = vec![0; self.forward.len()];
        for (i, &j) in self.forward.iter().enumerate() {
            back[j] = i;
        }
        Self { forward: back }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("no perfect matching: {matched} of {left} left items matched ({right} right items)")]
pub struct NoPerfectMatching {
    pub left: usize,
    pub right: usize,
    pub matched: usize,
    /// Left items the maximum matching leaves uncovered, ascending.
    pub unmatched: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Canonical orderings
// ---------------------------------------------------------------------------

/// Visit order of a BFS over the generator action.
///
/// Starts from `seeds` in order; from each dequeued point the generators
/// are applied in list order. Points never reached are used as further
/// seeds in ascending order, so the result is always a permutation of `0..n`.
pub fn canonical_order_bfs(n: usize, seeds: &[usize], generators: &[Permutation]) -> Result<Vec<usize>> {
    if let Some(g) = generators.iter().find(|g| g.degree() != n) {
        return Err(Error::constraint(format!(
            "generator of degree {} acting on {n} points",
            g.degree()
        )));
    }
    if let Some(&s) = seeds.iter().find(|&&s| s >= n) {
        return Err(Error::constraint(format!("seed {s} out of range for {n} points")));
    }
    let mut seen = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut queue = VecDeque::new();
    for start in seeds.iter().copied().chain(0..n) {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        queue.push_back(start);
        while let Some(x) = queue.pop_front() {
            order.push(x);
            for g in generators {
                let y = g.apply(x);
                if !seen[y] {
                    seen[y] = true;
                    queue.push_back(y);
                }
            }
        }
    }
    Ok(order)
}

/// `0..n` stably sorted by `key`; ties keep index order.
pub fn canonical_order_by_key<K, F>(n: usize, key: F) -> Vec<usize>
where
    K: Ord,
    F: Fn(usize) -> K,
{
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| key(i));
    order
}

/// Pair the r-th item of `left_order` with the r-th item of `right_order`.
pub fn pair_by_rank(left_order: &[usize], right_order: &[usize]) -> Result<Bijection> {
    if left_order.len() != right_order.len() {
        return Err(Error::constraint(format!(
            "orderings have different lengths {} and {}",
            left_order.len(),
            right_order.len()
        )));
    }
    Permutation::from_images(left_order.to_vec())?;
    let mut forward = vec![0; left_order.len()];
    for (&l, &r) in left_order.iter().zip(right_order.iter()) {
        forward[l] = r;
    }
    Bijection::from_forward(forward)
}

/// Position of each item within an ordering.
pub fn ranks(order: &[usize]) -> Vec<usize> {
    let mut rank = vec![0; order.len()];
    for (r, &x) in order.iter().enumerate() {
        rank[x] = r;
    }
    rank
}

// ---------------------------------------------------------------------------
// Hopcroft–Karp
// ---------------------------------------------------------------------------

const FREE: usize = usize::MAX;

struct HopcroftKarp<'a> {
    adj: &'a [Vec<usize>],
    match_left: Vec<usize>,
    match_right: Vec<usize>,
    dist: Vec<usize>,
}

impl HopcroftKarp<'_> {
    /// Layer free left vertices; true when some augmenting path exists.
    fn bfs(&mut self) -> bool {
        let mut queue = VecDeque::new();
        for (u, d) in self.dist.iter_mut().enumerate() {
            if self.match_left[u] == FREE {
                *d = 0;
                queue.push_back(u);
            } else {
                *d = FREE;
            }
        }
        let mut found = false;
        while let Some(u) = queue.pop_front() {
            for &v in &self.adj[u] {
                let w = self.match_right[v];
                if w == FREE {
                    found = true;
                } else if self.dist[w] == FREE {
                    self.dist[w] = self.dist[u] + 1;
                    queue.push_back(w);
                }
            }
        }
        found
    }

    fn dfs(&mut self, u: usize) -> bool {
        for idx in 0..self.adj[u].len() {
            let v = self.adj[u][idx];
            let w = self.match_right[v];
            if w == FREE || (self.dist[w] == self.dist[u] + 1 && self.dfs(w)) {
                self.match_left[u] = v;
                self.match_right[v] = u;
                return true;
            }
        }
        self.dist[u] = FREE;
        false
    }
}

/// Perfect matching of `0..left` onto `0..right` using only pairs for which
/// `allowed(l, r)` holds.
///
/// Candidate lists are scanned in ascending right index and free left
/// vertices in ascending order, so the matching returned is deterministic.
pub fn constrained_matching<F>(
    left: usize,
    right: usize,
    allowed: F,
) -> std::result::Result<Bijection, NoPerfectMatching>
where
    F: Fn(usize, usize) -> bool,
{
    let adj: Vec<Vec<usize>> = (0..left)
        .map(|l| (0..right).filter(|&r| allowed(l, r)).collect())
        .collect();
    let mut hk = HopcroftKarp {
        adj: &adj,
        match_left: vec![FREE; left],
        match_right: vec![FREE; right],
        dist: vec![FREE; left],
    };
    let mut phases = 0;
    while hk.bfs() {
        phases += 1;
        for u in 0..left {
            if hk.match_left[u] == FREE {
                hk.dfs(u);
            }
        }
    }
    let unmatched: Vec<usize> = (0..left).filter(|&u| hk.match_left[u] == FREE).collect();
    let matched = left - unmatched.len();
    debug!(left, right, matched, phases, "hopcroft-karp finished");

    if left != right || !unmatched.is_empty() {
        return Err(NoPerfectMatching {
            left,
            right,
            matched,
            unmatched,
        });
    }
    Ok(Bijection {
        forward: hk.match_left,
    })
}

// ---------------------------------------------------------------------------
// Equivariance
// ---------------------------------------------------------------------------

fn check_pairing(bijection: &Bijection, left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::constraint(format!(
            "{left} left generators against {right} right generators"
        )));
    }
    if bijection.is_empty() {
        return Err(Error::constraint("empty bijection"));
    }
    Ok(())
}

/// For each generator pair: does `φ(gᴸ(x)) = gᴿ(φ(x))` hold for all x?
pub fn check_equivariance(
    bijection: &Bijection,
    left_generators: &[Permutation],
    right_generators: &[Permutation],
) -> Result<Vec<bool>> {
    check_pairing(bijection, left_generators.len(), right_generators.len())?;
    let n = bijection.len();
    left_generators
        .iter()
        .zip(right_generators.iter())
        .map(|(gl, gr)| {
            if gl.degree() != n || gr.degree() != n {
                return Err(Error::constraint("generator degree differs from bijection size"));
            }
            Ok((0..n).all(|x| bijection.apply(gl.apply(x)) == gr.apply(bijection.apply(x))))
        })
        .collect()
}

/// Equivariance against a linear action on float coordinates of the right set.
///
/// `right_points[j]` are the coordinates of right item j; generator i acts
/// on them as `right_maps[i]`. Holds for generator i when
/// `‖M_i · v(φ(x)) − v(φ(gᴸ_i(x)))‖_∞ ≤ SPECTRAL_TOLERANCE` for every x.
pub fn check_equivariance_approx(
    bijection: &Bijection,
    left_generators: &[Permutation],
    right_points: &[DVector<f64>],
    right_maps: &[DMatrix<f64>],
) -> Result<Vec<bool>> {
    check_pairing(bijection, left_generators.len(), right_maps.len())?;
    let n = bijection.len();
    if right_points.len() != n {
        return Err(Error::constraint(format!(
            "{} right coordinates for a bijection of size {n}",
            right_points.len()
        )));
    }
    let dim = right_points[0].len();
    left_generators
        .iter()
        .zip(right_maps.iter())
        .map(|(gl, m)| {
            if gl.degree() != n || m.nrows() != dim || m.ncols() != dim {
                return Err(Error::constraint("generator shape does not match the point sets"));
            }
            Ok((0..n).all(|x| {
                let moved = m * &right_points[bijection.apply(x)];
                let target = &right_points[bijection.apply(gl.apply(x))];
                (moved - target).amax() <= SPECTRAL_TOLERANCE
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation(n: usize, k: usize) -> Permutation {
        Permutation::from_images((0..n).map(|i| (i + k) % n).collect()).unwrap()
    }

    #[test]
    fn test_bfs_order_covers_all_points() {
        let gens = vec![Permutation::from_images(vec![1, 0, 2, 3, 4, 5]).unwrap()];
        let order = canonical_order_bfs(6, &[4], &gens).unwrap();
        assert_eq!(order, vec![4, 0, 1, 2, 3, 5]);
        assert!(canonical_order_bfs(6, &[9], &gens).is_err());
    }

    #[test]
    fn test_order_by_key_is_stable() {
        let order = canonical_order_by_key(6, |i| i % 3);
        assert_eq!(order, vec![0, 3, 1, 4, 2, 5]);
        assert_eq!(ranks(&order), vec![0, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_pair_by_rank() {
        let b = pair_by_rank(&[2, 0, 1], &[0, 1, 2]).unwrap();
        assert_eq!(b.forward(), &[1, 2, 0]);
        assert_eq!(b.inverse().forward(), &[2, 0, 1]);
        assert!(pair_by_rank(&[0, 1], &[0]).is_err());
        assert!(pair_by_rank(&[0, 0], &[0, 1]).is_err());
    }

    #[test]
    fn test_matching_on_banded_predicate() {
        // l may go to l, l+1, l+2 (mod 10)
        let b = constrained_matching(10, 10, |l, r| (r + 10 - l) % 10 < 3).unwrap();
        let mut images = b.forward().to_vec();
        images.sort_unstable();
        assert_eq!(images, (0..10).collect::<Vec<_>>());
        for l in 0..10 {
            assert!((b.apply(l) + 10 - l) % 10 < 3);
        }
    }

    #[test]
    fn test_matching_reports_hall_violation() {
        // left 0 and 1 both only accept right 0
        let err = constrained_matching(3, 3, |l, r| if l < 2 { r == 0 } else { true })
            .unwrap_err();
        assert_eq!(err.matched, 2);
        assert_eq!(err.unmatched.len(), 1);
        assert!(err.unmatched[0] < 2);
    }

    #[test]
    fn test_matching_rejects_unequal_sizes() {
        let err = constrained_matching(2, 3, |_, _| true).unwrap_err();
        assert_eq!((err.left, err.right, err.matched), (2, 3, 2));
    }

    #[test]
    fn test_equivariance_of_rotation_pairing() {
        // x ↦ 2x mod 5 intertwines rotation by 1 with rotation by 2
        let b = Bijection::from_forward((0..5).map(|x| 2 * x % 5).collect()).unwrap();
        let ok = check_equivariance(&b, &[rotation(5, 1)], &[rotation(5, 2)]).unwrap();
        assert_eq!(ok, vec![true]);
        let bad = check_equivariance(&b, &[rotation(5, 1)], &[rotation(5, 1)]).unwrap();
        assert_eq!(bad, vec![false]);
        assert!(check_equivariance(&b, &[rotation(5, 1)], &[]).is_err());
    }

    #[test]
    fn test_approx_equivariance_with_plane_rotation() {
        // square vertices; quarter turn acts as rotation by 1 on indices
        let pts: Vec<DVector<f64>> = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]
            .iter()
            .map(|&(x, y)| DVector::from_vec(vec![x, y]))
            .collect();
        let quarter = DMatrix::from_row_slice(2, 2, &[0.0, -1.0, 1.0, 0.0]);
        let id = Bijection::from_forward(vec![0, 1, 2, 3]).unwrap();
        let ok = check_equivariance_approx(&id, &[rotation(4, 1)], &pts, &[quarter.clone()]).unwrap();
        assert_eq!(ok, vec![true]);
        let wrong = check_equivariance_approx(&id, &[rotation(4, 3)], &pts, &[quarter]).unwrap();
        assert_eq!(wrong, vec![false]);
    }
}
