// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Permutations of `0..n` stored as image arrays.
//!
//! Composition convention, used everywhere in the workspace:
//! `compose(g, p)` applies `p` first, then `g`, so
//! `compose(g, p).apply(x) == g.apply(p.apply(x))`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permutation {
    images: Vec<u32>,
}

impl Permutation {
    pub fn identity(degree: usize) -> Self {
        Self {
            images: (0..degree as u32).collect(),
        }
    }

    /// Validate that `images` is a bijection of `0..images.len()`.
    pub fn from_images(images: Vec<usize>) -> Result<Self> {
        let n = images.len();
        let mut hit = vec![false; n];
        for &x in &images {
            if x >= n || hit[x] {
                return Err(Error::constraint(format!(
                    "image array is not a permutation of 0..{n}"
                )));
            }
            hit[x] = true;
        }
        Ok(Self {
            images: images.into_iter().map(|x| x as u32).collect(),
        })
    }

    /// Build from cycles on `0..degree`; points not mentioned are fixed.
    pub fn from_cycles(degree: usize, cycles: &[Vec<usize>]) -> Result<Self> {
        let mut images: Vec<usize> = (0..degree).collect();
        for cycle in cycles {
            for (k, &x) in cycle.iter().enumerate() {
                let y = cycle[(k + 1) % cycle.len()];
                if x >= degree || y >= degree {
                    return Err(Error::constraint(format!("cycle point outside 0..{degree}")));
                }
                images[x] = y;
            }
        }
        Self::from_images(images)
    }

    pub fn degree(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn apply(&self, x: usize) -> usize {
        self.images[x] as usize
    }

    pub fn images(&self) -> impl Iterator<Item = usize> + '_ {
        self.images.iter().map(|&x| x as usize)
    }

    /// `p` first, then `g`.
    pub fn compose(g: &Self, p: &Self) -> Self {
        debug_assert_eq!(g.degree(), p.degree());
        Self {
            images: p.images.iter().map(|&x| g.images[x as usize]).collect(),
        }
    }

    /// Shorthand for `compose(g, self)`.
    pub fn then(&self, g: &Self) -> Self {
        Self::compose(g, self)
    }

    pub fn inverse(&self) -> Self {
        let mut inv = vec![0u32; self.images.len()];
        for (i, &x) in self.images.iter().enumerate() {
            inv[x as usize] = i as u32;
        }
        Self { images: inv }
    }

    pub fn is_identity(&self) -> bool {
        self.images.iter().enumerate().all(|(i, &x)| i as u32 == x)
    }

    pub fn fixed_points(&self) -> usize {
        self.images
            .iter()
            .enumerate()
            .filter(|&(i, &x)| i as u32 == x)
            .count()
    }

    /// Cycle lengths including fixed points, sorted descending.
    pub fn cycle_type(&self) -> Vec<usize> {
        let n = self.degree();
        let mut seen = vec![false; n];
        let mut lengths = Vec::new();
        for start in 0..n {
            if seen[start] {
                continue;
            }
            let mut len = 0;
            let mut x = start;
            while !seen[x] {
                seen[x] = true;
                x = self.apply(x);
                len += 1;
            }
            lengths.push(len);
        }
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }

    /// Element order: lcm of the cycle lengths.
    pub fn order(&self) -> u64 {
        self.cycle_type()
            .into_iter()
            .fold(1u64, |acc, len| lcm(acc, len as u64))
    }

    pub fn pow(&self, k: u64) -> Self {
        let mut result = Self::identity(self.degree());
        let mut base = self.clone();
        let mut e = k;
        while e > 0 {
            if e & 1 == 1 {
                result = Self::compose(&base, &result);
            }
            base = Self::compose(&base, &base);
            e >>= 1;
        }
        result
    }

    /// Conjugate `h · self · h⁻¹`.
    pub fn conjugate_by(&self, h: &Self) -> Self {
        Self::compose(h, &Self::compose(self, &h.inverse()))
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

/// Degree shared by every permutation in `generators`.
pub fn common_degree(generators: &[Permutation]) -> Result<usize> {
    let first = generators
        .first()
        .ok_or_else(|| Error::constraint("empty generator list"))?;
    let degree = first.degree();
    if generators.iter().any(|g| g.degree() != degree) {
        return Err(Error::constraint("generators act on sets of different sizes"));
    }
    Ok(degree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_applies_right_operand_first() {
        // p = (0 1), g = (1 2)
        let p = Permutation::from_cycles(3, &[vec![0, 1]]).unwrap();
        let g = Permutation::from_cycles(3, &[vec![1, 2]]).unwrap();
        let gp = Permutation::compose(&g, &p);
        for x in 0..3 {
            assert_eq!(gp.apply(x), g.apply(p.apply(x)));
        }
        // 0 -> 1 -> 2
        assert_eq!(gp.apply(0), 2);
        assert_eq!(p.then(&g), gp);
    }

    #[test]
    fn test_inverse_and_identity() {
        let p = Permutation::from_images(vec![2, 0, 3, 1]).unwrap();
        assert!(Permutation::compose(&p, &p.inverse()).is_identity());
        assert!(Permutation::compose(&p.inverse(), &p).is_identity());
        assert!(!p.is_identity());
    }

    #[test]
    fn test_rejects_non_bijections() {
        assert!(Permutation::from_images(vec![0, 0, 1]).is_err());
        assert!(Permutation::from_images(vec![0, 3, 1]).is_err());
    }

    #[test]
    fn test_cycle_type_and_order() {
        let p = Permutation::from_cycles(7, &[vec![0, 1, 2], vec![3, 4]]).unwrap();
        assert_eq!(p.cycle_type(), vec![3, 2, 1, 1]);
        assert_eq!(p.order(), 6);
        assert_eq!(p.fixed_points(), 2);
        assert!(p.pow(6).is_identity());
        assert!(!p.pow(3).is_identity());
    }

    #[test]
    fn test_conjugation_preserves_cycle_type() {
        let p = Permutation::from_cycles(5, &[vec![0, 1, 2]]).unwrap();
        let h = Permutation::from_images(vec![4, 3, 2, 1, 0]).unwrap();
        let c = p.conjugate_by(&h);
        assert_eq!(c.cycle_type(), p.cycle_type());
        // h maps the cycle (0 1 2) to (4 3 2)
        assert_eq!(c.apply(4), 3);
    }

    #[test]
    fn test_common_degree() {
        let a = Permutation::identity(3);
        let b = Permutation::identity(4);
        assert!(common_degree(&[]).is_err());
        assert!(common_degree(&[a.clone(), b]).is_err());
        assert_eq!(common_degree(&[a]).unwrap(), 3);
    }
}
