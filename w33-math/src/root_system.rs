// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Root Systems in Doubled Coordinates
//!
//! Roots are stored with every coordinate multiplied by 2 so the E8
//! half-integer roots stay integral:
//!
//! - Type 1: 112 vectors (±1, ±1, 0, 0, 0, 0, 0, 0) → (±2, ±2, 0, …)
//! - Type 2: 128 vectors (±½)^8 with an even number of minus signs → (±1)^8
//!
//! All inner products are therefore exact: true ⟨a, b⟩ = doubled dot / 4.
//! The float view exists only for spectral work and tolerance comparisons.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::permutation::Permutation;

/// A root in doubled integer coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RootVector {
    doubled: Vec<i8>,
}

impl RootVector {
    pub fn from_doubled(doubled: Vec<i8>) -> Self {
        Self { doubled }
    }

    pub fn doubled(&self) -> &[i8] {
        &self.doubled
    }

    pub fn dimension(&self) -> usize {
        self.doubled.len()
    }

    /// Dot product of the doubled coordinates (4 × the true inner product).
    pub fn dot_doubled(&self, other: &Self) -> i32 {
        self.doubled
            .iter()
            .zip(other.doubled.iter())
            .map(|(&a, &b)| a as i32 * b as i32)
            .sum()
    }

    /// True inner product.
    pub fn inner_product(&self, other: &Self) -> f64 {
        self.dot_doubled(other) as f64 / 4.0
    }

    /// True coordinates.
    pub fn as_f64(&self) -> Vec<f64> {
        self.doubled.iter().map(|&x| x as f64 * 0.5).collect()
    }

    pub fn negated(&self) -> Self {
        Self {
            doubled: self.doubled.iter().map(|&x| -x).collect(),
        }
    }

    /// Reflection of `self` in the hyperplane orthogonal to `root`.
    ///
    /// x − (2⟨x, r⟩/⟨r, r⟩) r, which must have an integer coefficient.
    pub fn reflect_in(&self, root: &Self) -> Result<Self> {
        let num = 2 * self.dot_doubled(root);
        let den = root.dot_doubled(root);
        if den == 0 {
            return Err(Error::constraint("cannot reflect in the zero vector"));
        }
        if num % den != 0 {
            return Err(Error::constraint(format!(
                "non-integral Cartan number {num}/{den}"
            )));
        }
        let c = num / den;
        let doubled = self
            .doubled
            .iter()
            .zip(root.doubled.iter())
            .map(|(&x, &r)| {
                i8::try_from(x as i32 - c * r as i32)
                    .map_err(|_| Error::constraint("reflected coordinate overflows"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { doubled })
    }
}

/// A finite set of roots with an index lookup.
#[derive(Debug, Clone)]
pub struct RootSystem {
    dimension: usize,
    roots: Vec<RootVector>,
    index: HashMap<RootVector, usize>,
}

impl RootSystem {
    /// Validate and index an explicit root list.
    pub fn from_roots(roots: Vec<RootVector>) -> Result<Self> {
        let dimension = roots
            .first()
            .map(RootVector::dimension)
            .ok_or_else(|| Error::constraint("empty root list"))?;
        let mut index = HashMap::with_capacity(roots.len());
        for (i, r) in roots.iter().enumerate() {
            if r.dimension() != dimension {
                return Err(Error::constraint("roots of mixed dimension"));
            }
            if r.doubled.iter().all(|&x| x == 0) {
                return Err(Error::constraint("zero vector is not a root"));
            }
            if index.insert(r.clone(), i).is_some() {
                return Err(Error::constraint(format!("duplicate root at index {i}")));
            }
        }
        Ok(Self {
            dimension,
            roots,
            index,
        })
    }

    /// The 240 roots of E8 in canonical order.
    pub fn e8() -> Self {
        let mut roots = Vec::with_capacity(240);

        // Type 1: C(8,2)=28 position pairs × 4 sign combos = 112
        for i in 0..8 {
            for j in (i + 1)..8 {
                for signs in 0..4u8 {
                    let mut root = vec![0i8; 8];
                    root[i] = if signs & 1 == 0 { 2 } else { -2 };
                    root[j] = if signs & 2 == 0 { 2 } else { -2 };
                    roots.push(RootVector::from_doubled(root));
                }
            }
        }

        // Type 2: (±½)^8 with an even number of minus signs = 128
        for pattern in 0..256u16 {
            if pattern.count_ones() % 2 == 0 {
                let root = (0..8)
                    .map(|i| if pattern & (1 << i) == 0 { 1 } else { -1 })
                    .collect();
                roots.push(RootVector::from_doubled(root));
            }
        }

        debug_assert_eq!(roots.len(), 240, "E8 must have exactly 240 roots");
        let index = roots
            .iter()
            .enumerate()
            .map(|(i, r)| (r.clone(), i))
            .collect();
        Self {
            dimension: 8,
            roots,
            index,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> &[RootVector] {
        &self.roots
    }

    pub fn root(&self, i: usize) -> &RootVector {
        &self.roots[i]
    }

    pub fn index_of(&self, r: &RootVector) -> Option<usize> {
        self.index.get(r).copied()
    }

    /// Every reflection maps the root set to itself.
    pub fn is_reflection_closed(&self) -> bool {
        self.roots.iter().all(|r| {
            self.roots.iter().all(|x| {
                x.reflect_in(r)
                    .map(|y| self.index.contains_key(&y))
                    .unwrap_or(false)
            })
        })
    }

    /// The reflection in root `i` as a permutation of root indices.
    pub fn reflection_permutation(&self, i: usize) -> Result<Permutation> {
        let r = self
            .roots
            .get(i)
            .ok_or_else(|| Error::constraint(format!("root index {i} out of range")))?;
        let images = self
            .roots
            .iter()
            .map(|x| {
                let y = x.reflect_in(r)?;
                self.index_of(&y)
                    .ok_or_else(|| Error::constraint("root set is not reflection closed"))
            })
            .collect::<Result<Vec<_>>>()?;
        Permutation::from_images(images)
    }

    /// `r ↦ −r` as a permutation of root indices.
    pub fn negation_permutation(&self) -> Result<Permutation> {
        let images = self
            .roots
            .iter()
            .map(|r| {
                self.index_of(&r.negated())
                    .ok_or_else(|| Error::constraint("root set is not closed under negation"))
            })
            .collect::<Result<Vec<_>>>()?;
        Permutation::from_images(images)
    }

    /// Roots whose doubled dot with `roots[k]` equals `value` for every `(k, value)`.
    pub fn roots_with_products(&self, constraints: &[(usize, i32)]) -> Vec<usize> {
        (0..self.roots.len())
            .filter(|&i| {
                constraints
                    .iter()
                    .all(|&(k, value)| self.roots[i].dot_doubled(&self.roots[k]) == value)
            })
            .collect()
    }

    /// Distinct doubled inner products between root `i` and all roots, with counts.
    pub fn product_profile(&self, i: usize) -> Vec<(i32, usize)> {
        let mut counts: HashMap<i32, usize> = HashMap::new();
        for r in &self.roots {
            *counts.entry(self.roots[i].dot_doubled(r)).or_default() += 1;
        }
        let mut profile: Vec<_> = counts.into_iter().collect();
        profile.sort_unstable();
        profile
    }
}
