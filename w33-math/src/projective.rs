// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Projective Points PG(d−1, q)
//!
//! A projective point is a nonzero vector up to scalar multiples. The
//! canonical representative has its first nonzero coordinate equal to 1.
//! Points are enumerated in lexicographic order of their representatives
//! (coordinate 0 most significant), which fixes vertex numbering for every
//! graph built on top of them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::Field;

/// Largest supported ambient dimension.
pub const MAX_DIMENSION: usize = 8;

/// Canonical representative of a projective point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectivePoint {
    coords: Vec<u8>,
}

impl ProjectivePoint {
    /// Normalize `v`; `None` for the zero vector.
    pub fn from_vector(field: &Field, v: &[u8]) -> Option<Self> {
        normalize(field, v).map(|coords| Self { coords })
    }

    pub fn coords(&self) -> &[u8] {
        &self.coords
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }
}

/// Scale `v` so its first nonzero coordinate is 1.
pub fn normalize(field: &Field, v: &[u8]) -> Option<Vec<u8>> {
    let lead = *v.iter().find(|&&x| x != 0)?;
    let s = field.inv(lead)?;
    Some(field.scale(s, v))
}

/// Enumerate all points of PG(dimension−1, q) in lexicographic order.
///
/// Returns (q^d − 1)/(q − 1) points.
pub fn build_points(field: &Field, dimension: usize) -> Result<Vec<ProjectivePoint>> {
    if dimension == 0 || dimension > MAX_DIMENSION {
        return Err(Error::constraint(format!(
            "projective dimension {dimension} outside 1..={MAX_DIMENSION}"
        )));
    }
    let q = field.order() as usize;
    let total = q.pow(dimension as u32);
    let mut points = Vec::with_capacity((total - 1) / (q - 1));
    let mut v = vec![0u8; dimension];

    for code in 0..total {
        let mut rest = code;
        for slot in v.iter_mut().rev() {
            *slot = (rest % q) as u8;
            rest /= q;
        }
        if v.iter().find(|&&x| x != 0) == Some(&1) {
            points.push(ProjectivePoint { coords: v.clone() });
        }
    }

    debug_assert_eq!(points.len(), (total - 1) / (q - 1));
    Ok(points)
}

/// Lookup from canonical representative to point index.
#[derive(Debug, Clone)]
pub struct PointIndex {
    field: Field,
    index: HashMap<Vec<u8>, usize>,
}

impl PointIndex {
    pub fn new(field: Field, points: &[ProjectivePoint]) -> Self {
        let index = points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.coords.clone(), i))
            .collect();
        Self { field, index }
    }

    /// Index of the projective point spanned by `v` (any representative).
    pub fn locate(&self, v: &[u8]) -> Option<usize> {
        let n = normalize(&self.field, v)?;
        self.index.get(&n).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
