// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Linear action on projective points.
//!
//! Point `i` is sent to the index of `normalize(M · pᵢ)`. With this
//! convention `perm(A · B) = compose(perm(A), perm(B))`, i.e. the matrix on
//! the right acts first, matching [`Permutation::compose`].

use crate::error::{Error, Result};
use crate::field::Field;
use crate::form::Matrix;
use crate::permutation::Permutation;
use crate::projective::{PointIndex, ProjectivePoint};

/// Permutation of `points` induced by `m`.
pub fn point_permutation(
    field: &Field,
    m: &Matrix,
    points: &[ProjectivePoint],
    index: &PointIndex,
) -> Result<Permutation> {
    let images = points
        .iter()
        .map(|p| {
            let image = m.apply(field, p.coords());
            index.locate(&image).ok_or_else(|| {
                Error::constraint(format!(
                    "matrix sends point {:?} outside the point set",
                    p.coords()
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    // singular matrices collapse points and are rejected here
    Permutation::from_images(images)
}

/// Check `perm(A·B) == compose(perm(A), perm(B))` for every ordered pair.
///
/// Guards the composition convention shared by the matrix and permutation
/// layers; a failure is reported as a constraint violation naming the pair.
pub fn verify_action_homomorphism(
    field: &Field,
    matrices: &[Matrix],
    points: &[ProjectivePoint],
    index: &PointIndex,
) -> Result<()> {
    let perms = matrices
        .iter()
        .map(|m| point_permutation(field, m, points, index))
        .collect::<Result<Vec<_>>>()?;
    for (a, ma) in matrices.iter().enumerate() {
        for (b, mb) in matrices.iter().enumerate() {
            let product = ma.mul(field, mb)?;
            let lhs = point_permutation(field, &product, points, index)?;
            let rhs = Permutation::compose(&perms[a], &perms[b]);
            if lhs != rhs {
                return Err(Error::constraint(format!(
                    "action is not a homomorphism on generator pair ({a}, {b})"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{transvection, BilinearForm};
    use crate::projective::build_points;

    #[test]
    fn test_transvections_act_as_homomorphism() {
        let f = Field::gf3();
        let pts = build_points(&f, 4).unwrap();
        let idx = PointIndex::new(f, &pts);
        let j = BilinearForm::standard_symplectic(f, 4).unwrap();
        let ms: Vec<Matrix> = [[1, 0, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0]]
            .iter()
            .map(|v| transvection(&f, &j, v, 1).unwrap())
            .collect();
        assert!(verify_action_homomorphism(&f, &ms, &pts, &idx).is_ok());
    }

    #[test]
    fn test_singular_matrix_rejected() {
        let f = Field::gf2();
        let pts = build_points(&f, 3).unwrap();
        let idx = PointIndex::new(f, &pts);
        let m = Matrix::diagonal(&[1, 1, 0]);
        assert!(point_permutation(&f, &m, &pts, &idx).is_err());
    }

    #[test]
    fn test_scalar_matrix_acts_trivially() {
        let f = Field::gf3();
        let pts = build_points(&f, 4).unwrap();
        let idx = PointIndex::new(f, &pts);
        let minus = Matrix::identity(4).scale(&f, 2);
        assert!(point_permutation(&f, &minus, &pts, &idx).unwrap().is_identity());
    }
}
