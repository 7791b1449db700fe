// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Matrices, Bilinear and Quadratic Forms over GF(q)
//!
//! The symplectic form on GF(q)^{2m} is ω(u, v) = uᵀ J v with
//! J = [[0, I], [−I, 0]]. A matrix M is symplectic iff MᵗJM = J, and a
//! similitude with multiplier λ iff MᵗJM = λJ. Both identities are always
//! checked entrywise, never assumed from the way a matrix was built.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::Field;

/// Dense matrix over a small field, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1);
        }
        m
    }

    /// Build from row slices; every row must have the same length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(Error::constraint("ragged matrix rows"));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.concat(),
        })
    }

    /// Diagonal matrix with the given entries.
    pub fn diagonal(entries: &[u8]) -> Self {
        let mut m = Self::zeros(entries.len(), entries.len());
        for (i, &e) in entries.iter().enumerate() {
            m.set(i, i, e);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: u8) {
        self.data[r * self.cols + c] = value;
    }

    pub fn row(&self, r: usize) -> &[u8] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                t.set(c, r, self.get(r, c));
            }
        }
        t
    }

    /// Matrix product `self · other`.
    pub fn mul(&self, field: &Field, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(Error::constraint(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let mut out = Self::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut acc = 0;
                for k in 0..self.cols {
                    acc = field.add(acc, field.mul(self.get(r, k), other.get(k, c)));
                }
                out.set(r, c, acc);
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `self · v`.
    pub fn apply(&self, field: &Field, v: &[u8]) -> Vec<u8> {
        debug_assert_eq!(v.len(), self.cols);
        (0..self.rows).map(|r| field.dot(self.row(r), v)).collect()
    }

    pub fn scale(&self, field: &Field, s: u8) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: field.scale(s, &self.data),
        }
    }
}

/// Anything that defines an orthogonality relation between vectors.
pub trait Form {
    fn field(&self) -> Field;

    /// Value of the form on the pair `(u, v)`.
    fn evaluate(&self, u: &[u8], v: &[u8]) -> u8;

    fn is_orthogonal(&self, u: &[u8], v: &[u8]) -> bool {
        self.evaluate(u, v) == 0
    }
}

/// Bilinear form `B(u, v) = uᵀ M v`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilinearForm {
    field: Field,
    matrix: Matrix,
}

impl BilinearForm {
    pub fn new(field: Field, matrix: Matrix) -> Result<Self> {
        if matrix.rows() != matrix.cols() {
            return Err(Error::constraint("form matrix must be square"));
        }
        if matrix.data.iter().any(|&x| x >= field.order()) {
            return Err(Error::constraint("form matrix entry outside the field"));
        }
        Ok(Self { field, matrix })
    }

    /// J = [[0, I], [−I, 0]] on GF(q)^{dim}.
    pub fn standard_symplectic(field: Field, dim: usize) -> Result<Self> {
        if dim == 0 || dim % 2 != 0 {
            return Err(Error::constraint(format!(
                "symplectic form needs an even dimension, got {dim}"
            )));
        }
        let h = dim / 2;
        let mut j = Matrix::zeros(dim, dim);
        for i in 0..h {
            j.set(i, i + h, 1);
            j.set(i + h, i, field.neg(1));
        }
        Ok(Self { field, matrix: j })
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn dimension(&self) -> usize {
        self.matrix.rows()
    }

    /// Alternating: B(v, v) = 0 for every v (checked on the matrix).
    pub fn is_alternating(&self) -> bool {
        let n = self.dimension();
        (0..n).all(|i| self.matrix.get(i, i) == 0)
            && (0..n).all(|i| {
                (0..n).all(|k| self.matrix.get(i, k) == self.field.neg(self.matrix.get(k, i)))
            })
    }
}

impl Form for BilinearForm {
    fn field(&self) -> Field {
        self.field
    }

    fn evaluate(&self, u: &[u8], v: &[u8]) -> u8 {
        let mv = self.matrix.apply(&self.field, v);
        self.field.dot(u, &mv)
    }
}

/// Quadratic form `Q(v) = Σ_{i≤j} c_ij vᵢ vⱼ` from an upper-triangular matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadraticForm {
    field: Field,
    coefficients: Matrix,
}

impl QuadraticForm {
    pub fn new(field: Field, coefficients: Matrix) -> Result<Self> {
        let n = coefficients.rows();
        if coefficients.cols() != n {
            return Err(Error::constraint("quadratic form matrix must be square"));
        }
        for r in 0..n {
            for c in 0..r {
                if coefficients.get(r, c) != 0 {
                    return Err(Error::constraint(
                        "quadratic form coefficients must be upper triangular",
                    ));
                }
            }
        }
        Ok(Self {
            field,
            coefficients,
        })
    }

    pub fn value(&self, v: &[u8]) -> u8 {
        let f = &self.field;
        let n = self.coefficients.rows();
        let mut acc = 0;
        for i in 0..n {
            for j in i..n {
                let c = self.coefficients.get(i, j);
                if c != 0 {
                    acc = f.add(acc, f.mul(c, f.mul(v[i], v[j])));
                }
            }
        }
        acc
    }

    /// Polar form `B(u, v) = Q(u + v) − Q(u) − Q(v)`, i.e. matrix C + Cᵀ.
    pub fn polar(&self) -> BilinearForm {
        let f = self.field;
        let t = self.coefficients.transpose();
        let n = self.coefficients.rows();
        let mut m = Matrix::zeros(n, n);
        for r in 0..n {
            for c in 0..n {
                m.set(r, c, f.add(self.coefficients.get(r, c), t.get(r, c)));
            }
        }
        BilinearForm { field: f, matrix: m }
    }

    pub fn is_singular_vector(&self, v: &[u8]) -> bool {
        self.value(v) == 0
    }
}

/// `MᵗJM` for square matrices of matching size.
fn gram(field: &Field, m: &Matrix, j: &Matrix) -> Result<Matrix> {
    m.transpose().mul(field, j)?.mul(field, m)
}

/// Exactly `MᵗJM == J`.
pub fn check_symplectic(field: &Field, m: &Matrix, j: &Matrix) -> bool {
    match gram(field, m, j) {
        Ok(g) => &g == j,
        Err(_) => false,
    }
}

/// Fails with a `ConstraintViolation` unless `MᵗJM == J`.
pub fn ensure_symplectic(field: &Field, m: &Matrix, j: &Matrix) -> Result<()> {
    if check_symplectic(field, m, j) {
        Ok(())
    } else {
        Err(Error::constraint("matrix fails the symplectic identity MᵗJM = J"))
    }
}

/// The multiplier λ with `MᵗJM = λJ`, if `M` is a similitude of `J`.
pub fn similitude_multiplier(field: &Field, m: &Matrix, j: &Matrix) -> Option<u8> {
    let g = gram(field, m, j).ok()?;
    let n = j.rows();
    let (r, c) = (0..n)
        .flat_map(|r| (0..n).map(move |c| (r, c)))
        .find(|&(r, c)| j.get(r, c) != 0)?;
    let lambda = field.div(g.get(r, c), j.get(r, c))?;
    if lambda != 0 && g == j.scale(field, lambda) {
        Some(lambda)
    } else {
        None
    }
}

/// Symplectic transvection `x ↦ x + a·ω(x, v)·v` as a matrix.
///
/// Entry (r, c) is δ_rc + a·v_r·(Jv)_c. The result is checked against
/// MᵗJM = J before it is returned.
pub fn transvection(field: &Field, form: &BilinearForm, v: &[u8], a: u8) -> Result<Matrix> {
    let j = form.matrix();
    let n = j.rows();
    if v.len() != n {
        return Err(Error::constraint(format!(
            "transvection vector has length {}, form has dimension {n}",
            v.len()
        )));
    }
    let jv = j.apply(field, v);
    let mut t = Matrix::identity(n);
    for r in 0..n {
        for c in 0..n {
            let term = field.mul(a, field.mul(v[r], jv[c]));
            t.set(r, c, field.add(t.get(r, c), term));
        }
    }
    ensure_symplectic(field, &t, j)?;
    Ok(t)
}
