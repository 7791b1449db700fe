// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Small Finite Fields GF(2), GF(3), GF(4)
//!
//! Scalars are `u8` values in `0..q`. Prime fields use residue arithmetic.
//! GF(4) = GF(2)[ω]/(ω² + ω + 1) is encoded as bit polynomials:
//!
//! | Code | Element |
//! |------|---------|
//! | 0    | 0       |
//! | 1    | 1       |
//! | 2    | ω       |
//! | 3    | ω + 1 = ω² |
//!
//! Addition is XOR, multiplication goes through the log/antilog table of
//! the primitive element ω. No floating point anywhere.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Antilog table for GF(4): `GF4_EXP[k] = ω^k`.
const GF4_EXP: [u8; 3] = [1, 2, 3];

/// Log table for GF(4): `GF4_LOG[x] = k` with `ω^k = x` (index 0 unused).
const GF4_LOG: [u8; 4] = [0, 0, 1, 2];

/// A finite field of order 2, 3 or 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    order: u8,
}

impl Field {
    pub fn new(order: u8) -> Result<Self> {
        match order {
            2 | 3 | 4 => Ok(Self { order }),
            _ => Err(Error::constraint(format!(
                "unsupported field order {order}, expected 2, 3 or 4"
            ))),
        }
    }

    pub fn gf2() -> Self {
        Self { order: 2 }
    }

    pub fn gf3() -> Self {
        Self { order: 3 }
    }

    pub fn gf4() -> Self {
        Self { order: 4 }
    }

    pub fn order(&self) -> u8 {
        self.order
    }

    pub fn characteristic(&self) -> u8 {
        if self.order == 3 {
            3
        } else {
            2
        }
    }

    /// All field elements in code order `0..q`.
    pub fn elements(&self) -> impl Iterator<Item = u8> {
        0..self.order
    }

    /// Map an integer into the prime subfield.
    pub fn from_int(&self, value: i64) -> u8 {
        value.rem_euclid(self.characteristic() as i64) as u8
    }

    #[inline]
    pub fn add(&self, a: u8, b: u8) -> u8 {
        debug_assert!(a < self.order && b < self.order);
        if self.order == 4 {
            a ^ b
        } else {
            (a + b) % self.order
        }
    }

    #[inline]
    pub fn neg(&self, a: u8) -> u8 {
        match self.order {
            3 => (3 - a) % 3,
            // characteristic 2: every element is its own negative
            _ => a,
        }
    }

    #[inline]
    pub fn sub(&self, a: u8, b: u8) -> u8 {
        self.add(a, self.neg(b))
    }

    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        debug_assert!(a < self.order && b < self.order);
        if a == 0 || b == 0 {
            return 0;
        }
        if self.order == 4 {
            let k = (GF4_LOG[a as usize] + GF4_LOG[b as usize]) % 3;
            GF4_EXP[k as usize]
        } else {
            (a * b) % self.order
        }
    }

    /// Multiplicative inverse; `None` for zero.
    pub fn inv(&self, a: u8) -> Option<u8> {
        if a == 0 {
            return None;
        }
        if self.order == 4 {
            let k = (3 - GF4_LOG[a as usize]) % 3;
            return Some(GF4_EXP[k as usize]);
        }
        (1..self.order).find(|&b| self.mul(a, b) == 1)
    }

    pub fn div(&self, a: u8, b: u8) -> Option<u8> {
        self.inv(b).map(|bi| self.mul(a, bi))
    }

    /// Dot product `Σ uᵢ vᵢ`.
    pub fn dot(&self, u: &[u8], v: &[u8]) -> u8 {
        debug_assert_eq!(u.len(), v.len());
        u.iter()
            .zip(v.iter())
            .fold(0, |acc, (&a, &b)| self.add(acc, self.mul(a, b)))
    }

    /// Scalar multiple `s · v`.
    pub fn scale(&self, s: u8, v: &[u8]) -> Vec<u8> {
        v.iter().map(|&x| self.mul(s, x)).collect()
    }

    /// Componentwise sum `u + v`.
    pub fn add_vec(&self, u: &[u8], v: &[u8]) -> Vec<u8> {
        u.iter().zip(v.iter()).map(|(&a, &b)| self.add(a, b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unsupported_orders() {
        assert!(Field::new(5).is_err());
        assert!(Field::new(0).is_err());
        assert!(Field::new(4).is_ok());
    }

    #[test]
    fn test_gf4_is_a_field() {
        let f = Field::gf4();
        for a in f.elements() {
            assert_eq!(f.add(a, 0), a);
            assert_eq!(f.mul(a, 1), a);
            assert_eq!(f.add(a, f.neg(a)), 0);
            if a != 0 {
                let ai = f.inv(a).unwrap();
                assert_eq!(f.mul(a, ai), 1);
            }
            for b in f.elements() {
                assert_eq!(f.mul(a, b), f.mul(b, a));
                for c in f.elements() {
                    // distributivity
                    assert_eq!(
                        f.mul(a, f.add(b, c)),
                        f.add(f.mul(a, b), f.mul(a, c))
                    );
                }
            }
        }
        // ω² = ω + 1
        assert_eq!(f.mul(2, 2), 3);
        // ω³ = 1
        assert_eq!(f.mul(f.mul(2, 2), 2), 1);
    }

    #[test]
    fn test_gf3_inverses() {
        let f = Field::gf3();
        assert_eq!(f.inv(1), Some(1));
        assert_eq!(f.inv(2), Some(2));
        assert_eq!(f.inv(0), None);
        assert_eq!(f.neg(1), 2);
        assert_eq!(f.sub(0, 1), 2);
    }

    #[test]
    fn test_from_int_uses_characteristic() {
        assert_eq!(Field::gf3().from_int(-1), 2);
        assert_eq!(Field::gf4().from_int(-1), 1);
        assert_eq!(Field::gf2().from_int(4), 0);
    }

    #[test]
    fn test_dot_product() {
        let f = Field::gf3();
        assert_eq!(f.dot(&[1, 2, 0, 1], &[2, 2, 1, 1]), (2 + 4 + 1) % 3);
    }
}
