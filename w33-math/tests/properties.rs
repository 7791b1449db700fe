// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Property tests for the group and field layers.
//!
//! Run with: `cargo test -p w33-math --test properties`

use proptest::prelude::*;
use w33_math::form::{check_symplectic, similitude_multiplier, transvection};
use w33_math::{closure, orbit, orbit_partition, BilinearForm, Field, Matrix, Permutation};

fn permutation(degree: usize) -> impl Strategy<Value = Permutation> {
    Just((0..degree).collect::<Vec<usize>>())
        .prop_shuffle()
        .prop_map(|images| Permutation::from_images(images).unwrap())
}

proptest! {
    #[test]
    fn closure_is_a_group(gens in prop::collection::vec(permutation(6), 1..4),
                          picks in prop::collection::vec((0usize..720, 0usize..720), 16)) {
        let group = closure(&gens, 720).unwrap();
        prop_assert!(group.elements()[0].is_identity());
        prop_assert!(group.is_closed());
        prop_assert_eq!(720 % group.order(), 0);
        for g in &gens {
            prop_assert!(group.contains(g));
            prop_assert!(group.contains(&g.inverse()));
        }
        for (a, b) in picks {
            let g = &group.elements()[a % group.order()];
            let h = &group.elements()[b % group.order()];
            prop_assert!(group.contains(&Permutation::compose(g, h)));
        }
    }

    #[test]
    fn orbits_partition_the_points(gens in prop::collection::vec(permutation(9), 1..3)) {
        let cells = orbit_partition(&gens).unwrap();
        let mut all: Vec<usize> = cells.iter().flatten().copied().collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..9).collect::<Vec<_>>());
        for cell in &cells {
            for &x in cell {
                let mut from_x = orbit(x, &gens).unwrap();
                let mut expect = cell.clone();
                from_x.sort_unstable();
                expect.sort_unstable();
                prop_assert_eq!(from_x, expect);
            }
        }
    }

    #[test]
    fn transvection_words_are_symplectic(
        word in prop::collection::vec((prop::collection::vec(0u8..3, 4), 1u8..3), 1..6),
    ) {
        let f = Field::gf3();
        let form = BilinearForm::standard_symplectic(f, 4).unwrap();
        let j = form.matrix();
        let mut m = Matrix::identity(4);
        for (v, a) in &word {
            m = m.mul(&f, &transvection(&f, &form, v, *a).unwrap()).unwrap();
        }
        prop_assert!(check_symplectic(&f, &m, j));
        prop_assert_eq!(similitude_multiplier(&f, &m, j), Some(1));

        // composing with diag(1, 1, 2, 2) scales the form by 2
        let scaled = m.mul(&f, &Matrix::diagonal(&[1, 1, 2, 2])).unwrap();
        prop_assert!(!check_symplectic(&f, &scaled, j));
        prop_assert_eq!(similitude_multiplier(&f, &scaled, j), Some(2));
    }

    #[test]
    fn perturbed_symplectic_matrix(
        word in prop::collection::vec((prop::collection::vec(0u8..3, 4), 1u8..3), 1..6),
        r in 0usize..4,
        c in 0usize..4,
        delta in 1u8..3,
    ) {
        let f = Field::gf3();
        let form = BilinearForm::standard_symplectic(f, 4).unwrap();
        let j = form.matrix();
        let mut m = Matrix::identity(4);
        for (v, a) in &word {
            m = m.mul(&f, &transvection(&f, &form, v, *a).unwrap()).unwrap();
        }
        let mut perturbed = m.clone();
        perturbed.set(r, c, f.add(m.get(r, c), delta));

        // M + δE_rc stays symplectic iff row r of JM vanishes off column c
        let jm = j.mul(&f, &m).unwrap();
        let survives = (0..4).all(|k| k == c || jm.get(r, k) == 0);
        prop_assert_eq!(check_symplectic(&f, &perturbed, j), survives);
    }

    #[test]
    fn gf4_associativity(a in 0u8..4, b in 0u8..4, c in 0u8..4) {
        let f = Field::gf4();
        prop_assert_eq!(f.mul(f.mul(a, b), c), f.mul(a, f.mul(b, c)));
        prop_assert_eq!(f.add(f.add(a, b), c), f.add(a, f.add(b, c)));
    }
}
