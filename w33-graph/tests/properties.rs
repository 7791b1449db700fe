// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Property tests for graph assembly and the cocycle solver.
//!
//! Run with: `cargo test -p w33-graph --test properties`

use proptest::prelude::*;
use w33_graph::cochain::{apply_d1, boundary_d1, solve, solve_composite, CompositeSolution};
use w33_graph::invariants::triangle_count;
use w33_graph::Graph;

/// Random simple graph on `n` vertices from an upper-triangle bit list.
fn graph(n: usize) -> impl Strategy<Value = Graph> {
    prop::collection::vec(any::<bool>(), n * (n - 1) / 2).prop_map(move |bits| {
        let mut edges = Vec::new();
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if bits[k] {
                    edges.push((i, j));
                }
                k += 1;
            }
        }
        Graph::from_edges(n, &edges).unwrap()
    })
}

proptest! {
    #[test]
    fn assembled_graphs_are_simple(g in graph(9)) {
        prop_assert!(g.is_simple());
        prop_assert_eq!(g.edges().len(), g.edge_count());
        prop_assert_eq!(triangle_count(&g), g.triangles().len() as u64);
    }

    #[test]
    fn cocycle_round_trip_mod_prime(g in graph(8), seed in prop::collection::vec(0u32..6, 28), p in prop::sample::select(vec![2u32, 3])) {
        let d1 = boundary_d1(&g);
        let x: Vec<u32> = seed.iter().take(d1.num_cols()).map(|&v| v % p).collect();
        let b: Vec<i64> = apply_d1(&d1, &x, p).unwrap().into_iter().map(i64::from).collect();
        let sol = solve(&d1, &b, p).unwrap();
        prop_assert!(sol.is_solvable());
        prop_assert!(sol.rank() <= d1.num_rows().min(d1.num_cols()));
        let back: Vec<i64> = apply_d1(&d1, sol.solution().unwrap(), p)
            .unwrap()
            .into_iter()
            .map(i64::from)
            .collect();
        prop_assert_eq!(back, b);
    }

    #[test]
    fn cocycle_round_trip_mod_six(g in graph(7), seed in prop::collection::vec(0u32..6, 21)) {
        let d1 = boundary_d1(&g);
        let x: Vec<u32> = seed.iter().take(d1.num_cols()).copied().collect();
        let b: Vec<i64> = apply_d1(&d1, &x, 6).unwrap().into_iter().map(i64::from).collect();
        match solve_composite(&d1, &b, 6).unwrap() {
            CompositeSolution::Solvable { solution, .. } => {
                let back: Vec<i64> = apply_d1(&d1, &solution, 6)
                    .unwrap()
                    .into_iter()
                    .map(i64::from)
                    .collect();
                prop_assert_eq!(back, b);
            }
            CompositeSolution::Unsolvable { prime, .. } => {
                prop_assert!(false, "image vector reported unsolvable mod {}", prime);
            }
        }
    }
}
