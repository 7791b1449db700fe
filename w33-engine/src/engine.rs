// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! W33Engine: top-level verification facade
//!
//! Wraps the memoized objects and the [`EngineConfig`] budgets into one
//! entry point. Each method runs one verification and returns a
//! serializable report; library errors are lifted into `anyhow` with the
//! operation attached as context.

use std::cmp::Reverse;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use w33_graph::bijection::{
    canonical_order_bfs, canonical_order_by_key, constrained_matching, pair_by_rank, ranks,
};
use w33_graph::clique::{double_six_count, enumerate_k_cliques};
use w33_graph::cochain::{boundary_d1, solve, solve_composite, CocycleSolution, CompositeSolution};
use w33_graph::invariants::{srg_eigenvalues, srg_parameters, triangle_count};
use w33_graph::spectral::{seidel_spectrum, spectra_match, spectrum};
use w33_graph::Graph;
use w33_math::action::verify_action_homomorphism;
use w33_math::group::check_homomorphism;
use w33_math::linalg::is_prime;
use w33_math::{
    closure, find_element, find_element_exhaustive, orbit_partition, Group, Permutation,
    SearchOutcome,
};

use crate::config::EngineConfig;
use crate::objects::{self, AUTOMORPHISM_ORDER, LINE_SIZE};
use crate::report::{
    ActionReport, CliqueReport, GroupReport, LineReport, MatchingReport, SolveReport,
    SpectrumReport, SrgReport,
};

/// Size of the cliques forming a double-six.
pub const DOUBLE_SIX_CLIQUE: usize = 6;

pub struct W33Engine {
    config: EngineConfig,
}

impl W33Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate().context("rejected engine config")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Closure of the W33 generators acting on the 40 points.
    ///
    /// An order other than [`AUTOMORPHISM_ORDER`] is a constraint violation.
    pub fn automorphism_group(&self) -> Result<Group> {
        let geo = objects::w33()?;
        let group = closure(&geo.generators, self.config.closure_budget).map_err(|e| {
            warn!(budget = self.config.closure_budget, "automorphism closure failed: {e}");
            e
        });
        let group = group.context("W33 automorphism closure")?;
        group
            .verify_order(AUTOMORPHISM_ORDER)
            .context("W33 generators or composition convention")?;
        info!(order = group.order(), "closed W33 automorphism group");
        Ok(group)
    }

    pub fn group_report(&self) -> Result<GroupReport> {
        let geo = objects::w33()?;
        let group = self.automorphism_group()?;
        let orbits = orbit_partition(&geo.generators)?;
        Ok(GroupReport {
            degree: group.degree(),
            generators: group.generators().len(),
            order: group.order(),
            is_closed: group.is_closed(),
            orbit_sizes: orbits.iter().map(Vec::len).collect(),
        })
    }

    pub fn srg_report(&self) -> Result<SrgReport> {
        let geo = objects::w33()?;
        Ok(srg_report_for(&geo.graph))
    }

    pub fn spectrum_report(&self) -> Result<SpectrumReport> {
        let geo = objects::w33()?;
        Ok(spectrum_report_for(&geo.graph))
    }

    pub fn line_report(&self) -> Result<LineReport> {
        let geo = objects::w33()?;
        let mut per_point = vec![0usize; geo.points.len()];
        for line in &geo.lines {
            for &p in line {
                per_point[p] += 1;
            }
        }
        per_point.sort_unstable();
        per_point.dedup();
        Ok(LineReport {
            line_size: LINE_SIZE,
            lines: geo.lines.len(),
            lines_per_point: per_point,
            triangles: triangle_count(&geo.graph),
        })
    }

    /// Six-cliques and double-sixes of the Schläfli graph.
    pub fn schlafli_report(&self) -> Result<CliqueReport> {
        let s = objects::schlafli()?;
        let cliques = enumerate_k_cliques(&s.graph, DOUBLE_SIX_CLIQUE, self.config.clique_budget)
            .context("Schläfli six-clique enumeration")?;
        let degree = srg_parameters(&s.graph).ok().map(|p| p.k);
        Ok(CliqueReport {
            vertices: s.graph.order(),
            degree,
            clique_size: DOUBLE_SIX_CLIQUE,
            cliques: cliques.len(),
            double_sixes: double_six_count(&s.graph, &cliques),
        })
    }

    /// Match the 240 W33 edges with the 240 E8 roots.
    ///
    /// Edges are ranked by a BFS over the edge action from edge 0, roots by
    /// decreasing inner product with root 0 (ties by index). Edge e may go
    /// to root r when `(rank(r) − rank(e)) mod 240 < matching_window`.
    ///
    /// The band is a synthetic compatibility rule built from the two
    /// canonical orders, not from any structure shared by edges and roots.
    /// It always admits the diagonal, so a perfect matching exists for every
    /// window; the report measures how far the matching strays from plain
    /// rank pairing.
    pub fn edge_root_matching(&self) -> Result<MatchingReport> {
        let e8 = objects::e8();
        let (edge_order, root_order) = edge_and_root_orders()?;
        let n = edge_order.len();
        let (edge_rank, root_rank) = (ranks(&edge_order), ranks(&root_order));
        let baseline = pair_by_rank(&edge_order, &root_order)?;

        let window = self.config.matching_window;
        let outcome = constrained_matching(n, e8.len(), |e, r| {
            within_band(edge_rank[e], root_rank[r], n, window)
        });
        Ok(match outcome {
            Ok(bijection) => MatchingReport {
                left: n,
                right: e8.len(),
                window,
                matched: bijection.len(),
                is_bijective: true,
                rank_pairing_agreement: (0..n)
                    .filter(|&e| bijection.apply(e) == baseline.apply(e))
                    .count(),
                matching: Some(bijection.forward().to_vec()),
            },
            Err(failure) => {
                warn!(window, "edge/root matching failed: {failure}");
                MatchingReport {
                    left: n,
                    right: e8.len(),
                    window,
                    matched: failure.matched,
                    is_bijective: false,
                    rank_pairing_agreement: 0,
                    matching: None,
                }
            }
        })
    }

    /// Solve `d₁ x = target` on W33 modulo a prime or a squarefree composite.
    pub fn cocycle_report(&self, target: &[i64], modulus: u32) -> Result<SolveReport> {
        let geo = objects::w33()?;
        let d1 = boundary_d1(&geo.graph);
        let (equations, unknowns) = (d1.num_rows(), d1.num_cols());
        let report = if is_prime(modulus) {
            match solve(&d1, target, modulus).context("cocycle solve")? {
                CocycleSolution::Solvable { solution, rank } => SolveReport {
                    modulus,
                    equations,
                    unknowns,
                    solvable: true,
                    ranks: vec![(modulus, rank)],
                    solution: Some(solution),
                },
                CocycleSolution::Unsolvable { rank } => SolveReport {
                    modulus,
                    equations,
                    unknowns,
                    solvable: false,
                    ranks: vec![(modulus, rank)],
                    solution: None,
                },
            }
        } else {
            match solve_composite(&d1, target, modulus).context("composite cocycle solve")? {
                CompositeSolution::Solvable { solution, ranks } => SolveReport {
                    modulus,
                    equations,
                    unknowns,
                    solvable: true,
                    ranks,
                    solution: Some(solution),
                },
                CompositeSolution::Unsolvable { ranks, .. } => SolveReport {
                    modulus,
                    equations,
                    unknowns,
                    solvable: false,
                    ranks,
                    solution: None,
                },
            }
        };
        Ok(report)
    }

    /// Random search for a point permutation in the automorphism group.
    pub fn find_element<F>(&self, predicate: F) -> Result<SearchOutcome<Permutation>>
    where
        F: Fn(&Permutation) -> bool,
    {
        let geo = objects::w33()?;
        let outcome = find_element(
            predicate,
            &geo.generators,
            self.config.sample_budget(),
            self.config.seed,
        )?;
        if !outcome.is_found() {
            warn!(samples = self.config.search_samples, "random element search came up empty");
        }
        Ok(outcome)
    }

    /// Exhaustive search over the closure; `Exhausted` proves absence.
    pub fn find_element_exhaustive<F>(&self, predicate: F) -> Result<SearchOutcome<Permutation>>
    where
        F: Fn(&Permutation) -> bool,
    {
        let geo = objects::w33()?;
        let outcome = find_element_exhaustive(predicate, &geo.generators, self.config.closure_budget)?;
        if let SearchOutcome::BudgetExceeded { budget, explored } = outcome {
            warn!(budget, explored, "exhaustive search hit the closure budget");
        }
        Ok(outcome)
    }

    /// Composition convention and faithfulness checks for the two actions.
    pub fn action_report(&self) -> Result<ActionReport> {
        let geo = objects::w33()?;
        let matrix_action = verify_action_homomorphism(
            &geo.field,
            &geo.generator_matrices,
            &geo.points,
            &geo.index,
        );
        if let Err(e) = &matrix_action {
            warn!("matrix action check failed: {e}");
        }
        let edge_generators = geo.edge_generators()?;
        let edge = check_homomorphism(&geo.generators, &edge_generators, self.config.closure_budget)
            .context("edge action homomorphism check")?;
        Ok(ActionReport {
            matrix_action_is_homomorphism: matrix_action.is_ok(),
            edge_action_is_homomorphism: edge.is_homomorphism,
            domain_order: edge.domain_order,
            kernel_size: edge.kernel_size,
        })
    }
}

/// Canonical edge and root orders used by the edge/root matching.
fn edge_and_root_orders() -> Result<(Vec<usize>, Vec<usize>)> {
    let geo = objects::w33()?;
    let e8 = objects::e8();
    let n = geo.graph.edge_count();
    if n != e8.len() {
        bail!("{n} edges cannot be matched with {} roots", e8.len());
    }
    let edge_generators = geo.edge_generators().context("edge action of W33 generators")?;
    let edge_order = canonical_order_bfs(n, &[0], &edge_generators)?;
    let root0 = e8.root(0);
    let root_order = canonical_order_by_key(e8.len(), |i| Reverse(root0.dot_doubled(e8.root(i))));
    Ok((edge_order, root_order))
}

fn within_band(edge_rank: usize, root_rank: usize, n: usize, window: usize) -> bool {
    (root_rank + n - edge_rank) % n < window
}

pub fn srg_report_for(graph: &Graph) -> SrgReport {
    SrgReport::from_outcome(graph.order(), srg_parameters(graph))
}

pub fn spectrum_report_for(graph: &Graph) -> SpectrumReport {
    let adjacency = spectrum(graph);
    let seidel = seidel_spectrum(graph);
    let predicted = srg_parameters(graph).ok().map(|p| {
        let ev = srg_eigenvalues(&p);
        [
            (ev.principal.0, ev.principal.1),
            (ev.positive.0, ev.positive.1.round() as usize),
            (ev.negative.0, ev.negative.1.round() as usize),
        ]
        .into_iter()
        .filter(|&(_, m)| m > 0)
        .collect::<Vec<_>>()
    });
    let matches_prediction = predicted
        .as_ref()
        .is_some_and(|p| spectra_match(&adjacency, p));
    SpectrumReport {
        adjacency,
        seidel,
        predicted,
        matches_prediction,
    }
}
