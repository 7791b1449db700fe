// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Serializable verification records returned by the engine.

use anyhow::{Context, Result};
use serde::Serialize;
use w33_graph::{NotStronglyRegular, SrgParameters};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    pub degree: usize,
    pub generators: usize,
    pub order: usize,
    pub is_closed: bool,
    /// Orbit sizes of the point action, in orbit discovery order.
    pub orbit_sizes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SrgReport {
    pub is_srg: bool,
    pub n: usize,
    pub k: usize,
    pub lambda: usize,
    pub mu: usize,
    /// Observed counts when the graph is not strongly regular.
    pub diagnostics: Option<NotStronglyRegular>,
}

impl SrgReport {
    pub fn from_outcome(n: usize, outcome: std::result::Result<SrgParameters, NotStronglyRegular>) -> Self {
        match outcome {
            Ok(p) => Self {
                is_srg: true,
                n: p.n,
                k: p.k,
                lambda: p.lambda,
                mu: p.mu,
                diagnostics: None,
            },
            Err(diag) => Self {
                is_srg: false,
                n,
                k: 0,
                lambda: 0,
                mu: 0,
                diagnostics: Some(diag),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumReport {
    /// `(eigenvalue, multiplicity)`, descending.
    pub adjacency: Vec<(f64, usize)>,
    pub seidel: Vec<(f64, usize)>,
    /// Spectrum predicted by the SRG parameters, if any.
    pub predicted: Option<Vec<(f64, usize)>>,
    pub matches_prediction: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    pub line_size: usize,
    pub lines: usize,
    pub lines_per_point: Vec<usize>,
    pub triangles: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliqueReport {
    pub vertices: usize,
    pub degree: Option<usize>,
    pub clique_size: usize,
    pub cliques: usize,
    pub double_sixes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingReport {
    pub left: usize,
    pub right: usize,
    pub window: usize,
    pub matched: usize,
    pub is_bijective: bool,
    /// `matching[edge] = root` when a perfect matching exists.
    pub matching: Option<Vec<usize>>,
    /// Edges sent to the same root as by plain rank pairing.
    pub rank_pairing_agreement: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    pub modulus: u32,
    pub equations: usize,
    pub unknowns: usize,
    pub solvable: bool,
    /// `(prime, rank)` for each prime factor of the modulus that was reached.
    pub ranks: Vec<(u32, usize)>,
    pub solution: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    pub matrix_action_is_homomorphism: bool,
    pub edge_action_is_homomorphism: bool,
    pub domain_order: usize,
    pub kernel_size: usize,
}

/// Pretty JSON for any report.
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}
