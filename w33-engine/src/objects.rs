// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Memoized Geometric Objects
//!
//! The W33 geometry, the E8 root system and the Schläfli graph are built
//! once per process on first use and shared read-only afterwards. A build
//! failure is memoized too and handed back to every caller.
//!
//! ## W33
//!
//! Points of PG(3, 3) with the standard symplectic form; adjacency is
//! orthogonality. The automorphism group is generated by the symplectic
//! transvections `x ↦ x + ω(x, v)·v` for v in [`TRANSVECTION_VECTORS`] and the
//! similitude `diag(1, 1, 2, 2)`, which scales ω by 2 = −1. The
//! transvections alone give PSp(4, 3) of order 25920; the similitude
//! doubles it to 51840.
//!
//! ## Schläfli graph
//!
//! The 27 E8 roots r with ⟨r, a⟩ = 1 and ⟨r, b⟩ = 0 for the fixed roots
//! a = e₀ − e₁ and b = e₁ − e₂, adjacent when ⟨r, s⟩ = 1.

use std::sync::LazyLock;

use tracing::info;
use w33_graph::Graph;
use w33_math::action::point_permutation;
use w33_math::form::{similitude_multiplier, transvection};
use w33_math::{
    build_points, BilinearForm, Error, Field, Matrix, Permutation, PointIndex, ProjectivePoint,
    Result, RootSystem, RootVector,
};

/// Points per line of W(3).
pub const LINE_SIZE: usize = 4;

pub const TRANSVECTION_VECTORS: [[u8; 4]; 5] = [
    [1, 0, 0, 0],
    [0, 1, 0, 0],
    [0, 0, 1, 0],
    [0, 0, 0, 1],
    [1, 1, 0, 0],
];

/// Order of PSp(4, 3):2, the full automorphism group of the point graph.
pub const AUTOMORPHISM_ORDER: usize = 51_840;

/// Multiplier λ = −1 of the outer similitude over GF(3).
pub const SIMILITUDE_MULTIPLIER: u8 = 2;

#[derive(Debug)]
pub struct W33Geometry {
    pub field: Field,
    pub points: Vec<ProjectivePoint>,
    pub index: PointIndex,
    pub form: BilinearForm,
    pub graph: Graph,
    pub lines: Vec<Vec<usize>>,
    /// Transvections followed by the similitude.
    pub generator_matrices: Vec<Matrix>,
    /// Point permutations of `generator_matrices`, same order.
    pub generators: Vec<Permutation>,
}

impl W33Geometry {
    fn build() -> Result<Self> {
        let field = Field::gf3();
        let points = build_points(&field, 4)?;
        let index = PointIndex::new(field, &points);
        let form = BilinearForm::standard_symplectic(field, 4)?;
        let graph = Graph::from_form(&points, &form)?;
        let lines = graph.lines(LINE_SIZE)?;

        let mut generator_matrices = TRANSVECTION_VECTORS
            .iter()
            .map(|v| transvection(&field, &form, v, 1))
            .collect::<Result<Vec<_>>>()?;
        let similitude = Matrix::diagonal(&[1, 1, 2, 2]);
        if similitude_multiplier(&field, &similitude, form.matrix()) != Some(SIMILITUDE_MULTIPLIER) {
            return Err(Error::constraint("diag(1, 1, 2, 2) is not a similitude with multiplier 2"));
        }
        generator_matrices.push(similitude);

        let generators = generator_matrices
            .iter()
            .map(|m| point_permutation(&field, m, &points, &index))
            .collect::<Result<Vec<_>>>()?;
        if let Some(pos) = generators.iter().position(|g| !graph.is_automorphism(g)) {
            return Err(Error::constraint(format!(
                "generator {pos} does not preserve orthogonality"
            )));
        }

        info!(
            points = points.len(),
            edges = graph.edge_count(),
            lines = lines.len(),
            generators = generators.len(),
            "built W33 geometry"
        );
        Ok(Self {
            field,
            points,
            index,
            form,
            graph,
            lines,
            generator_matrices,
            generators,
        })
    }

    /// Generators acting on the edge list of the graph.
    pub fn edge_generators(&self) -> Result<Vec<Permutation>> {
        self.generators
            .iter()
            .map(|g| self.graph.induced_edge_permutation(g))
            .collect()
    }
}

#[derive(Debug)]
pub struct SchlafliGraph {
    /// E8 indices of the 27 vertices, ascending.
    pub roots: Vec<usize>,
    pub graph: Graph,
}

impl SchlafliGraph {
    fn build(e8: &RootSystem) -> Result<Self> {
        let locate = |doubled: Vec<i8>| {
            e8.index_of(&RootVector::from_doubled(doubled))
                .ok_or_else(|| Error::constraint("reference root missing from E8"))
        };
        let a = locate(vec![2, -2, 0, 0, 0, 0, 0, 0])?;
        let b = locate(vec![0, 2, -2, 0, 0, 0, 0, 0])?;
        let roots = e8.roots_with_products(&[(a, 4), (b, 0)]);
        if roots.len() != 27 {
            return Err(Error::constraint(format!(
                "expected 27 roots in the orbit, found {}",
                roots.len()
            )));
        }
        let graph = Graph::from_predicate(roots.len(), |i, j| {
            e8.root(roots[i]).dot_doubled(e8.root(roots[j])) == 4
        })?;
        info!(vertices = roots.len(), edges = graph.edge_count(), "built Schläfli graph");
        Ok(Self { roots, graph })
    }
}

static W33: LazyLock<Result<W33Geometry>> = LazyLock::new(W33Geometry::build);

static E8: LazyLock<RootSystem> = LazyLock::new(|| {
    let e8 = RootSystem::e8();
    info!(roots = e8.len(), "built E8 root system");
    e8
});

static SCHLAFLI: LazyLock<Result<SchlafliGraph>> = LazyLock::new(|| SchlafliGraph::build(&E8));

pub fn w33() -> Result<&'static W33Geometry> {
    W33.as_ref().map_err(Clone::clone)
}

pub fn e8() -> &'static RootSystem {
    &E8
}

pub fn schlafli() -> Result<&'static SchlafliGraph> {
    SCHLAFLI.as_ref().map_err(Clone::clone)
}
