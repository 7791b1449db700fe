// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod graph;
pub mod invariants;
pub mod spectral;
pub mod clique;
pub mod bijection;
pub mod cochain;

pub use bijection::{Bijection, NoPerfectMatching};
pub use cochain::{BoundaryMatrix, CocycleSolution};
pub use graph::Graph;
pub use invariants::{NotStronglyRegular, SrgParameters};
pub use spectral::{Spectrum, SPECTRAL_TOLERANCE};
