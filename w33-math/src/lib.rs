// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod error;
pub mod field;
pub mod projective;
pub mod form;
pub mod permutation;
pub mod action;
pub mod group;
pub mod search;
pub mod root_system;
pub mod linalg;

pub use error::{Error, Result};
pub use field::Field;
pub use form::{BilinearForm, Form, Matrix, QuadraticForm};
pub use group::{closure, find_element, find_element_exhaustive, orbit, orbit_partition, Group, SampleBudget};
pub use permutation::Permutation;
pub use projective::{build_points, PointIndex, ProjectivePoint};
pub use root_system::{RootSystem, RootVector};
pub use search::SearchOutcome;
