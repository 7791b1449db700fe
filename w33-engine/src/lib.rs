// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod config;
pub mod objects;
pub mod report;
pub mod engine;

pub use config::EngineConfig;
pub use engine::W33Engine;
pub use objects::{e8, schlafli, w33, SchlafliGraph, W33Geometry};
pub use report::{
    ActionReport, CliqueReport, GroupReport, LineReport, MatchingReport, SolveReport,
    SpectrumReport, SrgReport,
};
