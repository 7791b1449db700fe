// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Terminal states of a bounded search.

use serde::{Deserialize, Serialize};

/// Exploring → {Found, Exhausted, BudgetExceeded}.
///
/// `Exhausted` means the search space (or sample budget) was used up without
/// a hit. `BudgetExceeded` means the space could not be covered, so absence
/// of a hit proves nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome<T> {
    Found(T),
    Exhausted { explored: usize },
    BudgetExceeded { budget: usize, explored: usize },
}

impl<T> SearchOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            SearchOutcome::Found(t) => Some(t),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SearchOutcome<U> {
        match self {
            SearchOutcome::Found(t) => SearchOutcome::Found(f(t)),
            SearchOutcome::Exhausted { explored } => SearchOutcome::Exhausted { explored },
            SearchOutcome::BudgetExceeded { budget, explored } => {
                SearchOutcome::BudgetExceeded { budget, explored }
            }
        }
    }

    /// Short label for logs and reports.
    pub fn state(&self) -> &'static str {
        match self {
            SearchOutcome::Found(_) => "found",
            SearchOutcome::Exhausted { .. } => "exhausted",
            SearchOutcome::BudgetExceeded { .. } => "budget_exceeded",
        }
    }
}
