// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Error taxonomy shared by every W33 crate.
//!
//! Only two conditions are errors proper:
//! - [`Error::ConstraintViolation`]: an input broke a mathematical fact the
//!   computation depends on. Fatal for the run.
//! - [`Error::ResourceBudgetExceeded`]: a search was cut off before it could
//!   decide anything. "Unknown", never "empty".
//!
//! Expected negative outcomes (no perfect matching, not strongly regular,
//! unsolvable cochain, exhausted search) are ordinary values defined next to
//! the operation that produces them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An assumed invariant does not hold for the given input.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// A bounded search ran past its budget before terminating.
    #[error("resource budget exceeded: explored {explored} > budget {budget} ({what})")]
    ResourceBudgetExceeded {
        what: &'static str,
        budget: usize,
        explored: usize,
    },
}

impl Error {
    pub fn constraint(msg: impl Into<String>) -> Self {
        Error::ConstraintViolation(msg.into())
    }

    /// Whether the whole run must stop. Budget overruns are recoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ConstraintViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
