// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Runtime configuration for the W33 engine
//!
//! Every unbounded search the engine runs draws its limit from here.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use w33_math::SampleBudget;

/// Search budgets and seeds for [`crate::engine::W33Engine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum group elements kept by a closure before giving up
    pub closure_budget: usize,
    /// Maximum search-tree nodes for clique enumeration
    pub clique_budget: usize,
    /// Random words tried by `find_element`
    pub search_samples: usize,
    /// Longest random word (in generators) tried by `find_element`
    pub max_word_length: usize,
    /// Seed for every random search
    pub seed: u64,
    /// Width of the rank band allowed by the edge/root matching
    pub matching_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            closure_budget: 60_000,
            clique_budget: 1_000_000,
            search_samples: 2_000,
            max_word_length: 24,
            seed: 0x5733,
            matching_window: 4,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid engine config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.closure_budget == 0 {
            bail!("closure_budget must be positive");
        }
        if self.clique_budget == 0 {
            bail!("clique_budget must be positive");
        }
        if self.max_word_length == 0 {
            bail!("max_word_length must be at least 1");
        }
        if self.matching_window == 0 {
            bail!("matching_window must be at least 1 (a zero band admits no pairs)");
        }
        Ok(())
    }

    pub fn sample_budget(&self) -> SampleBudget {
        SampleBudget {
            samples: self.search_samples,
            max_word_length: self.max_word_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        // the W33 automorphism group must fit in the default budget
        assert!(config.closure_budget >= 51_840);
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig {
            seed: 7,
            ..EngineConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored = EngineConfig::from_json_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.closure_budget, EngineConfig::default().closure_budget);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(EngineConfig::from_json_str(r#"{ "matching_window": 0 }"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{ "closure_budget": 0 }"#).is_err());
        assert!(EngineConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_sample_budget() {
        let b = EngineConfig::default().sample_budget();
        assert_eq!(b.samples, 2_000);
        assert_eq!(b.max_word_length, 24);
    }
}
