// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Configuration

//! Configuration types for a simulation run.

use serde::{Deserialize, Serialize};

use crate::types::{Cost, Weight};

/// Default maximum distance between recharge points.
pub const DEFAULT_AUTONOMY_LIMIT: Cost = 50;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

// ─── TopologyConfig ──────────────────────────────────────────────────────────

/// Shape of the generated network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Number of vertices.
    pub n_nodes: usize,

    /// Requested number of edges. Raised to `n_nodes - 1` if lower.
    pub m_edges: usize,

    /// Upper bound (inclusive) for random edge weights.
    pub max_edge_weight: Weight,

    /// Share of vertices tagged Storage, in percent.
    pub storage_pct: u32,

    /// Share of vertices tagged Recharge, in percent.
    pub recharge_pct: u32,
}

impl TopologyConfig {
    pub fn new(n_nodes: usize, m_edges: usize) -> Self {
        Self {
            n_nodes,
            m_edges,
            max_edge_weight: 20,
            storage_pct: 20,
            recharge_pct: 20,
        }
    }

    pub fn with_max_edge_weight(mut self, weight: Weight) -> Self {
        self.max_edge_weight = weight;
        self
    }

    pub fn with_role_ratio(mut self, storage_pct: u32, recharge_pct: u32) -> Self {
        self.storage_pct = storage_pct;
        self.recharge_pct = recharge_pct;
        self
    }

    /// Edge count after the connectivity clamp.
    pub fn effective_edges(&self) -> usize {
        self.m_edges.max(self.n_nodes.saturating_sub(1))
    }

    /// Storage and recharge shares fit within 100% together.
    pub fn role_ratio_is_valid(&self) -> bool {
        self.storage_pct
            .checked_add(self.recharge_pct)
            .map_or(false, |total| total <= 100)
    }

    /// Largest edge count a simple graph on `n_nodes` vertices can hold.
    pub fn max_edges(&self) -> usize {
        self.n_nodes * self.n_nodes.saturating_sub(1) / 2
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self::new(15, 20)
    }
}

// ─── SimulationConfig ────────────────────────────────────────────────────────

/// Configuration for a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Network shape.
    pub topology: TopologyConfig,

    /// Maximum distance the vehicle covers between recharges.
    pub autonomy_limit: Cost,

    /// Random seed for deterministic simulation.
    pub seed: u64,

    /// Priority stamped on generated orders.
    pub default_priority: u8,
}

impl SimulationConfig {
    pub fn new(n_nodes: usize, m_edges: usize) -> Self {
        Self {
            topology: TopologyConfig::new(n_nodes, m_edges),
            autonomy_limit: DEFAULT_AUTONOMY_LIMIT,
            seed: 0,
            default_priority: 1,
        }
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_autonomy_limit(mut self, limit: Cost) -> Self {
        self.autonomy_limit = limit;
        self
    }

    pub fn with_topology(mut self, topology: TopologyConfig) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_default_priority(mut self, priority: u8) -> Self {
        self.default_priority = priority;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.topology;
        if t.n_nodes == 0 {
            return Err(ConfigError::Invalid("n_nodes must be at least 1".into()));
        }
        if t.max_edge_weight == 0 {
            return Err(ConfigError::Invalid("max_edge_weight must be at least 1".into()));
        }
        if !t.role_ratio_is_valid() {
            return Err(ConfigError::Invalid(format!(
                "role ratio exceeds 100% (storage {}%, recharge {}%)",
                t.storage_pct, t.recharge_pct
            )));
        }
        if self.autonomy_limit == 0 {
            return Err(ConfigError::Invalid("autonomy_limit must be positive".into()));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(15, 20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_clamped_for_connectivity() {
        assert_eq!(TopologyConfig::new(10, 3).effective_edges(), 9);
        assert_eq!(TopologyConfig::new(10, 12).effective_edges(), 12);
        assert_eq!(TopologyConfig::new(1, 0).effective_edges(), 0);
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = SimulationConfig::from_json_str(
            r#"{ "seed": 9, "topology": { "n_nodes": 30, "m_edges": 45 } }"#,
        )
        .expect("test: valid config");
        assert_eq!(config.seed, 9);
        assert_eq!(config.topology.n_nodes, 30);
        assert_eq!(config.topology.max_edge_weight, 20);
        assert_eq!(config.autonomy_limit, DEFAULT_AUTONOMY_LIMIT);
    }

    #[test]
    fn invalid_role_ratio_is_rejected() {
        let config = SimulationConfig::default()
            .with_topology(TopologyConfig::new(10, 10).with_role_ratio(70, 40));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn oversized_role_percentages_are_invalid_not_overflowing() {
        let err = SimulationConfig::from_json_str(
            r#"{ "topology": { "n_nodes": 10, "m_edges": 12, "storage_pct": 4294967295, "recharge_pct": 1 } }"#,
        );
        assert!(matches!(err, Err(ConfigError::Invalid(_))), "got {err:?}");

        let lone = TopologyConfig::new(10, 12).with_role_ratio(0, 101);
        assert!(!lone.role_ratio_is_valid());
        assert!(TopologyConfig::new(10, 12).with_role_ratio(100, 0).role_ratio_is_valid());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimulationConfig::from_json_str("{ seed: }");
        assert!(matches!(err, Err(ConfigError::Parse(_))), "got {err:?}");
    }
}
