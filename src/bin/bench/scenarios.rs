// Scenario Definitions: network shapes and vehicle autonomy under test
// Each scenario is one SimulationConfig template plus pass criteria

use courier_engine::{Cost, SimulationConfig, TopologyConfig, Weight};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub nodes: usize,
    pub edges: usize,
    pub orders: usize,
    pub autonomy: Cost,
    pub max_weight: Weight,
    /// (storage %, recharge %)
    pub role_ratio: (u32, u32),
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    pub min_success_rate: Option<f64>,
    pub require_connected: bool,
    pub require_balanced_ledger: bool,
    pub require_spanning_tree: bool,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            min_success_rate: None,
            require_connected: true,
            require_balanced_ledger: true,
            require_spanning_tree: true,
        }
    }
}

impl Scenario {
    pub fn config(&self, seed: u64) -> SimulationConfig {
        let topology = TopologyConfig::new(self.nodes, self.edges)
            .with_max_edge_weight(self.max_weight)
            .with_role_ratio(self.role_ratio.0, self.role_ratio.1);
        SimulationConfig::new(self.nodes, self.edges)
            .with_topology(topology)
            .with_autonomy_limit(self.autonomy)
            .with_seed(seed)
    }
}

// ─── Scenario Registry ──────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "BASELINE_SMALL",
            label: "Baseline 15 nodes",
            category: "baseline",
            nodes: 15,
            edges: 20,
            orders: 50,
            autonomy: 50,
            max_weight: 20,
            role_ratio: (20, 20),
            criteria: PassCriteria {
                min_success_rate: Some(0.5),
                ..Default::default()
            },
        },
        Scenario {
            name: "BASELINE_CITY",
            label: "City grid 150 nodes",
            category: "baseline",
            nodes: 150,
            edges: 300,
            orders: 500,
            autonomy: 50,
            max_weight: 20,
            role_ratio: (20, 20),
            criteria: PassCriteria {
                min_success_rate: Some(0.5),
                ..Default::default()
            },
        },
        Scenario {
            name: "SPARSE_TREE",
            label: "Bare spanning tree",
            category: "topology",
            nodes: 60,
            edges: 59,
            orders: 200,
            autonomy: 80,
            max_weight: 20,
            role_ratio: (20, 20),
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "DENSE_MESH",
            label: "Dense mesh",
            category: "topology",
            nodes: 40,
            edges: 400,
            orders: 300,
            autonomy: 50,
            max_weight: 20,
            role_ratio: (20, 20),
            criteria: PassCriteria {
                min_success_rate: Some(0.8),
                ..Default::default()
            },
        },
        Scenario {
            name: "SHORT_RANGE",
            label: "Short-range vehicle",
            category: "autonomy",
            nodes: 80,
            edges: 160,
            orders: 300,
            autonomy: 25,
            max_weight: 20,
            role_ratio: (20, 20),
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "RECHARGE_DESERT",
            label: "Few recharge points",
            category: "autonomy",
            nodes: 80,
            edges: 160,
            orders: 300,
            autonomy: 40,
            max_weight: 20,
            role_ratio: (30, 5),
            criteria: PassCriteria::default(),
        },
        Scenario {
            name: "LONG_RANGE",
            label: "Unconstrained vehicle",
            category: "autonomy",
            nodes: 80,
            edges: 160,
            orders: 300,
            autonomy: 10_000,
            max_weight: 20,
            role_ratio: (20, 20),
            criteria: PassCriteria {
                min_success_rate: Some(1.0),
                ..Default::default()
            },
        },
        Scenario {
            name: "HEAVY_WEIGHTS",
            label: "Long edges, mid autonomy",
            category: "autonomy",
            nodes: 50,
            edges: 100,
            orders: 200,
            autonomy: 120,
            max_weight: 100,
            role_ratio: (20, 25),
            criteria: PassCriteria::default(),
        },
    ]
}
