// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite ("The Depot")

pub mod types;
pub mod config;
pub mod graph;
pub mod topology;
pub mod routing;
pub mod spanning;
pub mod route;
pub mod avl;
pub mod ledger;
pub mod client;
pub mod order;
pub mod registry;
pub mod analytics;
pub mod simulation;

pub use types::*;
pub use config::{ConfigError, SimulationConfig, TopologyConfig};
pub use graph::{Edge, Graph, GraphError, Vertex};
pub use topology::{generate_topology, GenerationError, RoleMap, TopologyGenerator};
pub use routing::{plan_route, RouteError, RoutePlan};
pub use spanning::compute_mst;
pub use ledger::{LedgerEntry, RouteLedger};
pub use order::Order;
pub use client::Client;
pub use registry::RegistryError;
pub use analytics::{SimulationSummary, VisitCount};
pub use simulation::{RunOutcome, Simulation, SimulationError};

use serde::Serialize;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Browser handle around a [`Simulation`]. Vertices and orders cross the
/// boundary as labels and id strings; everything else as plain objects.
#[wasm_bindgen]
pub struct WasmSimulation {
    inner: Simulation,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

impl WasmSimulation {
    fn from_config(config: SimulationConfig) -> Result<WasmSimulation, JsValue> {
        let inner = Simulation::new(config).map_err(js_err)?;
        Ok(Self { inner })
    }

    fn vertex(&self, label: &str) -> Result<VertexId, JsValue> {
        self.inner
            .graph()
            .vertex_by_label(label)
            .map(|v| v.id)
            .ok_or_else(|| js_err(format!("unknown vertex label: {label}")))
    }

    fn order_id(id: &str) -> Result<OrderId, JsValue> {
        OrderId::parse(id).ok_or_else(|| js_err(format!("malformed order id: {id}")))
    }
}

#[wasm_bindgen]
impl WasmSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(n_nodes: u32, m_edges: u32, seed: u64) -> Result<WasmSimulation, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config = SimulationConfig::new(n_nodes as usize, m_edges as usize).with_seed(seed);
        Self::from_config(config)
    }

    /// Build from a JSON config document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<WasmSimulation, JsValue> {
        let config = SimulationConfig::from_json_str(json).map_err(js_err)?;
        Self::from_config(config)
    }

    pub fn generate_order(&mut self) -> Result<JsValue, JsValue> {
        let order = self.inner.generate_order().map_err(js_err)?;
        Ok(to_js(&order))
    }

    pub fn create_order(&mut self, origin: &str, destination: &str, priority: u8) -> Result<JsValue, JsValue> {
        let origin = self.vertex(origin)?;
        let destination = self.vertex(destination)?;
        let order = self
            .inner
            .create_order(origin, destination, priority)
            .map_err(js_err)?;
        Ok(to_js(&order))
    }

    /// Generate `count` orders; returns the run tally.
    pub fn run(&mut self, count: u32) -> Result<JsValue, JsValue> {
        let outcome = self.inner.run(count as usize).map_err(js_err)?;
        Ok(to_js(&outcome))
    }

    pub fn cancel_order(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let order = self.inner.cancel_order(Self::order_id(id)?).map_err(js_err)?;
        Ok(to_js(&order))
    }

    pub fn complete_order(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let order = self.inner.complete_order(Self::order_id(id)?).map_err(js_err)?;
        Ok(to_js(&order))
    }

    pub fn get_order(&self, id: &str) -> JsValue {
        match OrderId::parse(id).and_then(|id| self.inner.get_order(id).ok()) {
            Some(order) => to_js(order),
            None => JsValue::NULL,
        }
    }

    pub fn plan_route(&self, origin: &str, destination: &str) -> Result<JsValue, JsValue> {
        let plan = self
            .inner
            .plan_route(self.vertex(origin)?, self.vertex(destination)?)
            .map_err(js_err)?;
        Ok(to_js(&plan))
    }

    pub fn get_nodes(&self) -> JsValue {
        let vertices: Vec<&Vertex> = self.inner.graph().vertices().collect();
        to_js(&vertices)
    }

    pub fn get_edges(&self) -> JsValue {
        to_js(&self.inner.graph().edges())
    }

    pub fn get_orders(&self) -> JsValue {
        to_js(&self.inner.list_orders())
    }

    pub fn get_clients(&self) -> JsValue {
        to_js(&self.inner.list_clients())
    }

    pub fn get_ledger(&self) -> JsValue {
        to_js(&self.inner.ledger().entries())
    }

    pub fn get_mst(&self) -> JsValue {
        to_js(&self.inner.compute_mst_edges())
    }

    pub fn get_summary(&self) -> JsValue {
        to_js(&self.inner.summary())
    }

    /// Visit ranking for `role` ("storage", "recharge" or "client").
    pub fn get_visit_ranking(&self, role: &str) -> JsValue {
        match Role::from_name(role) {
            Some(role) => to_js(&self.inner.visit_ranking(role)),
            None => JsValue::NULL,
        }
    }

    /// Regenerate the network from the same config and drop all records.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        let config = self.inner.config().clone();
        self.inner = Simulation::new(config).map_err(js_err)?;
        Ok(())
    }
}
