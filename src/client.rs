// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Client

use serde::{Deserialize, Serialize};

use crate::types::{ClientId, VertexId};

/// A delivery recipient, one per destination vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub vertex: VertexId,
    pub total_orders: u64,
}

impl Client {
    pub fn new(id: ClientId, vertex: VertexId, label: &str) -> Self {
        Self {
            id,
            name: format!("Client {label}"),
            vertex,
            total_orders: 0,
        }
    }

    pub(crate) fn register_order(&mut self) {
        self.total_orders += 1;
    }
}
