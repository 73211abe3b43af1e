// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Order/Client Registry

//! Sole owner of order and client records.
//!
//! Callers get shared references or clones; every mutation goes through a
//! registry operation.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::client::Client;
use crate::order::{Order, Transition};
use crate::types::{ClientId, Cost, OrderId, OrderStatus, VertexId};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("cannot {action} order {id}: status is {from}")]
    InvalidStateTransition {
        id: OrderId,
        from: OrderStatus,
        action: Transition,
    },
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),
    #[error("client not found: {0}")]
    ClientNotFound(ClientId),
}

/// Fields of a new order, supplied by the caller.
#[derive(Debug, Clone)]
pub struct NewOrder<'a> {
    pub origin: VertexId,
    pub destination: VertexId,
    pub destination_label: &'a str,
    pub path: Vec<VertexId>,
    pub cost: Cost,
    pub priority: u8,
}

// ─── Registry ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Registry {
    orders: Vec<Order>,
    order_index: HashMap<OrderId, usize>,
    clients: BTreeMap<ClientId, Client>,
    client_by_vertex: HashMap<VertexId, ClientId>,
    id_rng: ChaCha8Rng,
}

impl Registry {
    /// Order ids are drawn from a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            orders: Vec::new(),
            order_index: HashMap::new(),
            clients: BTreeMap::new(),
            client_by_vertex: HashMap::new(),
            id_rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Client for `vertex`, created with zero orders on first use.
    pub fn get_or_create_client(&mut self, vertex: VertexId, label: &str) -> &Client {
        let next_id = ClientId(self.clients.len() as u32);
        let id = *self.client_by_vertex.entry(vertex).or_insert(next_id);
        self.clients
            .entry(id)
            .or_insert_with(|| Client::new(id, vertex, label))
    }

    /// Register a new pending order and count it against the destination's
    /// client.
    pub fn create_order(&mut self, new: NewOrder<'_>) -> &Order {
        let client_id = self.get_or_create_client(new.destination, new.destination_label).id;
        if let Some(client) = self.clients.get_mut(&client_id) {
            client.register_order();
        }

        let id = self.next_order_id();
        let order = Order {
            id,
            client_id,
            origin: new.origin,
            destination: new.destination,
            path: new.path,
            cost: new.cost,
            priority: new.priority,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            delivered_at: None,
        };
        let slot = self.orders.len();
        self.order_index.insert(id, slot);
        self.orders.push(order);
        &self.orders[slot]
    }

    pub fn cancel_order(&mut self, id: OrderId) -> Result<&Order, RegistryError> {
        self.transition(id, Transition::Cancel)
    }

    pub fn complete_order(&mut self, id: OrderId) -> Result<&Order, RegistryError> {
        self.transition(id, Transition::Complete)
    }

    pub fn get_order(&self, id: OrderId) -> Result<&Order, RegistryError> {
        self.order_index
            .get(&id)
            .map(|&slot| &self.orders[slot])
            .ok_or(RegistryError::OrderNotFound(id))
    }

    /// Orders in creation order.
    pub fn list_orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn orders_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status == status).collect()
    }

    pub fn get_client(&self, id: ClientId) -> Result<&Client, RegistryError> {
        self.clients.get(&id).ok_or(RegistryError::ClientNotFound(id))
    }

    pub fn client_for_vertex(&self, vertex: VertexId) -> Option<&Client> {
        self.client_by_vertex
            .get(&vertex)
            .and_then(|id| self.clients.get(id))
    }

    /// Clients in id order.
    pub fn list_clients(&self) -> Vec<&Client> {
        self.clients.values().collect()
    }

    fn transition(&mut self, id: OrderId, action: Transition) -> Result<&Order, RegistryError> {
        let slot = *self
            .order_index
            .get(&id)
            .ok_or(RegistryError::OrderNotFound(id))?;
        let order = &mut self.orders[slot];
        order
            .apply(action, Utc::now())
            .map_err(|from| RegistryError::InvalidStateTransition { id, from, action })?;
        Ok(&self.orders[slot])
    }

    fn next_order_id(&mut self) -> OrderId {
        loop {
            let id = OrderId::from_random_bytes(self.id_rng.gen());
            if !self.order_index.contains_key(&id) {
                return id;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
