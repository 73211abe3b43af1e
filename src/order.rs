// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Order

//! Delivery order record and its status transitions.
//!
//! Born `Pending`, dies `Delivered` or `Cancelled`. Transitions are only
//! reachable through the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ClientId, Cost, OrderId, OrderStatus, VertexId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub client_id: ClientId,
    pub origin: VertexId,
    pub destination: VertexId,
    pub path: Vec<VertexId>,
    pub cost: Cost,
    pub priority: u8,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Status change requested on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Cancel,
    Complete,
}

impl Transition {
    pub fn target(&self) -> OrderStatus {
        match self {
            Self::Cancel => OrderStatus::Cancelled,
            Self::Complete => OrderStatus::Delivered,
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        })
    }
}

impl Order {
    /// Apply `transition` if the order is still pending. On refusal, returns
    /// the status that blocked it.
    pub(crate) fn apply(&mut self, transition: Transition, now: DateTime<Utc>) -> Result<(), OrderStatus> {
        if self.status != OrderStatus::Pending {
            return Err(self.status);
        }
        self.status = transition.target();
        if transition == Transition::Complete {
            self.delivered_at = Some(now);
        }
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Number of hops along the delivery path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}
