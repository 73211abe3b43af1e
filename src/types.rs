// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Distance carried by a single edge.
pub type Weight = u32;

/// Accumulated distance along a path.
pub type Cost = u64;

// ─── VertexId ────────────────────────────────────────────────────────────────

/// Arena handle for a vertex. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// ─── Role ────────────────────────────────────────────────────────────────────

/// Role tag assigned to every vertex at generation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Warehouse; candidate order origin
    Storage = 0,
    /// Battery swap point; resets the autonomy budget
    Recharge = 1,
    /// Delivery destination
    Client = 2,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Storage, Role::Recharge, Role::Client];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Recharge => "recharge",
            Self::Client => "client",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── ClientId ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

// ─── OrderId ─────────────────────────────────────────────────────────────────

/// UUID-shaped order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Build a v4-layout id from caller-supplied random bytes, so seeded runs
    /// produce the same ids.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Order Status ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending = 0,   // created, awaiting delivery
    Delivered = 1, // TERMINAL: delivered, timestamped
    Cancelled = 2, // TERMINAL: cancelled before delivery
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_has_v4_layout() {
        let id = OrderId::from_random_bytes([7u8; 16]);
        assert_eq!(id.0.get_version_num(), 4);
        assert_eq!(OrderId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn role_names_parse_case_insensitively() {
        assert_eq!(Role::from_name("Recharge"), Some(Role::Recharge));
        assert_eq!(Role::from_name("client"), Some(Role::Client));
        assert_eq!(Role::from_name("depot"), None);
    }
}
