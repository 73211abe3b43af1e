// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - Route Value Object

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::types::VertexId;

/// One concrete traversal, plus how many times it has been used.
///
/// Equality is exact vertex-sequence equality; ordering compares the label
/// sequences lexicographically. Neither looks at `frequency`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    path: Vec<VertexId>,
    labels: Vec<String>,
    frequency: u64,
}

impl Route {
    /// Build a route, resolving labels from `graph`. Returns `None` for an
    /// empty path.
    pub fn from_path(graph: &Graph, path: &[VertexId]) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        Some(Self {
            path: path.to_vec(),
            labels: path.iter().map(|&v| graph.label(v).to_string()).collect(),
            frequency: 1,
        })
    }

    pub fn path(&self) -> &[VertexId] {
        &self.path
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn origin(&self) -> VertexId {
        self.path[0]
    }

    pub fn destination(&self) -> VertexId {
        self.path[self.path.len() - 1]
    }

    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    pub fn increment(&mut self) {
        self.frequency += 1;
    }

    /// `A → B → C` rendering used by reports.
    pub fn label(&self) -> String {
        self.labels.join(" → ")
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Route {}

impl Ord for Route {
    fn cmp(&self, other: &Self) -> Ordering {
        self.labels
            .cmp(&other.labels)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for Route {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.label(), self.frequency)
    }
}
