// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Directed weighted influence graph.
//!
//! A minimal adjacency list over named vertices. Built once per engine call,
//! read-only afterwards. Only name resolution and successor enumeration are
//! offered; nothing here walks the graph.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::DuplicateEdgePolicy;
use crate::types::Edge;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from graph construction and name resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("edge {from} -> {to} references unknown vertex {missing:?}")]
    Construction {
        from: String,
        to: String,
        missing: String,
    },
    #[error("vertex {name:?} not found in graph")]
    NotFound { name: String },
    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge { from: String, to: String },
}

// ---------------------------------------------------------------------------
// VertexId
// ---------------------------------------------------------------------------

/// Dense vertex handle, valid only for the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// InfluenceGraph
// ---------------------------------------------------------------------------

/// Adjacency-list graph: vertex index -> list of (neighbor, weight).
#[derive(Debug, Clone, Default)]
pub struct InfluenceGraph {
    names: Vec<String>,
    index: HashMap<String, VertexId>,
    adjacency: Vec<Vec<(VertexId, f64)>>,
    edge_count: usize,
}

impl InfluenceGraph {
    /// Build with the default duplicate-edge policy ([`DuplicateEdgePolicy::Sum`]).
    pub fn build<S: AsRef<str>>(edges: &[Edge], vertex_names: &[S]) -> Result<Self, GraphError> {
        Self::build_with_policy(edges, vertex_names, DuplicateEdgePolicy::default())
    }

    /// Build over `vertex_names`, resolving every edge endpoint against them.
    ///
    /// Vertex ids follow the order of `vertex_names`; a repeated name keeps its
    /// first id. Successor lists follow edge insertion order.
    pub fn build_with_policy<S: AsRef<str>>(
        edges: &[Edge],
        vertex_names: &[S],
        policy: DuplicateEdgePolicy,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::default();
        for name in vertex_names {
            graph.ensure_vertex(name.as_ref());
        }

        for edge in edges {
            let from = graph.resolve_endpoint(edge, &edge.source)?;
            let to = graph.resolve_endpoint(edge, &edge.target)?;
            graph.insert_edge(edge, from, to, policy)?;
        }

        trace!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count,
            ?policy,
            "built influence graph"
        );
        Ok(graph)
    }

    fn ensure_vertex(&mut self, name: &str) -> VertexId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = VertexId(self.names.len());
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    fn resolve_endpoint(&self, edge: &Edge, name: &str) -> Result<VertexId, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::Construction {
                from: edge.source.clone(),
                to: edge.target.clone(),
                missing: name.to_string(),
            })
    }

    fn insert_edge(
        &mut self,
        edge: &Edge,
        from: VertexId,
        to: VertexId,
        policy: DuplicateEdgePolicy,
    ) -> Result<(), GraphError> {
        let out = &mut self.adjacency[from.0];
        match out.iter_mut().find(|(n, _)| *n == to) {
            None => {
                out.push((to, edge.weight));
                self.edge_count += 1;
            }
            Some((_, weight)) => match policy {
                DuplicateEdgePolicy::Sum => *weight += edge.weight,
                DuplicateEdgePolicy::Overwrite => *weight = edge.weight,
                DuplicateEdgePolicy::Reject => {
                    return Err(GraphError::DuplicateEdge {
                        from: edge.source.clone(),
                        to: edge.target.clone(),
                    });
                }
            },
        }
        Ok(())
    }

    /// Resolve a vertex name.
    pub fn lookup(&self, name: &str) -> Result<VertexId, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::NotFound { name: name.to_string() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Outgoing edges of `vertex`, in edge insertion order.
    ///
    /// A handle from another graph that is out of range has no successors.
    pub fn successors(&self, vertex: VertexId) -> &[(VertexId, f64)] {
        self.adjacency.get(vertex.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn name(&self, vertex: VertexId) -> Option<&str> {
        self.names.get(vertex.0).map(String::as_str)
    }

    /// Vertex names in id order.
    pub fn vertex_names(&self) -> &[String] {
        &self.names
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    /// Number of distinct ordered (source, target) pairs.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
