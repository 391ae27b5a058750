// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Depth-bounded walk-influence accumulator.
//!
//! Sums, over every directed walk from `current` to `target` whose length fits
//! in the remaining depth, the product of edge weights along the walk. Walks
//! are not simple paths: vertices and edges repeat, and a walk that reaches the
//! target keeps going, so the target can be counted again via longer walks.
//!
//! From depth 1 this equals `(W + W^2 + ... + W^max_depth)[current, target]`.
//! On a graph whose reachable cycles have a weight product of magnitude >= 1
//! the sum grows without bound as `max_depth` grows; that growth is returned
//! to the caller as-is.
//!
//! There is no memoization and no visited set. Cost is up to
//! `branching^max_depth` calls; see [`crate::walk_sum`] for the iterative form.

use crate::graph::{InfluenceGraph, VertexId};

/// Total influence of `current` on `target`, with `current_product` already
/// accumulated on the way to `current` and the next edge taken at
/// `current_depth`.
///
/// Returns 0.0 once `current_depth > max_depth`, so `max_depth = 0` yields 0.0
/// for every pair.
pub fn total_influence(
    graph: &InfluenceGraph,
    current: VertexId,
    target: VertexId,
    current_product: f64,
    max_depth: u32,
    current_depth: u32,
) -> f64 {
    if current_depth > max_depth {
        return 0.0;
    }

    // past u32::MAX the bound is exhausted anyway
    let next_depth = current_depth.checked_add(1);

    let mut total = 0.0;
    for &(neighbor, weight) in graph.successors(current) {
        let product = current_product * weight;
        if neighbor == target {
            total += product;
        }
        if let Some(next) = next_depth {
            total += total_influence(graph, neighbor, target, product, max_depth, next);
        }
    }
    total
}

/// Influence factor of `source` on `target` over walks of length `1..=max_depth`.
pub fn influence_factor(
    graph: &InfluenceGraph,
    source: VertexId,
    target: VertexId,
    max_depth: u32,
) -> f64 {
    total_influence(graph, source, target, 1.0, max_depth, 1)
}
