// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Iterative walk sums (matrix-power formulation).
//!
//! Computes the same quantity as [`crate::influence::total_influence`] started
//! at depth 1, one walk length at a time: `x_1 = e_s W`, `x_{k+1} = x_k W`, and
//! the influence row is `x_1 + ... + x_d`. Cost is `O(max_depth * edges)` for
//! every target at once, instead of one exponential enumeration per target.
//!
//! Summation order differs from the recursive form, so results agree to
//! floating-point tolerance, not bit for bit.

use crate::graph::{InfluenceGraph, VertexId};

/// One propagation step: `next = current * W`.
fn step(graph: &InfluenceGraph, current: &[f64], next: &mut [f64]) {
    next.iter_mut().for_each(|x| *x = 0.0);
    for (u, &mass) in current.iter().enumerate() {
        if mass == 0.0 {
            continue;
        }
        for &(v, weight) in graph.successors(VertexId(u)) {
            next[v.index()] += mass * weight;
        }
    }
}

/// Calls `visit(k, x_k)` for each walk length `k` in `1..=max_depth`, where
/// `x_k[v]` is the weighted sum of length-`k` walks from `source` to `v`.
fn for_each_length<F>(graph: &InfluenceGraph, source: VertexId, max_depth: u32, mut visit: F)
where
    F: FnMut(u32, &[f64]),
{
    let n = graph.vertex_count();
    if source.index() >= n {
        return;
    }
    let mut current = vec![0.0; n];
    let mut next = vec![0.0; n];
    current[source.index()] = 1.0;

    for k in 1..=max_depth {
        step(graph, &current, &mut next);
        std::mem::swap(&mut current, &mut next);
        visit(k, &current);
        // no remaining walks: every longer length contributes zero
        if current.iter().all(|&x| x == 0.0) {
            break;
        }
    }
}

/// Influence factor of `source` on every vertex, indexed by [`VertexId`].
///
/// `row[t]` equals `influence_factor(graph, source, t, max_depth)`.
pub fn influence_row(graph: &InfluenceGraph, source: VertexId, max_depth: u32) -> Vec<f64> {
    let mut row = vec![0.0; graph.vertex_count()];
    for_each_length(graph, source, max_depth, |_, x| {
        row.iter_mut().zip(x).for_each(|(acc, v)| *acc += v);
    });
    row
}

/// Contribution of each walk length `1..=max_depth` to the influence of
/// `source` on `target`. Entry `k - 1` holds the length-`k` walk sum.
///
/// Ends at the first length with no walks left from `source`; every longer
/// length contributes zero. Shows whether a cycle is damping (entries shrink)
/// or amplifying (entries hold or grow) as depth increases.
pub fn depth_profile(
    graph: &InfluenceGraph,
    source: VertexId,
    target: VertexId,
    max_depth: u32,
) -> Vec<f64> {
    let mut profile = Vec::new();
    if target.index() >= graph.vertex_count() {
        return profile;
    }
    for_each_length(graph, source, max_depth, |_, x| {
        profile.push(x[target.index()]);
    });
    profile
}
