// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Perturbation propagation.
//!
//! Forces one gene to a new level and predicts every other gene's level as
//! `baseline + shock * influence`, where `shock` is the forced change of the
//! source and `influence` the depth-bounded walk sum from source to target.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::config::{EngineConfig, InfluenceMode};
use crate::graph::{GraphError, InfluenceGraph, VertexId};
use crate::influence::influence_factor;
use crate::types::{Edge, GeneLevels, InfluenceResult, Perturbation, Resolution};
use crate::walk_sum::influence_row;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by [`PerturbationEngine`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PerturbationError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("perturbed gene {name:?} is not part of the network")]
    UnknownSource { name: String },
}

// ---------------------------------------------------------------------------
// Vertex set
// ---------------------------------------------------------------------------

/// Union of every gene with a baseline level and every edge endpoint, sorted.
pub fn vertex_set(edges: &[Edge], initial_levels: &GeneLevels) -> Vec<String> {
    let mut names: BTreeSet<&str> = initial_levels.keys().map(String::as_str).collect();
    for edge in edges {
        names.insert(&edge.source);
        names.insert(&edge.target);
    }
    names.into_iter().map(str::to_string).collect()
}

// ---------------------------------------------------------------------------
// PerturbationEngine
// ---------------------------------------------------------------------------

/// Builds a fresh graph per call and propagates a perturbation through it.
#[derive(Debug, Clone, Default)]
pub struct PerturbationEngine {
    config: EngineConfig,
}

impl PerturbationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the network from `edges` and `initial_levels` and propagate.
    ///
    /// With the default configuration this cannot fail: the vertex set is
    /// derived from the same edges, and an unknown source only defaults its
    /// baseline to 0.0.
    pub fn run(
        &self,
        edges: &[Edge],
        initial_levels: &GeneLevels,
        perturbation: &Perturbation,
    ) -> Result<InfluenceResult, PerturbationError> {
        let graph = self.build_graph(edges, initial_levels)?;
        self.propagate_on(&graph, initial_levels, perturbation)
    }

    /// Graph over [`vertex_set`], honoring the configured duplicate-edge policy.
    pub fn build_graph(
        &self,
        edges: &[Edge],
        initial_levels: &GeneLevels,
    ) -> Result<InfluenceGraph, PerturbationError> {
        let names = vertex_set(edges, initial_levels);
        Ok(InfluenceGraph::build_with_policy(edges, &names, self.config.duplicate_edges)?)
    }

    /// Influence factor of `source` on `target` in the configured mode.
    ///
    /// Both names must be vertices of `graph`.
    pub fn influence_of(
        &self,
        graph: &InfluenceGraph,
        source: &str,
        target: &str,
    ) -> Result<f64, PerturbationError> {
        let (s, t) = (graph.lookup(source)?, graph.lookup(target)?);
        Ok(Influence::from_source(graph, Some(s), &self.config).on(t))
    }

    /// Propagate over an already built graph.
    ///
    /// Genes in `initial_levels` that the graph does not know are reported as
    /// [`Resolution::Unresolved`] and keep their baseline.
    pub fn propagate_on(
        &self,
        graph: &InfluenceGraph,
        initial_levels: &GeneLevels,
        perturbation: &Perturbation,
    ) -> Result<InfluenceResult, PerturbationError> {
        let max_depth = self.config.max_depth;
        let source_name = perturbation.source.as_str();
        let baseline = |gene: &str| initial_levels.get(gene).copied().unwrap_or(0.0);

        let source = match graph.lookup(source_name) {
            Ok(id) => Some(id),
            Err(_) if self.config.strict_source => {
                return Err(PerturbationError::UnknownSource {
                    name: source_name.to_string(),
                });
            }
            Err(_) => {
                warn!(source = source_name, "perturbed gene not in network, nothing propagates");
                None
            }
        };

        let shock = perturbation.level - baseline(source_name);
        debug!(
            source = source_name,
            shock,
            max_depth,
            mode = %self.config.mode,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "propagating perturbation"
        );

        let influences = Influence::from_source(graph, source, &self.config);

        let mut levels = initial_levels.clone();
        levels.insert(source_name.to_string(), perturbation.level);
        let mut resolutions = BTreeMap::new();
        resolutions.insert(source_name.to_string(), Resolution::Source);

        let targets: BTreeSet<&str> = initial_levels
            .keys()
            .map(String::as_str)
            .chain(graph.vertex_names().iter().map(String::as_str))
            .filter(|&name| name != source_name)
            .collect();

        let mut unresolved = 0usize;
        for name in targets {
            let target = match graph.lookup(name) {
                Ok(id) => id,
                Err(_) => {
                    debug!(gene = name, "gene not in graph, keeping baseline");
                    resolutions.insert(name.to_string(), Resolution::Unresolved);
                    unresolved += 1;
                    continue;
                }
            };
            let influence = influences.on(target);
            levels.insert(name.to_string(), baseline(name) + shock * influence);
            resolutions.insert(name.to_string(), Resolution::Resolved { influence });
        }

        debug!(genes = levels.len(), unresolved, "perturbation propagated");
        Ok(InfluenceResult {
            source: source_name.to_string(),
            shock,
            max_depth,
            mode: self.config.mode,
            levels,
            resolutions,
        })
    }
}

/// Influence of one source vertex, evaluated per target in the configured mode.
enum Influence<'g> {
    /// Source is not a vertex: nothing propagates.
    Unreachable,
    Walk { graph: &'g InfluenceGraph, source: VertexId, max_depth: u32 },
    /// Whole row computed once by matrix power.
    Row(Vec<f64>),
}

impl<'g> Influence<'g> {
    fn from_source(graph: &'g InfluenceGraph, source: Option<VertexId>, config: &EngineConfig) -> Self {
        let max_depth = config.max_depth;
        match (config.mode, source) {
            (_, None) => Self::Unreachable,
            (InfluenceMode::WalkEnumeration, Some(source)) => Self::Walk { graph, source, max_depth },
            (InfluenceMode::MatrixPower, Some(source)) => Self::Row(influence_row(graph, source, max_depth)),
        }
    }

    fn on(&self, target: VertexId) -> f64 {
        match self {
            Self::Unreachable => 0.0,
            Self::Walk { graph, source, max_depth } => influence_factor(graph, *source, target, *max_depth),
            Self::Row(row) => row.get(target.index()).copied().unwrap_or(0.0),
        }
    }
}

/// Predict every gene's level after forcing `source_gene` to `modified_level`.
///
/// Uses walk enumeration with walks of up to `max_depth` edges
/// ([`crate::DEFAULT_MAX_DEPTH`] is the conventional choice).
pub fn compute_gene_effect(
    edges: &[Edge],
    initial_levels: &GeneLevels,
    source_gene: &str,
    modified_level: f64,
    max_depth: u32,
) -> Result<GeneLevels, PerturbationError> {
    let engine = PerturbationEngine::new(EngineConfig::default().with_max_depth(max_depth));
    let result = engine.run(edges, initial_levels, &Perturbation::new(source_gene, modified_level))?;
    Ok(result.into_levels())
}
