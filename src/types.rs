// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Gene Cascade Simulation Suite - Type Definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::InfluenceMode;

/// Gene name -> expression level.
pub type GeneLevels = BTreeMap<String, f64>;

// ─── Edge ───────────────────────────────────────────────────────────────────

/// Directed influence of `source` on `target`, applied once per step.
///
/// Negative weights model inhibition, magnitudes below 1.0 attenuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self { source: source.into(), target: target.into(), weight }
    }
}

impl From<(&str, &str, f64)> for Edge {
    fn from((source, target, weight): (&str, &str, f64)) -> Self {
        Self::new(source, target, weight)
    }
}

/// Collect `(source, target, weight)` tuples into edges.
pub fn edges_from<'a, I>(tuples: I) -> Vec<Edge>
where
    I: IntoIterator<Item = (&'a str, &'a str, f64)>,
{
    tuples.into_iter().map(Edge::from).collect()
}

// ─── Perturbation ───────────────────────────────────────────────────────────

/// An externally forced level for one gene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perturbation {
    pub source: String,
    pub level: f64,
}

impl Perturbation {
    pub fn new(source: impl Into<String>, level: f64) -> Self {
        Self { source: source.into(), level }
    }
}

// ─── Resolution ─────────────────────────────────────────────────────────────

/// How a gene's new level was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// The perturbed gene itself; its level is the forced level.
    Source,
    /// Found in the graph. An influence of 0.0 means no walk reached it.
    Resolved { influence: f64 },
    /// Not a vertex of the graph; level left at baseline.
    Unresolved,
}

impl Resolution {
    pub fn influence(&self) -> Option<f64> {
        match self {
            Self::Resolved { influence } => Some(*influence),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

// ─── InfluenceResult ────────────────────────────────────────────────────────

/// Outcome of propagating one perturbation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceResult {
    pub source: String,
    /// Forced level minus the source's baseline.
    pub shock: f64,
    pub max_depth: u32,
    pub mode: InfluenceMode,
    /// New level of every gene.
    pub levels: GeneLevels,
    pub resolutions: BTreeMap<String, Resolution>,
}

impl InfluenceResult {
    pub fn level(&self, gene: &str) -> Option<f64> {
        self.levels.get(gene).copied()
    }

    /// Influence factor of the source on `gene`, when it resolved.
    pub fn influence(&self, gene: &str) -> Option<f64> {
        self.resolutions.get(gene).and_then(Resolution::influence)
    }

    pub fn resolution(&self, gene: &str) -> Option<Resolution> {
        self.resolutions.get(gene).copied()
    }

    /// Genes whose level moved by more than `epsilon` relative to `baseline`.
    ///
    /// Genes absent from `baseline` are compared against 0.0.
    pub fn changed(&self, baseline: &GeneLevels, epsilon: f64) -> Vec<(&str, f64)> {
        self.levels
            .iter()
            .filter_map(|(gene, &level)| {
                let delta = level - baseline.get(gene).copied().unwrap_or(0.0);
                (delta.abs() > epsilon).then_some((gene.as_str(), delta))
            })
            .collect()
    }

    pub fn into_levels(self) -> GeneLevels {
        self.levels
    }
}
