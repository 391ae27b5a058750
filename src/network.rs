// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Gene Cascade Simulation Suite - Network Input

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{read_file, ConfigError};
use crate::engine::{PerturbationEngine, PerturbationError};
use crate::types::{edges_from, Edge, GeneLevels, InfluenceResult, Perturbation};

/// A network as loaded from JSON: edges plus baseline levels.
///
/// ```json
/// { "edges": [{ "source": "1", "target": "4", "weight": 1.0 }],
///   "initial_levels": { "1": 1.0, "4": 1.0 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub initial_levels: GeneLevels,
}

impl NetworkSpec {
    pub fn new(edges: Vec<Edge>, initial_levels: GeneLevels) -> Self {
        Self { edges, initial_levels }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read_file(path.as_ref())?)
    }

    /// Eight-gene regulatory network with a damped 3 <-> 4 feedback loop
    /// (loop gain 0.24) and every baseline at 1.0. Gene 2 feeds gene 4 but
    /// nothing reaches gene 2.
    pub fn example() -> Self {
        let edges = edges_from([
            ("1", "4", 1.0),
            ("1", "5", 0.6),
            ("1", "6", 0.7),
            ("2", "4", 1.0),
            ("3", "4", 0.4),
            ("4", "3", 0.6),
            ("4", "8", 0.3),
            ("5", "6", 1.0),
            ("6", "7", 0.8),
        ]);
        let initial_levels = (1..=8).map(|g| (g.to_string(), 1.0)).collect();
        Self { edges, initial_levels }
    }

    /// Propagate `perturbation` through this network.
    pub fn perturb(
        &self,
        engine: &PerturbationEngine,
        perturbation: &Perturbation,
    ) -> Result<InfluenceResult, PerturbationError> {
        engine.run(&self.edges, &self.initial_levels, perturbation)
    }
}
