// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Gene Cascade Simulation Suite

pub mod types;
pub mod config;
pub mod graph;
pub mod influence;
pub mod walk_sum;
pub mod engine;
pub mod network;

pub use types::*;
pub use config::{ConfigError, DuplicateEdgePolicy, EngineConfig, InfluenceMode, DEFAULT_MAX_DEPTH};
pub use graph::{GraphError, InfluenceGraph, VertexId};
pub use influence::{influence_factor, total_influence};
pub use engine::{compute_gene_effect, vertex_set, PerturbationEngine, PerturbationError};
pub use network::NetworkSpec;

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// A loaded network plus engine settings, driven from JavaScript.
#[wasm_bindgen]
pub struct CascadeModel {
    network: NetworkSpec,
    config: EngineConfig,
}

#[wasm_bindgen]
impl CascadeModel {
    /// `network` is a `{ edges, initial_levels }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(network: JsValue) -> Result<CascadeModel, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let network: NetworkSpec = serde_wasm_bindgen::from_value(network)?;
        Ok(Self { network, config: EngineConfig::default() })
    }

    /// Negative depths disable propagation.
    pub fn set_max_depth(&mut self, depth: i32) {
        self.config.max_depth = config::depth_from_signed(depth.into());
    }

    /// `"walk"` or `"matrix"`.
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.config.mode = mode.parse().map_err(|e: ConfigError| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    pub fn gene_count(&self) -> usize {
        vertex_set(&self.network.edges, &self.network.initial_levels).len()
    }

    /// Returns the serialized [`InfluenceResult`], or an error string.
    pub fn perturb(&self, source: &str, level: f64) -> Result<JsValue, JsValue> {
        let engine = PerturbationEngine::new(self.config.clone());
        let result = self
            .network
            .perturb(&engine, &Perturbation::new(source, level))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    /// Influence factor of `source` on `target`, or an error string when the
    /// network cannot be built or either gene is unknown.
    pub fn influence(&self, source: &str, target: &str) -> Result<f64, JsValue> {
        let engine = PerturbationEngine::new(self.config.clone());
        engine
            .build_graph(&self.network.edges, &self.network.initial_levels)
            .and_then(|graph| engine.influence_of(&graph, source, target))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
