// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Engine configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a usable configuration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Walk length bound used when the caller does not pick one.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading configuration or network files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown influence mode {0:?} (expected \"walk\" or \"matrix\")")]
    UnknownMode(String),
}

pub(crate) fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// InfluenceMode
// ---------------------------------------------------------------------------

/// How influence factors are evaluated.
///
/// Both modes compute the same walk sum. `WalkEnumeration` recurses over every
/// walk and costs up to `branching^depth` per target; `MatrixPower` propagates
/// a row vector one step at a time and costs `depth * edges` per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfluenceMode {
    #[default]
    #[serde(alias = "walk")]
    WalkEnumeration,
    #[serde(alias = "matrix")]
    MatrixPower,
}

impl InfluenceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WalkEnumeration => "walk",
            Self::MatrixPower => "matrix",
        }
    }
}

impl fmt::Display for InfluenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfluenceMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walk" | "walk_enumeration" => Ok(Self::WalkEnumeration),
            "matrix" | "matrix_power" => Ok(Self::MatrixPower),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// DuplicateEdgePolicy
// ---------------------------------------------------------------------------

/// What graph construction does with a second edge over the same ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdgePolicy {
    /// Collapse into one edge carrying the summed weight.
    #[default]
    Sum,
    /// Last occurrence wins.
    Overwrite,
    /// Fail construction.
    Reject,
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Configuration for [`crate::PerturbationEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest walk (in edges) that contributes to an influence factor.
    pub max_depth: u32,
    pub mode: InfluenceMode,
    pub duplicate_edges: DuplicateEdgePolicy,
    /// Fail with `UnknownSource` when the perturbed gene is not in the network,
    /// instead of treating its baseline as 0.0.
    pub strict_source: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            mode: InfluenceMode::default(),
            duplicate_edges: DuplicateEdgePolicy::default(),
            strict_source: false,
        }
    }
}

impl EngineConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_mode(mut self, mode: InfluenceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_duplicate_edges(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicate_edges = policy;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict_source = true;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read_file(path.as_ref())?)
    }
}

/// Clamp a signed depth from an untyped surface (JS, CLI) to a walk bound.
///
/// Negative depths mean "no propagation".
pub fn depth_from_signed(depth: i64) -> u32 {
    u32::try_from(depth.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.max_depth, 5);
        assert_eq!(c.mode, InfluenceMode::WalkEnumeration);
        assert_eq!(c.duplicate_edges, DuplicateEdgePolicy::Sum);
        assert!(!c.strict_source);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = EngineConfig::from_json_str(r#"{ "max_depth": 12, "mode": "matrix" }"#).unwrap();
        assert_eq!(c.max_depth, 12);
        assert_eq!(c.mode, InfluenceMode::MatrixPower);
        assert_eq!(c.duplicate_edges, DuplicateEdgePolicy::Sum);

        let empty = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, EngineConfig::default());
    }

    #[test]
    fn full_json() {
        let c = EngineConfig::from_json_str(
            r#"{ "max_depth": 3, "mode": "walk_enumeration", "duplicate_edges": "reject", "strict_source": true }"#,
        )
        .unwrap();
        assert_eq!(
            c,
            EngineConfig::default()
                .with_max_depth(3)
                .with_duplicate_edges(DuplicateEdgePolicy::Reject)
                .strict()
        );
    }

    #[test]
    fn negative_depth_is_rejected_by_json() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "max_depth": -1 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn mode_from_str() {
        assert_eq!("walk".parse::<InfluenceMode>().unwrap(), InfluenceMode::WalkEnumeration);
        assert_eq!("MATRIX".parse::<InfluenceMode>().unwrap(), InfluenceMode::MatrixPower);
        assert!(matches!(
            "bfs".parse::<InfluenceMode>(),
            Err(ConfigError::UnknownMode(_))
        ));
        assert_eq!(InfluenceMode::MatrixPower.to_string(), "matrix");
    }

    #[test]
    fn signed_depth_clamps() {
        assert_eq!(depth_from_signed(-7), 0);
        assert_eq!(depth_from_signed(0), 0);
        assert_eq!(depth_from_signed(4), 4);
        assert_eq!(depth_from_signed(i64::MAX), u32::MAX);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/gene-cascade.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
