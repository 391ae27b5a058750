// Scenario Definitions — topology × depth combinations for mode comparison
// Loop-gain scenarios check that divergence stays visible and damping stays bounded

use crate::topology::Topology;

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub genes: usize,
    pub max_depth: u32,
    pub topology: Topology,
    /// Perturbation applied to the source: forced level = baseline + shock.
    pub shock: f64,
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    /// Tolerated relative disagreement between the two evaluation modes.
    pub max_mode_divergence: f64,
    /// `Some(true)`: influence must keep growing with depth (loop gain >= 1).
    /// `Some(false)`: influence must settle (loop gain < 1).
    pub expect_growth: Option<bool>,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            max_mode_divergence: 1e-9,
            expect_growth: None,
        }
    }
}

/// Doubling the depth must grow the largest influence by at least this factor
/// to count as diverging. A unit-gain loop roughly doubles it.
pub const DIVERGENCE_RATIO: f64 = 1.5;

// ─── Scenario List ──────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        // ─── Reference (2) ──────────────────────────────────────────────
        Scenario { name: "REF_EXAMPLE_SHORT", label: "Ref: 8-Gene Network d=2", category: "reference",
            genes: 8, max_depth: 2, topology: Topology::Example, shock: 0.5,
            criteria: PassCriteria::default() },
        Scenario { name: "REF_EXAMPLE_LONG", label: "Ref: 8-Gene Network d=100", category: "reference",
            genes: 8, max_depth: 100, topology: Topology::Example, shock: 0.5,
            criteria: PassCriteria { expect_growth: Some(false), ..Default::default() } },

        // ─── Acyclic (2) ────────────────────────────────────────────────
        Scenario { name: "DAG_CHAIN", label: "DAG: Chain 30 (w=0.9)", category: "acyclic",
            genes: 30, max_depth: 40, topology: Topology::Chain { weight: 0.9 }, shock: 1.0,
            criteria: PassCriteria::default() },
        Scenario { name: "DAG_FEEDFORWARD", label: "DAG: Feed-Forward 14 (k=2, ±1)", category: "acyclic",
            genes: 14, max_depth: 8, topology: Topology::FeedForward { out_degree: 2, lo: -1.0, hi: 1.0 }, shock: 1.0,
            criteria: PassCriteria::default() },

        // ─── Cyclic (3) ─────────────────────────────────────────────────
        Scenario { name: "CYC_DAMPED_SPARSE", label: "Cyclic: Damped Sparse 12 (k=2)", category: "cyclic",
            genes: 12, max_depth: 10, topology: Topology::RandomCyclic { out_degree: 2, scale: 0.4 }, shock: 0.5,
            criteria: PassCriteria::default() },
        Scenario { name: "CYC_DENSE", label: "Cyclic: Dense 10 (k=3)", category: "cyclic",
            genes: 10, max_depth: 9, topology: Topology::RandomCyclic { out_degree: 3, scale: 0.3 }, shock: 0.5,
            criteria: PassCriteria::default() },
        Scenario { name: "CYC_DAMPED_RING", label: "Cyclic: Ring 6 (gain 0.5)", category: "cyclic",
            genes: 6, max_depth: 60, topology: Topology::Ring { gain: 0.5 }, shock: 1.0,
            criteria: PassCriteria { expect_growth: Some(false), ..Default::default() } },

        // ─── Loop Gain ≥ 1 (2) ──────────────────────────────────────────
        Scenario { name: "GAIN_UNIT_RING", label: "Gain: Ring 5 (gain 1.0)", category: "loop-gain",
            genes: 5, max_depth: 50, topology: Topology::Ring { gain: 1.0 }, shock: 1.0,
            criteria: PassCriteria { expect_growth: Some(true), ..Default::default() } },
        Scenario { name: "GAIN_AMPLIFYING_RING", label: "Gain: Ring 4 (gain 1.5)", category: "loop-gain",
            genes: 4, max_depth: 40, topology: Topology::Ring { gain: 1.5 }, shock: 1.0,
            criteria: PassCriteria { expect_growth: Some(true), ..Default::default() } },
    ]
}
