// Monte Carlo Infrastructure — N runs per scenario with statistical aggregation
// Each run draws a fresh network from seed base+i, evaluates it in both modes and compares

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use gene_cascade::*;

use crate::report::*;
use crate::scenarios::{Scenario, DIVERGENCE_RATIO};
use crate::topology::{generate, gene};

use std::time::Instant;

fn source_gene(scenario: &Scenario) -> String {
    match scenario.topology {
        crate::topology::Topology::Example => "1".to_string(),
        _ => gene(0),
    }
}

fn max_abs_influence(result: &InfluenceResult) -> f64 {
    result
        .resolutions
        .values()
        .filter_map(Resolution::influence)
        .map(f64::abs)
        .fold(0.0, f64::max)
}

/// Run a single scenario iteration with a specific seed.
pub fn run_single(scenario: &Scenario, seed: u64) -> Result<BenchResult, PerturbationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let network = generate(scenario.topology, scenario.genes, &mut rng);
    let source = source_gene(scenario);
    let baseline = network.initial_levels.get(&source).copied().unwrap_or(0.0);
    let perturbation = Perturbation::new(source, baseline + scenario.shock);

    let walk_config = EngineConfig::default().with_max_depth(scenario.max_depth);
    let matrix_config = walk_config.clone().with_mode(InfluenceMode::MatrixPower);

    let start = Instant::now();
    let walk = network.perturb(&PerturbationEngine::new(walk_config), &perturbation)?;
    let walk_elapsed_us = start.elapsed().as_secs_f64() * 1e6;

    let start = Instant::now();
    let matrix = network.perturb(&PerturbationEngine::new(matrix_config.clone()), &perturbation)?;
    let matrix_elapsed_us = start.elapsed().as_secs_f64() * 1e6;

    // Doubling the depth is only affordable in matrix mode.
    let deeper = network.perturb(
        &PerturbationEngine::new(matrix_config.with_max_depth(scenario.max_depth.saturating_mul(2))),
        &perturbation,
    )?;

    let mode_divergence = walk
        .levels
        .iter()
        .map(|(g, &w)| {
            let m = matrix.level(g).unwrap_or(f64::NAN);
            (w - m).abs() / w.abs().max(1.0)
        })
        .fold(0.0, f64::max);

    let max_abs_change = walk
        .changed(&network.initial_levels, 0.0)
        .iter()
        .map(|(_, d)| d.abs())
        .fold(0.0, f64::max);

    let shallow_peak = max_abs_influence(&matrix);
    let growth_ratio = if shallow_peak > 0.0 {
        max_abs_influence(&deeper) / shallow_peak
    } else {
        1.0
    };
    let diverging = growth_ratio >= DIVERGENCE_RATIO;

    let mut pass = mode_divergence <= scenario.criteria.max_mode_divergence;
    if let Some(expect_growth) = scenario.criteria.expect_growth {
        if diverging != expect_growth {
            pass = false;
        }
    }

    let graph_edges = walk_edges(&network);
    Ok(BenchResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        seed,
        pass,
        genes: walk.levels.len(),
        edges: graph_edges,
        max_depth: scenario.max_depth,
        mode_divergence,
        max_abs_change,
        growth_ratio,
        diverging,
        walk_elapsed_us,
        matrix_elapsed_us,
        speedup: walk_elapsed_us / matrix_elapsed_us.max(1e-3),
    })
}

fn walk_edges(network: &NetworkSpec) -> usize {
    let names = vertex_set(&network.edges, &network.initial_levels);
    InfluenceGraph::build(&network.edges, &names)
        .map(|g| g.edge_count())
        .unwrap_or(network.edges.len())
}

/// Run Monte Carlo: N runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
) -> Result<MonteCarloReport, PerturbationError> {
    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        results.push(run_single(scenario, seed)?);
    }
    Ok(aggregate(scenario, results))
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate: if n > 0 { passed as f64 / n as f64 } else { 0.0 },
        mode_divergence: Stats::of(&results, |r| r.mode_divergence),
        max_abs_change: Stats::of(&results, |r| r.max_abs_change),
        growth_ratio: Stats::of(&results, |r| r.growth_ratio),
        walk_elapsed_us: Stats::of(&results, |r| r.walk_elapsed_us),
        matrix_elapsed_us: Stats::of(&results, |r| r.matrix_elapsed_us),
        speedup: Stats::of(&results, |r| r.speedup),
        individual_runs: results,
    }
}
