// Seeded Network Generators — reproducible topologies for mode comparison
// Every generator draws from the caller's ChaCha8Rng, so seed N always yields the same network

use gene_cascade::{Edge, GeneLevels, NetworkSpec};
use rand::seq::index::sample;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

// ─── Topology Kinds ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Topology {
    /// The built-in 8-gene network; the seed is unused.
    Example,
    /// g0 -> g1 -> ... -> g(n-1), every edge the same weight.
    Chain { weight: f64 },
    /// Acyclic: each gene links to `out_degree` later genes, weights in [lo, hi].
    FeedForward { out_degree: usize, lo: f64, hi: f64 },
    /// Each gene links to `out_degree` random other genes, weights in [0, scale].
    RandomCyclic { out_degree: usize, scale: f64 },
    /// Single ring whose (positive) loop gain is exactly `gain`.
    Ring { gain: f64 },
}

pub fn gene(i: usize) -> String {
    format!("g{}", i)
}

// ─── Generators ─────────────────────────────────────────────────────────────

pub fn generate(topology: Topology, genes: usize, rng: &mut ChaCha8Rng) -> NetworkSpec {
    let edges = match topology {
        Topology::Example => return NetworkSpec::example(),
        Topology::Chain { weight } => (1..genes)
            .map(|i| Edge::new(gene(i - 1), gene(i), weight))
            .collect(),
        Topology::FeedForward { out_degree, lo, hi } => {
            let mut edges = Vec::new();
            for i in 0..genes {
                let later = genes - i - 1;
                if later == 0 {
                    continue;
                }
                for j in sample(rng, later, out_degree.min(later)).iter() {
                    edges.push(Edge::new(gene(i), gene(i + 1 + j), rng.gen_range(lo..=hi)));
                }
            }
            edges
        }
        Topology::RandomCyclic { out_degree, scale } => {
            let mut edges = Vec::new();
            for i in 0..genes {
                let others = genes.saturating_sub(1);
                for j in sample(rng, others, out_degree.min(others)).iter() {
                    // skip over self
                    let t = if j >= i { j + 1 } else { j };
                    edges.push(Edge::new(gene(i), gene(t), rng.gen_range(0.0..=scale)));
                }
            }
            edges
        }
        Topology::Ring { gain } => {
            let per_edge = gain.powf(1.0 / genes as f64);
            (0..genes)
                .map(|i| Edge::new(gene(i), gene((i + 1) % genes), per_edge))
                .collect()
        }
    };

    let initial_levels: GeneLevels = (0..genes)
        .map(|i| (gene(i), rng.gen_range(0.5..=1.5)))
        .collect();
    NetworkSpec::new(edges, initial_levels)
}
