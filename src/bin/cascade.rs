// Gene Cascade Runner — short-term vs long-term perturbation response
//
// Usage:
//   cargo run --bin cascade                                  # Built-in 8-gene network, depths 2 and 100
//   cargo run --bin cascade -- --network net.json --source TP53 --level 2.0
//   cargo run --bin cascade -- --depth 5 --depth 50 --mode matrix
//   cargo run --bin cascade -- --profile 4                   # Per-walk-length contributions to gene 4
//   cargo run --bin cascade -- --config engine.json --json   # JSON results on stdout
//
// Logging: GENE_CASCADE_LOG=debug

use std::cmp::Ordering;

use gene_cascade::walk_sum::depth_profile;
use gene_cascade::*;
use tracing_subscriber::EnvFilter;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    network: Option<String>,
    config: Option<String>,
    source: String,
    level: f64,
    depths: Vec<u32>,
    mode: Option<InfluenceMode>,
    profile: Option<String>,
    json: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        network: None,
        config: None,
        source: "1".to_string(),
        level: 1.5,
        depths: Vec::new(),
        mode: None,
        profile: None,
        json: false,
    };

    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--network", Some(v)) => { cli.network = Some(v.clone()); i += 1; }
            ("--config", Some(v)) => { cli.config = Some(v.clone()); i += 1; }
            ("--source", Some(v)) => { cli.source = v.clone(); i += 1; }
            ("--level", Some(v)) => {
                match v.parse() {
                    Ok(x) => cli.level = x,
                    Err(_) => eprintln!("Ignoring invalid level: {}", v),
                }
                i += 1;
            }
            ("--depth", Some(v)) => {
                match v.parse::<i64>() {
                    Ok(d) => cli.depths.push(config::depth_from_signed(d)),
                    Err(_) => eprintln!("Ignoring invalid depth: {}", v),
                }
                i += 1;
            }
            ("--mode", Some(v)) => {
                match v.parse() {
                    Ok(m) => cli.mode = Some(m),
                    Err(e) => eprintln!("{}", e),
                }
                i += 1;
            }
            ("--profile", Some(v)) => { cli.profile = Some(v.clone()); i += 1; }
            ("--json", _) => cli.json = true,
            (arg, _) => eprintln!("Unknown argument: {}", arg),
        }
        i += 1;
    }

    if cli.depths.is_empty() {
        cli.depths = vec![2, 100];
    }
    cli
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GENE_CASCADE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Numeric gene names sort numerically, everything else lexically after them.
fn display_order(levels: &GeneLevels) -> Vec<&str> {
    let mut genes: Vec<&str> = levels.keys().map(String::as_str).collect();
    genes.sort_by(|a, b| match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
    genes
}

fn print_table(result: &InfluenceResult, baseline: &GeneLevels) {
    let title = if result.max_depth <= 5 { "Short-Term Response" } else { "Long-Term/Steady-State" };
    println!("--- Simulation ({}, Depth={}, Mode={}) ---", title, result.max_depth, result.mode);
    println!("{:<7} {:>8} {:>10} {:>12}", "Gene", "Initial", "New Level", "Change (ΔE)");
    println!("{}", "-".repeat(40));
    for gene in display_order(&result.levels) {
        let initial = baseline.get(gene).copied().unwrap_or(0.0);
        let new = result.levels[gene];
        println!("{:<7} {:>8.2} {:>10.2} {:>+12.2}", gene, initial, new, new - initial);
    }
    println!();
}

fn print_profile(network: &NetworkSpec, engine: &PerturbationEngine, source: &str, target: &str) -> Result<(), GraphError> {
    let names = vertex_set(&network.edges, &network.initial_levels);
    let graph = InfluenceGraph::build_with_policy(&network.edges, &names, engine.config().duplicate_edges)?;
    let (s, t) = (graph.lookup(source)?, graph.lookup(target)?);
    let profile = depth_profile(&graph, s, t, engine.config().max_depth);

    println!("--- Walk-Length Profile {} -> {} (Depth={}) ---", source, target, engine.config().max_depth);
    println!("{:>6} {:>14} {:>14}", "Length", "Contribution", "Cumulative");
    let mut cumulative = 0.0;
    for (k, c) in profile.iter().enumerate() {
        cumulative += c;
        if *c != 0.0 {
            println!("{:>6} {:>14.6} {:>14.6}", k + 1, c, cumulative);
        }
    }
    println!();
    Ok(())
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    init_tracing();
    let cli = parse_args();

    let network = match &cli.network {
        Some(path) => NetworkSpec::load(path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        }),
        None => NetworkSpec::example(),
    };
    let mut base_config = match &cli.config {
        Some(path) => EngineConfig::load(path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        }),
        None => EngineConfig::default(),
    };
    if let Some(mode) = cli.mode {
        base_config.mode = mode;
    }

    let perturbation = Perturbation::new(cli.source.clone(), cli.level);
    let mut results = Vec::new();

    for &depth in &cli.depths {
        let engine = PerturbationEngine::new(base_config.clone().with_max_depth(depth));
        let result = match network.perturb(&engine, &perturbation) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };

        if !cli.json {
            print_table(&result, &network.initial_levels);
            if let Some(target) = &cli.profile {
                if let Err(e) = print_profile(&network, &engine, &cli.source, target) {
                    eprintln!("{}", e);
                }
            }
        }
        results.push(result);
    }

    if cli.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                std::process::exit(1);
            }
        }
    }
}
