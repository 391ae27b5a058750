#[cfg(test)]
mod tests {
    use gene_cascade::*;

    const EPS: f64 = 1e-12;

    fn example() -> NetworkSpec {
        NetworkSpec::example()
    }

    fn assert_close(actual: f64, expected: f64, what: &str) {
        assert!(
            (actual - expected).abs() < EPS,
            "{}: got {}, expected {}",
            what,
            actual,
            expected
        );
    }

    // ========== Reference Network ==========

    #[test]
    fn test_short_term_response_depth_2() {
        let net = example();
        let out = compute_gene_effect(&net.edges, &net.initial_levels, "1", 1.5, 2).unwrap();

        let expected = [
            ("1", 1.5),
            ("2", 1.0),
            ("3", 1.3),
            ("4", 1.5),
            ("5", 1.3),
            ("6", 1.65),
            ("7", 1.28),
            ("8", 1.15),
        ];
        assert_eq!(out.len(), expected.len());
        for (gene, level) in expected {
            assert_close(out[gene], level, gene);
        }
    }

    #[test]
    fn test_unreachable_gene_unchanged_exactly() {
        let net = example();
        for depth in [1, 2, 5, 20] {
            let out = compute_gene_effect(&net.edges, &net.initial_levels, "1", 1.5, depth).unwrap();
            assert_eq!(out["2"], 1.0, "gene 2 at depth {}", depth);
        }
    }

    #[test]
    fn test_long_term_loop_raises_3_4_8() {
        let net = example();
        let short = compute_gene_effect(&net.edges, &net.initial_levels, "1", 1.5, 2).unwrap();
        let long = compute_gene_effect(&net.edges, &net.initial_levels, "1", 1.5, 100).unwrap();

        // 4 <-> 3 loop (gain 0.24) feeds back into 4, and through it into 3 and 8
        for gene in ["3", "4", "8"] {
            assert!(long[gene] > short[gene], "gene {} should grow with depth", gene);
        }
        // genes off the loop have no walks longer than 2 edges
        for gene in ["5", "6"] {
            assert_close(long[gene], short[gene], gene);
        }
        // 1 -> 5 -> 6 -> 7 is a 3-edge walk the short run misses
        assert_close(short["7"], 1.0 + 0.5 * (0.7 * 0.8), "7 short run");
        assert_close(long["7"], 1.0 + 0.5 * (0.7 * 0.8 + 0.6 * 1.0 * 0.8), "7 long run");
        // damped loop: geometric series 1 / (1 - 0.24)
        assert_close(long["4"], 1.0 + 0.5 / 0.76, "4 steady state");
        assert_close(long["3"], 1.0 + 0.5 * 0.6 / 0.76, "3 steady state");
    }

    #[test]
    fn test_resolutions_reported() {
        let net = example();
        let engine = PerturbationEngine::new(EngineConfig::default().with_max_depth(2));
        let result = net.perturb(&engine, &Perturbation::new("1", 1.5)).unwrap();

        assert_eq!(result.resolution("1"), Some(Resolution::Source));
        assert_eq!(result.influence("2"), Some(0.0));
        assert_close(result.influence("6").unwrap(), 1.3, "influence on 6");
        assert_close(result.shock, 0.5, "shock");
        assert_eq!(result.max_depth, 2);
        assert!(result.resolutions.values().all(|r| *r != Resolution::Unresolved));
    }

    // ========== Accumulator Properties ==========

    #[test]
    fn test_direct_edge_exactness() {
        let edges = edges_from([("A", "B", -0.8125)]);
        let g = InfluenceGraph::build(&edges, &["A", "B"]).unwrap();
        let (a, b) = (g.lookup("A").unwrap(), g.lookup("B").unwrap());
        assert_eq!(total_influence(&g, a, b, 1.0, 1, 1), -0.8125);
        assert_eq!(total_influence(&g, a, b, 1.0, 7, 1), -0.8125);
        assert_eq!(total_influence(&g, a, b, 1.0, 0, 1), 0.0);
        // no walk back from B
        assert_eq!(influence_factor(&g, b, a, 7), 0.0);
    }

    #[test]
    fn test_cycle_divergence_exposed() {
        // A -> B -> C -> A with loop gain 1.0, target C
        let edges = edges_from([("A", "B", 2.0), ("B", "C", 1.0), ("C", "A", 0.5)]);
        let g = InfluenceGraph::build(&edges, &["A", "B", "C"]).unwrap();
        let (a, c) = (g.lookup("A").unwrap(), g.lookup("C").unwrap());

        let d50 = influence_factor(&g, a, c, 50);
        let d100 = influence_factor(&g, a, c, 100);
        assert!(d100 > d50, "{} should exceed {}", d100, d50);
        // lengths 2, 5, 8, ... each contribute 2.0
        assert_eq!(d50, 2.0 * 17.0);
        assert_eq!(d100, 2.0 * 33.0);
    }

    #[test]
    fn test_amplifying_cycle_in_engine() {
        let edges = edges_from([("src", "x", 1.0), ("x", "y", 1.1), ("y", "x", 1.0)]);
        let levels: GeneLevels = [("src".to_string(), 0.0)].into();
        let shallow = compute_gene_effect(&edges, &levels, "src", 1.0, 20).unwrap();
        let deep = compute_gene_effect(&edges, &levels, "src", 1.0, 40).unwrap();
        assert!(deep["y"] > 2.0 * shallow["y"]);
        assert!(deep["x"].is_finite());
    }

    #[test]
    fn test_negative_weights_inhibit() {
        let edges = edges_from([("tf", "gene", -0.5)]);
        let levels: GeneLevels = [("tf".to_string(), 1.0), ("gene".to_string(), 2.0)].into();
        let out = compute_gene_effect(&edges, &levels, "tf", 3.0, 5).unwrap();
        assert_eq!(out["gene"], 1.0);
    }

    // ========== Edge Cases ==========

    #[test]
    fn test_depth_zero_is_no_propagation() {
        let net = example();
        let out = compute_gene_effect(&net.edges, &net.initial_levels, "1", 5.0, 0).unwrap();
        assert_eq!(out["1"], 5.0);
        for (gene, level) in &out {
            if gene != "1" {
                assert_eq!(*level, 1.0);
            }
        }
    }

    #[test]
    fn test_edge_only_genes_appear_in_output() {
        let edges = edges_from([("a", "b", 0.5), ("c", "d", 0.5)]);
        let levels: GeneLevels = [("a".to_string(), 1.0)].into();
        let out = compute_gene_effect(&edges, &levels, "a", 2.0, 3).unwrap();
        assert_eq!(out.keys().map(String::as_str).collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(out["b"], 0.5);
        assert_eq!(out["c"], 0.0);
        assert_eq!(out["d"], 0.0);
    }

    #[test]
    fn test_empty_network() {
        let out = compute_gene_effect(&[], &GeneLevels::new(), "x", 1.0, 5).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out["x"], 1.0);
    }

    #[test]
    fn test_unresolved_versus_zero_influence() {
        let net = example();
        // graph built without gene 2 and without gene 99
        let names: Vec<String> = vertex_set(&net.edges, &net.initial_levels)
            .into_iter()
            .filter(|n| n != "2")
            .collect();
        let edges: Vec<Edge> = net.edges.iter().filter(|e| e.source != "2").cloned().collect();
        let graph = InfluenceGraph::build(&edges, &names).unwrap();

        let mut levels = net.initial_levels.clone();
        levels.insert("99".to_string(), 4.0);
        let result = PerturbationEngine::default()
            .propagate_on(&graph, &levels, &Perturbation::new("1", 1.5))
            .unwrap();

        assert_eq!(result.resolution("2"), Some(Resolution::Unresolved));
        assert_eq!(result.resolution("99"), Some(Resolution::Unresolved));
        assert_eq!(result.level("99"), Some(4.0));
        assert_eq!(result.level("2"), Some(1.0));
        assert!(result.resolution("4").unwrap().is_resolved());
    }

    #[test]
    fn test_duplicate_edge_policies() {
        let edges = edges_from([("a", "b", 0.25), ("a", "b", 0.5)]);
        let levels: GeneLevels = [("a".to_string(), 0.0), ("b".to_string(), 0.0)].into();
        let p = Perturbation::new("a", 1.0);

        let summed = PerturbationEngine::default().run(&edges, &levels, &p).unwrap();
        assert_eq!(summed.level("b"), Some(0.75));

        let overwritten = PerturbationEngine::new(
            EngineConfig::default().with_duplicate_edges(DuplicateEdgePolicy::Overwrite),
        )
        .run(&edges, &levels, &p)
        .unwrap();
        assert_eq!(overwritten.level("b"), Some(0.5));

        let rejected = PerturbationEngine::new(
            EngineConfig::default().with_duplicate_edges(DuplicateEdgePolicy::Reject),
        )
        .run(&edges, &levels, &p);
        assert!(matches!(
            rejected,
            Err(PerturbationError::Graph(GraphError::DuplicateEdge { .. }))
        ));
    }

    #[test]
    fn test_matrix_mode_reference_network() {
        let net = example();
        let engine = PerturbationEngine::new(
            EngineConfig::default()
                .with_max_depth(100)
                .with_mode(InfluenceMode::MatrixPower),
        );
        let matrix = net.perturb(&engine, &Perturbation::new("1", 1.5)).unwrap();
        let walk = compute_gene_effect(&net.edges, &net.initial_levels, "1", 1.5, 100).unwrap();
        for (gene, level) in &walk {
            assert_close(matrix.levels[gene], *level, gene);
        }
    }

    // ========== File Loading ==========

    #[test]
    fn test_demo_files_load() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/demos");
        let net = NetworkSpec::load(format!("{}/regulatory_network.json", dir)).unwrap();
        assert_eq!(net, example());

        let config = EngineConfig::load(format!("{}/engine.json", dir)).unwrap();
        assert_eq!(config.max_depth, 20);
        assert_eq!(config.mode, InfluenceMode::MatrixPower);
        assert!(config.strict_source);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = NetworkSpec::load("/nonexistent/network.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/network.json"));
    }

    #[test]
    fn test_result_serializes() {
        let net = example();
        let engine = PerturbationEngine::new(EngineConfig::default().with_max_depth(2));
        let result = net.perturb(&engine, &Perturbation::new("1", 1.5)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["source"], "1");
        assert_eq!(json["mode"], "walk_enumeration");
        assert_eq!(json["resolutions"]["1"]["kind"], "source");
        assert_eq!(json["resolutions"]["2"]["influence"], 0.0);
        let back: InfluenceResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.resolutions.len(), result.resolutions.len());
        assert_eq!(back.resolution("2"), Some(Resolution::Resolved { influence: 0.0 }));
    }
}
