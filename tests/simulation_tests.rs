#[cfg(test)]
mod tests {
    use courier_engine::routing::{path_cost, recharge_segments};
    use courier_engine::spanning::forest_weight;
    use courier_engine::{
        GenerationError, Graph, OrderStatus, RegistryError, Role, RouteError, Simulation,
        SimulationConfig, SimulationError, VertexId,
    };

    /// A(storage) -30- R(recharge) -30- C(client), plus B(client) hanging off A.
    fn depot_line() -> (Graph, [VertexId; 4]) {
        let mut g = Graph::new();
        let a = g.insert_vertex("A", Role::Storage).expect("test: vertex");
        let b = g.insert_vertex("B", Role::Client).expect("test: vertex");
        let r = g.insert_vertex("R", Role::Recharge).expect("test: vertex");
        let c = g.insert_vertex("C", Role::Client).expect("test: vertex");
        g.insert_edge(a, r, 30).expect("test: a-r");
        g.insert_edge(r, c, 30).expect("test: r-c");
        g.insert_edge(a, b, 10).expect("test: a-b");
        (g, [a, b, r, c])
    }

    fn unconstrained(n: usize, m: usize, seed: u64) -> Simulation {
        let config = SimulationConfig::new(n, m)
            .with_seed(seed)
            .with_autonomy_limit(1_000_000);
        Simulation::new(config).expect("test: simulation")
    }

    // ========== Test Suite A: Topology ==========

    #[test]
    fn test_generated_networks_are_connected() {
        for seed in 0..20u64 {
            for (n, m) in [(1, 0), (2, 0), (15, 20), (50, 60), (30, 200)] {
                let sim = Simulation::new(SimulationConfig::new(n, m).with_seed(seed))
                    .expect("test: simulation");
                let graph = sim.graph();
                assert_eq!(graph.vertex_count(), n);
                assert_eq!(graph.edge_count(), m.max(n - 1));
                assert!(graph.is_connected(), "seed {seed}, n {n}, m {m}");
                assert_eq!(sim.roles().len(), n);
            }
        }
    }

    #[test]
    fn test_edge_count_beyond_simple_graph_is_rejected() {
        let err = Simulation::new(SimulationConfig::new(4, 7));
        assert!(
            matches!(
                err,
                Err(SimulationError::Generation(GenerationError::TooManyEdges { max: 6, .. }))
            ),
            "got {:?}",
            err.err()
        );
    }

    #[test]
    fn test_role_counts_follow_ratio() {
        let sim = unconstrained(100, 150, 8);
        assert_eq!(sim.roles().count(Role::Storage), 20);
        assert_eq!(sim.roles().count(Role::Recharge), 20);
        assert_eq!(sim.roles().count(Role::Client), 60);
    }

    // ========== Test Suite B: Route Planning ==========

    #[test]
    fn test_recharge_stop_keeps_route_feasible() {
        let (g, [a, _, r, c]) = depot_line();
        let sim = Simulation::with_graph(SimulationConfig::default(), g);
        let plan = sim.plan_route(a, c).expect("test: plan");
        assert_eq!(plan.path, vec![a, r, c]);
        assert_eq!(plan.cost, 60);
    }

    #[test]
    fn test_short_autonomy_without_reachable_recharge_fails() {
        let (g, [a, _, _, c]) = depot_line();
        let sim = Simulation::with_graph(SimulationConfig::default().with_autonomy_limit(20), g);
        let err = sim.plan_route(a, c);
        assert!(
            matches!(err, Err(SimulationError::Route(RouteError::NoReachableRecharge { .. }))),
            "got {err:?}"
        );
    }

    #[test]
    fn test_disconnected_destination_has_no_route() {
        let (mut g, [a, ..]) = depot_line();
        let island = g.insert_vertex("Z", Role::Client).expect("test: vertex");
        let sim = Simulation::with_graph(SimulationConfig::default(), g);
        let err = sim.plan_route(a, island);
        assert!(
            matches!(err, Err(SimulationError::Route(RouteError::NoRouteFound { .. }))),
            "got {err:?}"
        );
    }

    #[test]
    fn test_generated_orders_respect_autonomy() {
        for seed in [1u64, 5, 9] {
            let mut sim = Simulation::new(SimulationConfig::new(60, 120).with_seed(seed))
                .expect("test: simulation");
            let outcome = sim.run(150).expect("test: run");
            assert_eq!(outcome.attempted(), 150);

            let limit = sim.config().autonomy_limit;
            for order in sim.list_orders() {
                assert_eq!(order.path.first(), Some(&order.origin));
                assert_eq!(order.path.last(), Some(&order.destination));
                assert_eq!(path_cost(sim.graph(), &order.path), Some(order.cost));
                let segments =
                    recharge_segments(sim.graph(), sim.roles(), &order.path).expect("test: segments");
                assert!(segments.iter().all(|&s| s <= limit), "segments {segments:?}");
            }
        }
    }

    #[test]
    fn test_unconstrained_runs_never_fail() {
        let mut sim = unconstrained(40, 60, 12);
        let outcome = sim.run(100).expect("test: run");
        assert_eq!(outcome.created.len(), 100);
        assert_eq!(outcome.no_route + outcome.no_reachable_recharge, 0);
    }

    // ========== Test Suite C: Route Ledger ==========

    #[test]
    fn test_repeated_route_is_counted_once() {
        let (g, [a, _, _, c]) = depot_line();
        let mut sim = Simulation::with_graph(SimulationConfig::default(), g);
        for _ in 0..3 {
            sim.create_order(a, c, 1).expect("test: order");
        }
        let ledger = sim.ledger();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_recorded(), 3);

        let entries = ledger.entries();
        assert_eq!(entries[0].route, "A → R → C");
        assert_eq!(entries[0].frequency, 3);
    }

    #[test]
    fn test_ledger_is_ordered_and_balanced() {
        let mut sim = unconstrained(80, 160, 21);
        sim.run(400).expect("test: run");
        let ledger = sim.ledger();
        assert!(ledger.is_balanced());

        let entries = ledger.ordered_entries();
        assert_eq!(entries.len(), ledger.len());
        assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));

        let total: u64 = entries.iter().map(|(_, payload)| payload.frequency()).sum();
        assert_eq!(total, ledger.total_recorded());

        let ranked = ledger.ranked();
        assert!(ranked.windows(2).all(|w| w[0].frequency() >= w[1].frequency()));

        // AVL height stays under 1.45 log2(n + 2).
        let bound = 1.45 * ((ledger.len() + 2) as f64).log2();
        assert!((ledger.height() as f64) <= bound + 1.0);
    }

    // ========== Test Suite D: Spanning Forest ==========

    #[test]
    fn test_mst_spans_generated_network() {
        for seed in 0..10u64 {
            let sim = unconstrained(30, 60, seed);
            let pairs = sim.compute_mst();
            assert_eq!(pairs.len(), 29);
            for &(u, v) in &pairs {
                assert!(sim.graph().get_edge(u, v).is_some());
            }

            let edges = sim.compute_mst_edges();
            let total: u64 = sim.graph().edges().iter().map(|e| e.weight as u64).sum();
            assert!(forest_weight(&edges) <= total);
        }
    }

    #[test]
    fn test_mst_of_disconnected_network_is_a_forest() {
        let (mut g, _) = depot_line();
        let x = g.insert_vertex("X", Role::Client).expect("test: vertex");
        let y = g.insert_vertex("Y", Role::Storage).expect("test: vertex");
        g.insert_edge(x, y, 4).expect("test: x-y");
        let sim = Simulation::with_graph(SimulationConfig::default(), g);
        assert_eq!(sim.compute_mst().len(), 4);
    }

    // ========== Test Suite E: Orders and Clients ==========

    #[test]
    fn test_order_lifecycle() {
        let (g, [a, b, _, c]) = depot_line();
        let mut sim = Simulation::with_graph(SimulationConfig::default(), g);
        let first = sim.create_order(a, c, 2).expect("test: first").id;
        let second = sim.create_order(a, b, 1).expect("test: second").id;

        let delivered = sim.complete_order(first).expect("test: complete");
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert!(delivered.delivered_at.is_some());

        let err = sim.cancel_order(first);
        assert!(
            matches!(
                err,
                Err(SimulationError::Registry(RegistryError::InvalidStateTransition { .. }))
            ),
            "got {err:?}"
        );

        let cancelled = sim.cancel_order(second).expect("test: cancel");
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert!(cancelled.delivered_at.is_none());

        let summary = sim.summary();
        assert_eq!(summary.total_orders, 2);
        assert_eq!((summary.pending, summary.delivered, summary.cancelled), (0, 1, 1));
        assert_eq!(summary.total_clients, 2);
        assert_eq!(summary.total_distance, 70);
    }

    #[test]
    fn test_clients_track_order_counts() {
        let mut sim = unconstrained(50, 80, 33);
        sim.run(120).expect("test: run");

        let orders = sim.list_orders();
        let clients = sim.list_clients();
        let total: u64 = clients.iter().map(|c| c.total_orders).sum();
        assert_eq!(total, orders.len() as u64);
        for client in &clients {
            let expected = orders.iter().filter(|o| o.destination == client.vertex).count();
            assert_eq!(client.total_orders, expected as u64);
            assert!(sim.roles().is(client.vertex, Role::Client));
        }
    }

    #[test]
    fn test_visit_ranking_counts_destinations() {
        let (g, [a, b, _, c]) = depot_line();
        let mut sim = Simulation::with_graph(SimulationConfig::default(), g);
        sim.create_order(a, c, 1).expect("test: order");
        sim.create_order(a, c, 1).expect("test: order");
        sim.create_order(a, b, 1).expect("test: order");

        let ranking = sim.visit_ranking(Role::Client);
        let rows: Vec<(&str, u64)> = ranking.iter().map(|v| (v.label.as_str(), v.visits)).collect();
        assert_eq!(rows, vec![("C", 2), ("B", 1)]);
        assert_eq!(sim.visit_ranking(Role::Recharge)[0].visits, 2);
    }

    // ========== Test Suite F: Determinism and Config ==========

    #[test]
    fn test_same_seed_same_history() {
        let mut a = unconstrained(40, 70, 99);
        let mut b = unconstrained(40, 70, 99);
        let ra = a.run(60).expect("test: run a");
        let rb = b.run(60).expect("test: run b");
        assert_eq!(ra.created, rb.created);
        assert_eq!(a.ledger().entries(), b.ledger().entries());
        assert_eq!(a.compute_mst(), b.compute_mst());

        let mut c = unconstrained(40, 70, 100);
        let rc = c.run(60).expect("test: run c");
        assert_ne!(ra.created, rc.created);
    }

    #[test]
    fn test_json_config_drives_simulation() {
        let config = SimulationConfig::from_json_str(
            r#"{ "seed": 4, "autonomy_limit": 75, "topology": { "n_nodes": 25, "m_edges": 40 } }"#,
        )
        .expect("test: config");
        let mut sim = Simulation::new(config).expect("test: simulation");
        assert_eq!(sim.graph().vertex_count(), 25);
        assert_eq!(sim.config().autonomy_limit, 75);
        let outcome = sim.run(10).expect("test: run");
        assert_eq!(outcome.attempted(), 10);
    }
}
