// Monte Carlo Infrastructure: N runs per scenario with statistical aggregation
// Run i uses seed base_seed + i, so every run is reproducible on its own

use courier_engine::routing::recharge_segments;
use courier_engine::spanning::forest_weight;
use courier_engine::Simulation;
use tracing::{debug, warn};

use crate::report::*;
use crate::scenarios::Scenario;

use std::time::Instant;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(scenario: &Scenario, seed: u64, orders: usize) -> BenchResult {
    let start = Instant::now();
    let mut result = BenchResult {
        scenario: scenario.name.to_string(),
        seed,
        pass: false,
        attempted: 0,
        created: 0,
        no_route: 0,
        no_reachable_recharge: 0,
        success_rate: 0.0,
        avg_order_cost: 0.0,
        avg_route_length: 0.0,
        avg_recharge_stops: 0.0,
        autonomy_violations: 0,
        distinct_routes: 0,
        ledger_height: 0,
        ledger_balanced: false,
        connected: false,
        mst_edges: 0,
        mst_weight: 0,
        elapsed_ms: 0,
    };

    let mut sim = match Simulation::new(scenario.config(seed)) {
        Ok(sim) => sim,
        Err(e) => {
            warn!(scenario = scenario.name, seed, error = %e, "Scenario setup failed");
            return result;
        }
    };

    let outcome = match sim.run(orders) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(scenario = scenario.name, seed, error = %e, "Run aborted");
            return result;
        }
    };

    let autonomy = sim.config().autonomy_limit;
    let mut recharge_stops = 0usize;
    for order in sim.list_orders() {
        match recharge_segments(sim.graph(), sim.roles(), &order.path) {
            Some(segments) => {
                recharge_stops += segments.len().saturating_sub(1);
                result.autonomy_violations += segments.iter().filter(|&&s| s > autonomy).count();
            }
            None => result.autonomy_violations += 1,
        }
    }

    let summary = sim.summary();
    let mst = sim.compute_mst_edges();
    let ledger = sim.ledger();

    result.attempted = outcome.attempted();
    result.created = outcome.created.len();
    result.no_route = outcome.no_route;
    result.no_reachable_recharge = outcome.no_reachable_recharge;
    result.success_rate = if result.attempted > 0 {
        result.created as f64 / result.attempted as f64
    } else {
        0.0
    };
    result.avg_order_cost = summary.avg_order_cost;
    result.avg_route_length = summary.avg_route_length;
    result.avg_recharge_stops = if result.created > 0 {
        recharge_stops as f64 / result.created as f64
    } else {
        0.0
    };
    result.distinct_routes = ledger.len();
    result.ledger_height = ledger.height();
    result.ledger_balanced = ledger.is_balanced();
    result.connected = sim.graph().is_connected();
    result.mst_edges = mst.len();
    result.mst_weight = forest_weight(&mst);

    let criteria = &scenario.criteria;
    result.pass = result.autonomy_violations == 0
        && (!criteria.require_connected || result.connected)
        && (!criteria.require_balanced_ledger || result.ledger_balanced)
        && (!criteria.require_spanning_tree || result.mst_edges + 1 == scenario.nodes)
        && criteria
            .min_success_rate
            .map_or(true, |min| result.success_rate >= min);

    result.elapsed_ms = start.elapsed().as_millis();
    debug!(
        scenario = scenario.name,
        seed,
        pass = result.pass,
        created = result.created,
        elapsed_ms = result.elapsed_ms as u64,
        "Run finished"
    );
    result
}

/// Run `runs` seeded iterations of `scenario` and aggregate.
pub fn run_monte_carlo(
    scenario: &Scenario,
    runs: usize,
    base_seed: u64,
    orders: Option<usize>,
) -> MonteCarloReport {
    let orders = orders.unwrap_or(scenario.orders);
    let individual_runs: Vec<BenchResult> = (0..runs as u64)
        .map(|i| run_single(scenario, base_seed.wrapping_add(i), orders))
        .collect();

    let collect = |f: fn(&BenchResult) -> f64| -> Stats {
        let samples: Vec<f64> = individual_runs.iter().map(f).collect();
        Stats::from_samples(&samples)
    };

    let passed = individual_runs.iter().filter(|r| r.pass).count();
    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: runs,
        pass_rate: if runs > 0 { passed as f64 / runs as f64 } else { 0.0 },
        success_rate: collect(|r| r.success_rate),
        avg_order_cost: collect(|r| r.avg_order_cost),
        avg_recharge_stops: collect(|r| r.avg_recharge_stops),
        distinct_routes: collect(|r| r.distinct_routes as f64),
        ledger_height: collect(|r| r.ledger_height as f64),
        mst_weight: collect(|r| r.mst_weight as f64),
        elapsed_ms: collect(|r| r.elapsed_ms as f64),
        individual_runs,
    }
}
