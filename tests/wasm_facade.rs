#![cfg(target_arch = "wasm32")]

use courier_engine::WasmSimulation;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn facade_runs_and_reports() {
    let mut sim = WasmSimulation::new(20, 30, 7).expect("test: simulation");
    sim.run(10).expect("test: run");
    assert!(!sim.get_nodes().is_null());
    assert!(!sim.get_orders().is_null());
    assert!(!sim.get_ledger().is_null());
    assert!(!sim.get_summary().is_null());
    assert!(sim.get_visit_ranking("depot").is_null());
}

#[wasm_bindgen_test]
fn facade_rejects_unknown_labels() {
    let mut sim = WasmSimulation::new(10, 12, 3).expect("test: simulation");
    assert!(sim.create_order("NOPE", "A", 1).is_err());
    assert!(sim.cancel_order("not-a-uuid").is_err());
    assert!(sim.get_order("not-a-uuid").is_null());
}
