use wasm_bindgen::prelude::*;

/// Snapshot of the last `step` (all zeros while perf metrics are off)
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) pairs_ms: f64,
    pub(super) bodies: u32,
    pub(super) pairs_tested: u32,
    pub(super) pairs_touching: u32,
    pub(super) resolved: u32,
    pub(super) trace_calls: u32,
    pub(super) trace_substeps: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn pairs_ms(&self) -> f64 { self.pairs_ms }
    #[wasm_bindgen(getter)]
    pub fn bodies(&self) -> u32 { self.bodies }
    #[wasm_bindgen(getter)]
    pub fn pairs_tested(&self) -> u32 { self.pairs_tested }
    #[wasm_bindgen(getter)]
    pub fn pairs_touching(&self) -> u32 { self.pairs_touching }
    #[wasm_bindgen(getter)]
    pub fn resolved(&self) -> u32 { self.resolved }
    #[wasm_bindgen(getter)]
    pub fn trace_calls(&self) -> u32 { self.trace_calls }
    #[wasm_bindgen(getter)]
    pub fn trace_substeps(&self) -> u32 { self.trace_substeps }
}
