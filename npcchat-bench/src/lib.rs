//! Benchmark harness crate for npcchat. See `benches/`.
