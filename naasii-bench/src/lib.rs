//! naasii-bench: benchmark targets only; see `benches/`.
