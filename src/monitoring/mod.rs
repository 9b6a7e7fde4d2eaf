pub mod stats_collector;

pub use stats_collector::{Stats, collect_stats};
