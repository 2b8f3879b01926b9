pub mod configs;
pub mod node_indices_stats;
pub mod stats_snapshot_cell;
