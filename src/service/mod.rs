pub mod node_indices_monitor_task;
pub mod node_indices_stats_reporter;
pub mod node_indices_stats_service;
