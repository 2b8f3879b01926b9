pub mod node_indices_stats_service_trait;
pub mod polling_task_trait;
