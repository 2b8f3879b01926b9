pub mod es_process_monitor_trait;
pub mod es_repository_trait;
