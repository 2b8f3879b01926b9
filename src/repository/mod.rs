pub mod es_process_monitor;
pub mod es_repository;
