pub mod config;
pub mod metrics_config;
pub mod monitor_config;
pub mod target_elastic_config;
