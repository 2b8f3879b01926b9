pub mod main_controller;
pub mod metrics_controller;
