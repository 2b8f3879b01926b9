use crate::common::*;

use crate::utils_modules::io_utils::*;

use crate::model::configs::{metrics_config::*, monitor_config::*, target_elastic_config::*};

use crate::env_configuration::env_config::*;

static SERVER_CONFIG: once_lazy<Arc<Config>> =
    once_lazy::new(|| Arc::new(initialize_server_config()));

#[doc = "Function to initialize System configuration information instances"]
pub fn initialize_server_config() -> Config {
    info!("initialize_server_config() START!");

    let system_config: Config = Config::new();
    system_config
}

#[doc = "모니터링 대상 elasticsearch conn 정보"]
pub fn get_target_es_config_info() -> Arc<TargetElasticConfig> {
    let target_es_config: &Arc<TargetElasticConfig> = &SERVER_CONFIG.target_es;
    Arc::clone(target_es_config)
}

#[doc = "polling task config 정보"]
pub fn get_monitor_config_info() -> Arc<MonitorConfig> {
    let monitor_config: &Arc<MonitorConfig> = &SERVER_CONFIG.monitor;
    Arc::clone(monitor_config)
}

#[doc = "metrics registry / exposition config 정보"]
pub fn get_metrics_config_info() -> Arc<MetricsConfig> {
    let metrics_config: &Arc<MetricsConfig> = &SERVER_CONFIG.metrics;
    Arc::clone(metrics_config)
}

#[derive(Debug)]
pub struct Config {
    pub target_es: Arc<TargetElasticConfig>,
    pub monitor: Arc<MonitorConfig>,
    pub metrics: Arc<MetricsConfig>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ConfigNotSafe {
    pub target_es: TargetElasticConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    pub metrics: MetricsConfig,
}

impl From<ConfigNotSafe> for Config {
    fn from(system_config: ConfigNotSafe) -> Self {
        Config {
            target_es: Arc::new(system_config.target_es),
            monitor: Arc::new(system_config.monitor),
            metrics: Arc::new(system_config.metrics),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let system_config: ConfigNotSafe =
            match read_toml_from_file::<ConfigNotSafe>(&SYSTEM_CONFIG_PATH) {
                Ok(system_config) => system_config,
                Err(e) => {
                    error!(
                        "[Error][Config::new()] Failed to retrieve information 'system_config'. : {:?}",
                        e
                    );
                    panic!(
                        "[Error][Config::new()] Failed to retrieve information 'system_config'. : {:?}",
                        e
                    );
                }
            };

        Config::from(system_config)
    }
}
