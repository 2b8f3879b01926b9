use crate::common::*;

#[derive(Serialize, Deserialize, Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct MetricsConfig {
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_enabled() -> bool {
    true
}

fn default_listen_addr() -> String {
    String::from("0.0.0.0:9114")
}
