use crate::common::*;

#[derive(Serialize, Deserialize, Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct TargetElasticConfig {
    pub cluster_name: String,
    pub host: String,
    #[serde(default)]
    pub es_id: String,
    #[serde(default)]
    pub es_pw: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

fn default_timeout_sec() -> u64 {
    30
}
