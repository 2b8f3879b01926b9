use crate::common::*;

/// 60 seconds, the fixed cadence of the node indices poll.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 60 * 1000;

#[derive(Serialize, Deserialize, Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /* true 인 경우 추출 도중 실패해도 그때까지 채워진 필드로 스냅샷을 교체한다. */
    #[serde(default)]
    pub publish_partial_snapshot: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            publish_partial_snapshot: false,
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
