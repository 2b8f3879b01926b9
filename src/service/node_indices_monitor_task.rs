use crate::common::*;

use crate::enums::{collect_outcome::*, task_state::*};

use crate::traits::service::{node_indices_stats_service_trait::*, polling_task_trait::*};

pub const NODE_INDICES_MONITOR_NAME: &str = "Elasticsearch_NodeIndicesMonitor";

/* execute() 가 어떤 경로로 끝나든 Idle 로 돌려놓는다. */
struct CollectingGuard<'a> {
    collecting: &'a AtomicBool,
}

impl Drop for CollectingGuard<'_> {
    fn drop(&mut self) {
        self.collecting.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct NodeIndicesMonitorTask<S: NodeIndicesStatsService> {
    stats_service: Arc<S>,
    interval: Duration,
    collecting: AtomicBool,
}

impl<S: NodeIndicesStatsService> NodeIndicesMonitorTask<S> {
    pub fn new(stats_service: Arc<S>, interval: Duration) -> Self {
        Self {
            stats_service,
            interval,
            collecting: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl<S> PollingTask for NodeIndicesMonitorTask<S>
where
    S: NodeIndicesStatsService + Sync + Send,
{
    fn get_name(&self) -> &str {
        NODE_INDICES_MONITOR_NAME
    }

    fn get_interval(&self) -> Duration {
        self.interval
    }

    fn get_state(&self) -> TaskState {
        if self.collecting.load(Ordering::Acquire) {
            TaskState::Collecting
        } else {
            TaskState::Idle
        }
    }

    #[doc = "한 번의 수집 사이클 - 실패하더라도 로그만 남기고 정상 반환한다."]
    async fn execute(&self) {
        if self
            .collecting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(
                "[{}] previous cycle is still collecting, skipping this tick",
                NODE_INDICES_MONITOR_NAME
            );
            return;
        }

        let _guard: CollectingGuard<'_> = CollectingGuard {
            collecting: &self.collecting,
        };

        match self.stats_service.collect_node_indices_stats().await {
            Ok(CollectOutcome::Published) => {
                info!(
                    "[{}] node indices stats published - cluster: {}",
                    NODE_INDICES_MONITOR_NAME,
                    self.stats_service.get_cluster_name()
                );
            }
            Ok(outcome) => {
                info!(
                    "[{}] cycle finished without a full snapshot: {:?}",
                    NODE_INDICES_MONITOR_NAME, outcome
                );
            }
            Err(e) => {
                warn!(
                    "[{}] failed to load node indices stats data: {:?}",
                    NODE_INDICES_MONITOR_NAME, e
                );
            }
        }
    }
}
