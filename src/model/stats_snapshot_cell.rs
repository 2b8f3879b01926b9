use crate::common::*;

use crate::model::node_indices_stats::*;

/// Shared, atomically swappable home of the latest published [`NodeIndicesStats`].
///
/// The collector is the only writer. Readers get a whole `Arc` of one generation and
/// never block the writer.
#[derive(Debug)]
pub struct StatsSnapshotCell {
    current: ArcSwap<NodeIndicesStats>,
}

impl Default for StatsSnapshotCell {
    fn default() -> Self {
        Self::new(NodeIndicesStats::default())
    }
}

impl StatsSnapshotCell {
    pub fn new(initial: NodeIndicesStats) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    #[doc = "현재 발행되어 있는 스냅샷을 반환해주는 함수"]
    pub fn load(&self) -> Arc<NodeIndicesStats> {
        self.current.load_full()
    }

    #[doc = "새 스냅샷으로 교체해주는 함수 - 이전 스냅샷은 마지막 reader 가 놓을 때 해제된다."]
    pub fn publish(&self, snapshot: NodeIndicesStats) {
        self.current.store(Arc::new(snapshot));
    }
}
