use crate::common::*;

use crate::enums::collect_outcome::*;

#[async_trait]
pub trait NodeIndicesStatsService {
    async fn collect_node_indices_stats(&self) -> anyhow::Result<CollectOutcome>;
    fn get_cluster_name(&self) -> String;
}
