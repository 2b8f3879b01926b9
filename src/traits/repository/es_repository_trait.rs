use crate::common::*;

#[async_trait]
pub trait EsRepository {
    async fn get_node_stats(
        &self,
        node_ids: &[&str],
        metrics: &[&str],
    ) -> Result<Value, anyhow::Error>;
    fn get_cluster_name(&self) -> String;
    fn get_host_info(&self) -> String;
}
