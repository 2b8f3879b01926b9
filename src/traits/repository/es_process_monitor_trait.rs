use crate::common::*;

#[async_trait]
pub trait EsProcessMonitor {
    async fn is_elasticsearch_started(&self) -> bool;
}
