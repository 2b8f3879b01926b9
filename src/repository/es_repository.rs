use crate::common::*;

use crate::traits::repository::es_repository_trait::*;

#[derive(Debug, Getters, Clone)]
#[getset(get = "pub")]
pub struct EsRepositoryImpl {
    pub cluster_name: String,
    pub es_client: Elasticsearch,
    pub host: String,
}

impl EsRepositoryImpl {
    #[doc = "Elasticsearch connection 생성자"]
    /// # Arguments
    /// * `cluster_name` - Elasticsearch Cluster 이름
    /// * `host`         - 모니터링 대상 노드의 host:port
    /// * `es_id`        - Elasticsearch 계정정보 - 아이디
    /// * `es_pw`        - Elasticsearch 계정정보 - 비밀번호
    /// * `timeout_sec`  - 요청 타임아웃(초)
    ///
    /// # Returns
    /// * Result<Self, anyhow::Error>
    pub fn new(
        cluster_name: &str,
        host: &str,
        es_id: &str,
        es_pw: &str,
        timeout_sec: u64,
    ) -> Result<Self, anyhow::Error> {
        let es_id_opt: Option<&str> = (!es_id.is_empty()).then_some(es_id);
        let es_pw_opt: Option<&str> = (!es_pw.is_empty()).then_some(es_pw);

        let es_client: Elasticsearch =
            Self::create_es_conn(host, es_id_opt, es_pw_opt, timeout_sec)
                .map_err(|e| anyhow!("[EsRepositoryImpl::new] {:?}", e))?;

        Ok(Self {
            cluster_name: cluster_name.to_string(),
            es_client,
            host: host.to_string(),
        })
    }

    #[doc = "Function that creates an Elasticsearch connection bound to a single node."]
    fn create_es_conn(
        host: &str,
        es_id_opt: Option<&str>,
        es_pw_opt: Option<&str>,
        timeout_sec: u64,
    ) -> anyhow::Result<Elasticsearch> {
        let node_url: Url = Url::parse(&format!("http://{}", host))
            .map_err(|e| anyhow!("[EsRepositoryImpl::create_es_conn][node_url] {:?}", e))?;

        /*
            `_local` node stats only make sense against one node,
            so a round robin pool would mix the counters of different nodes.
        */
        let conn_pool: SingleNodeConnectionPool = SingleNodeConnectionPool::new(node_url);

        let mut builder: TransportBuilder =
            TransportBuilder::new(conn_pool).timeout(Duration::from_secs(timeout_sec));

        if let (Some(id), Some(pw)) = (es_id_opt, es_pw_opt) {
            builder = builder.auth(EsCredentials::Basic(id.to_string(), pw.to_string()));
        }

        let transport: EsTransport = builder
            .build()
            .map_err(|e| anyhow!("[EsRepositoryImpl::create_es_conn] {:?}", e))?;

        Ok(Elasticsearch::new(transport))
    }
}

#[async_trait]
impl EsRepository for EsRepositoryImpl {
    #[doc = "노드의 stats 정보를 반환해주는 함수. GET /_nodes/{node_id}/stats/{metric}"]
    /// # Arguments
    /// * `node_ids` - 대상 노드 ex) ["_local"]
    /// * `metrics`  - 수집 대상 지표그룹 ex) ["indices"]
    ///
    /// # Returns
    /// * Result<Value, anyhow::Error>
    async fn get_node_stats(
        &self,
        node_ids: &[&str],
        metrics: &[&str],
    ) -> Result<Value, anyhow::Error> {
        let stats_parts: NodesStatsParts<'_> = match (node_ids.is_empty(), metrics.is_empty()) {
            (true, true) => NodesStatsParts::None,
            (true, false) => NodesStatsParts::Metric(metrics),
            (false, true) => NodesStatsParts::NodeId(node_ids),
            (false, false) => NodesStatsParts::NodeIdMetric(node_ids, metrics),
        };

        let response: Response = self
            .es_client
            .nodes()
            .stats(stats_parts)
            .send()
            .await
            .map_err(|e| anyhow!("[EsRepositoryImpl->get_node_stats] {:?}", e))?;

        if response.status_code().is_success() {
            let resp: Value = response.json().await?;
            Ok(resp)
        } else {
            let error_message: String = format!(
                "[EsRepositoryImpl->get_node_stats()] Failed to GET node stats: Status Code: {}",
                response.status_code()
            );
            Err(anyhow!(error_message))
        }
    }

    fn get_cluster_name(&self) -> String {
        self.cluster_name().to_string()
    }

    fn get_host_info(&self) -> String {
        self.host().to_string()
    }
}
