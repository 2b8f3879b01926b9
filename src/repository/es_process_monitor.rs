use crate::common::*;

use crate::traits::repository::es_process_monitor_trait::*;

const LIVENESS_TIMEOUT_SEC: u64 = 5;

#[derive(Debug, Clone)]
pub struct EsProcessMonitorImpl {
    client: Client,
    node_url: Url,
    es_id: Option<String>,
    es_pw: Option<String>,
}

impl EsProcessMonitorImpl {
    #[doc = "Elasticsearch 프로세스 기동여부 확인용 객체 생성자"]
    /// # Arguments
    /// * `host`  - 모니터링 대상 노드의 host:port
    /// * `es_id` - Elasticsearch 계정정보 - 아이디
    /// * `es_pw` - Elasticsearch 계정정보 - 비밀번호
    ///
    /// # Returns
    /// * Result<Self, anyhow::Error>
    pub fn new(host: &str, es_id: &str, es_pw: &str) -> Result<Self, anyhow::Error> {
        let node_url: Url = Url::parse(&format!("http://{}", host))
            .map_err(|e| anyhow!("[EsProcessMonitorImpl::new] invalid url: {:?}", e))?;

        let client: Client = Client::builder()
            .timeout(Duration::from_secs(LIVENESS_TIMEOUT_SEC))
            .build()
            .map_err(|e| anyhow!("[EsProcessMonitorImpl::new] {:?}", e))?;

        Ok(Self {
            client,
            node_url,
            es_id: (!es_id.is_empty()).then(|| es_id.to_string()),
            es_pw: (!es_pw.is_empty()).then(|| es_pw.to_string()),
        })
    }
}

#[async_trait]
impl EsProcessMonitor for EsProcessMonitorImpl {
    #[doc = "노드의 루트 엔드포인트가 2xx 로 응답하면 기동된 것으로 판단하는 함수"]
    async fn is_elasticsearch_started(&self) -> bool {
        let mut request: reqwest::RequestBuilder = self.client.get(self.node_url.as_str());

        if let (Some(id), Some(pw)) = (self.es_id.as_deref(), self.es_pw.as_deref()) {
            request = request.basic_auth(id, Some(pw));
        }

        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(
                    "[EsProcessMonitorImpl->is_elasticsearch_started] {} is unreachable: {:?}",
                    self.node_url, e
                );
                false
            }
        }
    }
}
