use crate::common::*;

use crate::utils_modules::{calculate_utils::*, json_utils::*};

use crate::model::{node_indices_stats::*, stats_snapshot_cell::*};

use crate::enums::collect_outcome::*;

use crate::traits::repository::{es_process_monitor_trait::*, es_repository_trait::*};
use crate::traits::service::node_indices_stats_service_trait::*;

const LOCAL_NODE_ID: &str = "_local";
const INDICES_METRIC: &str = "indices";

#[derive(Debug, new)]
pub struct NodeIndicesStatsServiceImpl<R: EsRepository, P: EsProcessMonitor> {
    elastic_obj: Arc<R>,
    process_monitor: Arc<P>,
    stats_cell: Arc<StatsSnapshotCell>,
    publish_partial_snapshot: bool,
}

/* private function 선언부 */
impl<R, P> NodeIndicesStatsServiceImpl<R, P>
where
    R: EsRepository + Sync + Send,
    P: EsProcessMonitor + Sync + Send,
{
    #[doc = "첫번째 노드의 indices 통계 항목을 찾아주는 함수 - 없으면 None"]
    fn first_node_indices(node_stats: &Value) -> Option<&Value> {
        let first_node: &Value = node_stats
            .get("nodes")
            .and_then(Value::as_object)
            .and_then(|nodes| nodes.values().next())?;

        first_node.get("indices").filter(|indices| !indices.is_null())
    }

    #[doc = "GET /_nodes/_local/stats/indices 결과로 스냅샷 빌더를 채워주는 함수"]
    /// # Arguments
    /// * `builder`  - 이번 사이클에 발행할 스냅샷 빌더
    /// * `previous` - 직전에 발행된 스냅샷 (delta 기준값)
    ///
    /// # Returns
    /// * Result<CollectOutcome, anyhow::Error> - 모든 필드를 채웠으면 Published, 노드 정보가 없으면 NoNodeStats
    async fn extract_node_indices_stats(
        &self,
        builder: &mut NodeIndicesStatsBuilder,
        previous: &NodeIndicesStats,
    ) -> Result<CollectOutcome, anyhow::Error> {
        let node_stats: Value = self
            .elastic_obj
            .get_node_stats(&[LOCAL_NODE_ID], &[INDICES_METRIC])
            .await?;

        let indices: &Value = match Self::first_node_indices(&node_stats) {
            Some(indices) => indices,
            None => {
                info!(
                    "[{}] NodeIndicesStats is null, hence returning (No NodeIndicesStats).",
                    self.elastic_obj.get_host_info()
                );
                return Ok(CollectOutcome::NoNodeStats);
            }
        };

        Self::update_store_docs(builder, indices)?;
        Self::update_refresh_flush(builder, indices)?;
        Self::update_merge(builder, indices)?;
        Self::update_cache(builder, indices)?;
        Self::update_search(builder, indices, previous)?;
        Self::update_get(builder, indices, previous)?;
        Self::update_indexing(builder, indices, previous)?;

        Ok(CollectOutcome::Published)
    }

    fn update_store_docs(
        builder: &mut NodeIndicesStatsBuilder,
        indices: &Value,
    ) -> Result<(), anyhow::Error> {
        let store_size: u64 = get_value_by_path(indices, "store.size_in_bytes")?;
        /* 최신 버전의 Elasticsearch 에서는 throttle_time 이 내려오지 않는다. */
        let store_throttle_time: u64 =
            get_value_by_path_or(indices, "store.throttle_time_in_millis", 0)?;
        let docs_count: u64 = get_value_by_path(indices, "docs.count")?;
        let docs_deleted: u64 = get_value_by_path(indices, "docs.deleted")?;

        builder
            .store_size(store_size)
            .store_throttle_time(store_throttle_time)
            .docs_count(docs_count)
            .docs_deleted(docs_deleted);

        Ok(())
    }

    fn update_refresh_flush(
        builder: &mut NodeIndicesStatsBuilder,
        indices: &Value,
    ) -> Result<(), anyhow::Error> {
        let refresh_total: u64 = get_value_by_path(indices, "refresh.total")?;
        let refresh_total_time: u64 = get_value_by_path(indices, "refresh.total_time_in_millis")?;

        builder
            .refresh_total(refresh_total)
            .refresh_total_time(refresh_total_time)
            .refresh_avg_time_in_millis_per_request(get_avg_time_per_request(
                refresh_total_time,
                refresh_total,
            ));

        let flush_total: u64 = get_value_by_path(indices, "flush.total")?;
        let flush_total_time: u64 = get_value_by_path(indices, "flush.total_time_in_millis")?;

        builder
            .flush_total(flush_total)
            .flush_total_time(flush_total_time)
            .flush_avg_time_in_millis_per_request(get_avg_time_per_request(
                flush_total_time,
                flush_total,
            ));

        Ok(())
    }

    fn update_merge(
        builder: &mut NodeIndicesStatsBuilder,
        indices: &Value,
    ) -> Result<(), anyhow::Error> {
        let merges_current: u64 = get_value_by_path(indices, "merges.current")?;
        let merges_current_docs: u64 = get_value_by_path(indices, "merges.current_docs")?;
        let merges_current_size: u64 = get_value_by_path(indices, "merges.current_size_in_bytes")?;
        let merges_total: u64 = get_value_by_path(indices, "merges.total")?;
        let merges_total_time: u64 = get_value_by_path(indices, "merges.total_time_in_millis")?;
        let merges_total_size: u64 = get_value_by_path(indices, "merges.total_size_in_bytes")?;

        builder
            .merges_current(merges_current)
            .merges_current_docs(merges_current_docs)
            .merges_current_size(merges_current_size)
            .merges_total(merges_total)
            .merges_total_time(merges_total_time)
            .merges_total_size(merges_total_size);

        Ok(())
    }

    fn update_cache(
        builder: &mut NodeIndicesStatsBuilder,
        indices: &Value,
    ) -> Result<(), anyhow::Error> {
        let cache_field_evictions: u64 = get_value_by_path(indices, "fielddata.evictions")?;
        let cache_field_size: u64 = get_value_by_path(indices, "fielddata.memory_size_in_bytes")?;

        /* 2.x 부터 filter_cache 는 query_cache 로 이름이 바뀌었다. */
        let filter_cache: &str = if has_path(indices, "query_cache") {
            "query_cache"
        } else {
            "filter_cache"
        };

        let cache_filter_evictions: u64 =
            get_value_by_path(indices, &format!("{}.evictions", filter_cache))?;
        let cache_filter_size: u64 =
            get_value_by_path(indices, &format!("{}.memory_size_in_bytes", filter_cache))?;

        builder
            .cache_field_evictions(cache_field_evictions)
            .cache_field_size(cache_field_size)
            .cache_filter_evictions(cache_filter_evictions)
            .cache_filter_size(cache_filter_size);

        Ok(())
    }

    fn update_search(
        builder: &mut NodeIndicesStatsBuilder,
        indices: &Value,
        previous: &NodeIndicesStats,
    ) -> Result<(), anyhow::Error> {
        let query_total: u64 = get_value_by_path(indices, "search.query_total")?;
        let query_time: u64 = get_value_by_path(indices, "search.query_time_in_millis")?;
        let query_current: u64 = get_value_by_path(indices, "search.query_current")?;

        builder
            .search_query_delta(get_accumulated_delta(
                previous.search_query_delta(),
                previous.search_query_total(),
                query_total,
            ))
            .search_query_total(query_total)
            .search_query_time(query_time)
            .search_query_current(query_current)
            .search_query_avg_time_in_millis_per_request(get_avg_time_per_request(
                query_time,
                query_total,
            ));

        let fetch_total: u64 = get_value_by_path(indices, "search.fetch_total")?;
        let fetch_time: u64 = get_value_by_path(indices, "search.fetch_time_in_millis")?;
        let fetch_current: u64 = get_value_by_path(indices, "search.fetch_current")?;

        builder
            .search_fetch_delta(get_accumulated_delta(
                previous.search_fetch_delta(),
                previous.search_fetch_total(),
                fetch_total,
            ))
            .search_fetch_total(fetch_total)
            .search_fetch_time(fetch_time)
            .search_fetch_current(fetch_current)
            .search_fetch_avg_time_in_millis_per_request(get_avg_time_per_request(
                fetch_time,
                fetch_total,
            ));

        Ok(())
    }

    fn update_get(
        builder: &mut NodeIndicesStatsBuilder,
        indices: &Value,
        previous: &NodeIndicesStats,
    ) -> Result<(), anyhow::Error> {
        let get_total: u64 = get_value_by_path(indices, "get.total")?;
        let get_time: u64 = get_value_by_path(indices, "get.time_in_millis")?;
        let get_current: u64 = get_value_by_path(indices, "get.current")?;

        builder
            .get_total_delta(get_accumulated_delta(
                previous.get_total_delta(),
                previous.get_total(),
                get_total,
            ))
            .get_total(get_total)
            .get_time(get_time)
            .get_current(get_current)
            .get_total_avg_time_in_millis_per_request(get_avg_time_per_request(
                get_time, get_total,
            ));

        let exists_total: u64 = get_value_by_path(indices, "get.exists_total")?;
        let exists_time: u64 = get_value_by_path(indices, "get.exists_time_in_millis")?;

        builder
            .get_exists_delta(get_accumulated_delta(
                previous.get_exists_delta(),
                previous.get_exists_total(),
                exists_total,
            ))
            .get_exists_total(exists_total)
            .get_exists_time(exists_time)
            .get_exists_avg_time_in_millis_per_request(get_avg_time_per_request(
                exists_time,
                exists_total,
            ));

        let missing_total: u64 = get_value_by_path(indices, "get.missing_total")?;
        let missing_time: u64 = get_value_by_path(indices, "get.missing_time_in_millis")?;

        /* 기준값은 직전 missing delta 가 아니라 직전 missing total 이다. */
        builder
            .get_missing_delta(get_accumulated_delta(
                previous.get_missing_delta(),
                previous.get_missing_total(),
                missing_total,
            ))
            .get_missing_total(missing_total)
            .get_missing_time(missing_time)
            .get_missing_avg_time_in_millis_per_request(get_avg_time_per_request(
                missing_time,
                missing_total,
            ));

        Ok(())
    }

    fn update_indexing(
        builder: &mut NodeIndicesStatsBuilder,
        indices: &Value,
        previous: &NodeIndicesStats,
    ) -> Result<(), anyhow::Error> {
        let index_total: u64 = get_value_by_path(indices, "indexing.index_total")?;
        let index_time: u64 = get_value_by_path(indices, "indexing.index_time_in_millis")?;
        let index_current: u64 = get_value_by_path(indices, "indexing.index_current")?;

        builder
            .indexing_index_delta(get_accumulated_delta(
                previous.indexing_index_delta(),
                previous.indexing_index_total(),
                index_total,
            ))
            .indexing_index_total(index_total)
            .indexing_index_time(index_time)
            .indexing_index_current(index_current)
            .indexing_index_avg_time_in_millis_per_request(get_avg_time_per_request(
                index_time,
                index_total,
            ));

        let delete_total: u64 = get_value_by_path(indices, "indexing.delete_total")?;
        let delete_time: u64 = get_value_by_path(indices, "indexing.delete_time_in_millis")?;
        let delete_current: u64 = get_value_by_path(indices, "indexing.delete_current")?;

        builder
            .indexing_delete_delta(get_accumulated_delta(
                previous.indexing_delete_delta(),
                previous.indexing_delete_total(),
                delete_total,
            ))
            .indexing_delete_total(delete_total)
            .indexing_delete_time(delete_time)
            .indexing_delete_current(delete_current)
            .indexing_delete_avg_time_in_millis_per_request(get_avg_time_per_request(
                delete_time,
                delete_total,
            ));

        Ok(())
    }

    #[doc = "빌더로 새 스냅샷을 만들어 한번에 교체해주는 함수"]
    fn publish(&self, builder: &mut NodeIndicesStatsBuilder) -> Result<(), anyhow::Error> {
        let snapshot: NodeIndicesStats = builder
            .collected_at(Some(Utc::now()))
            .build()
            .map_err(|e| anyhow!("[NodeIndicesStatsServiceImpl->publish] {:?}", e))?;

        self.stats_cell.publish(snapshot);
        Ok(())
    }
}

#[async_trait]
impl<R, P> NodeIndicesStatsService for NodeIndicesStatsServiceImpl<R, P>
where
    R: EsRepository + Sync + Send,
    P: EsProcessMonitor + Sync + Send,
{
    #[doc = "노드 indices 통계를 수집해서 새 스냅샷으로 발행해주는 함수"]
    /// # Returns
    /// * Result<CollectOutcome, anyhow::Error> - 에러인 경우 기존 스냅샷은 그대로 유지된다.
    async fn collect_node_indices_stats(&self) -> Result<CollectOutcome, anyhow::Error> {
        /* Elasticsearch 가 기동된 상태에서만 수집한다. */
        if !self.process_monitor.is_elasticsearch_started().await {
            info!("Elasticsearch is not yet started, check back again later");
            return Ok(CollectOutcome::NotStarted);
        }

        let previous: Arc<NodeIndicesStats> = self.stats_cell.load();
        let mut builder: NodeIndicesStatsBuilder = NodeIndicesStatsBuilder::default();

        match self
            .extract_node_indices_stats(&mut builder, &previous)
            .await
        {
            Ok(CollectOutcome::Published) => {
                self.publish(&mut builder)?;
                Ok(CollectOutcome::Published)
            }
            Ok(outcome) => Ok(outcome),
            Err(e) if self.publish_partial_snapshot => {
                warn!(
                    "[NodeIndicesStatsServiceImpl->collect_node_indices_stats] failed to load node indices stats data, publishing the fields read so far: {:?}",
                    e
                );
                self.publish(&mut builder)?;
                Ok(CollectOutcome::PartiallyPublished)
            }
            Err(e) => Err(anyhow!(
                "[NodeIndicesStatsServiceImpl->collect_node_indices_stats] {:?}",
                e
            )),
        }
    }

    fn get_cluster_name(&self) -> String {
        self.elastic_obj.get_cluster_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct FakeEsRepository {
        responses: Mutex<VecDeque<Result<Value, anyhow::Error>>>,
        requested: Mutex<Vec<(Vec<String>, Vec<String>)>>,
    }

    impl FakeEsRepository {
        fn with_responses(responses: Vec<Result<Value, anyhow::Error>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EsRepository for FakeEsRepository {
        async fn get_node_stats(
            &self,
            node_ids: &[&str],
            metrics: &[&str],
        ) -> Result<Value, anyhow::Error> {
            self.requested.lock().unwrap().push((
                node_ids.iter().map(|s| s.to_string()).collect(),
                metrics.iter().map(|s| s.to_string()).collect(),
            ));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("no more responses")))
        }

        fn get_cluster_name(&self) -> String {
            String::from("test-cluster")
        }

        fn get_host_info(&self) -> String {
            String::from("127.0.0.1:9200")
        }
    }

    struct FakeProcessMonitor {
        started: bool,
    }

    #[async_trait]
    impl EsProcessMonitor for FakeProcessMonitor {
        async fn is_elasticsearch_started(&self) -> bool {
            self.started
        }
    }

    #[derive(Clone, Copy, Default)]
    struct Counters {
        refresh: (u64, u64),
        search_query: u64,
        search_fetch: u64,
        get: u64,
        get_exists: u64,
        get_missing: u64,
        indexing_index: u64,
        indexing_delete: u64,
    }

    fn node_stats_response(counters: Counters) -> Value {
        json!({
            "_nodes": { "total": 1, "successful": 1, "failed": 0 },
            "cluster_name": "test-cluster",
            "nodes": {
                "n1": {
                    "name": "node-1",
                    "indices": {
                        "docs": { "count": 1000, "deleted": 3 },
                        "store": { "size_in_bytes": 4096, "throttle_time_in_millis": 12 },
                        "indexing": {
                            "index_total": counters.indexing_index,
                            "index_time_in_millis": counters.indexing_index * 2,
                            "index_current": 1,
                            "delete_total": counters.indexing_delete,
                            "delete_time_in_millis": counters.indexing_delete * 3,
                            "delete_current": 0
                        },
                        "get": {
                            "total": counters.get,
                            "time_in_millis": counters.get * 4,
                            "exists_total": counters.get_exists,
                            "exists_time_in_millis": counters.get_exists * 2,
                            "missing_total": counters.get_missing,
                            "missing_time_in_millis": counters.get_missing,
                            "current": 2
                        },
                        "search": {
                            "query_total": counters.search_query,
                            "query_time_in_millis": counters.search_query * 5,
                            "query_current": 4,
                            "fetch_total": counters.search_fetch,
                            "fetch_time_in_millis": counters.search_fetch,
                            "fetch_current": 0
                        },
                        "merges": {
                            "current": 1,
                            "current_docs": 20,
                            "current_size_in_bytes": 2048,
                            "total": 9,
                            "total_time_in_millis": 900,
                            "total_size_in_bytes": 8192
                        },
                        "refresh": {
                            "total": counters.refresh.0,
                            "total_time_in_millis": counters.refresh.1
                        },
                        "flush": { "total": 0, "total_time_in_millis": 0 },
                        "query_cache": { "memory_size_in_bytes": 512, "evictions": 6 },
                        "fielddata": { "memory_size_in_bytes": 256, "evictions": 5 }
                    }
                }
            }
        })
    }

    fn build_service(
        responses: Vec<Result<Value, anyhow::Error>>,
        started: bool,
        publish_partial_snapshot: bool,
    ) -> (
        NodeIndicesStatsServiceImpl<FakeEsRepository, FakeProcessMonitor>,
        Arc<StatsSnapshotCell>,
        Arc<FakeEsRepository>,
    ) {
        let repo: Arc<FakeEsRepository> = Arc::new(FakeEsRepository::with_responses(responses));
        let cell: Arc<StatsSnapshotCell> = Arc::new(StatsSnapshotCell::default());
        let service = NodeIndicesStatsServiceImpl::new(
            Arc::clone(&repo),
            Arc::new(FakeProcessMonitor { started }),
            Arc::clone(&cell),
            publish_partial_snapshot,
        );
        (service, cell, repo)
    }

    #[tokio::test]
    async fn refresh_average_is_total_time_over_total() {
        let counters: Counters = Counters {
            refresh: (10, 500),
            ..Counters::default()
        };
        let (service, cell, repo) =
            build_service(vec![Ok(node_stats_response(counters))], true, false);

        let outcome: CollectOutcome = service.collect_node_indices_stats().await.unwrap();
        let stats: Arc<NodeIndicesStats> = cell.load();

        assert_eq!(outcome, CollectOutcome::Published);
        assert_eq!(stats.refresh_total(), 10);
        assert_eq!(stats.refresh_total_time(), 500);
        assert_eq!(stats.refresh_avg_time_in_millis_per_request(), 50.0);
        assert!(stats.collected_at().is_some());
        assert_eq!(
            repo.requested.lock().unwrap()[0],
            (vec![String::from("_local")], vec![String::from("indices")])
        );
    }

    #[tokio::test]
    async fn zero_counts_give_zero_averages() {
        let (service, cell, _repo) =
            build_service(vec![Ok(node_stats_response(Counters::default()))], true, false);

        service.collect_node_indices_stats().await.unwrap();
        let stats: Arc<NodeIndicesStats> = cell.load();

        for avg in [
            stats.refresh_avg_time_in_millis_per_request(),
            stats.flush_avg_time_in_millis_per_request(),
            stats.search_query_avg_time_in_millis_per_request(),
            stats.search_fetch_avg_time_in_millis_per_request(),
            stats.get_total_avg_time_in_millis_per_request(),
            stats.get_exists_avg_time_in_millis_per_request(),
            stats.get_missing_avg_time_in_millis_per_request(),
            stats.indexing_index_avg_time_in_millis_per_request(),
            stats.indexing_delete_avg_time_in_millis_per_request(),
        ] {
            assert_eq!(avg, 0.0);
        }
    }

    #[tokio::test]
    async fn copies_plain_gauges() {
        let counters: Counters = Counters {
            get: 8,
            indexing_index: 4,
            ..Counters::default()
        };
        let (service, cell, _repo) =
            build_service(vec![Ok(node_stats_response(counters))], true, false);

        service.collect_node_indices_stats().await.unwrap();
        let stats: Arc<NodeIndicesStats> = cell.load();

        assert_eq!(stats.store_size(), 4096);
        assert_eq!(stats.store_throttle_time(), 12);
        assert_eq!(stats.docs_count(), 1000);
        assert_eq!(stats.docs_deleted(), 3);
        assert_eq!(stats.merges_current(), 1);
        assert_eq!(stats.merges_current_docs(), 20);
        assert_eq!(stats.merges_current_size(), 2048);
        assert_eq!(stats.merges_total(), 9);
        assert_eq!(stats.merges_total_time(), 900);
        assert_eq!(stats.merges_total_size(), 8192);
        assert_eq!(stats.cache_field_evictions(), 5);
        assert_eq!(stats.cache_field_size(), 256);
        assert_eq!(stats.cache_filter_evictions(), 6);
        assert_eq!(stats.cache_filter_size(), 512);
        assert_eq!(stats.search_query_current(), 4);
        assert_eq!(stats.get_current(), 2);
        assert_eq!(stats.get_total_avg_time_in_millis_per_request(), 4.0);
        assert_eq!(stats.indexing_index_current(), 1);
        assert_eq!(stats.indexing_index_avg_time_in_millis_per_request(), 2.0);
    }

    #[tokio::test]
    async fn search_delta_grows_by_increase_between_cycles() {
        let first: Counters = Counters {
            search_query: 100,
            ..Counters::default()
        };
        let second: Counters = Counters {
            search_query: 150,
            ..Counters::default()
        };
        let (service, cell, _repo) = build_service(
            vec![
                Ok(node_stats_response(first)),
                Ok(node_stats_response(second)),
            ],
            true,
            false,
        );

        service.collect_node_indices_stats().await.unwrap();
        let delta_before: u64 = cell.load().search_query_delta();

        service.collect_node_indices_stats().await.unwrap();
        let stats: Arc<NodeIndicesStats> = cell.load();

        assert_eq!(stats.search_query_total(), 150);
        assert_eq!(stats.search_query_delta(), delta_before + 50);
    }

    #[tokio::test]
    async fn search_delta_is_fifty_from_a_zeroed_baseline() {
        let baseline: NodeIndicesStats = NodeIndicesStatsBuilder::default()
            .search_query_total(100)
            .build()
            .unwrap();
        let (service, cell, _repo) = build_service(
            vec![Ok(node_stats_response(Counters {
                search_query: 150,
                ..Counters::default()
            }))],
            true,
            false,
        );
        cell.publish(baseline);

        service.collect_node_indices_stats().await.unwrap();

        assert_eq!(cell.load().search_query_delta(), 50);
    }

    #[tokio::test]
    async fn every_delta_family_uses_its_previous_total() {
        let first: Counters = Counters {
            search_query: 10,
            search_fetch: 20,
            get: 30,
            get_exists: 25,
            get_missing: 5,
            indexing_index: 40,
            indexing_delete: 50,
            ..Counters::default()
        };
        let second: Counters = Counters {
            search_query: 11,
            search_fetch: 22,
            get: 33,
            get_exists: 29,
            get_missing: 9,
            indexing_index: 45,
            indexing_delete: 56,
            ..Counters::default()
        };
        let (service, cell, _repo) = build_service(
            vec![
                Ok(node_stats_response(first)),
                Ok(node_stats_response(second)),
            ],
            true,
            false,
        );

        service.collect_node_indices_stats().await.unwrap();
        let after_first: Arc<NodeIndicesStats> = cell.load();
        service.collect_node_indices_stats().await.unwrap();
        let after_second: Arc<NodeIndicesStats> = cell.load();

        assert_eq!(after_second.search_query_delta() - after_first.search_query_delta(), 1);
        assert_eq!(after_second.search_fetch_delta() - after_first.search_fetch_delta(), 2);
        assert_eq!(after_second.get_total_delta() - after_first.get_total_delta(), 3);
        assert_eq!(after_second.get_exists_delta() - after_first.get_exists_delta(), 4);
        assert_eq!(after_second.get_missing_delta() - after_first.get_missing_delta(), 4);
        assert_eq!(after_second.indexing_index_delta() - after_first.indexing_index_delta(), 5);
        assert_eq!(after_second.indexing_delete_delta() - after_first.indexing_delete_delta(), 6);
    }

    #[tokio::test]
    async fn get_missing_delta_is_not_self_referential() {
        /* delta 와 total 이 다른 기준 스냅샷이어야 기준값 버그가 드러난다. */
        let baseline: NodeIndicesStats = NodeIndicesStatsBuilder::default()
            .get_missing_total(100)
            .get_missing_delta(0)
            .build()
            .unwrap();
        let (service, cell, _repo) = build_service(
            vec![Ok(node_stats_response(Counters {
                get_missing: 105,
                ..Counters::default()
            }))],
            true,
            false,
        );
        cell.publish(baseline);

        service.collect_node_indices_stats().await.unwrap();

        assert_eq!(cell.load().get_missing_total(), 105);
        assert_eq!(cell.load().get_missing_delta(), 5);
    }

    #[tokio::test]
    async fn not_started_leaves_snapshot_untouched() {
        let (service, cell, repo) =
            build_service(vec![Ok(node_stats_response(Counters::default()))], false, false);
        let before: Arc<NodeIndicesStats> = cell.load();

        let outcome: CollectOutcome = service.collect_node_indices_stats().await.unwrap();

        assert_eq!(outcome, CollectOutcome::NotStarted);
        assert!(Arc::ptr_eq(&before, &cell.load()));
        assert!(repo.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_nodes_leave_snapshot_untouched() {
        let (service, cell, _repo) =
            build_service(vec![Ok(json!({ "nodes": {} }))], true, true);
        let before: Arc<NodeIndicesStats> = cell.load();

        let outcome: CollectOutcome = service.collect_node_indices_stats().await.unwrap();

        assert_eq!(outcome, CollectOutcome::NoNodeStats);
        assert!(Arc::ptr_eq(&before, &cell.load()));
    }

    #[tokio::test]
    async fn null_indices_leave_snapshot_untouched() {
        let (service, cell, _repo) = build_service(
            vec![Ok(json!({ "nodes": { "n1": { "name": "node-1", "indices": null } } }))],
            true,
            false,
        );
        let before: Arc<NodeIndicesStats> = cell.load();

        let outcome: CollectOutcome = service.collect_node_indices_stats().await.unwrap();

        assert_eq!(outcome, CollectOutcome::NoNodeStats);
        assert!(Arc::ptr_eq(&before, &cell.load()));
    }

    #[tokio::test]
    async fn extraction_failure_keeps_previous_snapshot_by_default() {
        let mut broken: Value = node_stats_response(Counters {
            refresh: (10, 500),
            ..Counters::default()
        });
        broken["nodes"]["n1"]["indices"]
            .as_object_mut()
            .unwrap()
            .remove("search");

        let (service, cell, _repo) = build_service(vec![Ok(broken)], true, false);
        let before: Arc<NodeIndicesStats> = cell.load();

        assert!(service.collect_node_indices_stats().await.is_err());
        assert!(Arc::ptr_eq(&before, &cell.load()));
    }

    #[tokio::test]
    async fn extraction_failure_publishes_partial_snapshot_when_enabled() {
        let mut broken: Value = node_stats_response(Counters {
            refresh: (10, 500),
            get: 7,
            ..Counters::default()
        });
        broken["nodes"]["n1"]["indices"]
            .as_object_mut()
            .unwrap()
            .remove("search");

        let (service, cell, _repo) = build_service(vec![Ok(broken)], true, true);

        let outcome: CollectOutcome = service.collect_node_indices_stats().await.unwrap();
        let stats: Arc<NodeIndicesStats> = cell.load();

        assert_eq!(outcome, CollectOutcome::PartiallyPublished);
        assert_eq!(stats.refresh_total(), 10);
        assert_eq!(stats.cache_filter_size(), 512);
        /* search 이후 항목은 채워지지 않는다. */
        assert_eq!(stats.get_total(), 0);
    }

    #[tokio::test]
    async fn transport_error_keeps_previous_snapshot() {
        let (service, cell, _repo) =
            build_service(vec![Err(anyhow!("connection refused"))], true, false);
        let before: Arc<NodeIndicesStats> = cell.load();

        assert!(service.collect_node_indices_stats().await.is_err());
        assert!(Arc::ptr_eq(&before, &cell.load()));
    }

    #[tokio::test]
    async fn filter_cache_is_read_on_old_clusters() {
        let mut old_cluster: Value = node_stats_response(Counters::default());
        let indices: &mut serde_json::Map<String, Value> =
            old_cluster["nodes"]["n1"]["indices"].as_object_mut().unwrap();
        indices.remove("query_cache");
        indices.insert(
            String::from("filter_cache"),
            json!({ "memory_size_in_bytes": 77, "evictions": 1 }),
        );
        indices["store"]
            .as_object_mut()
            .unwrap()
            .remove("throttle_time_in_millis");

        let (service, cell, _repo) = build_service(vec![Ok(old_cluster)], true, false);
        service.collect_node_indices_stats().await.unwrap();
        let stats: Arc<NodeIndicesStats> = cell.load();

        assert_eq!(stats.cache_filter_size(), 77);
        assert_eq!(stats.cache_filter_evictions(), 1);
        assert_eq!(stats.store_throttle_time(), 0);
    }
}
