use crate::common::*;

use crate::model::{node_indices_stats::*, stats_snapshot_cell::*};

use crate::enums::metric_kind::*;

/// One exported metric: its name, help text, type and how to read it from a snapshot.
#[derive(Clone, Copy)]
pub struct MetricDefinition {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
    pub read: fn(&NodeIndicesStats) -> f64,
}

const fn gauge(
    name: &'static str,
    help: &'static str,
    read: fn(&NodeIndicesStats) -> f64,
) -> MetricDefinition {
    MetricDefinition {
        name,
        help,
        kind: MetricKind::Gauge,
        read,
    }
}

const fn counter(
    name: &'static str,
    help: &'static str,
    read: fn(&NodeIndicesStats) -> f64,
) -> MetricDefinition {
    MetricDefinition {
        name,
        help,
        kind: MetricKind::Counter,
        read,
    }
}

pub static METRIC_DEFINITIONS: [MetricDefinition; 54] = [
    /* store / docs */
    gauge("store_size", "Store size in bytes", |s| s.store_size() as f64),
    gauge("store_throttle_time", "Store throttle time in milliseconds", |s| s.store_throttle_time() as f64),
    gauge("docs_count", "Number of documents", |s| s.docs_count() as f64),
    gauge("docs_deleted", "Number of deleted documents", |s| s.docs_deleted() as f64),
    /* refresh / flush */
    gauge("refresh_total", "Total refresh operations", |s| s.refresh_total() as f64),
    gauge("refresh_total_time", "Total refresh time in milliseconds", |s| s.refresh_total_time() as f64),
    gauge("refresh_avg_time_in_millis_per_request", "Average refresh time in milliseconds", |s| s.refresh_avg_time_in_millis_per_request()),
    gauge("flush_total", "Total flush operations", |s| s.flush_total() as f64),
    gauge("flush_total_time", "Total flush time in milliseconds", |s| s.flush_total_time() as f64),
    gauge("flush_avg_time_in_millis_per_request", "Average flush time in milliseconds", |s| s.flush_avg_time_in_millis_per_request()),
    /* merges */
    gauge("merges_current", "Merges in flight", |s| s.merges_current() as f64),
    gauge("merges_current_docs", "Documents in in-flight merges", |s| s.merges_current_docs() as f64),
    gauge("merges_current_size", "Bytes in in-flight merges", |s| s.merges_current_size() as f64),
    gauge("merges_total", "Total merges", |s| s.merges_total() as f64),
    gauge("merges_total_time", "Total merge time in milliseconds", |s| s.merges_total_time() as f64),
    gauge("merges_total_size", "Total merged bytes", |s| s.merges_total_size() as f64),
    /* caches */
    gauge("cache_field_evictions", "Field data cache evictions", |s| s.cache_field_evictions() as f64),
    gauge("cache_field_size", "Field data cache size in bytes", |s| s.cache_field_size() as f64),
    gauge("cache_filter_evictions", "Filter cache evictions", |s| s.cache_filter_evictions() as f64),
    gauge("cache_filter_size", "Filter cache size in bytes", |s| s.cache_filter_size() as f64),
    /* search */
    gauge("search_query_total", "Total search queries", |s| s.search_query_total() as f64),
    gauge("search_query_time", "Total search query time in milliseconds", |s| s.search_query_time() as f64),
    gauge("search_query_current", "Search queries in flight", |s| s.search_query_current() as f64),
    gauge("search_query_avg_time_in_millis_per_request", "Average search query time in milliseconds", |s| s.search_query_avg_time_in_millis_per_request()),
    counter("search_query_delta", "Search queries since the monitor started", |s| s.search_query_delta() as f64),
    gauge("search_fetch_total", "Total search fetches", |s| s.search_fetch_total() as f64),
    gauge("search_fetch_time", "Total search fetch time in milliseconds", |s| s.search_fetch_time() as f64),
    gauge("search_fetch_current", "Search fetches in flight", |s| s.search_fetch_current() as f64),
    gauge("search_fetch_avg_time_in_millis_per_request", "Average search fetch time in milliseconds", |s| s.search_fetch_avg_time_in_millis_per_request()),
    counter("search_fetch_delta", "Search fetches since the monitor started", |s| s.search_fetch_delta() as f64),
    /* get */
    gauge("get_total", "Total get requests", |s| s.get_total() as f64),
    gauge("get_time", "Total get time in milliseconds", |s| s.get_time() as f64),
    gauge("get_current", "Get requests in flight", |s| s.get_current() as f64),
    gauge("total_avg_time_in_millis_per_request", "Average get time in milliseconds", |s| s.get_total_avg_time_in_millis_per_request()),
    counter("get_total_delta", "Get requests since the monitor started", |s| s.get_total_delta() as f64),
    gauge("get_exists_total", "Total get requests that found a document", |s| s.get_exists_total() as f64),
    gauge("get_exists_time", "Total time of get requests that found a document", |s| s.get_exists_time() as f64),
    gauge("exists_avg_time_in_millis_per_request", "Average time of get requests that found a document", |s| s.get_exists_avg_time_in_millis_per_request()),
    counter("get_exists_delta", "Found-document get requests since the monitor started", |s| s.get_exists_delta() as f64),
    gauge("get_missing_total", "Total get requests that missed", |s| s.get_missing_total() as f64),
    gauge("get_missing_time", "Total time of get requests that missed", |s| s.get_missing_time() as f64),
    gauge("missing_avg_time_in_millis_per_request", "Average time of get requests that missed", |s| s.get_missing_avg_time_in_millis_per_request()),
    counter("get_missing_delta", "Missed get requests since the monitor started", |s| s.get_missing_delta() as f64),
    /* indexing */
    gauge("indexing_index_total", "Total index operations", |s| s.indexing_index_total() as f64),
    gauge("indexing_index_time_in_millis", "Total indexing time in milliseconds", |s| s.indexing_index_time() as f64),
    gauge("indexing_index_current", "Index operations in flight", |s| s.indexing_index_current() as f64),
    gauge("indexing_avg_time_in_millis_per_request", "Average indexing time in milliseconds", |s| s.indexing_index_avg_time_in_millis_per_request()),
    counter("indexing_index_delta", "Index operations since the monitor started", |s| s.indexing_index_delta() as f64),
    gauge("indexing_delete_total", "Total delete operations", |s| s.indexing_delete_total() as f64),
    gauge("indexing_delete_time", "Total delete time in milliseconds", |s| s.indexing_delete_time() as f64),
    gauge("indexing_delete_current", "Delete operations in flight", |s| s.indexing_delete_current() as f64),
    gauge("indexing_delete_avg_time_in_millis_per_request", "Average delete time in milliseconds", |s| s.indexing_delete_avg_time_in_millis_per_request()),
    counter("indexing_delete_delta", "Delete operations since the monitor started", |s| s.indexing_delete_delta() as f64),
    /* 0 until the first snapshot is published */
    gauge("last_collected_timestamp_seconds", "Unix time of the last published snapshot", |s| {
        s.collected_at()
            .map_or(0.0, |at| at.timestamp_millis() as f64 / 1000.0)
    }),
];

impl MetricDefinition {
    fn to_metric_family(&self, desc: &Desc, stats: &NodeIndicesStats) -> MetricFamily {
        let value: f64 = (self.read)(stats);
        let mut metric: prometheus::proto::Metric = prometheus::proto::Metric::default();

        match self.kind {
            MetricKind::Gauge => {
                let mut gauge: prometheus::proto::Gauge = prometheus::proto::Gauge::default();
                gauge.set_value(value);
                metric.set_gauge(gauge);
            }
            MetricKind::Counter => {
                let mut counter: prometheus::proto::Counter = prometheus::proto::Counter::default();
                counter.set_value(value);
                metric.set_counter(counter);
            }
        }

        let mut family: MetricFamily = MetricFamily::default();
        family.set_name(desc.fq_name.clone());
        family.set_help(desc.help.clone());
        family.set_field_type(self.kind.metric_type());
        family.mut_metric().push(metric);
        family
    }
}

/// Pull-side view of the published snapshot for a `prometheus::Registry`.
///
/// Every gather loads the cell once, so all metrics of one scrape come from the same
/// snapshot generation.
#[derive(Debug, Clone)]
pub struct NodeIndicesStatsReporter {
    stats_cell: Arc<StatsSnapshotCell>,
    descs: Vec<Desc>,
}

impl NodeIndicesStatsReporter {
    #[doc = "지표 테이블 전체의 Desc 를 만들어 reporter 를 생성해주는 함수"]
    /// # Arguments
    /// * `stats_cell` - 수집기와 공유하는 스냅샷 셀
    /// * `namespace`  - 지표 이름 앞에 붙일 prefix (없으면 그대로)
    ///
    /// # Returns
    /// * Result<Self, anyhow::Error>
    pub fn new(
        stats_cell: Arc<StatsSnapshotCell>,
        namespace: Option<&str>,
    ) -> Result<Self, anyhow::Error> {
        let descs: Vec<Desc> = METRIC_DEFINITIONS
            .iter()
            .map(|definition| {
                Desc::new(
                    Self::fq_name(namespace, definition.name),
                    definition.help.to_string(),
                    vec![],
                    HashMap::new(),
                )
                .map_err(|e| {
                    anyhow!(
                        "[NodeIndicesStatsReporter::new] invalid metric '{}': {:?}",
                        definition.name,
                        e
                    )
                })
            })
            .collect::<Result<Vec<Desc>, anyhow::Error>>()?;

        Ok(Self { stats_cell, descs })
    }

    fn fq_name(namespace: Option<&str>, name: &str) -> String {
        match namespace.filter(|ns| !ns.is_empty()) {
            Some(ns) => format!("{}_{}", ns, name),
            None => name.to_string(),
        }
    }

    #[doc = "registry 에 한번만 등록해주는 함수 - 이후 값은 gather 할 때마다 스냅샷에서 읽는다."]
    pub fn register(self, registry: &Registry) -> Result<(), anyhow::Error> {
        registry
            .register(Box::new(self))
            .map_err(|e| anyhow!("[NodeIndicesStatsReporter::register] {:?}", e))
    }
}

impl Collector for NodeIndicesStatsReporter {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let stats: Arc<NodeIndicesStats> = self.stats_cell.load();

        METRIC_DEFINITIONS
            .iter()
            .zip(self.descs.iter())
            .map(|(definition, desc)| definition.to_metric_family(desc, &stats))
            .collect()
    }
}
