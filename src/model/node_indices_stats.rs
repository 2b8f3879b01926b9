use crate::common::*;

/// One point-in-time view of a node's index statistics.
///
/// A published value is never mutated; every poll cycle builds a fresh one through
/// [`NodeIndicesStatsBuilder`] starting from all zeros.
///
/// `*_avg_time_in_millis_per_request` fields are `time / total` and stay `0.0` when the
/// total is zero. `*_delta` fields accumulate the growth of their total since the process
/// started.
#[derive(Debug, Clone, Default, PartialEq, Builder, CopyGetters)]
#[builder(default)]
#[getset(get_copy = "pub")]
pub struct NodeIndicesStats {
    /* store / docs */
    store_size: u64,
    store_throttle_time: u64,
    docs_count: u64,
    docs_deleted: u64,

    /* refresh / flush */
    refresh_total: u64,
    refresh_total_time: u64,
    refresh_avg_time_in_millis_per_request: f64,
    flush_total: u64,
    flush_total_time: u64,
    flush_avg_time_in_millis_per_request: f64,

    /* merges */
    merges_current: u64,
    merges_current_docs: u64,
    merges_current_size: u64,
    merges_total: u64,
    merges_total_time: u64,
    merges_total_size: u64,

    /* field data / filter cache */
    cache_field_evictions: u64,
    cache_field_size: u64,
    cache_filter_evictions: u64,
    cache_filter_size: u64,

    /* search */
    search_query_total: u64,
    search_query_time: u64,
    search_query_current: u64,
    search_query_avg_time_in_millis_per_request: f64,
    search_query_delta: u64,
    search_fetch_total: u64,
    search_fetch_time: u64,
    search_fetch_current: u64,
    search_fetch_avg_time_in_millis_per_request: f64,
    search_fetch_delta: u64,

    /* get */
    get_total: u64,
    get_time: u64,
    get_current: u64,
    get_total_avg_time_in_millis_per_request: f64,
    get_total_delta: u64,
    get_exists_total: u64,
    get_exists_time: u64,
    get_exists_avg_time_in_millis_per_request: f64,
    get_exists_delta: u64,
    get_missing_total: u64,
    get_missing_time: u64,
    get_missing_avg_time_in_millis_per_request: f64,
    get_missing_delta: u64,

    /* indexing */
    indexing_index_total: u64,
    indexing_index_time: u64,
    indexing_index_current: u64,
    indexing_index_avg_time_in_millis_per_request: f64,
    indexing_index_delta: u64,
    indexing_delete_total: u64,
    indexing_delete_time: u64,
    indexing_delete_current: u64,
    indexing_delete_avg_time_in_millis_per_request: f64,
    indexing_delete_delta: u64,

    /* 스냅샷이 발행된 시각 - 초기 스냅샷은 None */
    collected_at: Option<DateTime<Utc>>,
}
