/*
Author      : Seunghwan Shin
Create date : 2026-10-19
Description : Elasticsearch 로컬 노드의 indices 통계를 주기적으로 수집해서 metrics registry 로 노출해주는 서비스

History     : 2026-10-19 Seunghwan Shin       # [v.1.0.0] first create
                                                1) _nodes/_local/stats/indices 수집 및 평균/누적 delta 계산
                                                2) 스냅샷 atomic swap 발행
                                                3) Prometheus /metrics, /healthz endpoint 추가
*/
mod common;
use common::*;

mod controller;
use controller::{main_controller::*, metrics_controller::*};

mod utils_modules;
use utils_modules::logger_utils::*;

mod service;
use service::{
    node_indices_monitor_task::*, node_indices_stats_reporter::*, node_indices_stats_service::*,
};

mod model;
use model::{
    configs::{config::*, metrics_config::*, monitor_config::*, target_elastic_config::*},
    stats_snapshot_cell::*,
};

mod repository;
use repository::{es_process_monitor::*, es_repository::*};

mod env_configuration;

mod traits;

mod enums;

type StatsService = NodeIndicesStatsServiceImpl<EsRepositoryImpl, EsProcessMonitorImpl>;

#[tokio::main]
async fn main() {
    /* config 설정 전역 적용 */
    dotenv().ok();

    /* 전역 로거설정 - handle 이 drop 되면 파일 로그가 flush 되지 않는다. */
    let _logger_handle: LoggerHandle = set_global_logger();

    info!("Start Elasticsearch Node Indices Monitoring Program");

    let target_es_config: Arc<TargetElasticConfig> = get_target_es_config_info();
    let monitor_config: Arc<MonitorConfig> = get_monitor_config_info();
    let metrics_config: Arc<MetricsConfig> = get_metrics_config_info();

    let es_repository: EsRepositoryImpl = EsRepositoryImpl::new(
        target_es_config.cluster_name(),
        target_es_config.host(),
        target_es_config.es_id(),
        target_es_config.es_pw(),
        *target_es_config.timeout_sec(),
    )
    .unwrap_or_else(|e| {
        error!(
            "[main()] Unable to retrieve 'Elasticsearch' connection information.: {:?}",
            e
        );
        panic!(
            "[main()] Unable to retrieve 'Elasticsearch' connection information.: {:?}",
            e
        )
    });

    let process_monitor: EsProcessMonitorImpl = EsProcessMonitorImpl::new(
        target_es_config.host(),
        target_es_config.es_id(),
        target_es_config.es_pw(),
    )
    .unwrap_or_else(|e| {
        error!("[main()] Unable to create the liveness client: {:?}", e);
        panic!("[main()] Unable to create the liveness client: {:?}", e)
    });

    /* 수집기와 reporter 가 공유하는 스냅샷 */
    let stats_cell: Arc<StatsSnapshotCell> = Arc::new(StatsSnapshotCell::default());
    let registry: Arc<Registry> = Arc::new(Registry::new());

    NodeIndicesStatsReporter::new(Arc::clone(&stats_cell), metrics_config.namespace.as_deref())
        .and_then(|reporter| reporter.register(&registry))
        .unwrap_or_else(|e| {
            error!("[main()] Unable to register node indices metrics: {:?}", e);
            panic!("[main()] Unable to register node indices metrics: {:?}", e)
        });

    /* Dependency Injection(DI) */
    let stats_service: Arc<StatsService> = Arc::new(NodeIndicesStatsServiceImpl::new(
        Arc::new(es_repository),
        Arc::new(process_monitor),
        Arc::clone(&stats_cell),
        monitor_config.publish_partial_snapshot,
    ));

    let monitor_task: Arc<NodeIndicesMonitorTask<StatsService>> = Arc::new(
        NodeIndicesMonitorTask::new(
            stats_service,
            Duration::from_millis(monitor_config.poll_interval_ms),
        ),
    );

    let metrics_server: Option<MetricsController> = if metrics_config.enabled {
        let listen_addr: SocketAddr =
            metrics_config.listen_addr.parse().unwrap_or_else(|e| {
                error!(
                    "[main()] Invalid metrics listen address '{}': {:?}",
                    metrics_config.listen_addr, e
                );
                panic!(
                    "[main()] Invalid metrics listen address '{}': {:?}",
                    metrics_config.listen_addr, e
                )
            });

        let server: MetricsController =
            MetricsController::bind(listen_addr, Arc::clone(&registry))
                .await
                .unwrap_or_else(|e| {
                    error!("[main()] Unable to start the metrics endpoint: {:?}", e);
                    panic!("[main()] Unable to start the metrics endpoint: {:?}", e)
                });

        Some(server)
    } else {
        info!("[main()] metrics endpoint disabled");
        None
    };

    let controller: MainController<NodeIndicesMonitorTask<StatsService>> =
        MainController::new(monitor_task);

    let polling: tokio::task::JoinHandle<()> = tokio::spawn(async move {
        if let Err(e) = controller.main_task().await {
            error!("[main] controller error: {:?}", e);
        }
    });

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("[main] Failed to listen for Ctrl+C signal: {:?}", e);
    }

    info!("Shutting down...");

    polling.abort();

    if let Some(server) = metrics_server {
        if let Err(e) = server.shutdown().await {
            warn!("[main] metrics endpoint did not stop cleanly: {:?}", e);
        }
    }
}
