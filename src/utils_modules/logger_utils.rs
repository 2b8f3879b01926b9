use crate::common::*;

use crate::env_configuration::env_config::LOG_LEVEL;

const LOG_DIRECTORY: &str = "logs";

#[doc = "로그 한 줄의 포맷을 정의해주는 함수"]
fn log_line_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] [{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.file().unwrap_or("<unknown>"),
        record.line().unwrap_or(0),
        record.args()
    )
}

#[doc = "전역 로거설정 - 일 단위로 로그파일을 교체하고 표준출력에도 같이 남긴다."]
/// # Returns
/// * LoggerHandle - 프로그램이 끝날 때까지 살아있어야 한다.
pub fn set_global_logger() -> LoggerHandle {
    Logger::try_with_str(LOG_LEVEL.as_str())
        .and_then(|logger| {
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(LOG_DIRECTORY)
                        .basename("es_node_indices_monitor"),
                )
                .rotate(
                    Criterion::Age(Age::Day),
                    Naming::Timestamps,
                    Cleanup::KeepLogFiles(10),
                )
                .format_for_files(log_line_format)
                .format_for_stdout(log_line_format)
                .duplicate_to_stdout(Duplicate::All)
                .start()
        })
        .unwrap_or_else(|e| {
            panic!("[set_global_logger] Logger initialization failed: {:?}", e)
        })
}
