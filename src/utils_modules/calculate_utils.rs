use crate::common::*;

#[doc = "요청 1건당 평균 소요시간(ms)을 구해주는 함수 - 요청 수가 0이면 0.0"]
/// # Arguments
/// * `total_time_in_millis` - 누적 소요시간
/// * `total_count`          - 누적 요청 수
///
/// # Returns
/// * f64
pub fn get_avg_time_per_request(total_time_in_millis: u64, total_count: u64) -> f64 {
    if total_count == 0 {
        return 0.0;
    }

    total_time_in_millis as f64 / total_count as f64
}

#[doc = "이전 수집 이후 증가분을 누적 delta 에 더해주는 함수"]
/// # Arguments
/// * `prev_delta` - 직전 스냅샷의 누적 delta
/// * `prev_total` - 직전 스냅샷의 누적 카운트
/// * `cur_total`  - 이번 수집의 누적 카운트
///
/// # Returns
/// * u64
///
/// 카운트가 줄어든 경우(노드 재시작) 카운터가 0부터 다시 시작한 것으로 보고 `cur_total` 을 증가분으로 사용한다.
pub fn get_accumulated_delta(prev_delta: u64, prev_total: u64, cur_total: u64) -> u64 {
    let increment: u64 = match cur_total.checked_sub(prev_total) {
        Some(increment) => increment,
        None => {
            warn!(
                "[get_accumulated_delta] counter went backwards ({} -> {}), treating it as a reset",
                prev_total, cur_total
            );
            cur_total
        }
    };

    prev_delta.saturating_add(increment)
}
