#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /* 다음 스케줄을 기다리는 중 */
    Idle,
    /* 수집 사이클 진행 중 */
    Collecting,
}
