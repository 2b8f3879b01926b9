pub mod collect_outcome;
pub mod metric_kind;
pub mod task_state;
