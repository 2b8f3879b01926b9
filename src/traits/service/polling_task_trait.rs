use crate::common::*;

use crate::enums::task_state::*;

#[async_trait]
pub trait PollingTask {
    fn get_name(&self) -> &str;
    fn get_interval(&self) -> Duration;
    fn get_state(&self) -> TaskState;
    async fn execute(&self);
}
