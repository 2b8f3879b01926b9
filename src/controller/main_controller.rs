use crate::common::*;

use crate::traits::service::polling_task_trait::*;

#[derive(Debug, new)]
pub struct MainController<T: PollingTask> {
    polling_task: Arc<T>,
}

impl<T> MainController<T>
where
    T: PollingTask + Send + Sync + 'static,
{
    #[doc = "Function that drives the polling task on its fixed interval until the process stops."]
    pub async fn main_task(&self) -> anyhow::Result<()> {
        self.run_cycles(None).await
    }

    #[doc = "Function that runs `max_cycles` poll cycles, or forever when it is None."]
    /// # Arguments
    /// * `max_cycles` - 실행할 사이클 수
    ///
    /// # Returns
    /// * Result<(), anyhow::Error>
    pub async fn run_cycles(&self, max_cycles: Option<u64>) -> anyhow::Result<()> {
        let task_name: &str = self.polling_task.get_name();
        let period: Duration = self.polling_task.get_interval();

        if period.is_zero() {
            return Err(anyhow!(
                "[MainController->run_cycles] '{}' has a zero poll interval",
                task_name
            ));
        }

        info!(
            "[{}] polling started - interval: {}ms",
            task_name,
            period.as_millis()
        );

        /* 사이클이 interval 보다 오래 걸리면 밀린 tick 을 몰아서 실행하지 않고 뒤로 미룬다. */
        let mut ticker: tokio::time::Interval = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut cycles: u64 = 0;

        while max_cycles.map_or(true, |max| cycles < max) {
            ticker.tick().await;
            self.polling_task.execute().await;
            cycles += 1;
        }

        info!("[{}] polling stopped after {} cycles", task_name, cycles);

        Ok(())
    }
}
