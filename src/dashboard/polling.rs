use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A repeating task: runs once immediately, then once per elapsed period until
/// stopped. Dropping the handle stops it as well; a run already in progress
/// is allowed to finish.
pub struct PollingHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollingHandle {
    pub fn spawn<F, Fut>(period: Duration, mut run: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop, mut stopped) = watch::channel(false);
        // interval() panics on a zero period
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = stopped.changed() => break,
                    _ = ticker.tick() => run().await,
                }
            }
            tracing::debug!("polling stopped");
        });
        Self { stop, task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop polling and wait for the task to wind down.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "polling task ended abnormally");
        }
    }
}
