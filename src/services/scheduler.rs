//! Scheduler de tareas periódicas
//! 
//! Cada job corre en su propia tarea de tokio con un intervalo fijo. El primer
//! tick llega después de un periodo completo y los ticks perdidos se saltan.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

pub fn spawn_periodic<F, Fut, T>(name: &'static str, period: Duration, mut job: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Display + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("⏱️ Job '{}' programado cada {:?}", name, period);

        loop {
            ticker.tick().await;
            let outcome = job().await;
            debug!("⏱️ [{}] {}", name, outcome);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_run_waits_one_period() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let handle = spawn_periodic("test", Duration::from_secs(30), move || {
            let counter = counter.clone();
            async move { counter.fetch_add(1, Ordering::SeqCst) }
        });

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(65)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);

        handle.abort();
    }
}
