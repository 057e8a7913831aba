use std::{future::Future, sync::Arc};

use tokio::sync::Semaphore;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub max_inflight: usize,
}

impl SchedulerConfig {
    pub fn new(max_inflight: usize) -> Self {
        Self {
            max_inflight: max_inflight.max(1),
        }
    }
}

/// Runs one job per item with at most `max_inflight` jobs running at once.
/// Returns only after every spawned job has finished; a job that fails does
/// not affect the others.
pub async fn schedule<T, F, Fut>(items: impl IntoIterator<Item = T>, cfg: SchedulerConfig, mut make_job: F)
where
    T: Send + 'static,
    F: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let sem = Arc::new(Semaphore::new(cfg.max_inflight));
    let mut handles = Vec::new();
    for item in items {
        let permit = sem.clone().acquire_owned().await.expect("Semaphore closed");
        let fut = make_job(item);
        let handle = tokio::spawn(async move {
            fut.await;
            drop(permit);
        });
        handles.push(handle);
    }
    for h in handles {
        let _ = h.await;
    }
}
