//! Background consumer applying click increments.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::errors::StoreError;
use crate::domain::store::Store;

/// Retries after the first failed increment of a single click.
const MAX_RETRIES: usize = 3;

/// Consumes click events until every sender is dropped.
///
/// At most `concurrency` increments run at once. Each one goes through the
/// store's atomic [`Store::increment_clicks`], retried with jittered
/// exponential backoff on backend failures. Failures end here: they are
/// logged and counted, never reported to whoever resolved the code.
///
/// Returns once the channel is closed and all in-flight increments finished.
pub async fn run_click_worker<S>(
    mut rx: mpsc::Receiver<ClickEvent>,
    store: Arc<S>,
    concurrency: usize,
) where
    S: Store + ?Sized + 'static,
{
    let limiter = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = limiter.clone().acquire_owned().await else {
            break;
        };

        let store = store.clone();
        in_flight.spawn(async move {
            record_click(store.as_ref(), &event).await;
            drop(permit);
        });

        while let Some(joined) = in_flight.try_join_next() {
            log_join_error(joined);
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        log_join_error(joined);
    }

    info!("Click worker stopped");
}

/// Applies one increment, retrying transient backend errors.
async fn record_click<S>(store: &S, event: &ClickEvent)
where
    S: Store + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_millis(500))
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::spawn(
        strategy,
        move || store.increment_clicks(&event.code),
        |e: &StoreError| matches!(e, StoreError::Backend(_)),
    )
    .await;

    match result {
        Ok(()) => debug!(code = %event.code, "Click recorded"),
        Err(StoreError::NotFound) => {
            counter!("click_increment_failures_total").increment(1);
            warn!(code = %event.code, "Click for unknown code discarded");
        }
        Err(e) => {
            counter!("click_increment_failures_total").increment(1);
            error!(code = %event.code, error = %e, "Failed to increment clicks");
        }
    }
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Click increment task failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::MockStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_worker_increments_each_event() {
        let mut mock_store = MockStore::new();
        mock_store
            .expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(3)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(10);
        for _ in 0..3 {
            tx.send(ClickEvent::new("abc123")).await.unwrap();
        }
        drop(tx);

        run_click_worker(rx, Arc::new(mock_store), 2).await;
    }

    #[tokio::test]
    async fn test_worker_retries_backend_errors() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let seen = attempts.clone();

        let mut mock_store = MockStore::new();
        mock_store.expect_increment_clicks().returning(move |_| {
            if seen.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(StoreError::backend(anyhow::anyhow!("connection reset")))
            } else {
                Ok(())
            }
        });

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new("retry")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock_store), 1).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_max_retries() {
        let mut mock_store = MockStore::new();
        mock_store
            .expect_increment_clicks()
            .times(MAX_RETRIES + 1)
            .returning(|_| Err(StoreError::backend(anyhow::anyhow!("database down"))));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new("down")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock_store), 1).await;
    }

    #[tokio::test]
    async fn test_worker_does_not_retry_unknown_code() {
        let mut mock_store = MockStore::new();
        mock_store
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let (tx, rx) = mpsc::channel(10);
        tx.send(ClickEvent::new("gone")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock_store), 1).await;
    }
}
