//! TTL Cleanup Task
//!
//! Background reaper that periodically removes expired cache entries. The
//! sweep bounds memory under load; read correctness never depends on it,
//! since reads check expiry lazily.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Handle to a running cleanup task.
///
/// `close` signals the task to stop. The signal is a watch channel send, so
/// calling `close` more than once is harmless.
pub struct ReaperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the cleanup task to stop.
    pub fn close(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Waits for the cleanup task to finish.
    #[allow(dead_code)]
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The sweep interval is chosen by the caller; the service uses half the
/// cache TTL so an entry is never stale for more than one extra half-TTL.
///
/// # Arguments
/// * `cache` - shared cache store to sweep
/// * `sweep_interval` - time between sweeps
pub fn spawn_cleanup_task<V>(
    cache: Arc<RwLock<CacheStore<V>>>,
    sweep_interval: Duration,
) -> ReaperHandle
where
    V: Clone + Send + Sync + 'static,
{
    let (shutdown, mut stopped) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!(interval_ms = sweep_interval.as_millis() as u64, "starting TTL cleanup task");

        let mut ticker = tokio::time::interval(sweep_interval);
        // The first tick of a tokio interval fires immediately; skip it so
        // the first sweep happens one full interval after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = {
                        let mut cache_guard = cache.write().await;
                        cache_guard.cleanup_expired()
                    };

                    if removed > 0 {
                        info!(removed, "TTL cleanup removed expired entries");
                    } else {
                        debug!("TTL cleanup found no expired entries");
                    }
                }
                _ = stopped.changed() => {
                    info!("TTL cleanup task stopped");
                    return;
                }
            }
        }
    });

    ReaperHandle { shutdown, task }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(RwLock::new(CacheStore::new(100, Duration::from_millis(50))));

        {
            let mut cache_guard = cache.write().await;
            cache_guard.insert("expire_soon".to_string(), "value".to_string());
        }

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(25));

        // Wait for the entry to expire and at least one sweep to run.
        tokio::time::sleep(Duration::from_millis(150)).await;

        {
            let cache_guard = cache.read().await;
            // len() does not lazily expire, so an empty cache proves the
            // sweep itself removed the entry.
            assert_eq!(cache_guard.len(), 0, "Expired entry should have been swept");
        }

        handle.close();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let cache = Arc::new(RwLock::new(CacheStore::new(100, Duration::from_secs(3600))));

        {
            let mut cache_guard = cache.write().await;
            cache_guard.insert("long_lived".to_string(), "value".to_string());
        }

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(25));

        tokio::time::sleep(Duration::from_millis(100)).await;

        {
            let mut cache_guard = cache.write().await;
            assert_eq!(cache_guard.get("long_lived"), Some("value".to_string()));
        }

        handle.close();
    }

    #[tokio::test]
    async fn test_cleanup_task_stops_on_close() {
        let cache: Arc<RwLock<CacheStore<String>>> =
            Arc::new(RwLock::new(CacheStore::new(100, Duration::from_secs(300))));

        let handle = spawn_cleanup_task(cache, Duration::from_millis(25));

        handle.close();

        tokio::time::timeout(Duration::from_secs(1), handle.join())
            .await
            .expect("Reaper should stop promptly after close");
    }

    #[tokio::test]
    async fn test_cleanup_task_double_close_does_not_panic() {
        let cache: Arc<RwLock<CacheStore<String>>> =
            Arc::new(RwLock::new(CacheStore::new(100, Duration::from_secs(300))));

        let handle = spawn_cleanup_task(cache, Duration::from_millis(25));

        handle.close();
        handle.close();

        tokio::time::timeout(Duration::from_secs(1), handle.join())
            .await
            .expect("Reaper should stop after double close");
    }
}
