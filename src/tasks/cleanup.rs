//! Expired Cache Sweep
//!
//! Background task that periodically deletes expired images from the cache
//! directory. Expired files are already ignored by lookups; the sweep only
//! reclaims disk space.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::ImageCache;

/// Spawns a background task that periodically removes expired cache files.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs. Directory scans happen on the blocking pool.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = ImageCache::new("cache", Duration::from_secs(604_800));
/// let cleanup_handle = spawn_cleanup_task(cache, 3600);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: ImageCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let sweep = cache.clone();
            match tokio::task::spawn_blocking(move || sweep.cleanup_expired()).await {
                Ok(0) => debug!("Cache sweep: no expired files found"),
                Ok(removed) => info!("Cache sweep: removed {} expired files", removed),
                Err(e) => warn!("Cache sweep failed: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheKey;
    use std::fs;
    use std::time::SystemTime;
    use tempfile::TempDir;

    const WEEK: Duration = Duration::from_secs(604_800);

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_files() {
        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(dir.path(), WEEK);
        let key = CacheKey::new("expired", "1");
        let path = cache.put(&key, b"old").unwrap();
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::now() - WEEK * 2)
            .unwrap();

        let handle = spawn_cleanup_task(cache, 1);
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert!(!path.exists(), "Expired file should have been swept");
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_fresh_files() {
        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(dir.path(), WEEK);
        let key = CacheKey::new("fresh", "1");
        cache.put(&key, b"new").unwrap();

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.get(&key).unwrap(), b"new");
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let dir = TempDir::new().unwrap();
        let handle = spawn_cleanup_task(ImageCache::new(dir.path(), WEEK), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
