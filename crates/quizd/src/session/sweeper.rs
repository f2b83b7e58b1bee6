//! Background removal of expired tests.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::SessionStore;

/// Default pause between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Run [`SessionStore::sweep`] every `every` until the returned task is aborted.
pub fn spawn_sweeper(store: Arc<SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing can have expired yet.
        interval.tick().await;

        loop {
            interval.tick().await;
            let removed = store.sweep().await;
            if removed > 0 {
                info!(removed, "swept expired tests");
            } else {
                debug!("sweep found no expired tests");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Question;

    #[tokio::test]
    async fn test_sweeper_removes_expired_records() {
        let store = Arc::new(SessionStore::new(Duration::from_millis(20)));
        let questions: Arc<[Question]> = vec![Question {
            id: 1,
            question: "q".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            answer: 0,
        }]
        .into();
        store.put("t1", questions).await;

        let handle = spawn_sweeper(Arc::clone(&store), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sweeper_leaves_store_alone_without_ttl() {
        let store = Arc::new(SessionStore::new(Duration::ZERO));
        let questions: Arc<[Question]> = vec![Question {
            id: 1,
            question: "q".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            answer: 0,
        }]
        .into();
        store.put("t1", questions).await;

        let handle = spawn_sweeper(Arc::clone(&store), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        assert_eq!(store.len().await, 1);
    }
}
