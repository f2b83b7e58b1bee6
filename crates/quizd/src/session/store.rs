//! In-memory test-attempt store with optional expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::bank::Question;

/// A stored test attempt. Immutable once inserted.
#[derive(Debug, Clone)]
struct SessionRecord {
    questions: Arc<[Question]>,
    created_at: Instant,
    /// `None` when the store has no ttl.
    expires_at: Option<Instant>,
}

impl SessionRecord {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|exp| now < exp)
    }
}

/// Maps test ids to the scored question set handed out for them.
///
/// Lookups share a read lock; inserts and sweeps take the write lock.
/// Expired records stay invisible to [`get`](Self::get) until [`sweep`](Self::sweep)
/// physically removes them.
#[derive(Debug)]
pub struct SessionStore {
    records: RwLock<HashMap<String, SessionRecord>>,
    ttl: Option<Duration>,
}

impl SessionStore {
    /// Create a store. A zero `ttl` disables expiry.
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl: (!ttl.is_zero()).then_some(ttl),
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Insert or overwrite the record for `id`.
    pub async fn put(&self, id: impl Into<String>, questions: Arc<[Question]>) {
        self.put_at(id, questions, Instant::now()).await;
    }

    pub async fn put_at(&self, id: impl Into<String>, questions: Arc<[Question]>, now: Instant) {
        let record = self.new_record(questions, now);
        let mut records = self.records.write().await;
        records.insert(id.into(), record);
    }

    /// Insert under a freshly generated id that no stored record uses yet.
    ///
    /// `generate` is called until it yields a vacant id; the check and the
    /// insert happen under one write lock.
    pub async fn insert_unique<F>(&self, questions: Arc<[Question]>, mut generate: F) -> String
    where
        F: FnMut() -> String,
    {
        let record = self.new_record(questions, Instant::now());
        let mut records = self.records.write().await;
        let mut id = generate();
        while records.contains_key(&id) {
            debug!(test_id = %id, "test id collision, regenerating");
            id = generate();
        }
        records.insert(id.clone(), record);
        id
    }

    /// Look up a live record. Unknown and expired ids both yield `None`.
    pub async fn get(&self, id: &str) -> Option<Arc<[Question]>> {
        self.get_at(id, Instant::now()).await
    }

    pub async fn get_at(&self, id: &str, now: Instant) -> Option<Arc<[Question]>> {
        let records = self.records.read().await;
        records
            .get(id)
            .filter(|record| record.is_live(now))
            .map(|record| Arc::clone(&record.questions))
    }

    /// Remove every record whose expiry is at or before now. Returns how many
    /// were removed. No-op when the store has no ttl.
    pub async fn sweep(&self) -> usize {
        self.sweep_at(Instant::now()).await
    }

    pub async fn sweep_at(&self, now: Instant) -> usize {
        if self.ttl.is_none() {
            return 0;
        }

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|id, record| {
            let live = record.is_live(now);
            if !live {
                let age = now.saturating_duration_since(record.created_at);
                debug!(test_id = %id, age_secs = age.as_secs(), "sweeping expired test");
            }
            live
        });
        before - records.len()
    }

    /// Number of stored records, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// A ttl too large to represent as an `Instant` never expires.
    fn new_record(&self, questions: Arc<[Question]>, now: Instant) -> SessionRecord {
        SessionRecord {
            questions,
            created_at: now,
            expires_at: self.ttl.and_then(|ttl| now.checked_add(ttl)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    fn questions() -> Arc<[Question]> {
        vec![Question {
            id: 1,
            question: "Pick a".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            answer: 0,
        }]
        .into()
    }

    #[tokio::test]
    async fn test_get_after_put_returns_stored_set() {
        let store = SessionStore::new(30 * MINUTE);
        let qs = questions();
        store.put("t1", Arc::clone(&qs)).await;

        let found = store.get("t1").await.unwrap();
        assert_eq!(&*found, &*qs);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = SessionStore::new(30 * MINUTE);
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_never_expires() {
        let store = SessionStore::new(Duration::ZERO);
        assert_eq!(store.ttl(), None);

        let t0 = Instant::now();
        store.put_at("t1", questions(), t0).await;

        let much_later = t0 + Duration::from_secs(365 * 24 * 3600);
        assert!(store.get_at("t1", much_later).await.is_some());
        assert_eq!(store.sweep_at(much_later).await, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_huge_ttl_never_expires() {
        let store = SessionStore::new(Duration::from_secs(u64::MAX));
        assert!(store.ttl().is_some());

        store.put("t1", questions()).await;
        assert!(store.get("t1").await.is_some());

        let id = store.insert_unique(questions(), || "t2".to_string()).await;
        assert_eq!(id, "t2");

        let much_later = Instant::now() + Duration::from_secs(365 * 24 * 3600);
        assert!(store.get_at("t1", much_later).await.is_some());
        assert_eq!(store.sweep_at(much_later).await, 0);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_expiry_boundary_without_sweep() {
        let store = SessionStore::new(30 * MINUTE);
        let t0 = Instant::now();
        store.put_at("t2", questions(), t0).await;

        let just_before = t0 + 30 * MINUTE - Duration::from_millis(1);
        assert!(store.get_at("t2", just_before).await.is_some());
        assert!(store.get_at("t2", t0 + 30 * MINUTE).await.is_none());
        assert!(store.get_at("t2", t0 + 31 * MINUTE).await.is_none());

        // Expired but not swept: still physically present.
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let store = SessionStore::new(10 * MINUTE);
        let t0 = Instant::now();
        store.put_at("old", questions(), t0).await;
        store.put_at("edge", questions(), t0 + 5 * MINUTE).await;
        store.put_at("fresh", questions(), t0 + 6 * MINUTE).await;

        let removed = store.sweep_at(t0 + 15 * MINUTE).await;
        assert_eq!(removed, 2);

        let after = t0 + 15 * MINUTE;
        assert!(store.get_at("old", after).await.is_none());
        assert!(store.get_at("edge", after).await.is_none());
        assert!(store.get_at("fresh", after).await.is_some());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_put_overwrites_and_refreshes_expiry() {
        let store = SessionStore::new(10 * MINUTE);
        let t0 = Instant::now();
        store.put_at("t1", questions(), t0).await;

        let replacement: Arc<[Question]> = vec![Question {
            id: 9,
            question: "Other".to_string(),
            options: vec!["x".to_string(), "y".to_string()],
            answer: 1,
        }]
        .into();
        store.put_at("t1", Arc::clone(&replacement), t0 + 8 * MINUTE).await;

        let found = store.get_at("t1", t0 + 12 * MINUTE).await.unwrap();
        assert_eq!(found[0].id, 9);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_unique_skips_taken_ids() {
        let store = SessionStore::new(Duration::ZERO);
        store.put("test-a", questions()).await;

        let mut candidates = vec!["test-b", "test-a"];
        let id = store
            .insert_unique(questions(), || candidates.pop().unwrap().to_string())
            .await;

        assert_eq!(id, "test-b");
        assert!(store.get("test-b").await.is_some());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_puts_and_gets() {
        let store = Arc::new(SessionStore::new(30 * MINUTE));
        let mut handles = Vec::new();

        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let id = format!("t{i}");
                store.put(id.clone(), questions()).await;
                store.get(&id).await.is_some()
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(store.len().await, 32);
    }
}
