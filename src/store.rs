use std::{
    collections::VecDeque,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::debug;

use crate::domain::Message;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Default)]
struct Entries {
    messages: VecDeque<Message>,
    last_id: Option<u64>,
}

/// In-memory, insertion-ordered message history.
///
/// One lock covers both the sequence and id assignment, so an append is never
/// observed half-done by a concurrent `list`.
pub struct MessageStore {
    entries: Mutex<Entries>,
    clock: Arc<dyn Clock>,
    capacity: Option<NonZeroUsize>,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), None)
    }
}

impl MessageStore {
    /// `capacity` of `None` keeps every message for the life of the process.
    pub fn new(clock: Arc<dyn Clock>, capacity: Option<NonZeroUsize>) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            clock,
            capacity,
        }
    }

    pub fn append(&self, text: Option<Value>) -> Message {
        let now = self.clock.now();
        let mut entries = self.lock();

        // Millisecond ids collide within one tick, so bump past the last one.
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match entries.last_id {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        entries.last_id = Some(id);

        let message = Message {
            id,
            text,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        entries.messages.push_back(message.clone());

        if let Some(capacity) = self.capacity {
            while entries.messages.len() > capacity.get() {
                entries.messages.pop_front();
            }
        }

        debug!(id, stored = entries.messages.len(), "message appended");
        message
    }

    pub fn list(&self) -> Vec<Message> {
        self.lock().messages.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Nothing panics while the guard is held, so a poisoned lock still holds consistent data.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_store(capacity: Option<usize>) -> MessageStore {
        let instant = Utc
            .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .single()
            .expect("valid instant");
        MessageStore::new(
            Arc::new(FixedClock(instant)),
            capacity.and_then(NonZeroUsize::new),
        )
    }

    #[test]
    fn starts_empty() {
        let store = MessageStore::default();
        assert!(store.list().is_empty());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = MessageStore::default();
        for text in ["one", "two", "three"] {
            store.append(Some(json!(text)));
        }

        let texts: Vec<_> = store.list().into_iter().map(|m| m.text).collect();
        assert_eq!(
            texts,
            vec![Some(json!("one")), Some(json!("two")), Some(json!("three"))]
        );
    }

    #[test]
    fn append_returns_the_tail_message() {
        let store = MessageStore::default();
        store.append(Some(json!("first")));
        let created = store.append(Some(json!("second")));

        assert_eq!(store.list().last(), Some(&created));
    }

    #[test]
    fn id_and_timestamp_come_from_the_clock() {
        let store = fixed_store(None);
        let message = store.append(Some(json!("hello")));

        assert_eq!(message.id, 1_792_152_000_000);
        assert_eq!(message.timestamp, "2026-10-16T12:00:00.000Z");
    }

    #[test]
    fn ids_stay_unique_within_one_clock_tick() {
        let store = fixed_store(None);
        let first = store.append(Some(json!("a")));
        let second = store.append(Some(json!("b")));
        let third = store.append(Some(json!("c")));

        assert_eq!(second.id, first.id + 1);
        assert_eq!(third.id, first.id + 2);
        assert_eq!(first.timestamp, third.timestamp);
    }

    #[test]
    fn earlier_snapshots_are_unchanged_by_later_appends() {
        let store = MessageStore::default();
        store.append(Some(json!("kept")));
        let snapshot = store.list();

        store.append(Some(json!("later")));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].text, Some(json!("kept")));
        assert_eq!(store.list()[0], snapshot[0]);
    }

    #[test]
    fn capacity_drops_oldest_messages() {
        let store = fixed_store(Some(2));
        store.append(Some(json!("a")));
        store.append(Some(json!("b")));
        store.append(Some(json!("c")));

        let texts: Vec<_> = store.list().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec![Some(json!("b")), Some(json!("c"))]);
    }

    #[test]
    fn concurrent_appends_are_all_recorded_with_distinct_ids() {
        let store = Arc::new(fixed_store(None));
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for n in 0..50 {
                        store.append(Some(json!(format!("{worker}-{n}"))));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker thread");
        }

        let messages = store.list();
        assert_eq!(messages.len(), 400);
        assert!(messages.windows(2).all(|pair| pair[0].id < pair[1].id));
    }
}
