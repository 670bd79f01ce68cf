//! Schedule configuration and burn history persistence.
//!
//! Both documents live in the generic key-value store under fixed keys.

use std::sync::Arc;

use {emberdash_store::KvStore, tracing::warn};

use crate::{
    Result,
    schedule::next_occurrence_ms,
    types::{BurnRecord, BurnSchedule, TimeOfDay, TokenKind},
};

pub const SETTINGS_KEY: &str = "weekly_burn_settings";
pub const HISTORY_KEY: &str = "burn_schedule_history";

/// History is capped to this many entries; oldest dropped on write.
pub const HISTORY_LIMIT: usize = 50;

const DEFAULT_DAY_OF_WEEK: u8 = 1; // Monday
const DEFAULT_TIME: TimeOfDay = TimeOfDay { hour: 9, minute: 0 };
const DEFAULT_PERCENTAGE: f64 = 9.0;

/// Reads and writes the singleton schedule and its append-only history.
pub struct ScheduleStore {
    kv: Arc<dyn KvStore>,
}

impl ScheduleStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Load the schedule, creating defaults when absent. A document that no
    /// longer parses is replaced by defaults rather than wedging the
    /// scheduler.
    pub async fn load(&self, now_ms: u64) -> Result<BurnSchedule> {
        match self.kv.get(SETTINGS_KEY).await? {
            Some(value) => match serde_json::from_value(value) {
                Ok(schedule) => Ok(schedule),
                Err(e) => {
                    warn!(error = %e, "stored burn schedule unreadable, using defaults");
                    default_schedule(now_ms)
                },
            },
            None => default_schedule(now_ms),
        }
    }

    pub async fn save(&self, schedule: &BurnSchedule) -> Result<()> {
        self.kv
            .set(SETTINGS_KEY, serde_json::to_value(schedule)?)
            .await?;
        Ok(())
    }

    /// History entries, newest first, at most `limit`.
    pub async fn history(&self, limit: usize) -> Result<Vec<BurnRecord>> {
        let mut records = self.load_history().await?;
        records.truncate(limit);
        Ok(records)
    }

    /// Prepend a record and trim to [`HISTORY_LIMIT`]. Records are never
    /// mutated after this point.
    pub async fn append(&self, record: BurnRecord) -> Result<()> {
        let mut records = self.load_history().await?;
        records.insert(0, record);
        records.truncate(HISTORY_LIMIT);
        self.kv
            .set(HISTORY_KEY, serde_json::to_value(&records)?)
            .await?;
        Ok(())
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.kv.remove(HISTORY_KEY).await?;
        Ok(())
    }

    async fn load_history(&self) -> Result<Vec<BurnRecord>> {
        match self.kv.get(HISTORY_KEY).await? {
            Some(value) => match serde_json::from_value(value) {
                Ok(records) => Ok(records),
                Err(e) => {
                    warn!(error = %e, "stored burn history unreadable, starting fresh");
                    Ok(Vec::new())
                },
            },
            None => Ok(Vec::new()),
        }
    }
}

/// Disabled Monday-morning defaults, next occurrence computed from `now_ms`.
fn default_schedule(now_ms: u64) -> Result<BurnSchedule> {
    Ok(BurnSchedule {
        enabled: false,
        day_of_week: DEFAULT_DAY_OF_WEEK,
        time_of_day: DEFAULT_TIME,
        tz: None,
        percentage: DEFAULT_PERCENTAGE,
        source_wallet_id: None,
        token_kind: TokenKind::Eth,
        last_executed_ms: None,
        next_scheduled_ms: next_occurrence_ms(DEFAULT_DAY_OF_WEEK, DEFAULT_TIME, None, now_ms)?,
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::types::RecordStatus,
        emberdash_store::MemoryKvStore,
        serde_json::json,
    };

    fn make_store() -> ScheduleStore {
        ScheduleStore::new(Arc::new(MemoryKvStore::new()))
    }

    fn make_record(id: &str, created_at_ms: u64) -> BurnRecord {
        BurnRecord {
            id: id.into(),
            created_at_ms,
            scheduled_for_ms: created_at_ms,
            amount: "0.900000".into(),
            token_kind: TokenKind::Eth,
            status: RecordStatus::Executed,
            tx_hash: Some("0xabc".into()),
            error: None,
        }
    }

    #[tokio::test]
    async fn test_load_creates_defaults() {
        let store = make_store();
        let now = 1_700_000_000_000;
        let schedule = store.load(now).await.unwrap();

        assert!(!schedule.enabled);
        assert_eq!(schedule.day_of_week, 1);
        assert_eq!(schedule.time_of_day.to_string(), "09:00");
        assert_eq!(schedule.percentage, 9.0);
        assert!(schedule.next_scheduled_ms > now);
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let store = make_store();
        let mut schedule = store.load(1_700_000_000_000).await.unwrap();
        schedule.enabled = true;
        schedule.percentage = 25.0;
        store.save(&schedule).await.unwrap();

        let back = store.load(1_700_000_000_000).await.unwrap();
        assert_eq!(back, schedule);
    }

    #[tokio::test]
    async fn test_corrupt_settings_fall_back_to_defaults() {
        let kv = Arc::new(MemoryKvStore::new());
        kv.set(SETTINGS_KEY, json!({"dayOfWeek": "tuesday"}))
            .await
            .unwrap();
        let store = ScheduleStore::new(kv);

        let schedule = store.load(1_700_000_000_000).await.unwrap();
        assert_eq!(schedule.day_of_week, 1);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let store = make_store();
        store.append(make_record("a", 1_000)).await.unwrap();
        store.append(make_record("b", 2_000)).await.unwrap();

        let records = store.history(10).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[1].id, "a");
    }

    #[tokio::test]
    async fn test_history_capped_at_limit() {
        let store = make_store();
        for i in 0..60 {
            store
                .append(make_record(&format!("r{i}"), i))
                .await
                .unwrap();
        }

        let records = store.history(usize::MAX).await.unwrap();
        assert_eq!(records.len(), HISTORY_LIMIT);
        // Newest kept, oldest dropped.
        assert_eq!(records[0].id, "r59");
        assert_eq!(records[HISTORY_LIMIT - 1].id, "r10");
    }

    #[tokio::test]
    async fn test_clear_history() {
        let store = make_store();
        store.append(make_record("a", 1_000)).await.unwrap();
        store.clear_history().await.unwrap();
        assert!(store.history(10).await.unwrap().is_empty());
    }
}
