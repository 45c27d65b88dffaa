//! Once-per-day posting schedule.
//!
//! The recommendation is regenerated at most once per calendar day in
//! Asia/Jakarta (UTC+7, no DST). The single slot is guarded by an async mutex
//! held across the provider call, so concurrent first requests of a day wait
//! for one generation instead of each triggering their own.

use std::sync::Arc;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tokio::sync::Mutex;
use tracing::info;
use crate::error::Result;
use crate::llm::TextProvider;
use crate::prompts;

const JAKARTA_UTC_OFFSET_HOURS: i64 = 7;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCacheEntry {
    pub date: NaiveDate,
    pub content: String,
}

pub struct ScheduleCache {
    slot: Mutex<Option<ScheduleCacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl Default for ScheduleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: Mutex::new(None),
            clock,
        }
    }

    pub async fn get_or_generate(&self, provider: &dyn TextProvider) -> Result<String> {
        let local = jakarta_time(self.clock.now());
        let today = local.date();

        let mut slot = self.slot.lock().await;
        if let Some(entry) = slot.as_ref().filter(|entry| entry.date == today) {
            return Ok(entry.content.clone());
        }

        let weekday = local.format("%A").to_string();
        let time = local.format("%H:%M").to_string();
        info!(%today, %weekday, %time, "generating daily schedule");

        let content = provider.generate(&prompts::schedule(&weekday, &time)).await?;
        *slot = Some(ScheduleCacheEntry {
            date: today,
            content: content.clone(),
        });
        Ok(content)
    }

    /// The current entry, if any, regardless of its date.
    #[cfg(test)]
    pub(crate) async fn peek(&self) -> Option<ScheduleCacheEntry> {
        self.slot.lock().await.clone()
    }
}

/// Wall-clock time in Jakarta for the given instant.
pub fn jakarta_time(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.naive_utc() + Duration::hours(JAKARTA_UTC_OFFSET_HOURS)
}
