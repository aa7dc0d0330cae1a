//! Next-fire-time arithmetic for the daily schedule.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveDateTime, NaiveTime, Utc};
use std::time::Duration;

use napsign_config::SignCoreConfig;

/// The immutable daily schedule: a wall-clock fire time interpreted in a
/// fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    fire_time: NaiveTime,
    offset: FixedOffset,
}

impl Schedule {
    pub fn new(fire_time: NaiveTime, offset: FixedOffset) -> Self {
        Self { fire_time, offset }
    }

    /// Build a schedule from the validated config section.
    pub fn from_config(config: &SignCoreConfig) -> Result<Self> {
        let fire_time = NaiveTime::parse_from_str(&config.auto_checkin_time, "%H:%M:%S")
            .with_context(|| {
                format!("invalid check-in time '{}'", config.auto_checkin_time)
            })?;
        let offset = config
            .timezone
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("invalid UTC offset {} hours", config.timezone))?;
        Ok(Self::new(fire_time, offset))
    }

    pub fn fire_time(&self) -> NaiveTime {
        self.fire_time
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The next fire instant as a local wall-clock timestamp in the
    /// configured offset: today at the fire time, or tomorrow if today's is
    /// already strictly past. Equality counts as not-yet-past, so a run
    /// landing exactly on the fire time still fires immediately.
    pub fn next_fire_local(&self, now: DateTime<Utc>) -> NaiveDateTime {
        let now_local = now.with_timezone(&self.offset).naive_local();
        let today_target = now_local.date().and_time(self.fire_time);
        if now_local > today_target {
            today_target + ChronoDuration::days(1)
        } else {
            today_target
        }
    }

    /// How long to sleep until the next fire. Always in [0, 24h).
    ///
    /// Re-derived from wall-clock "now" on every cycle, never cached: that is
    /// what guarantees exactly one fire per calendar day in the configured
    /// zone, with no elapsed-time counters to accumulate drift.
    pub fn until_next_fire(&self, now: DateTime<Utc>) -> Duration {
        let now_local = now.with_timezone(&self.offset).naive_local();
        let wait = self.next_fire_local(now) - now_local;
        // The offset is fixed, so the naive difference is the real one.
        wait.to_std().unwrap_or(Duration::ZERO)
    }
}
