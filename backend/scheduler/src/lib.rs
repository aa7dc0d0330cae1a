//! `napsign-scheduler` — the daily recurrence loop.
//!
//! One long-lived task per daemon: sleep until the configured fire time,
//! run one sequential batch of group check-ins, recompute, repeat. Survives
//! anything short of process death.

pub mod daily;
pub mod fire_time;

pub use daily::{run_batch, DailyScheduler, PACING_DELAY, RECOVERY_PAUSE};
pub use fire_time::Schedule;
