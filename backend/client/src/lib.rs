//! `napsign-client` — thin HTTP client for the NapCat service.
//!
//! Two stateless operations: list every joined group, and trigger a check-in
//! for one group. No retries and no local state; retry policy belongs to the
//! scheduler.

pub mod napcat;
pub mod response;

pub use napcat::NapcatClient;
