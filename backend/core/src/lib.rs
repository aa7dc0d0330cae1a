pub mod error;
pub mod traits;
pub mod types;

pub use error::RemoteError;
pub use traits::SignService;
pub use types::{BatchOutcome, CheckinFailure, GroupId};
