use async_trait::async_trait;

use crate::error::RemoteError;
use crate::types::GroupId;

/// The remote check-in surface the scheduler runs against.
///
/// The production implementation is the NapCat HTTP client; tests substitute
/// scripted fakes. Both operations are stateless request/response calls with
/// no retry of their own — retry policy belongs to the caller.
#[async_trait]
pub trait SignService: Send + Sync {
    /// List every group the account has joined. An empty list is a valid
    /// success.
    async fn list_groups(&self) -> Result<Vec<GroupId>, RemoteError>;

    /// Check in one group. Returns the service's result message on success.
    async fn check_in(&self, group: &GroupId) -> Result<String, RemoteError>;
}
