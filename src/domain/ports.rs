use crate::domain::model::ParticipantRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Append-only sink for accepted submissions.
///
/// Implementations must make each `append` atomic with respect to other
/// appends: a record is either written as one whole line or not at all.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn append(&self, record: &ParticipantRecord) -> Result<()>;
}
