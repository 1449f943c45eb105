use crate::core::page::PageRenderer;
use crate::domain::model::{StatusMessage, Submission};
use crate::domain::ports::ParticipantStore;
use crate::utils::error::{FormError, Result};
use std::sync::Arc;

/// Validates submissions, appends accepted ones to the store and renders the page.
#[derive(Clone)]
pub struct FormHandler {
    store: Arc<dyn ParticipantStore>,
    pages: PageRenderer,
}

impl FormHandler {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Result<Self> {
        Ok(Self {
            store,
            pages: PageRenderer::new()?,
        })
    }

    pub fn render_form(&self) -> Result<String> {
        self.pages.render(None)
    }

    /// Rejected submissions never reach the store. Store errors are returned
    /// to the caller rather than rendered as success.
    pub async fn handle_submit(&self, submission: Submission) -> Result<(String, StatusMessage)> {
        let message = match submission.into_record() {
            Ok(record) => {
                self.store.append(&record).await?;
                tracing::info!(
                    department = %record.department,
                    name = %record.name,
                    "✅ Participant added"
                );
                StatusMessage::added(&record)
            }
            Err(FormError::Validation { message }) => {
                tracing::debug!("Submission rejected: {}", message);
                StatusMessage::missing_fields()
            }
            Err(other) => return Err(other),
        };

        let html = self.pages.render(Some(&message))?;
        Ok((html, message))
    }

    /// Page shown when a submission could not be processed.
    pub fn render_failure(&self, error: &FormError) -> Result<String> {
        let message = StatusMessage::Error(error.user_friendly_message());
        self.pages.render(Some(&message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ParticipantRecord;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<Vec<ParticipantRecord>>,
    }

    #[async_trait]
    impl ParticipantStore for MemoryStore {
        async fn append(&self, record: &ParticipantRecord) -> Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ParticipantStore for FailingStore {
        async fn append(&self, _record: &ParticipantRecord) -> Result<()> {
            Err(FormError::StorageWriteFailure {
                path: PathBuf::from("data/participants.csv"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn handler_with_memory() -> (FormHandler, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let handler = FormHandler::new(store.clone()).unwrap();
        (handler, store)
    }

    #[tokio::test]
    async fn test_valid_submission_is_stored_and_confirmed() {
        let (handler, store) = handler_with_memory();

        let (html, message) = handler
            .handle_submit(Submission::new("Engineering", "Alice"))
            .await
            .unwrap();

        assert!(!message.is_error());
        assert!(html.contains("successfully added: department - Engineering, name - Alice"));
        assert_eq!(
            *store.records.lock().unwrap(),
            vec![ParticipantRecord {
                department: "Engineering".to_string(),
                name: "Alice".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_department_is_rejected_without_write() {
        let (handler, store) = handler_with_memory();

        let (html, message) = handler
            .handle_submit(Submission::new("", "Bob"))
            .await
            .unwrap();

        assert!(message.is_error());
        assert!(html.contains("please fill all fields!"));
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_absent_name_is_rejected_without_write() {
        let (handler, store) = handler_with_memory();
        let submission = Submission {
            department: Some("Sales".to_string()),
            name: None,
        };

        let (_, message) = handler.handle_submit(submission).await.unwrap();

        assert_eq!(message, StatusMessage::missing_fields());
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_pair_twice_is_stored_twice() {
        let (handler, store) = handler_with_memory();

        for _ in 0..2 {
            handler
                .handle_submit(Submission::new("Sales", "Bob"))
                .await
                .unwrap();
        }

        assert_eq!(store.records.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_reported_as_success() {
        let handler = FormHandler::new(Arc::new(FailingStore)).unwrap();

        let err = handler
            .handle_submit(Submission::new("Engineering", "Alice"))
            .await
            .unwrap_err();

        assert!(err.is_storage_failure());
        let page = handler.render_failure(&err).unwrap();
        assert!(page.contains("could not save your entry"));
        assert!(!page.contains("successfully added"));
    }

    #[test]
    fn test_render_form_has_no_message() {
        let (handler, _) = handler_with_memory();
        let html = handler.render_form().unwrap();
        assert!(!html.contains("successfully added"));
        assert!(!html.contains("please fill all fields"));
    }
}
