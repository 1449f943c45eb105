pub mod form;
pub mod page;
pub mod service;

pub use crate::domain::model::{ParticipantRecord, RecordFormat, StatusMessage, Submission};
pub use crate::domain::ports::ParticipantStore;
pub use crate::utils::error::Result;
