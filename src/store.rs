//! Form and submission persistence
//!
//! The intake path consumes two store operations: look up a form by id and
//! create a submission. Anything beyond that (schema, migrations, engine) lives
//! behind [`FormStore`].

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{Form, NewSubmission, Submission};

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Submission references a form the store does not hold
    #[error("unknown form reference: {0}")]
    ForeignKey(String),

    /// Backend could not serve the request
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Form/submission store
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Find a form by id
    async fn find_form(&self, id: &str) -> StoreResult<Option<Form>>;

    /// Persist a new submission and return it with its assigned id
    async fn create_submission(&self, submission: NewSubmission) -> StoreResult<Submission>;
}

/// In-memory store (development and tests)
pub struct InMemoryFormStore {
    forms: RwLock<HashMap<String, Form>>,
    submissions: RwLock<HashMap<String, Submission>>,
}

impl InMemoryFormStore {
    /// Empty store
    pub fn new() -> Self {
        Self {
            forms: RwLock::new(HashMap::new()),
            submissions: RwLock::new(HashMap::new()),
        }
    }

    /// Build a store pre-populated with forms
    pub fn with_forms(forms: impl IntoIterator<Item = Form>) -> Self {
        let store = Self::new();
        for form in forms {
            store.insert_form(form);
        }
        store
    }

    /// Insert or replace a form
    pub fn insert_form(&self, form: Form) {
        self.forms.write().insert(form.id.clone(), form);
    }

    /// Submission by id
    pub fn get_submission(&self, id: &str) -> Option<Submission> {
        self.submissions.read().get(id).cloned()
    }

    /// All submissions recorded against a form, oldest first
    pub fn submissions_for(&self, form_id: &str) -> Vec<Submission> {
        let mut found: Vec<_> = self
            .submissions
            .read()
            .values()
            .filter(|s| s.form_id == form_id)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.created_at);
        found
    }

    /// Number of submissions across all forms
    pub fn submission_count(&self) -> usize {
        self.submissions.read().len()
    }
}

impl Default for InMemoryFormStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormStore for InMemoryFormStore {
    async fn find_form(&self, id: &str) -> StoreResult<Option<Form>> {
        Ok(self.forms.read().get(id).cloned())
    }

    async fn create_submission(&self, submission: NewSubmission) -> StoreResult<Submission> {
        // referential integrity only; publication state is the caller's concern
        if !self.forms.read().contains_key(&submission.form_id) {
            return Err(StoreError::ForeignKey(submission.form_id));
        }

        let record = Submission {
            id: Uuid::new_v4().to_string(),
            form_id: submission.form_id,
            data: submission.data,
            status: submission.status,
            created_at: Utc::now(),
        };

        self.submissions
            .write()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionStatus;
    use serde_json::json;

    #[tokio::test]
    async fn test_find_form() {
        let store = InMemoryFormStore::with_forms([Form::new("f1", "Contact", true)]);

        let form = store.find_form("f1").await.unwrap().unwrap();
        assert_eq!(form.title, "Contact");
        assert!(form.is_published);

        assert!(store.find_form("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_submission() {
        let store = InMemoryFormStore::with_forms([Form::new("f1", "Contact", true)]);

        let created = store
            .create_submission(NewSubmission {
                form_id: "f1".into(),
                data: json!({"q1": "yes"}),
                status: SubmissionStatus::Pending,
            })
            .await
            .unwrap();

        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(store.get_submission(&created.id), Some(created.clone()));
        assert_eq!(store.submissions_for("f1").len(), 1);
    }

    #[tokio::test]
    async fn test_create_submission_unknown_form() {
        let store = InMemoryFormStore::new();

        let err = store
            .create_submission(NewSubmission {
                form_id: "ghost".into(),
                data: json!(1),
                status: SubmissionStatus::Pending,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKey(id) if id == "ghost"));
        assert_eq!(store.submission_count(), 0);
    }
}
