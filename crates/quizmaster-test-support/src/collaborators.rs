//! Upload and invitation collaborator doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use quizmaster_core::question::QuestionBank;
use quizmaster_ingest::application::ingestion::UploadIngestion;
use quizmaster_ingest::domain::document::UploadedDocument;
use quizmaster_ingest::domain::outcome::IngestionOutcome;
use quizmaster_invite::application::dispatch::InvitationDispatch;
use quizmaster_invite::domain::email::EmailAddress;
use quizmaster_invite::domain::outcome::DispatchOutcome;

/// Ingestion that returns its bank immediately and records the file names it
/// was given.
#[derive(Debug)]
pub struct InstantUploadIngestion {
    bank: QuestionBank,
    received: Mutex<Vec<String>>,
}

impl InstantUploadIngestion {
    /// Returns `bank` for every upload.
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            received: Mutex::new(Vec::new()),
        }
    }

    /// File names of every ingested document, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadIngestion for InstantUploadIngestion {
    async fn ingest(&self, document: UploadedDocument) -> IngestionOutcome {
        self.received.lock().unwrap().push(document.file_name);
        IngestionOutcome::Ready(self.bank.clone())
    }
}

/// Ingestion that always fails.
#[derive(Debug)]
pub struct FailingUploadIngestion;

#[async_trait]
impl UploadIngestion for FailingUploadIngestion {
    async fn ingest(&self, _document: UploadedDocument) -> IngestionOutcome {
        IngestionOutcome::Failed("document could not be parsed".into())
    }
}

/// Dispatch that reports `Sent` immediately and records every address.
#[derive(Debug, Default)]
pub struct RecordingInvitationDispatch {
    sent: Mutex<Vec<String>>,
}

impl RecordingInvitationDispatch {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every address an invitation was dispatched to, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvitationDispatch for RecordingInvitationDispatch {
    async fn dispatch(&self, email: &EmailAddress) -> DispatchOutcome {
        self.sent.lock().unwrap().push(email.as_str().to_owned());
        DispatchOutcome::Sent
    }
}

/// Dispatch that always fails.
#[derive(Debug)]
pub struct FailingInvitationDispatch;

#[async_trait]
impl InvitationDispatch for FailingInvitationDispatch {
    async fn dispatch(&self, _email: &EmailAddress) -> DispatchOutcome {
        DispatchOutcome::Failed("mail relay unavailable".into())
    }
}
