//! The upload ingestion contract.

use std::time::Duration;

use async_trait::async_trait;
use quizmaster_core::question::QuestionBank;
use tracing::{info, warn};

use crate::domain::document::{ADVISORY_MAX_BYTES, UploadedDocument};
use crate::domain::outcome::IngestionOutcome;

/// Default simulated processing delay.
pub const DEFAULT_INGESTION_DELAY: Duration = Duration::from_millis(2000);

/// Turns an uploaded document into a question bank.
///
/// Implementations own their latency, timeouts and cancellation; callers
/// simply await the outcome.
#[async_trait]
pub trait UploadIngestion: Send + Sync {
    /// Processes `document`.
    async fn ingest(&self, document: UploadedDocument) -> IngestionOutcome;
}

/// Simulated ingestion: waits a fixed delay, then returns a configured bank
/// regardless of the document's contents.
#[derive(Debug, Clone)]
pub struct SimulatedUploadIngestion {
    delay: Duration,
    bank: QuestionBank,
}

impl SimulatedUploadIngestion {
    /// Returns `bank` for every upload after `delay`.
    #[must_use]
    pub fn new(delay: Duration, bank: QuestionBank) -> Self {
        Self { delay, bank }
    }
}

#[async_trait]
impl UploadIngestion for SimulatedUploadIngestion {
    async fn ingest(&self, document: UploadedDocument) -> IngestionOutcome {
        if document.kind().is_none() {
            warn!(
                file_name = %document.file_name,
                "upload is not a PDF or Word document"
            );
        }
        if document.exceeds_advisory_limit() {
            warn!(
                file_name = %document.file_name,
                size = document.len(),
                limit = ADVISORY_MAX_BYTES,
                "upload exceeds advisory size limit"
            );
        }
        info!(
            file_name = %document.file_name,
            size = document.len(),
            digest = %document.digest(),
            "processing uploaded document"
        );

        tokio::time::sleep(self.delay).await;

        IngestionOutcome::Ready(self.bank.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmaster_core::question::Question;

    fn sample_bank(count: usize) -> QuestionBank {
        let questions = (0..count)
            .map(|n| {
                Question::new(
                    format!("Generated question {n}?"),
                    ["A", "B", "C", "D"].map(str::to_owned),
                    0,
                )
                .unwrap()
            })
            .collect();
        QuestionBank::new(questions).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_ingestion_returns_bank_after_delay() {
        // Arrange
        let bank = sample_bank(3);
        let ingestion = SimulatedUploadIngestion::new(DEFAULT_INGESTION_DELAY, bank.clone());
        let document = UploadedDocument::new("notes.pdf", None, b"%PDF-1.7".to_vec());
        let started = tokio::time::Instant::now();

        // Act
        let outcome = ingestion.ingest(document).await;

        // Assert
        assert_eq!(outcome, IngestionOutcome::Ready(bank));
        assert!(started.elapsed() >= DEFAULT_INGESTION_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_ingestion_accepts_unadvertised_kinds() {
        let ingestion = SimulatedUploadIngestion::new(Duration::ZERO, sample_bank(1));
        let document = UploadedDocument::new("photo.png", None, vec![1, 2, 3]);

        let outcome = ingestion.ingest(document).await;

        assert_eq!(outcome.into_bank().unwrap().len(), 1);
    }
}
