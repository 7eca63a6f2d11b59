//! Mail notification: deliver the rendered report to the submitter.
//!
//! The mail transport sits behind `MailBackend`. The built-in `FsMailer`
//! files each message into an outbox directory; `MemoryMailer` records sends
//! for tests. The stage has the pipeline's one hard dependency: it needs a
//! rendered report artifact to attach.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use anyhow::{Context, Result};
use uuid::Uuid;

use assess_core::model::ProcessedRecord;

use super::render::RenderOutcome;

/// One outbound message with its report attachment.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
    pub attachment: Vec<u8>,
}

/// Opaque mail collaborator. Returns a transport message id.
pub trait MailBackend {
    fn send(&self, message: &MailMessage) -> Result<String>;
}

/// Files messages into `<outbox>/<message_id>/` as a headers file plus the
/// attachment. A real transport can drain the directory.
pub struct FsMailer {
    outbox: PathBuf,
}

impl FsMailer {
    pub fn new<P: AsRef<Path>>(outbox: P) -> Self {
        Self { outbox: outbox.as_ref().to_path_buf() }
    }
}

impl MailBackend for FsMailer {
    fn send(&self, message: &MailMessage) -> Result<String> {
        let message_id = Uuid::new_v4().to_string();
        let dir = self.outbox.join(&message_id);
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating outbox entry {}", dir.display()))?;

        let envelope = format!(
            "From: {}\nTo: {}\nSubject: {}\nAttachment: {}\n\n{}\n",
            message.from, message.to, message.subject, message.attachment_name, message.body
        );
        fs::write(dir.join("message.txt"), envelope)?;
        fs::write(dir.join(&message.attachment_name), &message.attachment)?;
        Ok(message_id)
    }
}

/// Records every send in memory. Test double.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl MemoryMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().clone()
    }
}

impl MailBackend for MemoryMailer {
    fn send(&self, message: &MailMessage) -> Result<String> {
        let mut sent = self.sent.lock();
        sent.push(message.clone());
        Ok(format!("memory-{}", sent.len()))
    }
}

/// Notify stage outcome.
#[derive(Debug, Clone)]
pub struct NotifyOutcome {
    pub message_id: String,
    pub to: String,
    pub subject: String,
}

/// Sends the rendered report to the submission's email address.
#[derive(Clone)]
pub struct Notifier {
    backend: Arc<dyn MailBackend + Send + Sync>,
    from: String,
    subject_prefix: String,
}

impl Notifier {
    pub fn new(
        backend: Arc<dyn MailBackend + Send + Sync>,
        from: impl Into<String>,
        subject_prefix: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            from: from.into(),
            subject_prefix: subject_prefix.into(),
        }
    }

    pub fn notify(&self, record: &ProcessedRecord, report: &RenderOutcome) -> Result<NotifyOutcome> {
        let submission = &record.submission;
        let subject = format!(
            "{} - {} {}",
            self.subject_prefix, submission.first_name, submission.last_name
        );
        let body = format!(
            "Hello {},\n\nYour assessment has been processed and the report is attached.\n\nBest regards,\nAssessment Processing System\n",
            submission.first_name
        );

        let message = MailMessage {
            to: submission.email.clone(),
            from: self.from.clone(),
            subject: subject.clone(),
            body,
            attachment_name: report.filename.clone(),
            attachment: report.bytes.clone(),
        };

        let message_id = self.backend.send(&message)?;
        Ok(NotifyOutcome {
            message_id,
            to: message.to,
            subject,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::ProcessedRecord;
    use assess_core::scoring::{score, ReadinessWeights};
    use tempfile::TempDir;

    fn record() -> ProcessedRecord {
        let submission = assess_core::fixtures::sample_submission_typed();
        let derived = score(&submission, &ReadinessWeights::default());
        ProcessedRecord::new("rec-1", "2025-06-01T12:00:00Z", submission, derived)
    }

    fn report() -> RenderOutcome {
        RenderOutcome {
            filename: "assessment_report_rec-1.html".to_string(),
            artifact_id: "a".repeat(64),
            bytes: b"<html>report</html>".to_vec(),
        }
    }

    #[test]
    fn memory_mailer_records_one_message_per_notify() {
        let mailer = Arc::new(MemoryMailer::default());
        let notifier = Notifier::new(mailer.clone(), "reports@example.com", "Assessment Report");

        let outcome = notifier.notify(&record(), &report()).unwrap();
        assert_eq!(outcome.to, "ada@example.com");
        assert_eq!(outcome.subject, "Assessment Report - Ada Lovelace");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].attachment_name, "assessment_report_rec-1.html");
        assert_eq!(sent[0].from, "reports@example.com");
    }

    #[test]
    fn fs_mailer_writes_message_and_attachment() {
        let td = TempDir::new().unwrap();
        let mailer = FsMailer::new(td.path());
        let notifier = Notifier::new(Arc::new(mailer), "reports@example.com", "Assessment Report");

        let outcome = notifier.notify(&record(), &report()).unwrap();
        let dir = td.path().join(&outcome.message_id);
        let envelope = std::fs::read_to_string(dir.join("message.txt")).unwrap();
        assert!(envelope.contains("To: ada@example.com"));
        assert!(dir.join("assessment_report_rec-1.html").exists());
    }
}
