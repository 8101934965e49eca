pub mod templates;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::submission::record::SubmissionRecord;

/// Result of one dispatch attempt. `Skipped` means no credentials are
/// configured and no network call was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Failed(String),
    Skipped,
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Sent => "sent",
            DispatchOutcome::Failed(_) => "failed",
            DispatchOutcome::Skipped => "skipped",
        }
    }
}

pub struct ReportMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    to: String,
}

impl ReportMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP relay error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from: config.from.clone(),
            to: config.to.clone(),
        })
    }

    pub fn recipient(&self) -> &str {
        &self.to
    }

    /// One-shot transport of the rendered report. No retry.
    pub async fn send_report(
        &self,
        record: &SubmissionRecord,
        pdf: &[u8],
    ) -> Result<(), String> {
        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| format!("Invalid attachment type: {e}"))?;
        let attachment = Attachment::new(record.filename()).body(pdf.to_vec(), pdf_type);

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(self
                .to
                .parse()
                .map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(templates::subject(record))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(templates::body(record)))
                    .singlepart(attachment),
            )
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}

/// Attempts one dispatch of the rendered report. Never fails the caller;
/// every path collapses into a [`DispatchOutcome`].
pub async fn dispatch(
    mailer: Option<&ReportMailer>,
    record: &SubmissionRecord,
    pdf: &[u8],
) -> DispatchOutcome {
    let Some(mailer) = mailer else {
        tracing::info!("No SMTP credentials configured; skipping dispatch");
        return DispatchOutcome::Skipped;
    };

    match mailer.send_report(record, pdf).await {
        Ok(()) => {
            tracing::info!("Report dispatched to {}", mailer.recipient());
            DispatchOutcome::Sent
        }
        Err(e) => {
            tracing::error!("Report dispatch failed: {e}");
            DispatchOutcome::Failed(e)
        }
    }
}
