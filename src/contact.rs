//! Contact form controller.
//!
//! Owns the three-field draft and drives one submission at a time through a
//! [`MailGateway`]:
//!
//! ```text
//!            begin_submit              resolve(Ok)
//!   Idle ─────────────────▶ Submitting ───────────▶ Idle + success dialog, draft cleared
//!                                │
//!                                └──── resolve(Err) ─▶ Idle + failure notice, draft kept
//! ```
//!
//! The payload is captured when the submission begins, so edits made while a
//! send is in flight do not leak into it. Required-field checking belongs to
//! the input layer ([`ContactDraft::missing_fields`]); the controller does
//! not re-validate.

use crate::gateway::{GatewayError, MailCredentials, MailGateway, MailPayload, MailRequest};
use log::{error, info};
use thiserror::Error;

/// Generic text shown when a send fails. Error details only go to the log.
pub const FAILURE_NOTICE: &str = "Failed to send message. Please try again later.";

pub const SUBMIT_LABEL: &str = "Send Message";
pub const BUSY_LABEL: &str = "Sending...";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("a message is already being sent")]
    AlreadySubmitting,
}

/// A form field, as named by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

/// What the visitor has typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Message, &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    fn payload(&self) -> MailPayload {
        MailPayload {
            from_name: self.name.clone(),
            from_email: self.email.clone(),
            message: self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
}

/// Feedback surfaced after a submission resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Modal confirmation; the draft has been cleared.
    SuccessDialog,
    /// Transient notification carrying [`FAILURE_NOTICE`]; the draft is intact.
    FailureNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Failed,
}

/// A submission that has been dispatched but not yet resolved.
#[derive(Debug)]
#[must_use = "a pending send must be resolved or the form stays in Submitting"]
pub struct PendingSend {
    payload: MailPayload,
}

impl PendingSend {
    /// The payload captured at submit time.
    pub fn payload(&self) -> &MailPayload {
        &self.payload
    }
}

#[derive(Debug)]
pub struct ContactForm {
    draft: ContactDraft,
    state: FormState,
    notice: Option<Notice>,
    credentials: MailCredentials,
}

impl ContactForm {
    pub fn new(credentials: MailCredentials) -> Self {
        Self {
            draft: ContactDraft::default(),
            state: FormState::Idle,
            notice: None,
            credentials,
        }
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Update one field. Allowed in any state.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.draft.name = value,
            Field::Email => self.draft.email = value,
            Field::Message => self.draft.message = value,
        }
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.state == FormState::Idle
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            FormState::Idle => SUBMIT_LABEL,
            FormState::Submitting => BUSY_LABEL,
        }
    }

    /// Close the success dialog or failure notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Enter `Submitting` and capture the payload.
    ///
    /// A second call before the first resolves is refused rather than
    /// producing a duplicate send.
    pub fn begin_submit(&mut self) -> Result<PendingSend, SubmitError> {
        if self.state == FormState::Submitting {
            return Err(SubmitError::AlreadySubmitting);
        }
        self.state = FormState::Submitting;
        self.notice = None;
        Ok(PendingSend {
            payload: self.draft.payload(),
        })
    }

    /// The request to hand to the gateway for `pending`.
    pub fn request<'a>(&'a self, pending: &'a PendingSend) -> MailRequest<'a> {
        MailRequest {
            credentials: &self.credentials,
            payload: &pending.payload,
        }
    }

    /// Apply the gateway's answer and return to `Idle`.
    pub fn resolve(&mut self, pending: PendingSend, result: Result<(), GatewayError>) -> Outcome {
        self.state = FormState::Idle;
        match result {
            Ok(()) => {
                info!(
                    "event=contact_submit status=ok message_chars={}",
                    pending.payload.message.chars().count()
                );
                self.draft = ContactDraft::default();
                self.notice = Some(Notice::SuccessDialog);
                Outcome::Sent
            }
            Err(err) => {
                error!("event=contact_submit status=error error={err}");
                self.notice = Some(Notice::FailureNotice);
                Outcome::Failed
            }
        }
    }

    /// Submit the current draft with exactly one gateway call.
    pub fn submit(&mut self, gateway: &dyn MailGateway) -> Result<Outcome, SubmitError> {
        let pending = self.begin_submit()?;
        let result = gateway.send(self.request(&pending));
        Ok(self.resolve(pending, result))
    }
}

/// Title of the success dialog.
pub fn success_title(owner: &str) -> String {
    format!("Message sent to {owner} successfully")
}
