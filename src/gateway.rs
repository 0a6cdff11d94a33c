//! Outbound mail relay.
//!
//! Contact messages are not delivered by us. They are handed to a hosted
//! transactional-email relay (EmailJS-compatible) which fills a template and
//! mails the site owner. From the caller's side this is one opaque call:
//! [`MailGateway::send`] either succeeds or fails.
//!
//! ## Wire Format
//!
//! ```text
//! POST {endpoint}
//! Content-Type: application/json
//!
//! {
//!   "service_id": "service_xxx",
//!   "template_id": "template_xxx",
//!   "user_id": "<token>",
//!   "template_params": { "from_name": "...", "from_email": "...", "message": "..." }
//! }
//! ```
//!
//! Any 2xx response is success. There is no message id and no retry.

use crate::config::MailConfig;
use log::{error, info};
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const ENV_SERVICE_ID: &str = "FOLIO_MAIL_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "FOLIO_MAIL_TEMPLATE_ID";
pub const ENV_TOKEN: &str = "FOLIO_MAIL_TOKEN";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("mail relay not configured: missing {0}")]
    NotConfigured(&'static str),
    #[error("mail relay unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail relay rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Template parameters of one contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailPayload {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

/// Static relay identifiers. Never derived from visitor input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailCredentials {
    pub service_id: String,
    pub template_id: String,
    pub token: String,
}

impl MailCredentials {
    /// Resolve credentials from config, letting the process environment win.
    pub fn resolve(config: &MailConfig) -> Result<Self, GatewayError> {
        Self::resolve_with(config, |key| std::env::var(key).ok())
    }

    /// Same as [`resolve`](Self::resolve) with an injectable variable lookup.
    pub fn resolve_with(
        config: &MailConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, GatewayError> {
        // A variable that is set but blank counts as unset.
        let present = |v: &String| !v.trim().is_empty();
        let pick = |key: &str, configured: &Option<String>, name: &'static str| {
            env(key)
                .filter(present)
                .or_else(|| configured.clone().filter(present))
                .ok_or(GatewayError::NotConfigured(name))
        };
        Ok(Self {
            service_id: pick(ENV_SERVICE_ID, &config.service_id, "service_id")?,
            template_id: pick(ENV_TEMPLATE_ID, &config.template_id, "template_id")?,
            token: pick(ENV_TOKEN, &config.token, "token")?,
        })
    }
}

/// Everything one send needs: the fixed identifiers plus the message.
#[derive(Debug, Clone, Copy)]
pub struct MailRequest<'a> {
    pub credentials: &'a MailCredentials,
    pub payload: &'a MailPayload,
}

/// The narrow seam between the contact form and whichever relay is in use.
pub trait MailGateway {
    fn send(&self, request: MailRequest<'_>) -> Result<(), GatewayError>;
}

#[derive(Serialize)]
struct SendBody<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a MailPayload,
}

/// Blocking HTTP client for an EmailJS-compatible relay.
pub struct EmailJsGateway {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl EmailJsGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &MailConfig) -> Result<Self, GatewayError> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }
}

impl MailGateway for EmailJsGateway {
    fn send(&self, request: MailRequest<'_>) -> Result<(), GatewayError> {
        let started_at = Instant::now();
        let body = SendBody {
            service_id: &request.credentials.service_id,
            template_id: &request.credentials.template_id,
            user_id: &request.credentials.token,
            template_params: request.payload,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .inspect_err(|err| {
                error!(
                    "event=mail_send status=error duration_ms={} error_code=transport error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            error!(
                "event=mail_send status=error duration_ms={} error_code=rejected http_status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            "event=mail_send status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}
