//! Contact form
//!
//! The form's status is a small state machine:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──accepted──▶ Success ──expired──▶ Idle
//!                             └─rejected──▶ Failure ──expired──▶ Idle
//! ```
//!
//! Success clears the fields. Either result stays on screen for a fixed
//! time and then reverts to idle. There is no retry; the visitor submits
//! again. Delivery goes through a [`FormRelay`], normally the
//! [`HttpFormRelay`] that POSTs JSON to a hosted form service.
//!
//! A host that keeps rendering frames splits a submission in two:
//! [`ContactForm::begin_submit`], then the relay call awaited outside the
//! site context, then [`ContactForm::finish`] with the time the answer
//! arrived. [`ContactForm::submit`] does all three for one-shot callers.

use crate::config::ContactConfig;
use crate::error::{FormError, RelayError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sheen_core::fsm::{EventId, StateId, StateMachine};
use std::time::Duration;

pub const IDLE: StateId = 0;
pub const SUBMITTING: StateId = 1;
pub const SUCCESS: StateId = 2;
pub const FAILURE: StateId = 3;

pub const SUBMIT: EventId = 1;
pub const ACCEPTED: EventId = 2;
pub const REJECTED: EventId = 3;
pub const EXPIRED: EventId = 4;

/// Status shown next to the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Failure,
}

/// What the visitor typed
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
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

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    fn validate(&self) -> Result<(), FormError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(field));
            }
        }

        let email = self.email.trim();
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.split('.').count() >= 2
                    && domain.split('.').all(|part| !part.is_empty())
            });
        if !valid || email.contains(char::is_whitespace) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

/// Payload sent to the relay
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Delivery address understood by the relay
    #[serde(rename = "_to", skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Delivers a submission
#[async_trait]
pub trait FormRelay: Send + Sync {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), RelayError>;
}

/// Relay that POSTs the submission as JSON
pub struct HttpFormRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFormRelay {
    pub fn new(config: &ContactConfig) -> Result<Self, RelayError> {
        if config.endpoint.trim().is_empty() {
            return Err(RelayError::Unconfigured("contact.endpoint is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormRelay for HttpFormRelay {
    async fn submit(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
        tracing::debug!(endpoint = %self.endpoint, "posting contact form");

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RelayError::Status(status.as_u16()))
        }
    }
}

/// Contact form state
pub struct ContactForm {
    fields: ContactFields,
    machine: StateMachine,
    recipient: Option<String>,
    success_reset_ms: f64,
    failure_reset_ms: f64,
    revert_at_ms: Option<f64>,
}

impl ContactForm {
    pub fn new(config: &ContactConfig) -> Self {
        let machine = StateMachine::builder(IDLE)
            .on(IDLE, SUBMIT, SUBMITTING)
            .on(SUBMITTING, ACCEPTED, SUCCESS)
            .on(SUBMITTING, REJECTED, FAILURE)
            .on(SUCCESS, EXPIRED, IDLE)
            .on(FAILURE, EXPIRED, IDLE)
            .build();

        Self {
            fields: ContactFields::default(),
            machine,
            recipient: config.recipient.clone(),
            success_reset_ms: config.success_reset_ms,
            failure_reset_ms: config.failure_reset_ms,
            revert_at_ms: None,
        }
    }

    pub fn status(&self) -> FormStatus {
        match self.machine.current_state() {
            SUBMITTING => FormStatus::Submitting,
            SUCCESS => FormStatus::Success,
            FAILURE => FormStatus::Failure,
            _ => FormStatus::Idle,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: ContactFields) {
        self.fields = fields;
    }

    /// Status transitions so far, for diagnostics
    pub fn history(&self) -> &[(StateId, EventId, StateId)] {
        self.machine.history()
    }

    /// Validate and move to `Submitting`, producing the relay payload
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, FormError> {
        if !self.machine.can_send(SUBMIT) {
            return Err(FormError::Busy);
        }
        self.fields.validate()?;
        self.machine.send(SUBMIT);

        Ok(ContactSubmission {
            name: self.fields.name.trim().to_string(),
            email: self.fields.email.trim().to_string(),
            message: self.fields.message.trim().to_string(),
            recipient: self.recipient.clone(),
        })
    }

    /// Record the relay's answer. Ignored unless a submission is in flight.
    pub fn finish(&mut self, outcome: Result<(), RelayError>, now_ms: f64) -> FormStatus {
        if !self.machine.is_in(SUBMITTING) {
            return self.status();
        }

        match outcome {
            Ok(()) => {
                self.machine.send(ACCEPTED);
                self.fields = ContactFields::default();
                self.revert_at_ms = Some(now_ms + self.success_reset_ms);
                tracing::info!("contact form delivered");
            }
            Err(err) => {
                self.machine.send(REJECTED);
                self.revert_at_ms = Some(now_ms + self.failure_reset_ms);
                tracing::warn!("contact form delivery failed: {}", err);
            }
        }
        self.status()
    }

    /// Revert a displayed result to idle once its time is up
    pub fn tick(&mut self, now_ms: f64) -> FormStatus {
        if let Some(at) = self.revert_at_ms {
            if now_ms >= at {
                self.revert_at_ms = None;
                self.machine.send(EXPIRED);
            }
        }
        self.status()
    }

    /// Submit through `relay` and record the result at `now_ms`
    pub async fn submit<R>(&mut self, relay: &R, now_ms: f64) -> Result<FormStatus, FormError>
    where
        R: FormRelay + ?Sized,
    {
        let submission = self.begin_submit()?;
        let outcome = relay.submit(&submission).await;
        Ok(self.finish(outcome, now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct StubRelay {
        status: Option<u16>,
        seen: Mutex<Vec<ContactSubmission>>,
    }

    impl StubRelay {
        fn accepting() -> Self {
            Self {
                status: None,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn rejecting(status: u16) -> Self {
            Self {
                status: Some(status),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FormRelay for StubRelay {
        async fn submit(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
            self.seen.lock().unwrap().push(submission.clone());
            match self.status {
                None => Ok(()),
                Some(code) => Err(RelayError::Status(code)),
            }
        }
    }

    fn filled(config: &ContactConfig) -> ContactForm {
        let mut form = ContactForm::new(config);
        form.set_fields(ContactFields::new(
            "Ada",
            " ada@example.com ",
            "Need a site.",
        ));
        form
    }

    #[tokio::test]
    async fn test_success_clears_and_reverts_after_five_seconds() {
        let config = ContactConfig {
            recipient: Some("studio@example.com".to_string()),
            ..Default::default()
        };
        let relay = StubRelay::accepting();
        let mut form = filled(&config);

        let status = form.submit(&relay, 1000.0).await.unwrap();
        assert_eq!(status, FormStatus::Success);
        assert!(form.fields().is_empty());

        let seen = relay.seen.lock().unwrap();
        assert_eq!(seen[0].email, "ada@example.com");
        assert_eq!(seen[0].recipient.as_deref(), Some("studio@example.com"));
        drop(seen);

        assert_eq!(form.tick(5999.0), FormStatus::Success);
        assert_eq!(form.tick(6000.0), FormStatus::Idle);
    }

    #[tokio::test]
    async fn test_failure_keeps_fields_and_reverts_after_three_seconds() {
        let config = ContactConfig::default();
        let relay = StubRelay::rejecting(500);
        let mut form = filled(&config);

        assert_eq!(form.submit(&relay, 0.0).await.unwrap(), FormStatus::Failure);
        assert_eq!(form.fields().name, "Ada");
        assert_eq!(form.tick(2999.0), FormStatus::Failure);
        assert_eq!(form.tick(3000.0), FormStatus::Idle);

        assert_eq!(
            form.history(),
            &[
                (IDLE, SUBMIT, SUBMITTING),
                (SUBMITTING, REJECTED, FAILURE),
                (FAILURE, EXPIRED, IDLE),
            ]
        );
    }

    #[test]
    fn test_busy_while_result_displayed() {
        let config = ContactConfig::default();
        let mut form = filled(&config);

        form.begin_submit().unwrap();
        assert_eq!(form.begin_submit(), Err(FormError::Busy));

        form.finish(Err(RelayError::Status(429)), 0.0);
        assert_eq!(form.begin_submit(), Err(FormError::Busy));
    }

    #[test]
    fn test_validation() {
        let mut form = ContactForm::new(&ContactConfig::default());
        assert_eq!(form.begin_submit(), Err(FormError::MissingField("name")));

        for email in ["nope", "a@b", "@example.com", "a b@example.com", "a@example..com"] {
            form.set_fields(ContactFields::new("Ada", email, "hi"));
            assert!(
                matches!(form.begin_submit(), Err(FormError::InvalidEmail(_))),
                "{email}"
            );
        }
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn test_late_result_is_ignored() {
        let mut form = ContactForm::new(&ContactConfig::default());
        assert_eq!(form.finish(Ok(()), 0.0), FormStatus::Idle);
    }

    #[test]
    fn test_payload_uses_underscore_to() {
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "hi".to_string(),
            recipient: Some("studio@example.com".to_string()),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["_to"], "studio@example.com");

        let without = ContactSubmission {
            recipient: None,
            ..submission
        };
        let json = serde_json::to_value(&without).unwrap();
        assert!(json.get("_to").is_none());
    }

    #[test]
    fn test_http_relay_requires_endpoint() {
        let config = ContactConfig {
            endpoint: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpFormRelay::new(&config),
            Err(RelayError::Unconfigured(_))
        ));
    }
}
