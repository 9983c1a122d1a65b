use chrono::Utc;

use serde::Serialize;

use crate::client::{Email, EmailClient};
use crate::domain::EmailAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Delivered through the real transport
    Live,
    /// Simulated: credentials absent or transport misconfigured
    Mock,
}

/// The result of a single delivery attempt. Delivery problems never surface
/// as errors; callers read `success` and attach the outcome to their response.
#[derive(Debug, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    pub mode: DeliveryMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    fn mock() -> Self {
        Self {
            success: true,
            mode: DeliveryMode::Mock,
            message_id: Some(format!("mock_email_{}", Utc::now().timestamp_millis())),
            error: None,
        }
    }

    fn live(message_id: String) -> Self {
        Self {
            success: true,
            mode: DeliveryMode::Live,
            message_id: Some(message_id),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            mode: DeliveryMode::Live,
            message_id: None,
            error: Some(error),
        }
    }
}

/// Combined result of the paired operator + submitter sends. The two attempts
/// are independent; neither is rolled back or retried when the other fails.
#[derive(Debug, Serialize)]
pub struct DualOutcome {
    pub operator: SendOutcome,
    pub submitter: SendOutcome,
}

impl DualOutcome {
    pub fn success(&self) -> bool {
        self.operator.success && self.submitter.success
    }

    /// Transport id recorded on the entity; the submitter confirmation is the
    /// one the record tracks
    pub fn message_id(&self) -> Option<&str> {
        self.submitter.message_id.as_deref()
    }
}

/// Sends notification emails, degrading to simulated delivery whenever the
/// transport is absent or misconfigured so that moderation flows are never
/// blocked by mail problems.
pub struct Dispatcher {
    transport: Option<EmailClient>,
    operator: EmailAddress,
}

impl Dispatcher {
    pub fn new(transport: Option<EmailClient>, operator: EmailAddress) -> Self {
        if transport.is_none() {
            tracing::warn!("No email transport configured; dispatching in mock mode");
        }
        Self {
            transport,
            operator,
        }
    }

    pub fn operator(&self) -> &EmailAddress {
        &self.operator
    }

    #[tracing::instrument(name = "Dispatch an email", skip(self, email), fields(recipient = %email.recipient, subject = %email.subject))]
    pub async fn send(&self, email: &Email) -> SendOutcome {
        let Some(transport) = &self.transport else {
            tracing::info!("Mock mode: skipping delivery");
            return SendOutcome::mock();
        };

        match transport.send(email).await {
            Ok(message_id) => SendOutcome::live(message_id),
            Err(error) if is_configuration_error(&error) => {
                tracing::warn!("Transport misconfigured, degrading to mock: {}", error);
                let mut outcome = SendOutcome::mock();
                outcome.error = Some(error.to_string());
                outcome
            }
            Err(error) => {
                tracing::error!("Failed to deliver email: {}", error);
                SendOutcome::failed(error.to_string())
            }
        }
    }

    /// The paired send every public submission triggers: an action-cue email
    /// to the operator and a confirmation to the submitter.
    pub async fn send_pair(&self, to_operator: Email, to_submitter: Email) -> DualOutcome {
        let operator = self.send(&to_operator).await;
        let submitter = self.send(&to_submitter).await;
        DualOutcome {
            operator,
            submitter,
        }
    }
}

/// Errors that indicate the transport itself is unusable (bad credentials,
/// unreachable host) rather than a problem with this particular message
fn is_configuration_error(error: &reqwest::Error) -> bool {
    use reqwest::StatusCode;

    if error.is_connect() || error.is_timeout() {
        return true;
    }
    matches!(
        error.status(),
        Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
    )
}
