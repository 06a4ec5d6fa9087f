//! Contact inquiries
//!
//! The form posts straight to a third-party inbox service. Nothing in the
//! response is kept beyond whether it succeeded.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::RwLock;

use crate::config::ContactConfig;
use crate::error::{ClientError, Result};

/// Subject choices offered by the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InquirySubject {
    #[default]
    #[serde(rename = "Exhibition Inquiry")]
    ExhibitionInquiry,
    #[serde(rename = "Commission Request")]
    CommissionRequest,
    #[serde(rename = "Press / Media")]
    PressMedia,
    #[serde(rename = "Other")]
    Other,
}

impl InquirySubject {
    /// In display order
    pub const ALL: [InquirySubject; 4] = [
        Self::ExhibitionInquiry,
        Self::CommissionRequest,
        Self::PressMedia,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ExhibitionInquiry => "Exhibition Inquiry",
            Self::CommissionRequest => "Commission Request",
            Self::PressMedia => "Press / Media",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for InquirySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InquirySubject {
    type Err = ClientError;

    /// Accepts the label or a short keyword (`exhibition`, `commission`, `press`, `other`).
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|subject| subject.label().to_lowercase() == key)
            .or(match key.as_str() {
                "exhibition" => Some(Self::ExhibitionInquiry),
                "commission" => Some(Self::CommissionRequest),
                "press" | "media" => Some(Self::PressMedia),
                "other" => Some(Self::Other),
                _ => None,
            })
            .ok_or_else(|| ClientError::Validation(format!("unknown subject {:?}", s)))
    }
}

/// One inquiry, as posted to the inbox
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: InquirySubject,
    pub message: String,
}

impl ContactForm {
    /// Required fields must be non-blank and the email must look like one.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ClientError::Validation(format!("{} is required", field)));
            }
        }

        let email = self.email.trim();
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.contains(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(ClientError::Validation(format!(
                "email {:?} is not a valid address",
                email
            )));
        }
        Ok(())
    }
}

/// Client for the inbox service
pub struct ContactClient {
    endpoint: String,
    client: Client,
}

impl ContactClient {
    pub fn new(config: &ContactConfig) -> Result<Self> {
        let endpoint = config.endpoint.clone().ok_or_else(|| {
            ClientError::Config(format!(
                "no contact endpoint configured (set {})",
                crate::config::CONTACT_ENDPOINT_ENV
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate and post one inquiry.
    pub async fn submit(&self, form: &ContactForm) -> Result<()> {
        form.validate()?;
        tracing::debug!(subject = %form.subject, "submitting inquiry");

        let response = self.client.post(&self.endpoint).json(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(subject = %form.subject, "inquiry submitted");
        Ok(())
    }
}

/// Form feedback shown to the visitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// Tracks one form's submission state
#[derive(Default)]
pub struct SubmissionTracker {
    state: RwLock<SubmissionState>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn state(&self) -> SubmissionState {
        self.state.read().await.clone()
    }

    /// Submit through `client` unless a submission is already pending.
    pub async fn submit(&self, client: &ContactClient, form: &ContactForm) -> SubmissionState {
        {
            let mut state = self.state.write().await;
            if *state == SubmissionState::Pending {
                tracing::debug!("submission already pending");
                return SubmissionState::Pending;
            }
            *state = SubmissionState::Pending;
        }

        let outcome = match client.submit(form).await {
            Ok(()) => SubmissionState::Succeeded,
            Err(e) => {
                tracing::warn!(error = %e, "inquiry failed");
                SubmissionState::Failed(e.to_string())
            }
        };

        *self.state.write().await = outcome.clone();
        outcome
    }

    /// Back to `Idle`, e.g. after the visitor dismisses the confirmation.
    pub async fn reset(&self) {
        *self.state.write().await = SubmissionState::Idle;
    }
}
