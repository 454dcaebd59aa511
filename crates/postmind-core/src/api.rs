use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::cookie::Jar;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{AssistantReply, CorrelationId, EmailSummary, WireReply};

/// Name the backend's session middleware uses for its cookie
pub const SESSION_COOKIE_NAME: &str = "session";

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CorrelationId>,
}

impl CommandRequest {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            correlation_id: None,
        }
    }

    pub fn confirmation(message: impl Into<String>, correlation_id: CorrelationId) -> Self {
        Self {
            message: message.into(),
            correlation_id: Some(correlation_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Response of `GET /api/me`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IdentityResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct EmailListResponse {
    #[serde(default)]
    emails: Option<Vec<EmailSummary>>,
}

/// Accepts either a full `name=value` pair or a bare value, which is taken
/// to be the backend's `session` cookie.
pub fn normalize_session_cookie(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix("Cookie:")
        .or_else(|| raw.strip_prefix("cookie:"))
        .unwrap_or(raw)
        .trim();
    if raw.is_empty() {
        return None;
    }

    let first = raw.split(';').next().unwrap_or(raw).trim();
    let mut cookie = if first.contains('=') {
        raw.to_string()
    } else {
        format!("{}={}", SESSION_COOKIE_NAME, raw)
    };
    if !cookie.to_lowercase().contains("path=") {
        cookie.push_str("; Path=/");
    }
    Some(cookie)
}

/// HTTP client for the assistant backend. Cheap to clone; clones share the
/// connection pool and the cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::from_parts(
            config.base_url()?,
            config.session_cookie.as_deref(),
            config.request_timeout(),
        )
    }

    pub fn from_parts(base_url: Url, session_cookie: Option<&str>, timeout: Duration) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let client = Self {
            http,
            base_url,
            jar,
        };
        if let Some(cookie) = session_cookie {
            client.install_session(cookie);
        }
        Ok(client)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Where the browser goes to start the OAuth flow
    pub fn login_url(&self) -> Url {
        self.endpoint(&["api", "auth", "login"])
    }

    /// Put a session cookie into the jar. Returns false when `raw` is blank.
    pub fn install_session(&self, raw: &str) -> bool {
        match normalize_session_cookie(raw) {
            Some(cookie) => {
                self.jar.add_cookie_str(&cookie, &self.base_url);
                debug!("Installed session cookie for {}", self.base_url);
                true
            }
            None => false,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(status))
        }
    }

    /// `GET /api/me`
    pub async fn identity(&self) -> Result<IdentityResponse, ApiError> {
        let url = self.endpoint(&["api", "me"]);
        debug!("GET {}", url);
        let response = Self::check(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// `GET /api/emails`. A missing or null `emails` field is an empty inbox.
    pub async fn list_emails(&self) -> Result<Vec<EmailSummary>, ApiError> {
        let url = self.endpoint(&["api", "emails"]);
        debug!("GET {}", url);
        let response = Self::check(self.http.get(url).send().await?).await?;
        let body: EmailListResponse = response.json().await?;
        Ok(body.emails.unwrap_or_default())
    }

    /// `DELETE /api/emails/{id}`. The body is ignored.
    pub async fn delete_email(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "emails", id]);
        debug!("DELETE {}", url);
        Self::check(self.http.delete(url).send().await?).await?;
        Ok(())
    }

    /// `POST /api/chat`
    pub async fn send_command(&self, request: &CommandRequest) -> Result<AssistantReply, ApiError> {
        let url = self.endpoint(&["api", "chat"]);
        debug!("POST {}", url);
        let response = Self::check(self.http.post(url).json(request).send().await?).await?;
        let wire: WireReply = response.json().await?;
        AssistantReply::from_wire(wire)
    }
}
