//! Session identity check: who is signed in, if anyone.

use tracing::debug;

use crate::api::{ApiClient, IdentityResponse};

/// Greeting name used until (or unless) the identity check finds a signed-in user
pub const FALLBACK_NAME: &str = "there";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    Authenticated { name: String, email: String },
}

impl Identity {
    pub fn from_response(response: IdentityResponse) -> Self {
        if !response.authenticated {
            return Identity::Anonymous;
        }
        let user = response.user.unwrap_or_default();
        Identity::Authenticated {
            name: user.name,
            email: user.email,
        }
    }

    /// Name for the greeting. An authenticated session without a usable name
    /// still greets with the fallback.
    pub fn display_name(&self) -> &str {
        match self {
            Identity::Authenticated { name, .. } if !name.trim().is_empty() => name.trim(),
            _ => FALLBACK_NAME,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }
}

/// Ask the backend who we are. Never fails: any error degrades to
/// [`Identity::Anonymous`]. Called once per chat mount, not retried.
pub async fn identify(client: &ApiClient) -> Identity {
    match client.identity().await {
        Ok(response) => Identity::from_response(response),
        Err(e) => {
            debug!("Identity check failed, greeting with fallback name: {}", e);
            Identity::Anonymous
        }
    }
}
