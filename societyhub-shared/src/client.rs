/// Typed HTTP client for the SocietyHub API
///
/// Wraps the join/leave and RSVP flows. A failed call never mutates the
/// caller's state; a successful one replaces it with what the server
/// confirmed.
///
/// # Example
///
/// ```no_run
/// use societyhub_shared::client::SocietyHubClient;
/// use uuid::Uuid;
///
/// # async fn example(society_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = SocietyHubClient::new("http://localhost:5000");
/// let user = client.login("emma@example.com", "1122").await?;
///
/// let mut society = client.fetch_society(society_id).await?;
/// let message = client.toggle_membership(&mut society, &user, "I love theatre").await?;
/// println!("{message}");
/// # Ok(())
/// # }
/// ```

use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::views::{EventCard, SocietyDetail};

/// Message used when a rejection carries no readable message
pub const FALLBACK_ERROR: &str = "Action failed";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure; the server was never reached or the connection dropped
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("{message} ({status})")]
    Rejected { status: StatusCode, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Signed-in user, as returned by login and registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: CurrentUser,
    token: String,
}

/// Body of join/leave/approve/reject responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub message: String,
    pub society: SocietyDetail,
}

/// Body of RSVP responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpResponse {
    pub message: String,
    pub event: EventCard,
}

/// Form posted for join, leave and RSVP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionForm {
    pub name: String,
    pub email: String,
    pub reason: String,
}

impl SubmissionForm {
    pub fn for_user(user: &CurrentUser, reason: &str) -> Self {
        Self {
            name: user.username.clone(),
            email: user.email.clone(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsvpOutcome {
    /// The RSVP was recorded; carries the server's message
    Confirmed(String),

    /// The viewer's email was already a participant; nothing was sent
    AlreadyConfirmed,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SocietyHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl SocietyHubClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Uses `token` as the bearer token for subsequent calls
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Logs in and keeps the returned token
    pub async fn login(&mut self, email: &str, password: &str) -> Result<CurrentUser, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response: AuthResponse = self
            .send(self.http.post(self.url("/api/auth/login")).json(&body))
            .await?;

        self.token = Some(response.token);
        Ok(response.user)
    }

    /// Fetches a society's detail page
    pub async fn fetch_society(&self, id: Uuid) -> Result<SocietyDetail, ClientError> {
        self.send(self.http.get(self.url(&format!("/api/society/{}", id))))
            .await
    }

    /// Joins or leaves, depending on whether `user` is already a member
    ///
    /// On success `society` is replaced by the server-confirmed detail and the
    /// server's message is returned. On failure `society` is left untouched.
    pub async fn toggle_membership(
        &self,
        society: &mut SocietyDetail,
        user: &CurrentUser,
        reason: &str,
    ) -> Result<String, ClientError> {
        let action = if society.has_joined(user.id) {
            "leave"
        } else {
            "join"
        };

        tracing::debug!(society_id = %society.id, action, "Submitting membership change");

        let response: MembershipResponse = self
            .send(
                self.http
                    .post(self.url(&format!("/api/society/{}/{}", society.id, action)))
                    .json(&SubmissionForm::for_user(user, reason)),
            )
            .await?;

        *society = response.society;
        Ok(response.message)
    }

    /// RSVPs to an event unless the user already did
    ///
    /// No request is sent when `user.email` is already among the event's
    /// participants.
    pub async fn rsvp(
        &self,
        event: &mut EventCard,
        user: &CurrentUser,
        reason: &str,
    ) -> Result<RsvpOutcome, ClientError> {
        if event.is_rsvped(&user.email) {
            return Ok(RsvpOutcome::AlreadyConfirmed);
        }

        let response: RsvpResponse = self
            .send(
                self.http
                    .post(self.url(&format!("/api/events/{}/rsvp", event.id)))
                    .json(&SubmissionForm::for_user(user, reason)),
            )
            .await?;

        *event = response.event;
        Ok(RsvpOutcome::Confirmed(response.message))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());

            return Err(ClientError::Rejected { status, message });
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SocietyHubClient::new("http://localhost:5000/");
        assert_eq!(client.url("/api/society"), "http://localhost:5000/api/society");
    }

    #[test]
    fn test_submission_form_uses_account_details() {
        let user = CurrentUser {
            id: Uuid::new_v4(),
            username: "emma".to_string(),
            email: "emma@example.com".to_string(),
        };

        let form = SubmissionForm::for_user(&user, "I love theatre");
        assert_eq!(form.name, "emma");
        assert_eq!(form.email, "emma@example.com");
        assert_eq!(form.reason, "I love theatre");
    }

    #[test]
    fn test_with_token() {
        let client = SocietyHubClient::new("http://localhost:5000").with_token("abc");
        assert_eq!(client.token(), Some("abc"));
    }
}
