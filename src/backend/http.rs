use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::errors::BackendError;
use super::traits::AccountService;
use super::types::{Credentials, RegistrationInput, Session, UserRecord};
use crate::config::BackendConfig;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const SESSION_HEADER: &str = "X-Appwrite-Session";

/// Placeholder id asking the service to generate a unique account id
const UNIQUE_ID: &str = "unique()";

/// REST client for the account service
///
/// Client errors (4xx) are treated as a refusal and reported as `Ok(None)`;
/// server errors and transport failures become `BackendError`.
#[derive(Debug)]
pub struct HttpAccountService {
    client: Client,
    endpoint: String,
    project_id: String,
    session: RwLock<Option<Session>>,
}

impl HttpAccountService {
    pub fn new(endpoint: &str, project_id: &str) -> Result<Self, BackendError> {
        let client = Client::builder().cookie_store(true).build()?;
        Self::with_client(client, endpoint, project_id)
    }

    /// Build a client from configuration, applying the request timeout
    ///
    /// The cookie store keeps sessions the service hands out as `Set-Cookie`
    /// with an empty secret.
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder().cookie_store(true);
        if config.request_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.request_timeout_ms));
        }
        let client = builder.build()?;
        Self::with_client(client, &config.endpoint, &config.project_id)
    }

    fn with_client(client: Client, endpoint: &str, project_id: &str) -> Result<Self, BackendError> {
        let endpoint = endpoint.trim_end_matches('/');
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(BackendError::InvalidEndpoint {
                url: endpoint.to_string(),
            });
        }

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            project_id: project_id.to_string(),
            session: RwLock::new(None),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Reuse a session obtained earlier (e.g. passed on the command line)
    pub async fn restore_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    async fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, self.url(path))
            .header(PROJECT_HEADER, &self.project_id);

        if let Some(session) = self.session.read().await.as_ref() {
            if !session.secret.is_empty() {
                request = request.header(SESSION_HEADER, &session.secret);
            }
        }

        request
    }

    async fn decode<T: DeserializeOwned>(
        operation: &str,
        response: Response,
    ) -> Result<Option<T>, BackendError> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .json::<T>()
                .await
                .map_err(|e| BackendError::InvalidResponse {
                    message: format!("{operation}: {e}"),
                })?;
            return Ok(Some(body));
        }

        let message = error_message(response).await;

        if status.is_client_error() {
            warn!(
                operation,
                status = status.as_u16(),
                reason = %message,
                "Account service refused request"
            );
            Ok(None)
        } else {
            Err(BackendError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Pull the `message` field out of an error body, falling back to the raw text
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                text
            }
        })
}

#[async_trait]
impl AccountService for HttpAccountService {
    async fn create_account(
        &self,
        input: &RegistrationInput,
    ) -> Result<Option<UserRecord>, BackendError> {
        debug!(email = %input.email, username = %input.username, "Creating account");

        let response = self
            .request(reqwest::Method::POST, "/account")
            .await
            .json(&json!({
                "userId": UNIQUE_ID,
                "name": input.name,
                "username": input.username,
                "email": input.email,
                "password": input.password,
            }))
            .send()
            .await?;

        let user: Option<UserRecord> = Self::decode("create_account", response).await?;
        if let Some(user) = &user {
            info!(user.id = %user.id, "Account created");
        }
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>, BackendError> {
        debug!(email = %credentials.email, "Opening email session");

        let response = self
            .request(reqwest::Method::POST, "/account/sessions/email")
            .await
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;

        let session: Option<Session> = Self::decode("sign_in", response).await?;
        if let Some(session) = &session {
            *self.session.write().await = Some(session.clone());
            info!(session.id = %session.id, "Session opened");
        }
        Ok(session)
    }

    async fn current_account(&self) -> Result<Option<UserRecord>, BackendError> {
        let response = self
            .request(reqwest::Method::GET, "/account")
            .await
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("No active session");
            return Ok(None);
        }

        Self::decode("current_account", response).await
    }
}
