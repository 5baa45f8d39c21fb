use std::rc::Rc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::types::*;
use super::Backend;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// HTTP adapter for the backend. Attaches the session's bearer token and maps
/// every non-success response onto [`ApiError`].
pub struct ApiClient {
    client: reqwest::Client,
    config: AppConfig,
    session: Rc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: AppConfig, session: Rc<SessionStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            session,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and unwrap the envelope's `data`.
    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        self.send(builder)
            .await?
            .ok_or_else(|| ApiError::Decode("Response carried no data".to_string()))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        let result = read_envelope(status, &body);

        if let Err(ref err) = result {
            if !end_rejected_session(&self.session, err) {
                warn!("Backend call failed: {}", err);
            }
        }
        result
    }
}

/// Sign out when the backend refuses the token. Returns whether it did.
/// A 401 on a signed-out request, such as bad login credentials, has no
/// session to end.
pub(crate) fn end_rejected_session(session: &SessionStore, err: &ApiError) -> bool {
    if !err.is_unauthorized() || !session.is_authenticated() {
        return false;
    }
    info!("Backend rejected the session token; signing out");
    session.logout();
    true
}

/// Decode a response body. Non-success statuses become errors carrying the
/// body's `message`, when it has one.
pub(crate) fn read_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, ApiError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        return Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized { message },
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        });
    }
    if body.trim().is_empty() {
        return Ok(None);
    }
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

#[async_trait(?Send)]
impl Backend for ApiClient {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(self.request(Method::POST, "/auth/signup").json(request))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.fetch(self.request(Method::POST, "/auth/login").json(request))
            .await
    }

    async fn list_contacts(&self, query: &ContactQuery) -> Result<ContactPage, ApiError> {
        self.fetch(self.request(Method::GET, "/hr-details").query(query))
            .await
    }

    async fn get_contact(&self, id: ContactId) -> Result<HrContact, ApiError> {
        self.fetch(self.request(Method::GET, &format!("/hr-details/{}", id)))
            .await
    }

    async fn create_contact(&self, fields: &ContactFields) -> Result<HrContact, ApiError> {
        self.fetch(self.request(Method::POST, "/hr-details").json(fields))
            .await
    }

    async fn update_contact(
        &self,
        id: ContactId,
        fields: &ContactFields,
    ) -> Result<HrContact, ApiError> {
        self.fetch(
            self.request(Method::PUT, &format!("/hr-details/{}", id))
                .json(fields),
        )
        .await
    }

    async fn delete_contact(&self, id: ContactId) -> Result<(), ApiError> {
        self.send::<serde_json::Value>(self.request(Method::DELETE, &format!("/hr-details/{}", id)))
            .await
            .map(|_| ())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.fetch(self.request(Method::GET, "/hr-details/stats"))
            .await
    }

    async fn send_emails(&self, request: &EmailSendRequest) -> Result<EmailSendResult, ApiError> {
        self.fetch(self.request(Method::POST, "/emails/send").json(request))
            .await
    }

    async fn upload_resume(&self, upload: ResumeUpload) -> Result<ResumeUploaded, ApiError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
        let form = reqwest::multipart::Form::new().part("file", part);
        self.fetch(self.request(Method::POST, "/resume/upload").multipart(form))
            .await
    }

    async fn resume_info(&self) -> Result<ResumeInfo, ApiError> {
        self.fetch(self.request(Method::GET, "/resume")).await
    }
}
