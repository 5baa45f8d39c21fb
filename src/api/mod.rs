//! Resource services: one method per backend endpoint.

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::ApiError;
pub use client::ApiClient;
use types::*;

/// The backend as seen by the client. [`ApiClient`] talks HTTP; tests
/// substitute an in-memory fake.
#[async_trait(?Send)]
pub trait Backend {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError>;
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    async fn list_contacts(&self, query: &ContactQuery) -> Result<ContactPage, ApiError>;
    async fn get_contact(&self, id: ContactId) -> Result<HrContact, ApiError>;
    async fn create_contact(&self, fields: &ContactFields) -> Result<HrContact, ApiError>;
    async fn update_contact(
        &self,
        id: ContactId,
        fields: &ContactFields,
    ) -> Result<HrContact, ApiError>;
    async fn delete_contact(&self, id: ContactId) -> Result<(), ApiError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;

    async fn send_emails(&self, request: &EmailSendRequest) -> Result<EmailSendResult, ApiError>;

    async fn upload_resume(&self, upload: ResumeUpload) -> Result<ResumeUploaded, ApiError>;
    async fn resume_info(&self) -> Result<ResumeInfo, ApiError>;
}
