//! Resume upload: local guards, then a multipart POST, then the session's
//! resume flag is updated.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use thiserror::Error;
use tracing::{info, warn};

use crate::api::types::{ResumeInfo, ResumeUpload, ResumeUploaded};
use crate::api::Backend;
use crate::config::MAX_RESUME_BYTES;
use crate::error::ApiError;
use crate::notify::Notifier;
use crate::session::SessionStore;

const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Only PDF/DOC/DOCX")]
    UnsupportedType,
    #[error("Max 10MB")]
    TooLarge,
    #[error("An upload is already in progress")]
    Busy,
    #[error("Could not read file: {0}")]
    Read(String),
    #[error("{0}")]
    Api(ApiError),
}

/// Check a file before anything is read or sent.
pub fn check_resume_file(name: &str, size: u64) -> Result<(), UploadError> {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::UnsupportedType);
    }
    if size > MAX_RESUME_BYTES {
        return Err(UploadError::TooLarge);
    }
    Ok(())
}

pub struct ResumeUploader {
    backend: Rc<dyn Backend>,
    session: Rc<SessionStore>,
    notifier: Rc<dyn Notifier>,
    uploading: Cell<bool>,
}

impl ResumeUploader {
    pub fn new(
        backend: Rc<dyn Backend>,
        session: Rc<SessionStore>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            session,
            notifier,
            uploading: Cell::new(false),
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.get()
    }

    /// Upload a resume. `read` produces the file body and is only awaited once
    /// the name and size pass [`check_resume_file`]. Drag-and-drop and the file
    /// picker both come through here.
    pub async fn upload<F, Fut>(
        &self,
        name: &str,
        size: u64,
        read: F,
    ) -> Result<ResumeUploaded, UploadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, String>>,
    {
        if let Err(e) = check_resume_file(name, size) {
            self.notifier.error(&e.to_string());
            return Err(e);
        }
        if self.uploading.replace(true) {
            return Err(UploadError::Busy);
        }
        let result = self.read_and_send(name, read).await;
        self.uploading.set(false);

        match result {
            Ok(uploaded) => {
                info!("Uploaded resume {}", name);
                self.session
                    .update_resume_status(true, Some(name.to_string()));
                self.notifier.success("Resume uploaded!");
                Ok(uploaded)
            }
            Err(e) => {
                let message = match &e {
                    UploadError::Api(api) => api.user_message("Upload failed"),
                    other => other.to_string(),
                };
                self.notifier.error(&message);
                Err(e)
            }
        }
    }

    async fn read_and_send<F, Fut>(&self, name: &str, read: F) -> Result<ResumeUploaded, UploadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, String>>,
    {
        let bytes = read().await.map_err(UploadError::Read)?;
        self.backend
            .upload_resume(ResumeUpload {
                file_name: name.to_string(),
                bytes,
            })
            .await
            .map_err(UploadError::Api)
    }

    /// Pull the stored resume's metadata so the file name is known after a
    /// fresh login. Failures are only logged.
    pub async fn sync_status(&self) -> Option<ResumeInfo> {
        match self.backend.resume_info().await {
            Ok(info) => {
                if info.has_resume {
                    self.session
                        .update_resume_status(true, info.file_name.clone());
                }
                Some(info)
            }
            Err(e) => {
                warn!("Failed to load resume info: {}", e);
                None
            }
        }
    }
}
