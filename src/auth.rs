//! Login and signup: form validation and the calls that open a session.

use std::rc::Rc;

use crate::api::types::{AuthResponse, LoginRequest, SignupRequest};
use crate::api::Backend;
use crate::contacts::FormError;
use crate::notify::Notifier;
use crate::session::SessionStore;
use crate::validate::{check_email, FieldErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        }
        errors.into_result(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<SignupRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.full_name.trim();
        if name.is_empty() {
            errors.insert("fullName", "Full name is required");
        } else if name.chars().count() < 2 {
            errors.insert("fullName", "Name must be at least 2 characters");
        }
        check_email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.chars().count() < 6 {
            errors.insert("password", "At least 6 characters");
        }
        if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }
        errors.into_result(SignupRequest {
            full_name: name.to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Opens sessions through the backend.
pub struct Authenticator {
    backend: Rc<dyn Backend>,
    session: Rc<SessionStore>,
    notifier: Rc<dyn Notifier>,
}

impl Authenticator {
    pub fn new(
        backend: Rc<dyn Backend>,
        session: Rc<SessionStore>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            session,
            notifier,
        }
    }

    pub async fn login(&self, form: &LoginForm) -> Result<AuthResponse, FormError> {
        let request = form.validate().map_err(FormError::Invalid)?;
        match self.backend.login(&request).await {
            Ok(response) => {
                self.session.login(&response);
                self.notifier.success("Welcome back!");
                Ok(response)
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Invalid credentials"));
                Err(FormError::Api(e))
            }
        }
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<AuthResponse, FormError> {
        let request = form.validate().map_err(FormError::Invalid)?;
        match self.backend.signup(&request).await {
            Ok(response) => {
                self.session.login(&response);
                self.notifier.success("Account created successfully!");
                Ok(response)
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Registration failed"));
                Err(FormError::Api(e))
            }
        }
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}
