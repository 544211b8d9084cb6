//! # Authentication Data Transfer Objects
//!
//! Request structures for the signup and login forms.
//!
//! ## Wire Format
//!
//! Both forms are posted as `application/x-www-form-urlencoded`:
//!
//! ```text
//! POST /signupSubmit
//! Content-Type: application/x-www-form-urlencoded
//!
//! name=Ada&email=ada%40example.com&password=hunter2
//! ```
//!
//! Missing fields deserialize as `None` so that the gateway, not the
//! extractor, reports which rule was violated.

use serde::Deserialize;
use std::fmt;

/// Signup form: `POST /signupSubmit`.
#[derive(Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login form: `POST /loginSubmit`.
#[derive(Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl SignupRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

// Passwords never reach logs through `{:?}`.
impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}
