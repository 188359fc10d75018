use crate::error::AppError;
use crate::roles::{AppUser, Capability};
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// Header carrying the caller's verified email, set by the session layer in front of this service.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// A caller whose email maps to a role. Anything else is rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AppUser);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.0.role.can(capability) {
            Ok(())
        } else {
            log::info!(
                "{} ({}) denied {}",
                self.0.email,
                self.0.role.as_str(),
                capability.as_str()
            );
            Err(AppError::Forbidden { capability })
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        state
            .roles
            .resolve(email)
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Calendar access token from `Authorization: Bearer`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| BearerToken(token.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}
