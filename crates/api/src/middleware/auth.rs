//! # Authentication Module
//!
//! Identity is established by the upstream auth provider, which forwards the
//! caller's id and role as request headers. This module turns those headers
//! into an explicit [`AuthContext`] that handlers receive as an extractor.

use async_trait::async_trait;
use axum::http::{HeaderMap, request::Parts};
use axum::extract::FromRequestParts;
use clinicdesk_core::auth::{AuthContext, Role};
use clinicdesk_core::errors::{TimeError, TimeResult};
use uuid::Uuid;

use crate::middleware::error_handling::AppError;

/// Header carrying the authenticated user's id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user's role (`admin`, `staff` or `doctor`)
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller, extracted from identity headers
///
/// Rejects the request with `401 Unauthorized` when either header is
/// missing or malformed.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub AuthContext);

fn header<'a>(headers: &'a HeaderMap, name: &str) -> TimeResult<&'a str> {
    headers
        .get(name)
        .ok_or_else(|| TimeError::Authentication(format!("Missing {} header", name)))?
        .to_str()
        .map_err(|_| TimeError::Authentication(format!("Malformed {} header", name)))
}

/// Builds an [`AuthContext`] from identity headers
pub fn auth_context_from_headers(headers: &HeaderMap) -> TimeResult<AuthContext> {
    let current_user_id = Uuid::parse_str(header(headers, USER_ID_HEADER)?.trim())
        .map_err(|_| TimeError::Authentication(format!("Malformed {} header", USER_ID_HEADER)))?;
    let role: Role = header(headers, USER_ROLE_HEADER)?.parse()?;

    Ok(AuthContext::new(role, current_user_id))
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = auth_context_from_headers(&parts.headers)?;
        tracing::debug!(role = %ctx.role, user_id = %ctx.current_user_id, "Authenticated request");
        Ok(CurrentUser(ctx))
    }
}
