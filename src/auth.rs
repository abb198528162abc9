use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    error::AppError,
    models::Identity,
    session::{SessionResolver, extract_credential},
};

/// Identity Extractor
///
/// Gives a handler the caller of the current request, anonymous or not. The gate
/// middleware stores the identity it resolved in the request extensions; routes the
/// gate classified as public get theirs resolved here, on first use, and cached in the
/// extensions for any later extractor of the same request.
///
/// Never rejects: an unusable credential is simply an anonymous caller.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    SessionResolver: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(identity.clone());
        }

        let resolver = SessionResolver::from_ref(state);
        let identity = resolver.resolve(extract_credential(&parts.headers)).await;
        parts.extensions.insert(identity.clone());
        Ok(identity)
    }
}

/// AuthUser Extractor
///
/// An `Identity` that must be authenticated. API handlers take this instead of
/// `Identity` so anonymous callers are turned away with 401 before the handler runs;
/// what the authenticated caller may then touch is decided by `access`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    SessionResolver: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = match Identity::from_request_parts(parts, state).await {
            Ok(identity) => identity,
            Err(never) => match never {},
        };

        if identity.is_anonymous() {
            return Err(AppError::Unauthorized);
        }
        Ok(AuthUser(identity))
    }
}
