use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, header};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    models::{Identity, Role, User},
    repository::RepositoryState,
};

/// Name of the cookie browsers carry the session token in.
pub const SESSION_COOKIE: &str = "token";

/// Claims
///
/// Payload of the portal's session token (HS256 JWT). `sub` is the `profiles.id` of the
/// caller; `role`, `email` and `name` are snapshots taken at issue time and are only
/// authoritative when `AppConfig::trust_token_role` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub exp: usize,
    pub iat: usize,
}

/// SessionError
///
/// Reasons a credential fails to produce an identity. None of these ever reach a
/// client: the resolver logs them and carries on with an anonymous caller.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("session store unavailable: {0}")]
    SessionStoreUnavailable(String),

    #[error("unknown role {0:?}")]
    UnknownRole(String),
}

/// SessionResolver
///
/// Turns the credential of one request into an `Identity`. Cloned into every request
/// through `FromRef`; holds no per-request state.
#[derive(Clone)]
pub struct SessionResolver {
    repo: RepositoryState,
    decoding_key: DecodingKey,
    validation: Validation,
    lookup_timeout: Duration,
    trust_token_role: bool,
}

impl SessionResolver {
    pub fn new(config: &AppConfig, repo: RepositoryState) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is always enforced, whatever the library default.
        validation.validate_exp = true;

        Self {
            repo,
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            lookup_timeout: config.session_lookup_timeout,
            trust_token_role: config.trust_token_role,
        }
    }

    /// resolve
    ///
    /// Never fails. A missing, malformed, expired or unverifiable credential, a user
    /// that no longer exists, a failing store and a store slower than the lookup
    /// timeout all yield `Identity::anonymous()`.
    pub async fn resolve(&self, credential: Option<&str>) -> Identity {
        let Some(token) = credential.map(str::trim).filter(|t| !t.is_empty()) else {
            return Identity::anonymous();
        };

        match self.try_resolve(token).await {
            Ok(identity) => identity,
            Err(err @ SessionError::SessionStoreUnavailable(_)) => {
                tracing::warn!(error = %err, "session lookup failed, continuing as anonymous");
                Identity::anonymous()
            }
            Err(err) => {
                tracing::debug!(error = %err, "credential rejected, continuing as anonymous");
                Identity::anonymous()
            }
        }
    }

    async fn try_resolve(&self, token: &str) -> Result<Identity, SessionError> {
        let claims = self.verify(token)?;

        let (identity, raw_role) = if self.trust_token_role {
            let identity = Identity {
                subject_id: claims.sub,
                display_name: claims.name,
                email: claims.email,
                role: Role::parse(&claims.role),
            };
            (identity, claims.role)
        } else {
            let user = self.lookup(claims.sub).await?;
            (Identity::from_user(&user), user.role)
        };

        if !identity.role.is_known() {
            tracing::warn!(
                subject = %identity.subject_id,
                error = %SessionError::UnknownRole(raw_role),
                "role outside the known set, granting no entitlement"
            );
        }

        Ok(identity)
    }

    /// verify
    ///
    /// Signature and expiry check only; no I/O.
    pub fn verify(&self, token: &str) -> Result<Claims, SessionError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    SessionError::InvalidCredential("token expired".to_string())
                }
                _ => SessionError::InvalidCredential(e.to_string()),
            })
    }

    /// lookup
    ///
    /// Refreshes the caller's record so a role change or deletion takes effect before
    /// the token expires. Bounded by `lookup_timeout`.
    async fn lookup(&self, id: Uuid) -> Result<User, SessionError> {
        match tokio::time::timeout(self.lookup_timeout, self.repo.get_user(id)).await {
            Ok(Ok(Some(user))) => Ok(user),
            Ok(Ok(None)) => Err(SessionError::InvalidCredential(format!(
                "subject {id} no longer exists"
            ))),
            Ok(Err(e)) => Err(SessionError::SessionStoreUnavailable(e.to_string())),
            Err(_) => Err(SessionError::SessionStoreUnavailable(format!(
                "user lookup exceeded {:?}",
                self.lookup_timeout
            ))),
        }
    }
}

/// extract_credential
///
/// Pulls the session token from `Authorization: Bearer <jwt>`, falling back to the
/// `token` cookie used by browser page navigation. Both carry the same JWT.
pub fn extract_credential(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(header::COOKIE)
        .into_iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        })
        .next()
}

/// issue_token
///
/// Mints a session token for `user` valid for `ttl`.
pub fn issue_token(
    secret: &str,
    user: &User,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let claims = Claims {
        sub: user.id,
        role: user.role.clone(),
        email: user.email.clone(),
        name: user.display_name.clone(),
        iat: now as usize,
        exp: (now + ttl.as_secs()) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
