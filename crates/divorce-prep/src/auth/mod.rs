//! Back-office authentication.
//!
//! A bearer token is resolved to an [`AuthenticatedUser`] once, in
//! [`require_admin`]. Handlers behind that layer receive an
//! [`AdminCapability`] and never inspect raw role strings.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AdminConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Stored role strings other than `admin` carry no back-office rights.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::Member
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Member => f.write_str("member"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub role: Role,
}

/// Proof that the current request was made by an administrator.
///
/// Only [`AdminCapability::grant`] builds one, so a handler that extracts it
/// cannot be reached by a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCapability {
    user_id: String,
}

impl AdminCapability {
    pub fn grant(user: &AuthenticatedUser) -> Result<Self, AuthError> {
        match user.role {
            Role::Admin => Ok(Self {
                user_id: user.user_id.clone(),
            }),
            Role::Member => Err(AuthError::Forbidden),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("로그인이 필요합니다.")]
    MissingCredentials,
    #[error("인증 정보가 유효하지 않습니다.")]
    InvalidCredentials,
    #[error("관리자 권한이 필요합니다.")]
    Forbidden,
    #[error("session directory failure: {0}")]
    Directory(String),
}

/// Looks up who a bearer token belongs to.
pub trait SessionDirectory: Send + Sync {
    fn resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>, AuthError>;
}

/// Token table held in memory, seeded from configuration.
#[derive(Debug, Default)]
pub struct StaticSessionDirectory {
    sessions: RwLock<HashMap<String, AuthenticatedUser>>,
}

impl StaticSessionDirectory {
    pub fn from_config(config: &AdminConfig) -> Self {
        let directory = Self::default();
        for (index, token) in config.admin_tokens.iter().enumerate() {
            directory.insert(
                token.clone(),
                AuthenticatedUser {
                    user_id: format!("admin-{}", index + 1),
                    role: Role::Admin,
                },
            );
        }
        directory
    }

    pub fn insert(&self, token: impl Into<String>, user: AuthenticatedUser) {
        match self.sessions.write() {
            Ok(mut sessions) => {
                sessions.insert(token.into(), user);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(token.into(), user);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|sessions| sessions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionDirectory for StaticSessionDirectory {
    fn resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>, AuthError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|err| AuthError::Directory(err.to_string()))?;
        Ok(sessions.get(token).cloned())
    }
}

fn bearer_token(req: &Request) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidCredentials)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::InvalidCredentials)?;

    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(token)
}

/// Resolve the caller once and admit administrators only.
///
/// Missing or unknown tokens get 401, authenticated members get 403. On
/// success an [`AdminCapability`] is inserted into the request extensions.
pub async fn require_admin(
    State(directory): State<Arc<dyn SessionDirectory>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = {
        let token = bearer_token(&req)?;
        directory.resolve(token)?.ok_or_else(|| {
            debug!(path = %req.uri().path(), "unknown bearer token");
            AuthError::InvalidCredentials
        })?
    };

    let capability = AdminCapability::grant(&user).map_err(|err| {
        warn!(user_id = %user.user_id, role = %user.role, "admin route denied");
        err
    })?;

    req.extensions_mut().insert(capability);
    Ok(next.run(req).await)
}
