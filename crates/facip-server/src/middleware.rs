use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Identity attached to each protected request by [`require_bearer_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// Token bound to one faculty member; may only touch that member's link.
    Faculty(Uuid),
    /// Token that may read every link but owns none.
    Admin,
    /// Auth disabled in development.
    Unauthenticated,
}

impl Caller {
    #[must_use]
    pub fn may_update(self, faculty_id: Uuid) -> bool {
        match self {
            Self::Faculty(own) => own == faculty_id,
            Self::Admin => false,
            Self::Unauthenticated => true,
        }
    }

    #[must_use]
    pub fn may_view(self, faculty_id: Uuid) -> bool {
        match self {
            Self::Faculty(own) => own == faculty_id,
            Self::Admin | Self::Unauthenticated => true,
        }
    }
}

/// Bearer tokens and the caller each one authenticates.
#[derive(Debug, Clone)]
pub struct AuthState {
    tokens: Arc<HashMap<String, Caller>>,
    pub enabled: bool,
}

impl AuthState {
    /// Builds auth config from `FACIP_API_KEYS`.
    ///
    /// # Errors
    ///
    /// See [`AuthState::from_keys`].
    pub fn from_env(is_development: bool) -> anyhow::Result<Self> {
        let raw = std::env::var("FACIP_API_KEYS").unwrap_or_default();
        Self::from_keys(&raw, is_development)
    }

    /// Parses comma-separated `token:<faculty uuid>` or `token:admin` entries.
    ///
    /// In development an empty list disables auth; anywhere else it is a
    /// startup error.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed entry, a repeated token, or an empty
    /// list outside development.
    pub fn from_keys(raw: &str, is_development: bool) -> anyhow::Result<Self> {
        let mut tokens = HashMap::new();
        for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (token, subject) = parse_key_entry(entry)?;
            if tokens.insert(token.to_owned(), subject).is_some() {
                anyhow::bail!("FACIP_API_KEYS lists token '{token}' more than once");
            }
        }

        if tokens.is_empty() {
            if !is_development {
                anyhow::bail!(
                    "FACIP_API_KEYS is required outside development; provide token:<faculty uuid> entries"
                );
            }
            tracing::warn!("FACIP_API_KEYS not set; bearer auth disabled in development environment");
        }

        let enabled = !tokens.is_empty();
        Ok(Self {
            tokens: Arc::new(tokens),
            enabled,
        })
    }

    fn caller_for(&self, token: &str) -> Option<Caller> {
        self.tokens.get(token).copied()
    }
}

fn parse_key_entry(entry: &str) -> anyhow::Result<(&str, Caller)> {
    let Some((token, subject)) = entry.split_once(':') else {
        anyhow::bail!("FACIP_API_KEYS entry must look like token:<faculty uuid>");
    };
    let (token, subject) = (token.trim(), subject.trim());
    if token.is_empty() {
        anyhow::bail!("FACIP_API_KEYS entry has an empty token");
    }
    if subject == "admin" {
        return Ok((token, Caller::Admin));
    }
    let faculty_id = Uuid::parse_str(subject).map_err(|e| {
        anyhow::anyhow!("FACIP_API_KEYS entry for a token has invalid faculty id '{subject}': {e}")
    })?;
    Ok((token, Caller::Faculty(faculty_id)))
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Extracts or generates a request ID.
///
/// An incoming `x-request-id` header is reused; otherwise a new `UUIDv4` is
/// generated. The ID is inserted into request extensions as [`RequestId`] and
/// echoed on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Resolves the bearer token to a [`Caller`] and stores it as a request
/// extension. Unknown or missing tokens are answered with 401 when auth is
/// enabled.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let caller = if auth.enabled {
        extract_bearer_token(req.headers().get(AUTHORIZATION))
            .and_then(|token| auth.caller_for(token))
    } else {
        Some(Caller::Unauthenticated)
    };

    match caller {
        Some(caller) => {
            req.extensions_mut().insert(caller);
            next.run(req).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "unauthorized",
                    message: "missing or invalid bearer token",
                },
            }),
        )
            .into_response(),
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}
