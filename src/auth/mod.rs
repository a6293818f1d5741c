//! Session guard: resolves the principal behind each request.
//!
//! API keys are compared in constant time to mitigate timing attacks.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::config::ApiKey;
use crate::errors::AppError;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Principal used when no API keys are configured.
pub const DEV_PRINCIPAL_NAME: &str = "Admin";

/// The authenticated actor recorded in activity events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub initials: String,
}

impl Principal {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            initials: initials(name),
        }
    }
}

/// Session state of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Authenticated(Principal),
    Anonymous,
}

impl Session {
    /// The session principal, or `Unauthorized` when there is none.
    pub fn require(&self) -> Result<&Principal, AppError> {
        match self {
            Session::Authenticated(principal) => Ok(principal),
            Session::Anonymous => Err(AppError::Unauthorized("Unauthorized".to_string())),
        }
    }
}

/// Maps API keys to principals.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    keys: Vec<(String, Principal)>,
}

impl SessionGuard {
    pub fn new(api_keys: &[ApiKey]) -> Self {
        Self {
            keys: api_keys
                .iter()
                .map(|k| (k.key.clone(), Principal::new(&k.name)))
                .collect(),
        }
    }

    /// Without keys every request is treated as the development principal.
    pub fn is_dev_mode(&self) -> bool {
        self.keys.is_empty()
    }

    /// Resolve the session from the `x-api-key` or bearer `Authorization` header.
    pub fn resolve(&self, headers: &HeaderMap) -> Session {
        if self.is_dev_mode() {
            return Session::Authenticated(Principal::new(DEV_PRINCIPAL_NAME));
        }

        let provided = headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .or_else(|| {
                headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.strip_prefix("Bearer "))
            });

        let Some(provided) = provided else {
            return Session::Anonymous;
        };

        // Every key is compared, no early exit
        let mut matched = None;
        for (key, principal) in &self.keys {
            if constant_time_compare(provided, key) && matched.is_none() {
                matched = Some(principal.clone());
            }
        }

        match matched {
            Some(principal) => Session::Authenticated(principal),
            None => Session::Anonymous,
        }
    }
}

/// Middleware attaching the resolved `Session` to the request extensions.
pub async fn session_layer(guard: Arc<SessionGuard>, mut request: Request, next: Next) -> Response {
    let session = guard.resolve(request.headers());
    if session == Session::Anonymous {
        tracing::debug!("Request without a valid session: {}", request.uri().path());
    }
    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Initials shown next to the actor: `Admin` -> `AD`, `Jane Q Roe` -> `JR`.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let letters: String = match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };
    letters.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn guard() -> SessionGuard {
        SessionGuard::new(&[
            ApiKey {
                key: "key-one".to_string(),
                name: "Jane Roe".to_string(),
            },
            ApiKey {
                key: "key-two".to_string(),
                name: "Ops".to_string(),
            },
        ])
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
        assert!(!constant_time_compare("short", "much-longer-key"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Admin"), "AD");
        assert_eq!(initials("Jane Q Roe"), "JR");
        assert_eq!(initials("  lt   johnson "), "LJ");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_resolve_api_key_header() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("key-two"));

        assert_eq!(
            guard().resolve(&headers),
            Session::Authenticated(Principal {
                name: "Ops".to_string(),
                initials: "OP".to_string(),
            })
        );
    }

    #[test]
    fn test_resolve_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer key-one"));

        let session = guard().resolve(&headers);
        assert_eq!(session.require().unwrap().name, "Jane Roe");
    }

    #[test]
    fn test_resolve_rejects_unknown_or_missing_key() {
        let mut headers = HeaderMap::new();
        assert_eq!(guard().resolve(&headers), Session::Anonymous);

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("key-three"));
        let session = guard().resolve(&headers);
        assert!(matches!(session.require(), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_dev_mode_authenticates_everyone() {
        let guard = SessionGuard::new(&[]);
        assert!(guard.is_dev_mode());

        let session = guard.resolve(&HeaderMap::new());
        let principal = session.require().unwrap();
        assert_eq!(principal.name, "Admin");
        assert_eq!(principal.initials, "AD");
    }
}
