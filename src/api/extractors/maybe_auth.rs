use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use crate::state::AppState;
use crate::domain::models::user::User;
use std::sync::Arc;
use tracing::{debug, Span};

/// Caller identity taken from the `Authorization` header. A missing, malformed
/// or expired token yields an anonymous caller rather than a rejection.
pub struct MaybeAuthUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let token = match bearer_token(&parts.headers) {
            Some(token) => token,
            None => return Ok(MaybeAuthUser(None)),
        };

        let claims = match app_state.auth_service.verify_token(token) {
            Ok(claims) => claims,
            Err(_) => {
                // Invalid token (expired, bad signature) -> Treat as anonymous
                debug!("MaybeAuth: rejected bearer token, continuing anonymously");
                return Ok(MaybeAuthUser(None));
            }
        };

        Span::current().record("user_id", &claims.id);

        Ok(MaybeAuthUser(Some(claims.into())))
    }
}

/// Accepts `Bearer <token>` as well as a bare token value.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    if value.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None => value,
    };
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_and_bare_tokens() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn ignores_other_schemes_and_empty_values() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
