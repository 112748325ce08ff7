use crate::core::error::AppError;
use crate::features::auth::TokenVerifier;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let provided = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok())
                .and_then(|value| value.strip_prefix("Basic "))
                .and_then(|encoded| BASE64_STANDARD.decode(encoded).ok())
                .and_then(|decoded| String::from_utf8(decoded).ok());

            if provided.as_deref() == Some(credentials.as_str()) {
                return Ok(next.run(req).await);
            }

            Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response())
        })
    }
}

/// Extracts the bearer token from an Authorization header value
fn bearer_token(value: &str) -> Result<&str, AppError> {
    value.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })
}

/// Resolves the caller's identity when an Authorization header is present.
///
/// Anonymous requests pass through untouched; handlers decide whether they
/// need a user via the `Session` they receive. A header that is present but
/// invalid is always rejected.
pub async fn session_middleware(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|h| {
            h.to_str()
                .map(str::to_owned)
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))
        })
        .transpose()?;

    if let Some(value) = auth_header {
        let token = bearer_token(&value)?;
        let user = verifier.verify(token).await?;
        tracing::debug!(user_id = %user.user_id, "Request authenticated");
        req.extensions_mut().insert(user);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::auth::session::Session;

    #[test]
    fn test_bearer_token_strips_prefix() {
        assert_eq!(bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        let err = bearer_token("Basic dXNlcjpwYXNz").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    struct StubVerifier {
        user_id: Uuid,
    }

    #[async_trait::async_trait]
    impl TokenVerifier for StubVerifier {
        async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
            if token == "good-token" {
                Ok(AuthenticatedUser::new(self.user_id))
            } else {
                Err(AppError::Auth("Invalid token".to_string()))
            }
        }
    }

    async fn whoami(session: Session) -> String {
        session
            .user_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "anonymous".to_string())
    }

    fn app(user_id: Uuid) -> axum::Router {
        let verifier: Arc<dyn TokenVerifier> = Arc::new(StubVerifier { user_id });
        axum::Router::new()
            .route("/whoami", axum::routing::get(whoami))
            .route_layer(axum::middleware::from_fn_with_state(
                verifier,
                session_middleware,
            ))
    }

    #[tokio::test]
    async fn test_session_middleware_resolves_identity() {
        let user_id = Uuid::new_v4();
        let server = axum_test::TestServer::new(app(user_id)).unwrap();

        let response = server
            .get("/whoami")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer good-token"))
            .await;
        response.assert_status_ok();
        response.assert_text(user_id.to_string());

        server.get("/whoami").await.assert_text("anonymous");
    }

    #[tokio::test]
    async fn test_session_middleware_rejects_bad_tokens() {
        let server = axum_test::TestServer::new(app(Uuid::new_v4())).unwrap();

        server
            .get("/whoami")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer forged"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .get("/whoami")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Token abc"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
