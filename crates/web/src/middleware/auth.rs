use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use storage::repository::user::UserRepository;
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

/// Identity of the authenticated caller, resolved from the bearer token and
/// attached to the request for handlers to pick up.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: Uuid,
}

/// Bearer-token middleware. Every protected route resolves the token to a
/// user row; an unknown token is rejected before any handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(&req).ok_or(WebError::Unauthorized)?;

    let user = UserRepository::new(state.db.pool())
        .find_by_api_token(&token)
        .await
        .map_err(|_| {
            tracing::warn!("Invalid API token attempt");
            WebError::Unauthorized
        })?;

    req.extensions_mut().insert(CurrentUser {
        user_id: user.user_id,
    });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_auth(value: &str) -> Request {
        axum::http::Request::builder()
            .header(AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        let req = request_with_auth("Bearer secret-token");
        assert_eq!(bearer_token(&req), Some("secret-token".to_string()));
    }

    #[test]
    fn rejects_non_bearer_schemes_and_empty_tokens() {
        assert_eq!(bearer_token(&request_with_auth("Basic abc")), None);
        assert_eq!(bearer_token(&request_with_auth("Bearer ")), None);

        let no_header = axum::http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(bearer_token(&no_header), None);
    }
}
