//! Server-side hosting: the Session Gate middleware and the session cookie routes.
//!
//! The gate runs before every request reaches the Dioxus application. It only
//! looks at the session cookie, so the browser app mirrors its credential into
//! that cookie on sign-in (or posts it to `/api/session`).

use api::gate;
use api::Credential;
use axum::extract::{Json, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::Router;
use cookie::{Cookie, SameSite};
use serde::Deserialize;
use store::ClientConfig;

#[derive(Debug, Clone)]
pub struct GateState {
    cookie_name: String,
}

impl GateState {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    /// Cookie name from the compiled client configuration, the one the
    /// browser writes under.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.session.cookie_name.clone())
    }
}

/// Value of the named cookie across every `Cookie` header.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw))
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

pub async fn session_gate(
    State(state): State<GateState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let credential = cookie_value(request.headers(), &state.cookie_name);

    match gate::decide(&path, credential.as_deref()).location() {
        Some(location) => {
            tracing::debug!("Session gate: {} -> {}", path, location);
            Redirect::temporary(location).into_response()
        }
        None => next.run(request).await,
    }
}

/// Wrap `router` so every request passes through [`session_gate`].
pub fn gated(router: Router, state: GateState) -> Router {
    router.layer(middleware::from_fn_with_state(state, session_gate))
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    token: String,
}

async fn create_session(State(state): State<GateState>, Json(body): Json<SessionBody>) -> Response {
    let Some(credential) = Credential::new(body.token) else {
        return (StatusCode::BAD_REQUEST, "token is required").into_response();
    };
    let cookie = Cookie::build((state.cookie_name, credential.as_str().to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(false)
        .build();
    tracing::debug!("Session cookie issued");
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie.to_string())]).into_response()
}

async fn end_session(State(state): State<GateState>) -> Response {
    let cookie = Cookie::build((state.cookie_name, String::new()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::ZERO)
        .build();
    tracing::debug!("Session cookie cleared");
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie.to_string())]).into_response()
}

/// `POST /api/session` and `POST /api/session/logout`. Both sit under `/api`,
/// which the gate never evaluates.
pub fn session_routes(state: GateState) -> Router {
    Router::new()
        .route("/api/session", post(create_session))
        .route("/api/session/logout", post(end_session))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    fn app() -> Router {
        app_with(GateState::new("token"))
    }

    fn app_with(state: GateState) -> Router {
        let pages = Router::new()
            .route("/", get(|| async { "home" }))
            .route("/{*path}", get(|| async { "page" }))
            .merge(session_routes(state.clone()));
        gated(pages, state)
    }

    async fn get_with_cookie(path: &str, cookie: Option<&str>) -> Response {
        send_with_cookie(app(), path, cookie).await
    }

    async fn send_with_cookie(app: Router, path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn location(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_protected_page_without_cookie_redirects_to_login() {
        let response = get_with_cookie("/dashboard", None).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("/login"));
    }

    #[tokio::test]
    async fn test_protected_page_with_cookie_is_served() {
        let response = get_with_cookie("/documents/d-1", Some("token=abc")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_with_cookie_redirects_to_dashboard() {
        let response = get_with_cookie("/login", Some("theme=dark; token=abc")).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), Some("/dashboard"));
    }

    #[tokio::test]
    async fn test_public_pages_without_cookie_are_served() {
        assert_eq!(get_with_cookie("/login", None).await.status(), StatusCode::OK);
        assert_eq!(get_with_cookie("/", None).await.status(), StatusCode::OK);
        assert_eq!(
            get_with_cookie("/", Some("token=abc")).await.status(),
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_gate_reads_the_cookie_the_client_writes() {
        let config = ClientConfig::default().with_cookie_name("grc_session");
        let state = GateState::from_config(&config);

        let response = send_with_cookie(app_with(state.clone()), "/dashboard", Some("token=abc")).await;
        assert_eq!(location(&response), Some("/login"));

        let response = send_with_cookie(app_with(state), "/dashboard", Some("grc_session=abc")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_compiled_config_matches_client() {
        let state = GateState::from_config(&ClientConfig::from_build_env());
        let name = ClientConfig::from_build_env().session.cookie_name;
        let cookie = format!("{name}=abc");

        let response = send_with_cookie(app_with(state), "/controls", Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_cookie_is_absent() {
        let response = get_with_cookie("/vendors", Some("token=")).await;
        assert_eq!(location(&response), Some("/login"));
    }

    #[tokio::test]
    async fn test_excluded_paths_are_never_redirected() {
        for path in ["/api/v1/tickets", "/_dioxus/ws", "/assets/main.css", "/favicon.ico"] {
            let response = get_with_cookie(path, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn test_create_session_sets_cookie() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"token":"abc"}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("token=abc"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Path=/"));
        assert!(!set_cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn test_create_session_rejects_blank_token() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"token":"  "}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logout_expires_cookie() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/session/logout")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("token="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
