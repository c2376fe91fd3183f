use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use test_utils::{builder::TestBuilder, factory};
use tower::ServiceExt;

use crate::{
    model::api::ProblemDto,
    server::{
        config::Config,
        router::router,
        service::{email::RecordingEmailSender, jwt::JwtService},
        state::AppState,
    },
};


/// Router over a test database with a recording mail transport.
struct TestApp {
    router: Router,
    jwt: JwtService,
    mail: Arc<RecordingEmailSender>,
}

/// Response parts captured for assertions.
struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("response body is not the expected JSON")
    }

    fn problem(&self) -> ProblemDto {
        self.json()
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    /// `Set-Cookie` header value, if one was sent.
    fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(SET_COOKIE)
            .map(|value| value.to_str().unwrap().to_string())
    }

    /// Raw refresh token carried by the `Set-Cookie` header.
    fn refresh_token(&self) -> String {
        let header = self.set_cookie().expect("no Set-Cookie header");
        cookie::Cookie::parse(header).unwrap().value().to_string()
    }
}

impl TestApp {
    fn new(db: &DatabaseConnection) -> Self {
        Self::with_config(db, Config::for_tests())
    }

    fn with_config(db: &DatabaseConnection, config: Config) -> Self {
        let mail = Arc::new(RecordingEmailSender::default());
        let jwt = JwtService::new(&config.jwt);
        let state = AppState::new(db.clone(), config, mail.clone());

        Self {
            router: router(state),
            jwt,
            mail,
        }
    }

    fn bearer(&self, user_id: i32) -> String {
        format!("Bearer {}", self.jwt.generate(user_id).unwrap())
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    async fn get(&self, uri: &str, auth: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, body: Value, auth: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(AUTHORIZATION, auth);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn post_with_cookie(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

/// Serves the OpenAPI document next to Swagger UI.
///
/// Expected: 200 with every API path listed
#[tokio::test]
async fn serves_openapi_document() {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let app = TestApp::new(db);

    let response = app.get("/api/docs/openapi.json", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let doc: Value = response.json();
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/auth/register",
        "/api/auth/login",
        "/api/auth/refresh",
        "/api/auth/logout",
        "/api/auth/verify-email",
        "/api/auth/resend-verification",
        "/api/users/me",
        "/api/users/me/email-change",
        "/api/users/me/password-change",
        "/api/users/email-change/confirm",
        "/api/users/password-change/confirm",
        "/api/wallets/me",
        "/api/wallets/me/txs",
        "/test/public",
        "/test/secure",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}

/// Unknown routes are not handled by any controller.
///
/// Expected: 404
#[tokio::test]
async fn unknown_route_returns_not_found() {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let app = TestApp::new(db);

    let response = app.get("/api/nothing-here", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
