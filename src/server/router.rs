use axum::{middleware::from_fn, Router};
use tower_http::trace::TraceLayer;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, reachability, user, wallet},
    middleware::logging::log_request,
    startup::cors_layer,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PrimeMarket API",
        description = "Account registration, authentication and wallet queries"
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration, login and token refresh"),
        (name = "user", description = "Profile and credential changes"),
        (name = "wallet", description = "Balances and transaction history"),
        (name = "test", description = "Reachability checks")
    )
)]
struct ApiDoc;

/// Registers the `bearer_auth` security scheme referenced by protected endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Builds the application router with all API routes, the OpenAPI document and Swagger UI.
///
/// # Arguments
/// - `state` - Shared application state; also supplies the CORS origins
///
/// # Returns
/// - `Router` - Ready-to-serve router with access logging, tracing and CORS layers applied
pub fn router(state: AppState) -> Router {
    let (api_router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::refresh))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::verify_email))
        .routes(routes!(auth::resend_verification))
        .routes(routes!(user::get_me))
        .routes(routes!(user::request_email_change))
        .routes(routes!(user::request_password_change))
        .routes(routes!(user::confirm_email_change))
        .routes(routes!(user::confirm_password_change))
        .routes(routes!(wallet::get_my_wallets))
        .routes(routes!(wallet::get_my_transactions))
        .routes(routes!(reachability::public))
        .routes(routes!(reachability::secure))
        .split_for_parts();

    let cors = cors_layer(&state.config);

    api_router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(log_request))
        .layer(cors)
        .with_state(state)
}
