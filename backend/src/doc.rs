//! OpenAPI document for the fruit catalogue.
//!
//! Served by Swagger UI in debug builds and written out by the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Comment, Error, ErrorCode, Fruit};
use crate::inbound::http::comments::AddCommentRequest;
use crate::inbound::http::fruits::{
    CreateFruitRequest, FruitListResponse, FruitLookupResponse, FruitResponse, UpdateFruitRequest,
};
use crate::inbound::http::pages::{ErrorPageResponse, HomeResponse};
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /users/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Orchard API",
        description = "Owner-scoped fruits with embedded comments behind a cookie session."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::fruits::list_fruits,
        crate::inbound::http::fruits::list_my_fruits,
        crate::inbound::http::fruits::create_fruit,
        crate::inbound::http::fruits::update_fruit,
        crate::inbound::http::fruits::delete_fruit,
        crate::inbound::http::fruits::show_fruit,
        crate::inbound::http::comments::add_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::pages::home,
        crate::inbound::http::pages::error_page,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Fruit,
        Comment,
        Error,
        ErrorCode,
        CreateFruitRequest,
        UpdateFruitRequest,
        FruitListResponse,
        FruitResponse,
        FruitLookupResponse,
        AddCommentRequest,
        LoginRequest,
        LoginResponse,
        HomeResponse,
        ErrorPageResponse,
    )),
    tags(
        (name = "fruits", description = "Fruit catalogue"),
        (name = "comments", description = "Comments embedded in fruits"),
        (name = "users", description = "Session login and logout"),
        (name = "pages", description = "Landing and error views"),
        (name = "health", description = "Readiness and liveness")
    )
)]
pub struct ApiDoc;
