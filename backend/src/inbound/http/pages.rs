//! Home page, error view and the catch-all for unknown routes.

use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::UserId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::see_other;
use crate::inbound::http::session::SessionContext;

const DEFAULT_ERROR_MESSAGE: &str = "This page does not exist";

/// Landing payload for visitors without a session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub message: String,
    pub login: String,
    pub fruits: String,
}

/// Query string of `GET /error`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ErrorQuery {
    /// Message to show; a generic one is used when absent.
    pub error: Option<String>,
}

/// Error view with the session context a page would render alongside it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPageResponse {
    pub error: String,
    pub logged_in: bool,
    #[schema(nullable = true)]
    pub user_id: Option<UserId>,
    #[schema(nullable = true)]
    pub username: Option<String>,
}

/// Send logged-in users to their fruits; everyone else gets the landing payload.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing payload", body = HomeResponse),
        (status = 303, description = "Logged in; redirect to /fruits")
    ),
    tags = ["pages"],
    operation_id = "home",
    security([])
)]
#[get("/")]
pub async fn home(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.caller()?.is_authenticated() {
        return Ok(see_other("/fruits"));
    }
    Ok(HttpResponse::Ok().json(HomeResponse {
        message: "Welcome to the orchard".to_owned(),
        login: "/users/login".to_owned(),
        fruits: "/fruits".to_owned(),
    }))
}

/// Render an error message together with who is logged in.
#[utoipa::path(
    get,
    path = "/error",
    params(ErrorQuery),
    responses((status = 200, description = "Error view", body = ErrorPageResponse)),
    tags = ["pages"],
    operation_id = "errorPage",
    security([])
)]
#[get("/error")]
pub async fn error_page(
    session: SessionContext,
    query: web::Query<ErrorQuery>,
) -> ApiResult<web::Json<ErrorPageResponse>> {
    let caller = session.caller()?;
    let error = query
        .into_inner()
        .error
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned());
    let user_id = caller.user_id();
    Ok(web::Json(ErrorPageResponse {
        error,
        logged_in: caller.is_authenticated(),
        user_id,
        username: user_id.and_then(|_| session.username()),
    }))
}

/// Catch-all: redirect unknown routes to the error page.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    debug!(method = %req.method(), path = req.path(), "no route matched");
    see_other("/error")
}
