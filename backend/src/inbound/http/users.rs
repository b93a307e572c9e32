//! Login and logout.
//!
//! ```text
//! POST /users/login  {"username":"alice","password":"password"}
//! POST /users/logout
//! ```
//!
//! JSON logins answer with the session identity; form logins are sent on to
//! `/fruits`, or to the error page when they fail.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials, LoginValidationError, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{redirect_to_error_page, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation_error;

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Identity stored in the session after a JSON login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: UserId,
    pub username: String,
}

async fn establish_session(
    state: &HttpState,
    session: &SessionContext,
    request: LoginRequest,
) -> Result<AuthenticatedUser, Error> {
    let credentials = LoginCredentials::try_from(request).map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user)?;
    info!(user_id = %user.id, "user logged in");
    Ok(user)
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 303, description = "Form login redirect"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Either<web::Json<LoginRequest>, web::Form<LoginRequest>>,
) -> ApiResult<HttpResponse> {
    match payload {
        web::Either::Left(json) => {
            let user = establish_session(&state, &session, json.into_inner()).await?;
            Ok(HttpResponse::Ok().json(LoginResponse {
                user_id: user.id,
                username: user.username.to_string(),
            }))
        }
        web::Either::Right(form) => {
            match establish_session(&state, &session, form.into_inner()).await {
                Ok(_) => Ok(see_other("/fruits")),
                Err(err) => Ok(redirect_to_error_page(&err)),
            }
        }
    }
}

/// Forget the session and return to the home page.
#[utoipa::path(
    post,
    path = "/users/logout",
    responses((status = 303, description = "Logged out; redirect to /")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/users/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other("/")
}
