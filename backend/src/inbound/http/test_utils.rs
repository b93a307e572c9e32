//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use super::session::SessionContext;
use super::session_config::SESSION_COOKIE_NAME;
use super::state::HttpState;
use crate::domain::ports::{
    MockCommentCommand, MockFruitCommand, MockFruitQuery, MockLoginService,
};
use crate::domain::{AuthenticatedUser, Error, UserId, Username};

const TEST_LOGIN_PATH: &str = "/__test/login";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Disables the `Secure` flag for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mocked driving ports; set expectations, then call [`MockPorts::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub fruits: MockFruitCommand,
    pub fruits_query: MockFruitQuery,
    pub comments: MockCommentCommand,
    pub login: MockLoginService,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.fruits),
            Arc::new(self.fruits_query),
            Arc::new(self.comments),
            Arc::new(self.login),
        )
    }
}

async fn login_as(session: SessionContext, path: web::Path<String>) -> Result<HttpResponse, Error> {
    let user = AuthenticatedUser {
        id: UserId::new(path.as_str()).map_err(|err| Error::invalid_request(err.to_string()))?,
        username: Username::new("tester").map_err(|err| Error::internal(err.to_string()))?,
    };
    session.persist_user(&user)?;
    Ok(HttpResponse::Ok().finish())
}

/// Full route table over `state`, plus a shortcut login route for tests.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route(&format!("{TEST_LOGIN_PATH}/{{id}}"), web::get().to(login_as))
        .configure(super::configure)
}

/// Request that logs `user` in through the test-only route.
pub fn login_request(user: UserId) -> test::TestRequest {
    test::TestRequest::get().uri(&format!("{TEST_LOGIN_PATH}/{user}"))
}
