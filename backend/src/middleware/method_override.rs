//! `_method` query override for HTML form clients.
//!
//! Browsers can only submit `GET` and `POST`; a `POST` carrying
//! `?_method=PUT` or `?_method=DELETE` is routed as that method instead.
//! The override is case-insensitive and ignored on any other method.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use futures_util::future::{Ready, ready};
use tracing::debug;
use url::form_urlencoded;

const OVERRIDE_PARAM: &str = "_method";

/// Middleware factory; wrap the whole app so the rewrite happens before routing.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use orchard::middleware::MethodOverride;
///
/// let app = App::new().wrap(MethodOverride);
/// ```
#[derive(Clone, Copy)]
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MethodOverrideMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

/// Service wrapper produced by [`MethodOverride`].
pub struct MethodOverrideMiddleware<S> {
    service: S,
}

fn override_target(query: &str) -> Option<Method> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == OVERRIDE_PARAM)
        .and_then(|(_, value)| match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        })
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST
            && let Some(method) = override_target(req.query_string())
        {
            debug!(%method, path = req.path(), "method overridden by query");
            req.head_mut().method = method;
        }
        self.service.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};
    use rstest::rstest;

    #[rstest]
    #[case("_method=PUT", Some(Method::PUT))]
    #[case("_method=delete", Some(Method::DELETE))]
    #[case("a=1&_method=Delete", Some(Method::DELETE))]
    #[case("_method=PATCH", None)]
    #[case("_method=GET", None)]
    #[case("", None)]
    fn parses_override_target(#[case] query: &str, #[case] expected: Option<Method>) {
        assert_eq!(override_target(query), expected);
    }

    async fn echo_method(req: HttpRequest) -> HttpResponse {
        HttpResponse::Ok().body(req.method().to_string())
    }

    #[rstest]
    #[case(Method::POST, "/thing?_method=DELETE", "DELETE")]
    #[case(Method::POST, "/thing?_method=put", "PUT")]
    #[case(Method::POST, "/thing", "POST")]
    #[case(Method::GET, "/thing?_method=DELETE", "GET")]
    #[actix_web::test]
    async fn routes_with_the_overridden_method(
        #[case] method: Method,
        #[case] uri: &str,
        #[case] expected: &str,
    ) {
        let app = test::init_service(
            App::new()
                .wrap(MethodOverride)
                .route("/thing", web::route().to(echo_method)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::default()
                .method(method)
                .uri(uri)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, expected);
    }
}
