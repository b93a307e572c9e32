//! HTTP inbound adapter exposing the fruit catalogue.
//!
//! Handlers resolve the session into a [`Caller`](crate::domain::Caller),
//! call a driving port, and shape the result as JSON or a redirect.

pub mod comments;
pub mod error;
pub mod fruits;
pub mod health;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every fruit, comment, user and page route.
///
/// `/fruits/mine` is registered ahead of `/fruits/{key}` so it is never read
/// as a fruit name. Unmatched requests are redirected to the error page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(pages::error_page)
        .service(fruits::list_fruits)
        .service(fruits::list_my_fruits)
        .service(fruits::create_fruit)
        .service(fruits::update_fruit)
        .service(fruits::delete_fruit)
        .service(fruits::show_fruit)
        .service(comments::add_comment)
        .service(comments::delete_comment)
        .service(users::login)
        .service(users::logout)
        .default_service(web::to(pages::not_found));
}
