//! Server harness and shared world for the HTTP behaviour suites.
//!
//! Each world owns a current-thread Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The server runs the real route table
//! over an in-memory store; dropping the fixture stops it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use mockable::DefaultClock;
use orchard::Trace;
use orchard::domain::ports::FixtureLoginService;
use orchard::domain::{CommentService, FruitService};
use orchard::inbound::http::session_config::SessionSettings;
use orchard::inbound::http::state::HttpState;
use orchard::middleware::MethodOverride;
use orchard::outbound::memory::InMemoryFruitRepository;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct OrchardWorld {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
    pub(crate) cookies: HashMap<String, String>,
    pub(crate) fruit_id: Option<String>,
    pub(crate) comment_id: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_location: Option<String>,
    pub(crate) last_body: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<OrchardWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        // `LocalSet` must be driven on the thread that owns it.
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Start a server and wrap it in a fresh world.
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let (base_url, server) = local
        .block_on(&runtime, spawn_orchard_server())
        .expect("orchard server");

    WorldFixture {
        world: Rc::new(RefCell::new(OrchardWorld {
            runtime,
            local,
            base_url,
            server,
            cookies: HashMap::new(),
            fruit_id: None,
            comment_id: None,
            last_status: None,
            last_location: None,
            last_body: None,
        })),
    }
}

fn in_memory_state() -> HttpState {
    let repo = Arc::new(InMemoryFruitRepository::new());
    let clock = Arc::new(DefaultClock);
    let fruits = Arc::new(FruitService::new(repo.clone(), clock.clone()));
    HttpState::new(
        fruits.clone(),
        fruits,
        Arc::new(CommentService::new(repo, clock)),
        Arc::new(FixtureLoginService::default()),
    )
}

async fn spawn_orchard_server() -> Result<(String, ServerHandle), String> {
    let session = Arc::new(SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    });
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let state = web::Data::new(in_memory_state());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(orchard::inbound::http::configure)
            .wrap(session.middleware())
            .wrap(MethodOverride)
            .wrap(Trace)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

/// One request issued by a step.
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: String,
    /// Whose session cookie to send; `None` sends no cookie.
    pub(crate) as_user: Option<&'a str>,
    pub(crate) body: Body,
}

pub(crate) enum Body {
    Empty,
    Json(Value),
    Form(Vec<(&'static str, String)>),
}

/// What came back from a request.
pub(crate) struct Outcome {
    pub(crate) status: u16,
    pub(crate) location: Option<String>,
    pub(crate) set_cookie: Option<String>,
    pub(crate) body: Option<Value>,
}

/// Send a request without following redirects and return the outcome.
pub(crate) fn send(world: &SharedWorld, spec: RequestSpec<'_>) -> Outcome {
    let ctx = world.borrow();
    let url = format!("{}{}", ctx.base_url, spec.path);
    let cookie = spec
        .as_user
        .map(|user| ctx.cookies.get(user).cloned().expect("user is logged in"));
    let method = spec.method;
    let body = spec.body;

    ctx.local.block_on(&ctx.runtime, async move {
        let client = Client::builder().disable_redirects().finish();
        let mut request = client.request(method, url);
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match body {
            Body::Empty => request.send().await,
            Body::Json(value) => request.send_json(&value).await,
            Body::Form(fields) => request.send_form(&fields).await,
        }
        .expect("request sent");

        let header_value = |name| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let location = header_value(header::LOCATION);
        let set_cookie = header_value(header::SET_COOKIE);
        let bytes = response.body().await.expect("response body");
        Outcome {
            status: response.status().as_u16(),
            location,
            set_cookie,
            body: serde_json::from_slice(&bytes).ok(),
        }
    })
}

/// Record an outcome as the latest response.
pub(crate) fn record(world: &SharedWorld, outcome: Outcome) {
    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(outcome.status);
    ctx.last_location = outcome.location;
    ctx.last_body = outcome.body;
}

/// Log in through the JSON login endpoint and remember the session cookie.
pub(crate) fn log_in(world: &SharedWorld, username: &str) {
    let outcome = send(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/users/login".to_owned(),
            as_user: None,
            body: Body::Json(serde_json::json!({
                "username": username,
                "password": "password"
            })),
        },
    );
    assert_eq!(outcome.status, 200, "login for {username}");
    let pair = outcome
        .set_cookie
        .as_deref()
        .and_then(|cookie| cookie.split(';').next())
        .expect("session cookie")
        .to_owned();
    world.borrow_mut().cookies.insert(username.to_owned(), pair);
}

/// User id the login endpoint reports for `username`.
pub(crate) fn user_id_of(username: &str) -> &'static str {
    FixtureLoginService::default()
        .roster()
        .iter()
        .find(|entry| entry.username == username)
        .map(|entry| entry.user_id)
        .expect("roster entry")
}

/// Create a fruit as `owner` and remember its id.
pub(crate) fn create_fruit(world: &SharedWorld, owner: &str, name: &str) -> Outcome {
    let outcome = send(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/fruits".to_owned(),
            as_user: Some(owner),
            body: Body::Json(serde_json::json!({ "name": name, "color": "orange" })),
        },
    );
    if let Some(id) = outcome
        .body
        .as_ref()
        .and_then(|body| body.pointer("/fruit/id"))
        .and_then(Value::as_str)
    {
        world.borrow_mut().fruit_id = Some(id.to_owned());
    }
    outcome
}

/// The fruit remembered by the world, fetched by id.
pub(crate) fn fetch_fruit(world: &SharedWorld) -> Outcome {
    let id = current_fruit_id(world);
    send(
        world,
        RequestSpec {
            method: Method::GET,
            path: format!("/fruits/{id}"),
            as_user: None,
            body: Body::Empty,
        },
    )
}

pub(crate) fn current_fruit_id(world: &SharedWorld) -> String {
    world.borrow().fruit_id.clone().expect("a fruit was created")
}
