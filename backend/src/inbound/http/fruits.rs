//! Fruit API handlers.
//!
//! ```text
//! GET    /fruits
//! GET    /fruits/mine
//! POST   /fruits        {"name":"Mango","color":"orange","readyToEat":false}
//! PUT    /fruits/{id}   {"readyToEat":true}
//! DELETE /fruits/{id}
//! GET    /fruits/{key}  id or name
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::FruitFilter;
use crate::domain::{Error, Fruit, FruitDraft, FruitId, FruitPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    invalid_body_error, invalid_uuid_error, map_fruit_validation_error,
};

/// Body for `POST /fruits`.
///
/// Any `owner` the client sends is ignored.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFruitRequest {
    #[schema(example = "Mango")]
    pub name: String,
    #[schema(example = "orange")]
    pub color: String,
    #[serde(default)]
    pub ready_to_eat: bool,
}

impl TryFrom<CreateFruitRequest> for FruitDraft {
    type Error = Error;

    fn try_from(value: CreateFruitRequest) -> Result<Self, Self::Error> {
        FruitDraft::new(&value.name, &value.color, value.ready_to_eat)
            .map_err(map_fruit_validation_error)
    }
}

/// Body for `PUT /fruits/{id}`; absent fields are left alone.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFruitRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub ready_to_eat: Option<bool>,
}

impl TryFrom<UpdateFruitRequest> for FruitPatch {
    type Error = Error;

    fn try_from(value: UpdateFruitRequest) -> Result<Self, Self::Error> {
        FruitPatch::new(
            value.name.as_deref(),
            value.color.as_deref(),
            value.ready_to_eat,
        )
        .map_err(map_fruit_validation_error)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FruitListResponse {
    pub fruits: Vec<Fruit>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FruitResponse {
    pub fruit: Fruit,
}

/// `GET /fruits/{key}` answers with one fruit for an id and a list for a name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FruitLookupResponse {
    ById { fruit: Fruit },
    ByName { fruit: Vec<Fruit> },
}

type FruitPayload<T> = web::Either<web::Json<T>, web::Form<T>>;

/// A missing or unparseable body is only reported once the caller is known.
fn payload_inner<T>(payload: Option<FruitPayload<T>>) -> Result<T, Error> {
    match payload {
        Some(web::Either::Left(json)) => Ok(json.into_inner()),
        Some(web::Either::Right(form)) => Ok(form.into_inner()),
        None => Err(invalid_body_error()),
    }
}

pub(crate) fn parse_fruit_id(raw: &str) -> Result<FruitId, Error> {
    raw.parse().map_err(|_| invalid_uuid_error("fruitId", raw))
}

/// List every fruit.
#[utoipa::path(
    get,
    path = "/fruits",
    responses(
        (status = 200, description = "All fruits", body = FruitListResponse),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["fruits"],
    operation_id = "listFruits",
    security([])
)]
#[get("/fruits")]
pub async fn list_fruits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FruitListResponse>> {
    let caller = session.caller()?;
    let fruits = state.fruits_query.list(caller, FruitFilter::All).await?;
    Ok(web::Json(FruitListResponse { fruits }))
}

/// List fruits owned by the logged-in user.
#[utoipa::path(
    get,
    path = "/fruits/mine",
    responses(
        (status = 200, description = "Caller's fruits", body = FruitListResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["fruits"],
    operation_id = "listMyFruits"
)]
#[get("/fruits/mine")]
pub async fn list_my_fruits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<FruitListResponse>> {
    let caller = session.caller()?;
    let fruits = state.fruits_query.list(caller, FruitFilter::Mine).await?;
    Ok(web::Json(FruitListResponse { fruits }))
}

/// Create a fruit owned by the caller.
#[utoipa::path(
    post,
    path = "/fruits",
    request_body = CreateFruitRequest,
    responses(
        (status = 201, description = "Created", body = FruitResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["fruits"],
    operation_id = "createFruit"
)]
#[post("/fruits")]
pub async fn create_fruit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<FruitPayload<CreateFruitRequest>>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    caller.require_user()?;
    let draft = FruitDraft::try_from(payload_inner(payload)?)?;
    let fruit = state.fruits.create(caller, draft).await?;
    Ok(HttpResponse::Created().json(FruitResponse { fruit }))
}

/// Patch a fruit the caller owns.
#[utoipa::path(
    put,
    path = "/fruits/{id}",
    params(("id" = String, Path, description = "Fruit id")),
    request_body = UpdateFruitRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required or not the owner", body = Error),
        (status = 404, description = "No such fruit", body = Error),
        (status = 409, description = "Changed concurrently", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["fruits"],
    operation_id = "updateFruit"
)]
#[put("/fruits/{id}")]
pub async fn update_fruit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<FruitPayload<UpdateFruitRequest>>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    caller.require_user()?;
    let id = parse_fruit_id(&path)?;
    let patch = FruitPatch::try_from(payload_inner(payload)?)?;
    state.fruits.update(caller, id, patch).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a fruit the caller owns.
#[utoipa::path(
    delete,
    path = "/fruits/{id}",
    params(("id" = String, Path, description = "Fruit id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Login required or not the owner", body = Error),
        (status = 404, description = "No such fruit", body = Error),
        (status = 409, description = "Changed concurrently", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["fruits"],
    operation_id = "deleteFruit"
)]
#[delete("/fruits/{id}")]
pub async fn delete_fruit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    caller.require_user()?;
    let id = parse_fruit_id(&path)?;
    state.fruits.delete(caller, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Show one fruit by id, or every fruit with a matching name.
///
/// Names are title-cased before matching, so `banana` finds `Banana`.
#[utoipa::path(
    get,
    path = "/fruits/{key}",
    params(("key" = String, Path, description = "Fruit id or name")),
    responses(
        (status = 200, description = "Fruit or name matches", body = FruitLookupResponse),
        (status = 400, description = "Blank name", body = Error),
        (status = 404, description = "No fruit with that id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["fruits"],
    operation_id = "showFruit",
    security([])
)]
#[get("/fruits/{key}")]
pub async fn show_fruit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FruitLookupResponse>> {
    let key = path.into_inner();
    let response = match key.parse::<FruitId>() {
        Ok(id) => FruitLookupResponse::ById {
            fruit: state.fruits_query.get(id).await?,
        },
        Err(_) => FruitLookupResponse::ByName {
            fruit: state.fruits_query.find_by_name(&key).await?,
        },
    };
    Ok(web::Json(response))
}

#[cfg(test)]
#[path = "fruits_tests.rs"]
mod tests;
