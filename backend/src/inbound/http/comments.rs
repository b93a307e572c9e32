//! Comment handlers.
//!
//! Both endpoints serve HTML forms, so every outcome is a `303 See Other`:
//! back to the fruit on success, to the error page otherwise.

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{CommentDraft, CommentId, Error, FruitId};
use crate::inbound::http::error::{redirect_to_error_page, see_other};
use crate::inbound::http::fruits::parse_fruit_id;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_uuid_error, map_comment_validation_error};

/// Body for `POST /comments/{fruitId}`, as JSON or a form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddCommentRequest {
    #[schema(example = "ripe")]
    pub note: String,
}

type CommentPayload = web::Either<web::Json<AddCommentRequest>, web::Form<AddCommentRequest>>;

fn fruit_location(id: FruitId) -> String {
    format!("/fruits/{id}")
}

fn redirect_outcome(outcome: Result<FruitId, Error>) -> HttpResponse {
    match outcome {
        Ok(id) => see_other(&fruit_location(id)),
        Err(err) => {
            debug!(code = ?err.code(), message = err.message(), "comment request failed");
            redirect_to_error_page(&err)
        }
    }
}

/// Login is checked before the path or the note, so anonymous callers only
/// ever learn that they must log in.
async fn add(
    state: &HttpState,
    session: &SessionContext,
    raw_fruit: &str,
    payload: Option<CommentPayload>,
) -> Result<FruitId, Error> {
    let caller = session.caller()?;
    caller.require_user()?;
    let fruit_id = parse_fruit_id(raw_fruit)?;
    let note = match payload {
        Some(web::Either::Left(json)) => json.into_inner().note,
        Some(web::Either::Right(form)) => form.into_inner().note,
        None => String::new(),
    };
    let draft = CommentDraft::new(note).map_err(map_comment_validation_error)?;
    state.comments.add(caller, fruit_id, draft).await?;
    Ok(fruit_id)
}

async fn remove(
    state: &HttpState,
    session: &SessionContext,
    raw_fruit: &str,
    raw_comment: &str,
) -> Result<FruitId, Error> {
    let caller = session.caller()?;
    caller.require_user()?;
    let fruit_id = parse_fruit_id(raw_fruit)?;
    let comment_id: CommentId = raw_comment
        .parse()
        .map_err(|_| invalid_uuid_error("commentId", raw_comment))?;
    state.comments.delete(caller, fruit_id, comment_id).await?;
    Ok(fruit_id)
}

/// Append a comment authored by the caller.
#[utoipa::path(
    post,
    path = "/comments/{fruitId}",
    params(("fruitId" = String, Path, description = "Parent fruit id")),
    request_body = AddCommentRequest,
    responses(
        (status = 303, description = "To the fruit on success, to /error otherwise",
            headers(("Location" = String, description = "Redirect target")))
    ),
    tags = ["comments"],
    operation_id = "addComment"
)]
#[post("/comments/{fruit_id}")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Option<CommentPayload>,
) -> HttpResponse {
    redirect_outcome(add(&state, &session, &path, payload).await)
}

/// Remove a comment; only its author may.
#[utoipa::path(
    delete,
    path = "/comments/delete/{fruitId}/{commentId}",
    params(
        ("fruitId" = String, Path, description = "Parent fruit id"),
        ("commentId" = String, Path, description = "Comment id")
    ),
    responses(
        (status = 303, description = "To the fruit on success, to /error otherwise",
            headers(("Location" = String, description = "Redirect target")))
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/delete/{fruit_id}/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (raw_fruit, raw_comment) = path.into_inner();
    redirect_outcome(remove(&state, &session, &raw_fruit, &raw_comment).await)
}
