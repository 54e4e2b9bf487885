//! User resource handlers.
//!
//! ```text
//! GET    /users
//! GET    /users/{userId}
//! POST   /users            {"email":"a@x.com","firstName":"A","lastName":"B","age":30}
//! PUT    /users/{userId}   {"email":"a@x.com","firstName":"A","lastName":"B","age":31,"aliases":[]}
//! DELETE /users/{userId}
//! ```
//!
//! Each handler calls exactly one driving port and hands any failure back
//! unchanged; the status and body are decided by the `ResponseError` impl.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for create and update.
///
/// Omitting `aliases` (or sending `null`) means "leave unchanged" on update
/// and "none" on create; `[]` clears them.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

impl From<UserRequest> for UserDraft {
    fn from(value: UserRequest) -> Self {
        Self {
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            age: value.age,
            aliases: value.aliases,
        }
    }
}

/// Full projection returned by retrieve, create and update.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub aliases: Vec<String>,
}

impl From<User> for UserDetail {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id().to_string(),
            email: user.email().to_owned(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            age: user.age(),
            aliases: user.aliases().to_vec(),
        }
    }
}

/// List projection: identifier and names only.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReducedUserDetail {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for ReducedUserDetail {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().to_string(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
        }
    }
}

/// Serialise `view` as a 200 response.
///
/// A serialisation failure is reported like any other internal error rather
/// than as an empty success.
fn json_ok<T: Serialize>(view: &T) -> ApiResult<HttpResponse> {
    let body = serde_json::to_vec(view)
        .map_err(|err| Error::internal("error serializing json").with_cause(err))?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [ReducedUserDetail]),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    let views: Vec<ReducedUserDetail> = users.iter().map(ReducedUserDetail::from).collect();
    json_ok(&views)
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserDetail),
        (status = 404, description = "No such user", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{userId}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    let user = state.users.get_user(&id).await?;
    json_ok(&UserDetail::from(user))
}

/// Create a user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::json::json_config;
/// use user_service::inbound::http::users::create_user;
///
/// let app = App::new().app_data(json_config()).service(create_user);
/// # let _ = app;
/// ```
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Created user", body = UserDetail),
        (status = 400, description = "Malformed body", body = String, content_type = "text/plain"),
        (status = 409, description = "Email already registered", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    json_ok(&UserDetail::from(user))
}

/// Replace a user's fields.
#[utoipa::path(
    put,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserDetail),
        (status = 400, description = "Malformed body", body = String, content_type = "text/plain"),
        (status = 404, description = "No such user", body = String, content_type = "text/plain"),
        (status = 409, description = "Email already registered", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{userId}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    let user = state
        .users_command
        .update_user(&id, payload.into_inner().into())
        .await?;
    json_ok(&UserDetail::from(user))
}

/// Delete a user. Always answers 204.
///
/// Store failures are logged and not reported to the client.
#[utoipa::path(
    delete,
    path = "/users/{userId}",
    params(("userId" = String, Path, description = "User identifier")),
    responses((status = 204, description = "Deleted, or never existed")),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{userId}")]
pub async fn delete_user(state: web::Data<HttpState>, path: web::Path<String>) -> HttpResponse {
    let id = UserId::new(path.into_inner());
    if let Err(err) = state.users_command.delete_user(&id).await {
        error!(
            user_id = %id,
            code = err.code().as_str(),
            trace_id = err.trace_id(),
            error = %err,
            "delete failed; responding 204"
        );
    }
    HttpResponse::NoContent().finish()
}

/// Register every user route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user);
}
