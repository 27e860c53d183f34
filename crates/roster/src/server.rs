use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rosterapp::{
    api::{MessageLevel, RosterApi},
    commands::{CmdMessage, CmdResult},
    error::RosterError,
    model::{User, UserPatch},
    store::backend::StorageBackend,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

pub struct AppState<B: StorageBackend> {
    api: Arc<RosterApi<B>>,
}

impl<B: StorageBackend> AppState<B> {
    #[must_use]
    pub fn new(api: Arc<RosterApi<B>>) -> Self {
        Self { api }
    }
}

impl<B: StorageBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateUserBody {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateUserBody {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeleteUserResponse {
    result: bool,
}

pub fn build_router<B: StorageBackend + 'static>(api: Arc<RosterApi<B>>) -> Router {
    Router::new()
        .route(
            "/users",
            get(list_users::<B>)
                .post(create_user::<B>)
                .fallback(route_not_found),
        )
        .route(
            "/users/:user_id",
            get(get_user::<B>)
                .put(update_user::<B>)
                .delete(delete_user::<B>)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .with_state(AppState::new(api))
}

async fn list_users<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let result = run_api(&state, |api| api.list_users()).await?;
    Ok(Json(result.listed_users))
}

async fn get_user<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&user_id)?;
    let result = run_api(&state, move |api| api.get_user(id)).await?;
    first_user(result.listed_users).map(Json)
}

async fn create_user<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let body: CreateUserBody = decode_fields(object_body(body)?)?;
    let name = body.name.ok_or_else(|| {
        ApiError::InvalidRequest("Invalid input: 'name' is required".to_string())
    })?;
    if name.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Name cannot be empty".to_string()));
    }

    let result = run_api(&state, move |api| {
        api.create_user(&name, body.email.as_deref())
    })
    .await?;
    let user = first_user(result.affected_users)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(user_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&user_id)?;
    let fields = object_body(body)?;
    if fields.is_empty() {
        return Err(ApiError::InvalidRequest("Invalid input".to_string()));
    }
    let body: UpdateUserBody = decode_fields(fields)?;
    let patch = UserPatch {
        name: body.name,
        email: body.email,
    };

    let result = run_api(&state, move |api| api.update_user(id, &patch)).await?;
    first_user(result.affected_users).map(Json)
}

async fn delete_user<B: StorageBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(user_id): Path<String>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    let id = parse_user_id(&user_id)?;
    run_api(&state, move |api| api.delete_user(id)).await?;
    Ok(Json(DeleteUserResponse { result: true }))
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Runs one API call on the blocking pool, since flushes do synchronous file I/O,
/// then reports the command's messages.
async fn run_api<B, F>(state: &AppState<B>, op: F) -> Result<CmdResult, ApiError>
where
    B: StorageBackend + 'static,
    F: FnOnce(&RosterApi<B>) -> rosterapp::error::Result<CmdResult> + Send + 'static,
{
    let api = Arc::clone(&state.api);
    let result = tokio::task::spawn_blocking(move || op(api.as_ref()))
        .await
        .map_err(|error| ApiError::Internal(format!("store task failed: {error}")))?
        .map_err(ApiError::from_roster)?;
    emit_messages(&result.messages);
    Ok(result)
}

/// Surfaces command messages through tracing.
pub fn emit_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => debug!("{}", message.content),
            MessageLevel::Success => info!("{}", message.content),
            MessageLevel::Warning => warn!("{}", message.content),
        }
    }
}

/// Bodies must be JSON objects; typed extraction alone also accepts arrays.
fn object_body(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, ApiError> {
    match body.map_err(ApiError::from_rejection)? {
        Json(Value::Object(fields)) => Ok(fields),
        Json(_) => Err(ApiError::InvalidRequest(
            "Invalid input: expected a JSON object".to_string(),
        )),
    }
}

fn decode_fields<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|error| ApiError::InvalidRequest(format!("Invalid input: {error}")))
}

/// Ids that are not positive integers never match a route.
fn parse_user_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>().map_err(|_| ApiError::RouteNotFound)
}

fn first_user(users: Vec<User>) -> Result<User, ApiError> {
    users
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Internal("command returned no user".to_string()))
}

#[derive(Debug)]
enum ApiError {
    RouteNotFound,
    NotFound(String),
    InvalidRequest(String),
    Internal(String),
}

impl ApiError {
    fn from_roster(error: RosterError) -> Self {
        match error {
            RosterError::UserNotFound(_) => Self::NotFound("User not found".to_string()),
            RosterError::InvalidInput(message) => Self::InvalidRequest(message),
            RosterError::Io(_) | RosterError::Store(_) | RosterError::Config(_) => {
                Self::Internal(error.to_string())
            }
        }
    }

    fn from_rejection(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(format!("Invalid input: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::RouteNotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": "not_found",
                })),
            )
                .into_response(),
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": "not_found",
                    "message": message,
                })),
            )
                .into_response(),
            Self::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": "bad_request",
                    "message": message,
                })),
            )
                .into_response(),
            Self::Internal(message) => {
                error!(error = %message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({
                        "error": "internal",
                        "message": message,
                    })),
                )
                    .into_response()
            }
        }
    }
}
