//! Student HTTP Routes
//!
//! Endpoints for listing, sorting, reading, creating, updating and deleting
//! student records.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use crate::schema::StudentView;
use crate::service::{ServiceResult, StudentService};

// ==================
// Shared State
// ==================

/// Student state shared across handlers
#[derive(Debug)]
pub struct StudentsState {
    pub service: StudentService,
}

impl StudentsState {
    pub fn new(service: StudentService) -> Self {
        Self { service }
    }
}

/// Runs a service call on the blocking pool; the store does synchronous
/// file I/O.
async fn run<T, F>(state: &Arc<StudentsState>, op: F) -> ApiResult<ServiceResult<T>>
where
    T: Send + 'static,
    F: FnOnce(&StudentService) -> ServiceResult<T> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || op(&state.service))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

// ==================
// Student Routes
// ==================

/// Create student routes
pub fn student_routes(state: Arc<StudentsState>) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/students", get(list_students_handler).post(create_student_handler))
        .route(
            "/students/:id",
            get(get_student_handler)
                .put(update_student_handler)
                .delete(delete_student_handler),
        )
        .with_state(state)
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

fn list_query(query: Result<Query<ListQuery>, QueryRejection>) -> ApiResult<ListQuery> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))
}

// ==================
// Handlers
// ==================

async fn welcome_handler() -> Json<MessageResponse> {
    MessageResponse::new("Welcome to the Students API System")
}

/// Without `sort_by`: mapping id -> record. With it: ordered array.
async fn list_students_handler(
    State(state): State<Arc<StudentsState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let query = list_query(query)?;
    match query.sort_by {
        Some(sort_by) => {
            let order_by = query.order_by;
            let sorted = run(&state, move |service| {
                service.sorted(&sort_by, order_by.as_deref())
            })
            .await??;
            Ok(Json(sorted).into_response())
        }
        None => {
            let collection = run(&state, |service| service.get_all()).await??;
            let views: IndexMap<String, StudentView> = collection
                .iter()
                .map(|(id, profile)| (id.clone(), StudentView::body(profile)))
                .collect();
            Ok(Json(views).into_response())
        }
    }
}

async fn get_student_handler(
    State(state): State<Arc<StudentsState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudentView>> {
    let view = run(&state, move |service| service.get_by_id(&id)).await??;
    Ok(Json(view))
}

async fn create_student_handler(
    State(state): State<Arc<StudentsState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let candidate = json_body(body)?;
    run(&state, move |service| service.create(&candidate)).await??;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("New student created successfully"),
    ))
}

async fn update_student_handler(
    State(state): State<Arc<StudentsState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let partial = json_body(body)?;
    run(&state, move |service| service.update(&id, &partial))
        .await?
        .map_err(ApiError::for_update)?;
    Ok(MessageResponse::new("Student updated successfully"))
}

async fn delete_student_handler(
    State(state): State<Arc<StudentsState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    run(&state, move |service| service.delete(&id)).await??;
    Ok(MessageResponse::new("Student deleted successfully"))
}
