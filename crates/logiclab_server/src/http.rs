//! HTTP routes for employee records.
//!
//! # Responsibility
//! - Decode requests, call the employee service, encode JSON responses.
//! - Run each blocking service call on the blocking thread pool.
//!
//! # Invariants
//! - One service call acquires exactly one database session.
//! - `POST` always creates; `PUT` saves the body as given.

use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use log::info;
use logiclab_core::{
    Database, Employee, EmployeeId, EmployeeService, RepoResult, SqliteEmployeeRepository,
    UNSAVED_ID,
};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    database: Arc<Database>,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        Self {
            database: Arc::new(database),
        }
    }
}

/// Builds the application router with every route nested under `base_path`.
///
/// `base_path` is expected in normalized form (see
/// [`ServerConfig::normalized_base_path`](crate::ServerConfig::normalized_base_path));
/// an empty string mounts the routes at the root.
pub fn router(state: AppState, base_path: &str) -> Router {
    let routes = employee_routes();
    let app = if base_path.is_empty() {
        Router::new().merge(routes)
    } else {
        Router::new().nest(base_path, routes)
    };
    app.with_state(state)
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/employees",
            get(list_employees).post(create_employee).put(save_employee),
        )
        .route(
            "/employees/{id}",
            get(get_employee).delete(delete_employee),
        )
}

async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let employees = with_service(&state, |service| service.find_all()).await?;
    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<Json<Employee>, ApiError> {
    with_service(&state, move |service| service.find_by_id(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

async fn create_employee(
    State(state): State<AppState>,
    Json(mut employee): Json<Employee>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    employee.id = UNSAVED_ID;
    let created = with_service(&state, move |service| service.save(&employee)).await?;
    info!(
        "event=employee_create module=http status=ok id={}",
        created.id
    );
    Ok((StatusCode::CREATED, Json(created)))
}

async fn save_employee(
    State(state): State<AppState>,
    Json(employee): Json<Employee>,
) -> Result<Json<Employee>, ApiError> {
    let saved = with_service(&state, move |service| service.save(&employee)).await?;
    Ok(Json(saved))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> Result<StatusCode, ApiError> {
    with_service(&state, move |service| service.delete_by_id(id)).await?;
    info!("event=employee_delete module=http status=ok id={id}");
    Ok(StatusCode::NO_CONTENT)
}

/// Runs `work` against a freshly bound service on the blocking pool.
async fn with_service<T, F>(state: &AppState, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&EmployeeService<SqliteEmployeeRepository<'_>>) -> RepoResult<T> + Send + 'static,
{
    let database = Arc::clone(&state.database);
    let result = tokio::task::spawn_blocking(move || {
        database.session(|conn| {
            let service = EmployeeService::new(SqliteEmployeeRepository::try_new(conn)?);
            work(&service)
        })
    })
    .await?;

    Ok(result?)
}
