use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{debug, error};

pub mod clock;
pub mod db;
pub mod repository;

pub use db::StorageError;
pub use repository::{Todo, TodoRepository, UpdateTodo};

use clock::MonotonicClock;

#[derive(Deserialize)]
pub struct CreateTodo {
    // Optional so a missing title reports 400 like a blank one, instead of a
    // deserialization rejection.
    pub title: Option<String>,
}

/// Shared server state: the repository plus the id-minting clock.
pub struct AppState {
    repo: TodoRepository,
    clock: MonotonicClock,
}

pub type Db = Arc<Mutex<AppState>>;

pub fn app(repo: TodoRepository) -> Router {
    let state: Db = Arc::new(Mutex::new(AppState {
        repo,
        clock: MonotonicClock::new(),
    }));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo)
                .patch(update_todo)
                .put(update_todo)
                .delete(delete_todo),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, repo: TodoRepository) -> Result<(), std::io::Error> {
    axum::serve(listener, app(repo)).await
}

fn storage_failure(err: StorageError) -> StatusCode {
    error!(error = %err, "storage failure");
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn list_todos(State(db): State<Db>) -> Result<Json<Vec<Todo>>, StatusCode> {
    let state = db.lock().await;
    state.repo.list_all().map(Json).map_err(storage_failure)
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    let title = input.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut state = db.lock().await;
    let created_at = state.clock.next_ms();
    let id = created_at.to_string();
    let todo = state
        .repo
        .create(&id, title, created_at)
        .map_err(storage_failure)?;
    debug!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, StatusCode> {
    let state = db.lock().await;
    match state.repo.get_by_id(&id).map_err(storage_failure)? {
        Some(todo) => Ok(Json(todo)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let state = db.lock().await;
    match state.repo.update(&id, &input).map_err(storage_failure)? {
        Some(todo) => Ok(Json(todo)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let state = db.lock().await;
    if state.repo.delete(&id).map_err(storage_failure)? {
        debug!(%id, "deleted todo");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}
