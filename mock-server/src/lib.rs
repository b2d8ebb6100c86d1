//! In-memory todo API used for local runs and client integration tests.
//!
//! Todos live in an ordered table behind a `RwLock`; ids are handed out
//! from a counter starting at 1 and never reused. Errors render as
//! `{"detail": "..."}` bodies.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /todos` and `PUT /todos/{id}`. Unknown fields (such as
/// `id` or `created_at` in a full-record update) are ignored.
#[derive(Debug, Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Title cannot be empty.")]
    EmptyTitle,
    #[error("Todo not found.")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::EmptyTitle => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Debug)]
pub struct TodoTable {
    todos: Vec<Todo>,
    next_id: u64,
}

impl Default for TodoTable {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }
}

impl TodoTable {
    fn insert(&mut self, input: TodoInput) -> Todo {
        let todo = Todo {
            id: self.next_id,
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: now(),
        };
        self.next_id += 1;
        self.todos.push(todo.clone());
        todo
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == id)
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub type Db = Arc<RwLock<TodoTable>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(TodoTable::default()));
    Router::new()
        .route("/", get(root))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "todo API listening");
    }
    axum::serve(listener, app()).await
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Todo API is up and running!" }))
}

async fn list_todos(State(db): State<Db>, Query(page): Query<Page>) -> Json<Vec<Todo>> {
    let table = db.read().await;
    debug!(skip = page.skip, limit = page.limit, total = table.todos.len(), "list_todos");
    Json(table.todos.iter().skip(page.skip).take(page.limit).cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::EmptyTitle);
    }
    let todo = db.write().await.insert(input);
    debug!(id = todo.id, "create_todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Todo>, ApiError> {
    let table = db.read().await;
    table
        .todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Overwrites title, description and completed, and stamps a new `created_at`.
async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, ApiError> {
    let mut table = db.write().await;
    let todo = table.find_mut(id).ok_or(ApiError::NotFound)?;
    todo.title = input.title;
    todo.description = input.description;
    todo.completed = input.completed;
    todo.created_at = now();
    debug!(id, completed = todo.completed, "update_todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, ApiError> {
    let mut table = db.write().await;
    let before = table.todos.len();
    table.todos.retain(|t| t.id != id);
    if table.todos.len() == before {
        return Err(ApiError::NotFound);
    }
    debug!(id, "delete_todo");
    Ok(StatusCode::NO_CONTENT)
}
