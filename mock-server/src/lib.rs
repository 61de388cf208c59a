//! In-memory implementation of the todo REST contract.
//!
//! Mirrors the production API the client consumes: `/api/todos` with
//! `status`/`q` filtering, enveloped responses, 400 on blank titles, and a
//! PATCH toggle. State is an insertion-ordered `Vec` behind an `RwLock` so
//! list responses are deterministic.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Full-edit payload. Fields absent from the JSON are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodoEnvelope {
    pub todo: Todo,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Todo not found".to_string(),
        }),
    )
}

/// `status=active|completed` narrows by completion (anything else means
/// all); `q` is a case-insensitive substring match over title or
/// description, like the original SQL `LIKE`.
async fn list_todos(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<TodoList> {
    let todos = db.read().await;
    let wanted_completed = match params.status.as_deref() {
        Some("active") => Some(false),
        Some("completed") => Some(true),
        _ => None,
    };
    let needle = params.q.as_deref().unwrap_or("").to_lowercase();

    let todos = todos
        .iter()
        .filter(|t| wanted_completed.map_or(true, |c| t.completed == c))
        .filter(|t| {
            needle.is_empty()
                || t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(TodoList { todos })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<TodoEnvelope>), (StatusCode, Json<ErrorBody>)> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Title is required".to_string(),
            }),
        ));
    }
    let todo = Todo {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: input.description,
        completed: false,
    };
    tracing::debug!(id = %todo.id, "created todo");
    db.write().await.push(todo.clone());
    Ok((StatusCode::CREATED, Json(TodoEnvelope { todo })))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoEnvelope>, (StatusCode, Json<ErrorBody>)> {
    let todos = db.read().await;
    todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(|todo| Json(TodoEnvelope { todo }))
        .ok_or_else(not_found)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<TodoEnvelope>, (StatusCode, Json<ErrorBody>)> {
    let mut todos = db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = description;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(TodoEnvelope { todo: todo.clone() }))
}

async fn toggle_todo(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoEnvelope>, (StatusCode, Json<ErrorBody>)> {
    let mut todos = db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
    todo.completed = !todo.completed;
    Ok(Json(TodoEnvelope { todo: todo.clone() }))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageBody>, (StatusCode, Json<ErrorBody>)> {
    let mut todos = db.write().await;
    let position = todos.iter().position(|t| t.id == id).ok_or_else(not_found)?;
    let removed = todos.remove(position);
    tracing::debug!(id = %removed.id, "deleted todo");
    Ok(Json(MessageBody {
        message: "Todo deleted".to_string(),
    }))
}
