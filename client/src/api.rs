//! Stateless request builder and response parser for the todo REST API.
//!
//! # Design
//! `TodoApi` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; a
//! [`Transport`] executes the round-trip in between. Mutation response
//! bodies are not consumed beyond the status check — the controller always
//! refetches the list instead of patching local state.
//!
//! [`Transport`]: crate::transport::Transport

use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Filter, Todo, TodoList, UpdateTodo};

/// Stateless builder/parser for the `/api/todos` endpoints.
#[derive(Debug, Clone)]
pub struct TodoApi {
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET `/api/todos`, with `status` omitted for [`Filter::All`] and `q`
    /// omitted when the trimmed query is empty.
    pub fn build_list_todos(&self, filter: Filter, query: &str) -> HttpRequest {
        let mut url = format!("{}/api/todos", self.base_url);
        let mut params = Vec::new();
        if let Some(status) = filter.query_value() {
            params.push(format!("status={status}"));
        }
        let q = query.trim();
        if !q.is_empty() {
            params.push(format!("q={}", urlencoding::encode(q)));
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST `/api/todos`. Rejects a blank trimmed title before building
    /// anything — the invariant is enforced client-side, not delegated to
    /// the server's 400.
    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        if input.title.trim().is_empty() {
            return Err(ApiError::Validation("title must not be empty"));
        }
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/api/todos", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// PUT `/api/todos/{id}`. Same blank-title guard as create.
    pub fn build_update_todo(&self, id: Uuid, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        if input.title.trim().is_empty() {
            return Err(ApiError::Validation("title must not be empty"));
        }
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/api/todos/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// PATCH `/api/todos/{id}/toggle`, no body.
    pub fn build_toggle_todo(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            url: format!("{}/api/todos/{id}/toggle", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// DELETE `/api/todos/{id}`.
    pub fn build_delete_todo(&self, id: Uuid) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/api/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        let list: TodoList = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(list.todos)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_toggle_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }
}

/// Map non-expected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}
