//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; the integration tests catch any drift between
//! the two. List responses arrive wrapped in a `{"todos": [...]}` envelope
//! and single-item mutation responses in `{"todo": {...}}` — the wrappers
//! are modeled explicitly rather than flattened away.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item returned by the API.
///
/// `description` may be absent or empty; the renderer treats both the same.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
}

impl Todo {
    /// The description text, with absent and empty collapsed to `None`.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Request payload for creating a new todo. The server owns `id` and the
/// `completed` default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for a full edit. The client always sends both fields,
/// trimmed, because the edit form always carries both inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    pub description: String,
}

/// The `{"todos": [...]}` envelope around a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

/// Which subset of todos the server should return. Applied server-side via
/// the `status` query parameter; `All` sends no parameter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// The `status` query value, or `None` when no parameter is sent.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Filter::All => None,
            Filter::Active => Some("active"),
            Filter::Completed => Some("completed"),
        }
    }

    /// Display label, as shown on the filter buttons.
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];
}
