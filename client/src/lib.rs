//! Client-side controller for the todo web page.
//!
//! # Overview
//! Fetches the todo collection from a JSON REST API, renders it as an HTML
//! fragment, and translates user intent (create, edit, delete, toggle,
//! filter, debounced search) into API calls followed by a full reload —
//! the rendered list is always a fresh projection of the last fetch.
//!
//! # Design
//! - `TodoApi` is stateless: each operation splits into `build_*` (produces
//!   an `HttpRequest`) and `parse_*` (consumes an `HttpResponse`), keeping
//!   request/response handling deterministic and free of I/O.
//! - `Transport` is the single I/O seam; `UreqTransport` is the real
//!   implementation and tests substitute scripted ones.
//! - `TodoController` owns all page state (filter, inputs, edit mode, the
//!   search `Debouncer`, the fetched list, the failure notice) and rebuilds
//!   the whole `PageView` from scratch on demand.
//! - Rendering is pure string building with strict escaping, so injected
//!   markup in titles or descriptions can never execute.

pub mod api;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod http;
pub mod render;
pub mod transport;
pub mod types;

pub use api::TodoApi;
pub use config::ClientConfig;
pub use controller::{PageView, TodoController, UiEvent};
pub use debounce::Debouncer;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{render_todos, ListView};
pub use transport::{Transport, UreqTransport};
pub use types::{CreateTodo, Filter, Todo, TodoList, UpdateTodo};
