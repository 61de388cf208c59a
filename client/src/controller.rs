//! The page controller: synchronizes the rendered list with server state
//! and translates user intent into API calls.
//!
//! # Design
//! `TodoController` is the page's single piece of mutable state — the
//! current filter, the form inputs, an optional in-progress edit, the
//! debouncer, and the last fetched list. UI events arrive as a [`UiEvent`]
//! and dispatch through [`TodoController::handle`]; every mutation settles
//! into the one [`refresh`] path, which refetches and lets [`view`] rebuild
//! the page from scratch. There is no optimistic update and no in-flight
//! guard: a mutation that fails simply leaves the stale list rendered and a
//! notice set.
//!
//! [`refresh`]: TodoController::refresh
//! [`view`]: TodoController::view

use std::time::Instant;

use uuid::Uuid;

use crate::api::TodoApi;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::error::ApiError;
use crate::render;
use crate::transport::Transport;
use crate::types::{CreateTodo, Filter, Todo, UpdateTodo};

/// A user interaction, keyed by the originating element and event kind.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Add-form title field changed.
    TitleInput(String),
    /// Add-form description field changed.
    DescriptionInput(String),
    /// Add form submitted.
    AddSubmitted,
    /// Search box keystroke.
    SearchInput(String),
    /// One of the filter buttons clicked.
    FilterClicked(Filter),
    /// A row's completion checkbox toggled.
    CheckboxToggled(Uuid),
    /// A row's Edit button clicked.
    EditClicked(Uuid),
    /// Inline edit form submitted.
    EditSaved { title: String, description: String },
    /// Inline edit form cancelled.
    EditCancelled,
    /// A row's Delete button clicked.
    DeleteClicked(Uuid),
}

/// An in-progress inline edit, pre-filled from the row at click time.
#[derive(Debug, Clone)]
struct EditState {
    id: Uuid,
    title: String,
    description: String,
}

/// Everything the page shows, rebuilt on demand.
#[derive(Debug, Clone)]
pub struct PageView {
    pub filter_bar: String,
    pub items_html: String,
    pub count_text: String,
    pub notice: Option<String>,
}

/// Page-lifecycle-bound controller for the todo list.
pub struct TodoController<T: Transport> {
    api: TodoApi,
    transport: T,
    filter: Filter,
    search_input: String,
    title_input: String,
    description_input: String,
    editing: Option<EditState>,
    debounce: Debouncer,
    todos: Vec<Todo>,
    notice: Option<String>,
}

impl<T: Transport> TodoController<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            api: TodoApi::new(&config.base_url),
            transport,
            filter: Filter::All,
            search_input: String::new(),
            title_input: String::new(),
            description_input: String::new(),
            editing: None,
            debounce: Debouncer::new(config.debounce),
            todos: Vec::new(),
            notice: None,
        }
    }

    /// Page-load hook: fetch and render the initial list.
    pub fn mount(&mut self) {
        self.refresh();
    }

    /// Dispatch one UI event. `now` feeds the search debouncer.
    pub fn handle(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::TitleInput(text) => self.title_input = text,
            UiEvent::DescriptionInput(text) => self.description_input = text,
            UiEvent::AddSubmitted => self.submit_add(),
            UiEvent::SearchInput(text) => {
                self.search_input = text;
                self.debounce.schedule(now);
            }
            UiEvent::FilterClicked(filter) => {
                // Immediate reload; a pending search deadline stays armed.
                self.filter = filter;
                self.refresh();
            }
            UiEvent::CheckboxToggled(id) => self.toggle_todo(id),
            UiEvent::EditClicked(id) => self.start_edit(id),
            UiEvent::EditSaved { title, description } => self.save_edit(&title, &description),
            UiEvent::EditCancelled => {
                // Full reload rather than a local revert, like the page
                // always did.
                self.editing = None;
                self.refresh();
            }
            UiEvent::DeleteClicked(id) => self.delete_todo(id),
        }
    }

    /// Pump the debouncer; fires at most one pending search reload.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.poll(now) {
            self.refresh();
        }
    }

    /// Refetch the list for the current filter and search query. On failure
    /// the stale list stays rendered and a notice is set.
    pub fn refresh(&mut self) {
        let request = self.api.build_list_todos(self.filter, &self.search_input);
        tracing::debug!(url = %request.url, "reloading todo list");
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.api.parse_list_todos(response));
        match result {
            Ok(todos) => {
                // A reload rebuilds the whole list, dropping any
                // in-progress edit with it.
                self.todos = todos;
                self.editing = None;
                self.notice = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "list reload failed, keeping stale list");
                self.notice = Some(notice_for(&err));
            }
        }
    }

    fn submit_add(&mut self) {
        let title = self.title_input.trim();
        if title.is_empty() {
            // Local rejection: no request, inputs untouched.
            return;
        }
        let input = CreateTodo {
            title: title.to_string(),
            description: self.description_input.trim().to_string(),
        };
        let result = self
            .api
            .build_create_todo(&input)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.api.parse_create_todo(response));
        match result {
            Ok(()) => {
                self.title_input.clear();
                self.description_input.clear();
                self.refresh();
            }
            Err(err) => {
                tracing::warn!(error = %err, "create failed");
                self.notice = Some(notice_for(&err));
            }
        }
    }

    fn toggle_todo(&mut self, id: Uuid) {
        let request = self.api.build_toggle_todo(id);
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.api.parse_toggle_todo(response));
        match result {
            Ok(()) => self.refresh(),
            Err(err) => {
                tracing::warn!(error = %err, %id, "toggle failed");
                self.notice = Some(notice_for(&err));
            }
        }
    }

    fn delete_todo(&mut self, id: Uuid) {
        let request = self.api.build_delete_todo(id);
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.api.parse_delete_todo(response));
        match result {
            Ok(()) => self.refresh(),
            Err(err) => {
                tracing::warn!(error = %err, %id, "delete failed");
                self.notice = Some(notice_for(&err));
            }
        }
    }

    fn start_edit(&mut self, id: Uuid) {
        let Some(todo) = self.todos.iter().find(|t| t.id == id) else {
            return;
        };
        self.editing = Some(EditState {
            id,
            title: todo.title.clone(),
            description: todo.description_text().unwrap_or("").to_string(),
        });
    }

    fn save_edit(&mut self, title: &str, description: &str) {
        let Some(edit) = &self.editing else { return };
        let title = title.trim();
        if title.is_empty() {
            // Stay in edit mode, exactly as an ignored form submit would.
            return;
        }
        let input = UpdateTodo {
            title: title.to_string(),
            description: description.trim().to_string(),
        };
        let id = edit.id;
        let result = self
            .api
            .build_update_todo(id, &input)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.api.parse_update_todo(response));
        match result {
            Ok(()) => {
                self.editing = None;
                self.refresh();
            }
            Err(err) => {
                tracing::warn!(error = %err, %id, "update failed");
                self.notice = Some(notice_for(&err));
            }
        }
    }

    /// Rebuild the whole page projection: filter bar, list (with the edit
    /// form substituted for the row being edited), count, notice.
    pub fn view(&self) -> PageView {
        let list = render::render_todos(&self.todos);
        let items_html = match &self.editing {
            Some(edit) => {
                let mut html = String::new();
                for todo in &self.todos {
                    if todo.id == edit.id {
                        let completed = if todo.completed { " completed" } else { "" };
                        html.push_str(&format!(
                            r#"<li class="todo-item{}" data-id="{}">{}</li>"#,
                            completed,
                            todo.id,
                            render::render_edit_form(&edit.title, &edit.description),
                        ));
                    } else {
                        html.push_str(&render::render_todo_row(todo));
                    }
                }
                html
            }
            None => list.items_html,
        };
        PageView {
            filter_bar: render::render_filter_bar(self.filter),
            items_html,
            count_text: list.count_text,
            notice: self.notice.clone(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    pub fn description_input(&self) -> &str {
        &self.description_input
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_pending(&self) -> bool {
        self.debounce.pending()
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        self.editing.as_ref().map(|e| e.id)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

/// User-facing wording for a failed request.
fn notice_for(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => "Could not reach the server".to_string(),
        ApiError::NotFound => "That todo no longer exists".to_string(),
        ApiError::Server { status, .. } => format!("Server error ({status})"),
        ApiError::Validation(msg) => format!("Invalid input: {msg}"),
        ApiError::Serialization(_) | ApiError::Deserialization(_) => {
            "Unexpected response from the server".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Records every request and replays scripted responses; when the
    /// script runs dry it answers with a generic success for the method.
    struct MockTransport {
        requests: RefCell<Vec<HttpRequest>>,
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                responses: RefCell::new(VecDeque::new()),
            }
        }

        fn script(&self, response: Result<HttpResponse, ApiError>) {
            self.responses.borrow_mut().push_back(response);
        }

        fn script_list(&self, body: &str) {
            self.script(Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }));
        }
    }

    impl Transport for &MockTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let method = request.method;
            self.requests.borrow_mut().push(request);
            if let Some(scripted) = self.responses.borrow_mut().pop_front() {
                return scripted;
            }
            let (status, body) = match method {
                HttpMethod::Get => (200, r#"{"todos":[]}"#),
                HttpMethod::Post => (201, "{}"),
                HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete => (200, "{}"),
            };
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            })
        }
    }

    const ID_1: &str = "00000000-0000-0000-0000-000000000001";

    fn one_todo_list() -> String {
        format!(r#"{{"todos":[{{"id":"{ID_1}","title":"Buy milk","description":"2 liters","completed":false}}]}}"#)
    }

    fn controller(transport: &MockTransport) -> TodoController<&MockTransport> {
        TodoController::new(ClientConfig::default(), transport)
    }

    fn methods(transport: &MockTransport) -> Vec<HttpMethod> {
        transport.requests.borrow().iter().map(|r| r.method).collect()
    }

    #[test]
    fn mount_issues_initial_reload() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        c.mount();
        assert_eq!(methods(&transport), vec![HttpMethod::Get]);
    }

    #[test]
    fn blank_title_submit_is_a_noop() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let now = Instant::now();
        c.handle(UiEvent::TitleInput("   ".to_string()), now);
        c.handle(UiEvent::DescriptionInput("kept".to_string()), now);
        c.handle(UiEvent::AddSubmitted, now);
        assert!(transport.requests.borrow().is_empty());
        assert_eq!(c.title_input(), "   ");
        assert_eq!(c.description_input(), "kept");
    }

    #[test]
    fn successful_create_clears_inputs_and_reloads_once() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let now = Instant::now();
        c.handle(UiEvent::TitleInput("Buy milk".to_string()), now);
        c.handle(UiEvent::DescriptionInput("2 liters".to_string()), now);
        c.handle(UiEvent::AddSubmitted, now);
        assert_eq!(methods(&transport), vec![HttpMethod::Post, HttpMethod::Get]);
        assert_eq!(c.title_input(), "");
        assert_eq!(c.description_input(), "");
    }

    #[test]
    fn create_trims_title_and_description() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let now = Instant::now();
        c.handle(UiEvent::TitleInput("  Buy milk  ".to_string()), now);
        c.handle(UiEvent::DescriptionInput("  2 liters ".to_string()), now);
        c.handle(UiEvent::AddSubmitted, now);
        let requests = transport.requests.borrow();
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["description"], "2 liters");
    }

    #[test]
    fn rapid_typing_debounces_to_one_reload() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let t0 = Instant::now();
        c.handle(UiEvent::SearchInput("a".to_string()), t0);
        c.handle(UiEvent::SearchInput("ab".to_string()), t0 + Duration::from_millis(100));
        c.handle(UiEvent::SearchInput("abc".to_string()), t0 + Duration::from_millis(200));
        c.tick(t0 + Duration::from_millis(250));
        assert!(transport.requests.borrow().is_empty());
        c.tick(t0 + Duration::from_millis(500));
        c.tick(t0 + Duration::from_millis(900));
        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.ends_with("/api/todos?q=abc"));
    }

    #[test]
    fn filter_click_reloads_immediately_with_status() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let now = Instant::now();
        c.handle(UiEvent::FilterClicked(Filter::Active), now);
        assert_eq!(c.filter(), Filter::Active);
        {
            let requests = transport.requests.borrow();
            assert_eq!(requests.len(), 1);
            assert!(requests[0].url.ends_with("/api/todos?status=active"));
        }
        c.handle(UiEvent::FilterClicked(Filter::All), now);
        let requests = transport.requests.borrow();
        assert!(requests[1].url.ends_with("/api/todos"));
    }

    #[test]
    fn filter_click_does_not_cancel_pending_search() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let t0 = Instant::now();
        c.handle(UiEvent::SearchInput("milk".to_string()), t0);
        c.handle(UiEvent::FilterClicked(Filter::Active), t0);
        assert!(c.search_pending());
        c.tick(t0 + Duration::from_millis(300));
        // One immediate filter reload plus the debounced search reload.
        assert_eq!(methods(&transport), vec![HttpMethod::Get, HttpMethod::Get]);
    }

    #[test]
    fn toggle_issues_patch_then_reload() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let id = Uuid::parse_str(ID_1).unwrap();
        c.handle(UiEvent::CheckboxToggled(id), Instant::now());
        let requests = transport.requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Patch);
        assert!(requests[0].url.ends_with(&format!("/api/todos/{ID_1}/toggle")));
        assert!(requests[0].body.is_none());
        assert_eq!(requests[1].method, HttpMethod::Get);
    }

    #[test]
    fn delete_issues_delete_then_reload() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let id = Uuid::parse_str(ID_1).unwrap();
        c.handle(UiEvent::DeleteClicked(id), Instant::now());
        assert_eq!(
            methods(&transport),
            vec![HttpMethod::Delete, HttpMethod::Get]
        );
    }

    #[test]
    fn failed_reload_keeps_stale_list_and_sets_notice() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        transport.script_list(&one_todo_list());
        c.mount();
        assert_eq!(c.todos().len(), 1);

        transport.script(Err(ApiError::Network("connection refused".to_string())));
        c.handle(UiEvent::FilterClicked(Filter::Active), Instant::now());
        assert_eq!(c.todos().len(), 1, "stale list must stay rendered");
        assert_eq!(c.notice(), Some("Could not reach the server"));

        // A later successful reload clears the notice.
        c.refresh();
        assert!(c.notice().is_none());
        assert!(c.todos().is_empty());
    }

    #[test]
    fn failed_mutation_sets_notice_and_skips_reload() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        let id = Uuid::parse_str(ID_1).unwrap();
        transport.script(Ok(HttpResponse {
            status: 500,
            body: "boom".to_string(),
        }));
        c.handle(UiEvent::CheckboxToggled(id), Instant::now());
        assert_eq!(methods(&transport), vec![HttpMethod::Patch]);
        assert_eq!(c.notice(), Some("Server error (500)"));
    }

    #[test]
    fn edit_click_prefills_from_listed_todo() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        transport.script_list(&one_todo_list());
        c.mount();
        let id = Uuid::parse_str(ID_1).unwrap();
        c.handle(UiEvent::EditClicked(id), Instant::now());
        assert_eq!(c.editing_id(), Some(id));
        let view = c.view();
        assert!(view.items_html.contains(r#"class="edit-title" value="Buy milk""#));
        assert!(view.items_html.contains(r#"class="edit-desc" value="2 liters""#));
        // The other list chrome is still there.
        assert_eq!(view.count_text, "1 item remaining");
    }

    #[test]
    fn edit_row_keeps_completed_class() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        transport.script_list(&format!(
            r#"{{"todos":[{{"id":"{ID_1}","title":"Done","completed":true}}]}}"#
        ));
        c.mount();
        let id = Uuid::parse_str(ID_1).unwrap();
        c.handle(UiEvent::EditClicked(id), Instant::now());
        let view = c.view();
        assert!(view.items_html.contains(r#"<li class="todo-item completed""#));
        assert!(view.items_html.contains("edit-form"));
    }

    #[test]
    fn edit_click_on_unknown_id_is_ignored() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        c.handle(UiEvent::EditClicked(Uuid::new_v4()), Instant::now());
        assert!(c.editing_id().is_none());
    }

    #[test]
    fn edit_save_with_blank_title_stays_in_edit_mode() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        transport.script_list(&one_todo_list());
        c.mount();
        let id = Uuid::parse_str(ID_1).unwrap();
        c.handle(UiEvent::EditClicked(id), Instant::now());
        let before = transport.requests.borrow().len();
        c.handle(
            UiEvent::EditSaved {
                title: "  ".to_string(),
                description: "x".to_string(),
            },
            Instant::now(),
        );
        assert_eq!(transport.requests.borrow().len(), before);
        assert_eq!(c.editing_id(), Some(id));
    }

    #[test]
    fn edit_save_puts_then_reloads_and_exits_edit_mode() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        transport.script_list(&one_todo_list());
        c.mount();
        let id = Uuid::parse_str(ID_1).unwrap();
        c.handle(UiEvent::EditClicked(id), Instant::now());
        c.handle(
            UiEvent::EditSaved {
                title: "Buy oat milk".to_string(),
                description: String::new(),
            },
            Instant::now(),
        );
        let requests = transport.requests.borrow();
        let put = &requests[requests.len() - 2];
        assert_eq!(put.method, HttpMethod::Put);
        assert!(put.url.ends_with(&format!("/api/todos/{ID_1}")));
        let body: serde_json::Value =
            serde_json::from_str(put.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy oat milk");
        assert_eq!(requests.last().unwrap().method, HttpMethod::Get);
        drop(requests);
        assert!(c.editing_id().is_none());
    }

    #[test]
    fn edit_cancel_exits_edit_mode_and_reloads() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        transport.script_list(&one_todo_list());
        c.mount();
        let id = Uuid::parse_str(ID_1).unwrap();
        c.handle(UiEvent::EditClicked(id), Instant::now());
        let before = transport.requests.borrow().len();
        c.handle(UiEvent::EditCancelled, Instant::now());
        assert!(c.editing_id().is_none());
        assert_eq!(transport.requests.borrow().len(), before + 1);
        assert_eq!(*methods(&transport).last().unwrap(), HttpMethod::Get);
    }

    #[test]
    fn view_surfaces_the_notice() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        transport.script(Err(ApiError::Network("offline".to_string())));
        c.mount();
        let view = c.view();
        assert_eq!(view.notice.as_deref(), Some("Could not reach the server"));
        // Nothing fetched yet, so the empty placeholder shows.
        assert!(view.items_html.contains("empty-state"));
    }

    #[test]
    fn view_marks_current_filter_active() {
        let transport = MockTransport::new();
        let mut c = controller(&transport);
        c.handle(UiEvent::FilterClicked(Filter::Completed), Instant::now());
        let view = c.view();
        assert!(view
            .filter_bar
            .contains(r#"class="filter-btn active" data-filter="completed""#));
        assert_eq!(view.filter_bar.matches("filter-btn active").count(), 1);
    }
}
