//! Pure HTML-fragment rendering for the todo list.
//!
//! # Design
//! Every call rebuilds its fragment from scratch — there is no diffing and
//! no retained markup, so the output is always a straight projection of the
//! input slice. User-supplied text goes through [`escape_text`] when it
//! lands in element content and [`escape_attr`] when it lands inside a
//! quoted attribute value, so injected markup can never execute.

use crate::types::{Filter, Todo};

/// The rendered list fragment plus the trailing remaining-items line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub items_html: String,
    pub count_text: String,
}

/// Render the whole list. An empty slice yields a single placeholder row
/// and an empty count.
pub fn render_todos(todos: &[Todo]) -> ListView {
    if todos.is_empty() {
        return ListView {
            items_html: r#"<li class="empty-state">No todos found</li>"#.to_string(),
            count_text: String::new(),
        };
    }

    let mut items_html = String::new();
    for todo in todos {
        items_html.push_str(&render_todo_row(todo));
    }

    let remaining = todos.iter().filter(|t| !t.completed).count();
    let plural = if remaining == 1 { "" } else { "s" };
    ListView {
        items_html,
        count_text: format!("{remaining} item{plural} remaining"),
    }
}

/// Render one `<li>` row: checkbox, title, optional description, actions.
pub fn render_todo_row(todo: &Todo) -> String {
    let completed_class = if todo.completed { " completed" } else { "" };
    let checked = if todo.completed { " checked" } else { "" };
    let description = match todo.description_text() {
        Some(d) => format!(r#"<div class="todo-description">{}</div>"#, escape_text(d)),
        None => String::new(),
    };
    format!(
        concat!(
            r#"<li class="todo-item{completed}" data-id="{id}">"#,
            r#"<input type="checkbox" class="todo-checkbox"{checked}>"#,
            r#"<div class="todo-content">"#,
            r#"<div class="todo-title">{title}</div>"#,
            "{description}",
            r#"</div>"#,
            r#"<div class="todo-actions">"#,
            r#"<button class="btn btn-edit" data-action="edit">Edit</button>"#,
            r#"<button class="btn btn-danger" data-action="delete">Delete</button>"#,
            r#"</div></li>"#
        ),
        completed = completed_class,
        id = todo.id,
        checked = checked,
        title = escape_text(&todo.title),
        description = description,
    )
}

/// Render the inline edit form, pre-filled via escaped `value` attributes.
pub fn render_edit_form(title: &str, description: &str) -> String {
    format!(
        concat!(
            r#"<form class="edit-form">"#,
            r#"<input type="text" class="edit-title" value="{title}" placeholder="Title">"#,
            r#"<input type="text" class="edit-desc" value="{desc}" placeholder="Description">"#,
            r#"<div class="edit-actions">"#,
            r#"<button type="submit" class="btn btn-save">Save</button>"#,
            r#"<button type="button" class="btn btn-cancel">Cancel</button>"#,
            r#"</div></form>"#
        ),
        title = escape_attr(title),
        desc = escape_attr(description),
    )
}

/// Render the three filter buttons with exactly one marked active.
pub fn render_filter_bar(active: Filter) -> String {
    let mut html = String::new();
    for filter in Filter::ALL {
        let class = if filter == active {
            "filter-btn active"
        } else {
            "filter-btn"
        };
        let value = filter.query_value().unwrap_or("all");
        html.push_str(&format!(
            r#"<button class="{class}" data-filter="{value}">{label}</button>"#,
            class = class,
            value = value,
            label = filter.label(),
        ));
    }
    html
}

/// Escape text for element content. Equivalent to a text-only assignment:
/// the result can never introduce elements.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for a double- or single-quoted attribute value.
pub fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
