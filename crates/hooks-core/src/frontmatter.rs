//! Line-oriented scanner for plan file frontmatter.
//!
//! Plan files carry a `---`-delimited header with scalar keys and a nested
//! `todos:` list:
//!
//! ```markdown
//! ---
//! name: refactor-auth
//! todos:
//!   - id: T1
//!     content: Extract session middleware
//!     status: completed
//! ---
//!
//! # Plan body (ignored)
//! ```
//!
//! This is deliberately not a YAML parser. It recognizes exactly one schema:
//! top-level `key: value` pairs plus a `todos:` list whose items carry `id`,
//! `content`, and `status`. Anything else in the header is skipped.

use serde::Serialize;
use std::collections::BTreeMap;

/// A single todo entry from the frontmatter.
///
/// Fields are optional at the parse layer: the scanner keeps whatever keys an
/// item actually carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
}

impl Todo {
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some("completed")
    }

    fn is_empty(&self) -> bool {
        self.id.is_none() && self.content.is_none() && self.status.is_none()
    }
}

/// Parsed frontmatter: scalar keys plus the todo list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanFrontmatter {
    pub fields: BTreeMap<String, String>,
    pub todos: Vec<Todo>,
}

impl PlanFrontmatter {
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").map(String::as_str)
    }
}

/// A plan is complete iff its todo list is non-empty and every todo's status
/// equals `completed`.
pub fn all_todos_completed(todos: &[Todo]) -> bool {
    !todos.is_empty() && todos.iter().all(Todo::is_completed)
}

/// Extract the frontmatter from plan file content.
///
/// Returns `None` when the content does not start with `---` or the header is
/// never closed by a line whose trimmed form is `---`.
pub fn parse(content: &str) -> Option<PlanFrontmatter> {
    if !content.starts_with("---") {
        return None;
    }

    let lines: Vec<&str> = content.lines().collect();
    let end = lines
        .iter()
        .skip(1)
        .position(|line| line.trim() == "---")?
        + 1;

    let mut fm = PlanFrontmatter::default();
    let mut in_todos = false;
    let mut current = Todo::default();

    for raw in &lines[1..end] {
        let stripped = raw.trim();
        if stripped.is_empty() {
            continue;
        }

        if stripped.starts_with("todos:") {
            in_todos = true;
            continue;
        }

        if in_todos {
            if let Some(inline) = stripped.strip_prefix("- ") {
                if !current.is_empty() {
                    fm.todos.push(std::mem::take(&mut current));
                } else {
                    current = Todo::default();
                }
                set_inline_key(&mut current, inline.trim());
                continue;
            }

            // A top-level key line ends the list. The in-flight item is kept
            // only once it has an id; the terminating line itself is consumed.
            if stripped.contains(':') && !raw.starts_with("  ") {
                if current.id.is_some() {
                    fm.todos.push(std::mem::take(&mut current));
                } else {
                    current = Todo::default();
                }
                in_todos = false;
            }

            if in_todos {
                set_continuation_key(&mut current, stripped);
            }
        } else if let Some((key, value)) = stripped.split_once(':') {
            fm.fields.insert(
                key.trim().to_string(),
                strip_quotes(value.trim()).to_string(),
            );
        }
    }

    if in_todos && current.id.is_some() {
        fm.todos.push(current);
    }

    Some(fm)
}

/// `- id: T1` style inline key on the item's first line.
fn set_inline_key(todo: &mut Todo, inline: &str) {
    let Some((key, value)) = inline.split_once(':') else {
        return;
    };
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    match key.trim() {
        "id" => todo.id = Some(value.to_string()),
        "content" => todo.content = Some(value.to_string()),
        "status" => todo.status = Some(value.to_string()),
        _ => {}
    }
}

/// Indented continuation lines: first marker found wins, checked in id,
/// content, status order.
fn set_continuation_key(todo: &mut Todo, stripped: &str) {
    if let Some(idx) = stripped.find("id:") {
        todo.id = Some(stripped[idx + "id:".len()..].trim().to_string());
    } else if let Some(idx) = stripped.find("content:") {
        todo.content = Some(stripped[idx + "content:".len()..].trim().to_string());
    } else if let Some(idx) = stripped.find("status:") {
        todo.status = Some(stripped[idx + "status:".len()..].trim().to_string());
    }
}

/// Strip one leading and one trailing quote character.
fn strip_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
