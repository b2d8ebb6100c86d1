//! What a rendering surface should show for the current store state.
//!
//! A failure replaces the whole list, as does loading. Per-row helpers
//! cover the toggle button label and the creation date.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::store::Status;
use crate::types::Todo;

pub const LOADING_TEXT: &str = "Loading todos...";
pub const EMPTY_TEXT: &str = "No todos yet. Add one above!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    List(&'a [Todo]),
}

impl<'a> View<'a> {
    pub fn of(status: &'a Status, todos: &'a [Todo]) -> Self {
        match status {
            Status::Loading => View::Loading,
            Status::Failed(message) => View::Failed(message.as_str()),
            Status::Ready if todos.is_empty() => View::Empty,
            Status::Ready => View::List(todos),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = TodoItem<'a>> {
        let todos: &'a [Todo] = match *self {
            View::List(todos) => todos,
            _ => &[],
        };
        todos.iter().map(TodoItem::new)
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Loading => f.write_str(LOADING_TEXT),
            View::Failed(message) => f.write_str(message),
            View::Empty => f.write_str(EMPTY_TEXT),
            View::List(_) => {
                for (i, item) in self.items().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// One row of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoItem<'a> {
    pub todo: &'a Todo,
}

impl<'a> TodoItem<'a> {
    pub fn new(todo: &'a Todo) -> Self {
        Self { todo }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.todo.completed {
            "Undo"
        } else {
            "Complete"
        }
    }

    /// Description, only when there is something to show.
    pub fn description(&self) -> Option<&'a str> {
        self.todo.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Creation date as `M/D/YYYY`, or the raw timestamp if it can't be read.
    pub fn created_date(&self) -> String {
        match parse_date(&self.todo.created_at) {
            Some(date) => date.format("%-m/%-d/%Y").to_string(),
            None => self.todo.created_at.clone(),
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

impl fmt::Display for TodoItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.todo.completed { "x" } else { " " };
        write!(f, "[{mark}] {}", self.todo.title)?;
        if let Some(description) = self.description() {
            write!(f, " - {description}")?;
        }
        write!(f, " (Created: {})", self.created_date())
    }
}
