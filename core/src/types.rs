//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently of
//! the mock-server crate. `created_at` is kept as the server's raw string so
//! a local record is always exactly what the server last returned; the view
//! layer parses it only for display. Integration tests catch schema drift.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single todo item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
}

impl Todo {
    /// The full record with `completed` flipped, as sent by a toggle.
    pub fn toggled(&self) -> Todo {
        Todo {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Contents of the creation form. Also the request payload for `POST /todos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// A draft can be submitted only when its title has visible characters.
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Reset both fields to empty.
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}
