//! In-memory authority for the todo collection.
//!
//! # Design
//! `TodoStore` owns the local sequence and a single global `Status`. Every
//! operation makes at most one remote call and touches local state only
//! after that call succeeds; the local copy of a todo is always the record
//! the server last returned for it. A failed call is logged and turned into
//! `Status::Failed` with a fixed message for that operation. Nothing is
//! returned to the caller as an error.
//!
//! Operations take `&mut self`, so a store runs one operation at a time.

use tracing::{debug, warn};

use crate::error::TransportError;
use crate::service::RemoteTodoService;
use crate::types::{Todo, TodoDraft, TodoId};
use crate::view::View;

pub const FETCH_FAILED: &str = "Failed to fetch todos. Is the backend running?";
pub const ADD_FAILED: &str = "Failed to add todo.";
pub const UPDATE_FAILED: &str = "Failed to update todo.";
pub const DELETE_FAILED: &str = "Failed to delete todo.";

/// Loading/error state shown in place of (or alongside) the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Ready,
    Failed(String),
}

impl Status {
    pub fn is_failed(&self) -> bool {
        matches!(self, Status::Failed(_))
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Status::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct TodoStore<S> {
    service: S,
    todos: Vec<Todo>,
    status: Status,
}

impl<S: RemoteTodoService> TodoStore<S> {
    /// A store that has not fetched yet: `Loading`, empty.
    pub fn new(service: S) -> Self {
        Self {
            service,
            todos: Vec::new(),
            status: Status::Loading,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> View<'_> {
        View::of(&self.status, &self.todos)
    }

    /// Replace the local sequence with the server's.
    pub async fn refresh(&mut self) {
        debug!("refresh: called");
        self.status = Status::Loading;
        match self.service.list().await {
            Ok(todos) => {
                debug!(count = todos.len(), "refresh: loaded todos");
                self.todos = todos;
                self.status = Status::Ready;
            }
            Err(e) => self.fail(FETCH_FAILED, &e),
        }
    }

    /// Create a todo from `draft` and append it. Blank titles are dropped
    /// without a remote call. `draft` is cleared only on success.
    pub async fn add(&mut self, draft: &mut TodoDraft) {
        if !draft.is_submittable() {
            debug!("add: blank title, ignoring");
            return;
        }
        debug!(title = %draft.title, "add: called");
        match self.service.create(draft).await {
            Ok(todo) => {
                debug!(id = %todo.id, "add: created");
                self.todos.push(todo);
                draft.clear();
            }
            Err(e) => self.fail(ADD_FAILED, &e),
        }
    }

    /// Flip `completed` on the server and adopt the server's record.
    /// Unknown ids are ignored.
    pub async fn toggle(&mut self, id: TodoId) {
        let Some(current) = self.get(id) else {
            debug!(%id, "toggle: not in local list, ignoring");
            return;
        };
        let fields = current.toggled();
        debug!(%id, completed = fields.completed, "toggle: called");
        match self.service.update(id, &fields).await {
            Ok(updated) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
                    *slot = updated;
                }
            }
            Err(e) => self.fail(UPDATE_FAILED, &e),
        }
    }

    /// Delete on the server, then drop the local entry.
    pub async fn remove(&mut self, id: TodoId) {
        debug!(%id, "remove: called");
        match self.service.delete(id).await {
            Ok(()) => self.todos.retain(|t| t.id != id),
            Err(e) => self.fail(DELETE_FAILED, &e),
        }
    }

    fn fail(&mut self, message: &str, err: &TransportError) {
        warn!(error = %err, not_found = err.is_not_found(), "{message}");
        self.status = Status::Failed(message.to_string());
    }
}
