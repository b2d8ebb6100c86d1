//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each remote operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. A transport executes the round-trip in
//! between, so nothing here performs I/O.

use serde::de::DeserializeOwned;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Todo, TodoDraft, TodoId};

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Builds `HttpRequest` values and parses `HttpResponse` values for the
/// four calls the store makes: list, create, update, delete.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `POST /todos` with `{title, description}`.
    pub fn build_create_todo(&self, draft: &TodoDraft) -> Result<HttpRequest, TransportError> {
        let body = serde_json::to_string(draft).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// `PUT /todos/{id}` carrying the whole record, not a patch.
    pub fn build_update_todo(&self, id: TodoId, fields: &Todo) -> Result<HttpRequest, TransportError> {
        let body = serde_json::to_string(fields).map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/todos/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, TransportError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, TransportError> {
        check_status(&response, 201)?;
        decode(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, TransportError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), TransportError> {
        check_status(&response, 204)
    }
}

/// Map anything but the expected status to a `TransportError`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), TransportError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(TransportError::NotFound);
    }
    Err(TransportError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, TransportError> {
    serde_json::from_str(&response.body).map_err(|e| TransportError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:8000")
    }

    fn todo(id: u64, completed: bool) -> Todo {
        Todo {
            id: TodoId(id),
            title: "Buy milk".to_string(),
            description: Some(String::new()),
            completed,
            created_at: "2024-01-01T09:30:00".to_string(),
        }
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_todo_sends_title_and_description() {
        let draft = TodoDraft::new("Buy milk", "");
        let req = client().build_create_todo(&draft).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/todos");
        assert_eq!(req.headers, json_headers());
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "Buy milk", "description": ""}));
    }

    #[test]
    fn build_update_todo_sends_full_record() {
        let fields = todo(1, false).toggled();
        let req = client().build_update_todo(TodoId(1), &fields).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8000/todos/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["description"], "");
        assert_eq!(body["completed"], true);
        assert_eq!(body["created_at"], "2024-01-01T09:30:00");
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(TodoId(42));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8000/todos/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_keeps_server_order() {
        let response = HttpResponse::new(
            200,
            r#"[
                {"id":2,"title":"b","description":null,"completed":false,"created_at":"2024-01-02"},
                {"id":1,"title":"a","description":"x","completed":true,"created_at":"2024-01-01"}
            ]"#,
        );
        let todos = client().parse_list_todos(response).unwrap();
        let ids: Vec<_> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TodoId(2), TodoId(1)]);
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn parse_create_todo_success() {
        let response = HttpResponse::new(
            201,
            r#"{"id":1,"title":"Buy milk","description":"","completed":false,"created_at":"2024-01-01T09:30:00"}"#,
        );
        assert_eq!(client().parse_create_todo(response).unwrap(), todo(1, false));
    }

    #[test]
    fn parse_create_todo_rejects_200() {
        let response = HttpResponse::new(200, "{}");
        let err = client().parse_create_todo(response).unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 200, .. }));
    }

    #[test]
    fn parse_create_todo_bad_request() {
        let response = HttpResponse::new(400, r#"{"detail":"Title cannot be empty."}"#);
        match client().parse_create_todo(response).unwrap_err() {
            TransportError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Title cannot be empty."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_update_todo_not_found() {
        let response = HttpResponse::new(404, r#"{"detail":"Todo not found."}"#);
        let err = client().parse_update_todo(response).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn parse_delete_todo_success() {
        assert!(client().parse_delete_todo(HttpResponse::new(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_todo_server_error() {
        let err = client().parse_delete_todo(HttpResponse::new(500, "oops")).unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 500, .. }));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:8000/");
        assert_eq!(client.build_list_todos().path, "http://localhost:8000/todos");
    }
}
