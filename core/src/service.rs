//! The remote todo collection as seen by the store.
//!
//! # Design
//! `RemoteTodoService` is the four-call contract the store depends on.
//! `HttpTodoService` realizes it over HTTP by pairing the stateless
//! `TodoClient` with an `HttpTransport`; tests substitute either half.

use async_trait::async_trait;

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::transport::{HttpTransport, UreqTransport};
use crate::types::{Todo, TodoDraft, TodoId};

#[async_trait]
pub trait RemoteTodoService: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, TransportError>;

    async fn create(&self, draft: &TodoDraft) -> Result<Todo, TransportError>;

    /// `fields` is the complete record to store under `id`.
    async fn update(&self, id: TodoId, fields: &Todo) -> Result<Todo, TransportError>;

    async fn delete(&self, id: TodoId) -> Result<(), TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpTodoService<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl HttpTodoService<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(TodoClient::new(&config.base_url), UreqTransport::new(config))
    }
}

impl<T: HttpTransport> HttpTodoService<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }
}

#[async_trait]
impl<T: HttpTransport> RemoteTodoService for HttpTodoService<T> {
    async fn list(&self) -> Result<Vec<Todo>, TransportError> {
        let response = self.transport.execute(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn create(&self, draft: &TodoDraft) -> Result<Todo, TransportError> {
        let request = self.client.build_create_todo(draft)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn update(&self, id: TodoId, fields: &Todo) -> Result<Todo, TransportError> {
        let request = self.client.build_update_todo(id, fields)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    async fn delete(&self, id: TodoId) -> Result<(), TransportError> {
        let response = self.transport.execute(self.client.build_delete_todo(id)).await?;
        self.client.parse_delete_todo(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replies with canned responses and remembers what it was asked.
    struct CannedTransport {
        responses: Mutex<Vec<Result<HttpResponse, TransportError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn service(responses: Vec<Result<HttpResponse, TransportError>>) -> HttpTodoService<CannedTransport> {
        HttpTodoService::new(TodoClient::new("http://api.test"), CannedTransport::new(responses))
    }

    const RECORD: &str = r#"{"id":1,"title":"Buy milk","description":"","completed":false,"created_at":"2024-01-01"}"#;

    #[tokio::test]
    async fn create_posts_draft_and_parses_record() {
        let service = service(vec![Ok(HttpResponse::new(201, RECORD))]);
        let todo = service.create(&TodoDraft::new("Buy milk", "")).await.unwrap();
        assert_eq!(todo.id, TodoId(1));

        let requests = service.transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].path, "http://api.test/todos");
    }

    #[tokio::test]
    async fn network_failure_is_passed_through() {
        let service = service(vec![Err(TransportError::Network("connection refused".to_string()))]);
        let err = service.list().await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn delete_maps_404() {
        let service = service(vec![Ok(HttpResponse::new(404, r#"{"detail":"Todo not found."}"#))]);
        let err = service.delete(TodoId(9)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            service.transport.requests.lock().unwrap()[0].path,
            "http://api.test/todos/9"
        );
    }

    #[test]
    fn from_config_uses_base_url() {
        let service = HttpTodoService::from_config(&ClientConfig::new("http://127.0.0.1:1234/"));
        assert_eq!(service.client().base_url(), "http://127.0.0.1:1234");
    }
}
