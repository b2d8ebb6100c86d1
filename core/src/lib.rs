//! Client-side todo state synchronization.
//!
//! # Overview
//! `TodoStore` keeps an in-memory list of todos consistent with a remote
//! collection through four calls (list, create, update, delete) and exposes
//! a single loading/error status for the rendering surface.
//!
//! # Design
//! - `RemoteTodoService` is the store's only dependency; `HttpTodoService`
//!   realizes it over HTTP.
//! - Request building and response parsing (`TodoClient`) are split from
//!   the I/O (`HttpTransport`), so both halves test without a network.
//! - Local state changes only after the matching remote call succeeds, and
//!   updated records are replaced wholesale with the server's response.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::TransportError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{HttpTodoService, RemoteTodoService};
pub use store::{Status, TodoStore};
pub use transport::{HttpTransport, UreqTransport};
pub use types::{Todo, TodoDraft, TodoId};
pub use view::{TodoItem, View};
