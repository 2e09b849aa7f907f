//! Generic REST Client Library
//!
//! A resource-typed REST client: bind a [`RestClient`] to a serde type once,
//! then issue GET/POST/PUT/PATCH/DELETE calls against URLs assembled from a
//! base URL, a path, an optional resource id, a suffix and query parameters.
//!
//! # Features
//!
//! - **Composable URLs**: per-call overrides for every URL part
//! - **Header Layering**: per-call headers win over instance defaults
//! - **Typed and Untyped Bodies**: serialize a resource or a [`Payload`]
//! - **Pluggable Collaborators**: transport, codec and diagnostic sink are injected
//! - **Diagnostics**: opt-in request/response dumps, `tracing` spans always
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rest_resource_client::{Payload, RequestBody, RequestOptions, RestClient};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Todo {
//!     id: u64,
//!     title: String,
//!     completed: bool,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let todos = RestClient::<Todo>::builder()
//!         .base_url("https://jsonplaceholder.typicode.com")
//!         .base_path("todos")
//!         .build()?;
//!
//!     let todo = todos.get("1", RequestOptions::new()).await?;
//!     println!("{}", todo.title);
//!
//!     let patched = todos
//!         .patch(
//!             RequestBody::Payload(Payload::object().with("completed", true)),
//!             RequestOptions::new().resource_id("1").debug(true),
//!         )
//!         .await?;
//!     println!("{:?}", patched);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod codec;
pub mod config;
pub mod errors;
pub mod observability;
pub mod request;
pub mod transport;
pub mod types;

/// Mock implementations for testing.
pub mod mocks;

// Re-exports for convenience
pub use client::{RestClient, RestClientBuilder};
pub use codec::{Codec, CodecError, JsonCodec};
pub use config::RestConfig;
pub use errors::{RestError, RestResult};
pub use observability::{ConsoleLogger, LogConfig, LogLevel, Logger, NoopLogger, TracingLogger};
pub use request::RequestOptions;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use types::{Payload, RequestBody};
