//! HTTP surface of the editor.
//!
//! `routes` maps requests onto [`PageLifecycle`](crate::application::PageLifecycle)
//! operations and errors onto status codes; `server` owns the listener and
//! its graceful shutdown.

pub mod routes;
pub mod server;

pub use routes::router;
pub use server::{spawn_api_server, ApiServer};
