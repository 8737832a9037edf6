//! HTTP client for the CRM REST API.
//!
//! - [`CrmApi`]: shared connection (base URL, bearer token, timeout).
//! - [`EntityService`]: CRUD and search for one entity type over [`CrmApi`].
//! - [`EntityApi`]: the trait views depend on, so they can run against
//!   any backend.
//! - [`ClientConfig`]: environment-driven settings.

pub mod api;
pub mod config;
pub mod error;
pub mod query;
pub mod service;

pub use api::CrmApi;
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
pub use query::{Page, QueryParams};
pub use service::{EntityApi, EntityService};
