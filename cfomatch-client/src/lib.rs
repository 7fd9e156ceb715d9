// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # cfomatch Client
//!
//! The typed fetch client for the cfomatch backend.
//!
//! This crate is the single choke point for outbound HTTP: it composes
//! URLs, attaches default and credential headers, bounds every request with
//! a timeout, decodes the response envelope, and normalizes every failure
//! mode into [`cfomatch_core::ApiError`]. Callers never branch on envelope
//! shape for error handling.
//!
//! ## Modules
//!
//! - [`client`] - [`ApiClient`], the request pipeline
//! - [`config`] - [`ClientConfig`], construction-time settings
//! - [`request`] - Per-call request values (method, query, body, config)
//! - [`transport`] - The [`HttpTransport`] seam and its reqwest impl
//! - [`session`] - [`SessionBridge`] propagating the external session
//! - [`hooks`] - Observation-only request lifecycle hooks
//! - [`interests`] - Typed wrapper for the interests endpoints
//!
//! ## Example
//!
//! ```ignore
//! use cfomatch_client::{ApiClient, ClientConfig, SessionBridge};
//!
//! let bridge = SessionBridge::new();
//! let client = ApiClient::builder()
//!     .base_url("https://api.cfomatch.example")
//!     .session(bridge.subscribe())
//!     .build()?;
//!
//! let interests = client.get::<Vec<Interest>>("/api/interests", None, None).await?.data;
//! ```

pub mod client;
pub mod config;
pub mod hooks;
pub mod interests;
pub mod request;
pub mod session;
pub mod transport;

// Re-export key types at crate root
pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use hooks::{LoggingHooks, NoopHooks, RequestHooks};
pub use interests::InterestsClient;
pub use request::{Method, MultipartForm, MultipartPart, QueryParams, RequestBody, RequestConfig};
pub use session::{SessionBridge, SessionHandle};
pub use transport::{
    HttpTransport, ReqwestTransport, TransportError, TransportRequest, TransportResponse,
};
