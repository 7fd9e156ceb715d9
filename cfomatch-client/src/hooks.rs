//! Request lifecycle hooks.
//!
//! Hooks are observation points only; they never alter control flow.

use cfomatch_core::ApiError;
use tracing::{debug, warn};
use url::Url;

use crate::request::Method;

/// Observes the request lifecycle.
pub trait RequestHooks: Send + Sync {
    /// Called before dispatch.
    fn on_request_start(&self, _method: Method, _url: &Url) {}

    /// Called after a successful decode.
    fn on_request_end(&self, _method: Method, _url: &Url, _status: u16) {}

    /// Called on any normalized failure.
    fn on_error(&self, _method: Method, _url: &Url, _error: &ApiError) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl RequestHooks for NoopHooks {}

/// Hooks that log via `tracing`. The default on constructed clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHooks;

impl RequestHooks for LoggingHooks {
    fn on_request_start(&self, method: Method, url: &Url) {
        debug!(%method, %url, "Request started");
    }

    fn on_request_end(&self, method: Method, url: &Url, status: u16) {
        debug!(%method, %url, status, "Request completed");
    }

    fn on_error(&self, method: Method, url: &Url, error: &ApiError) {
        warn!(%method, %url, code = %error.code, status = error.status, "Request failed: {}", error.message);
    }
}
