//! Trait definitions for cfomatch.
//!
//! This module defines the seam between the interest store and the backend.

use crate::error::ApiError;
use crate::models::{Interest, TargetType};

/// Access to the interests endpoints.
///
/// The interest store is generic over this trait, so tests can run it
/// against an in-memory implementation and applications against the HTTP
/// client. Implementors are responsible for:
/// - Attaching the actor's credentials
/// - Normalizing every failure into [`ApiError`]
pub trait InterestsApi: Send + Sync {
    /// Fetches the full interest list for the current actor.
    fn list_interests(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Interest>, ApiError>> + Send;

    /// Creates an interest for the given target.
    ///
    /// A duplicate insert is a recoverable 409 `CONFLICT`, not a crash.
    fn add_interest(
        &self,
        target_id: &str,
        target_type: TargetType,
    ) -> impl std::future::Future<Output = Result<Interest, ApiError>> + Send;

    /// Removes the interest for the given target.
    fn remove_interest(
        &self,
        target_id: &str,
    ) -> impl std::future::Future<Output = Result<(), ApiError>> + Send;
}
