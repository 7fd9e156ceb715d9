//! Typed wrapper for the interests endpoints.

use std::sync::Arc;

use serde_json::Value;

use cfomatch_core::{AddInterestRequest, ApiError, Interest, InterestsApi, TargetType};

use crate::client::ApiClient;
use crate::request::{QueryParams, RequestBody};

/// Path of the interests resource.
const INTERESTS_PATH: &str = "/api/interests";

/// Implements [`InterestsApi`] over the HTTP client.
#[derive(Debug, Clone)]
pub struct InterestsClient {
    api: Arc<ApiClient>,
}

impl InterestsClient {
    /// Creates the wrapper over a shared client.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl InterestsApi for InterestsClient {
    async fn list_interests(&self) -> Result<Vec<Interest>, ApiError> {
        let envelope = self
            .api
            .get::<Vec<Interest>>(INTERESTS_PATH, None, None)
            .await?;
        Ok(envelope.data)
    }

    async fn add_interest(
        &self,
        target_id: &str,
        target_type: TargetType,
    ) -> Result<Interest, ApiError> {
        let body = RequestBody::json(&AddInterestRequest {
            target_user_id: target_id.to_string(),
            target_type,
        })?;
        let envelope = self.api.post::<Interest>(INTERESTS_PATH, body, None).await?;
        Ok(envelope.data)
    }

    async fn remove_interest(&self, target_id: &str) -> Result<(), ApiError> {
        let query = QueryParams::new().set("targetUserId", target_id);
        self.api
            .delete::<Value>(INTERESTS_PATH, Some(&query), None)
            .await?;
        Ok(())
    }
}
