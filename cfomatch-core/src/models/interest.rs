//! Interest (favorite) types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Target Type
// ============================================================================

/// The kind of profile a target is. There are exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// An external finance executive profile.
    Cfo,
    /// A company profile.
    Company,
}

impl TargetType {
    /// Returns the wire form of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cfo => "cfo",
            Self::Company => "company",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Interest
// ============================================================================

/// A favorite relationship from the owning actor to a target profile.
///
/// The server enforces at most one interest per `(likerId, targetId)` pair.
/// `target_name` and `target_avatar` are best-effort display projections and
/// are not authoritative; consumers needing current target details must
/// fetch the target profile separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    /// The actor who favorited the target.
    pub liker_id: String,
    /// The favorited profile's ID.
    pub target_id: String,
    /// Whether the target is a CFO or a company.
    pub target_type: TargetType,
    /// When the interest was created.
    pub created_at: DateTime<Utc>,
    /// Best-effort display name for the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    /// Best-effort avatar URL for the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_avatar: Option<String>,
}

impl Interest {
    /// Creates an interest with the current timestamp and no display fields.
    pub fn new(
        liker_id: impl Into<String>,
        target_id: impl Into<String>,
        target_type: TargetType,
    ) -> Self {
        Self {
            liker_id: liker_id.into(),
            target_id: target_id.into(),
            target_type,
            created_at: Utc::now(),
            target_name: None,
            target_avatar: None,
        }
    }
}

/// POST body for creating an interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddInterestRequest {
    /// The profile to favorite.
    pub target_user_id: String,
    /// Whether the target is a CFO or a company.
    pub target_type: TargetType,
}

// ============================================================================
// Interest Stats
// ============================================================================

/// Counts derived from an interest set by partitioning on target type.
///
/// `total_count == cfo_count + company_count` holds for every input, since
/// there are exactly two target types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestStats {
    /// Total interests.
    pub total_count: usize,
    /// Interests targeting CFO profiles.
    pub cfo_count: usize,
    /// Interests targeting company profiles.
    pub company_count: usize,
}

impl InterestStats {
    /// Computes stats over a set of interests.
    pub fn from_interests(interests: &[Interest]) -> Self {
        let cfo_count = interests
            .iter()
            .filter(|i| i.target_type == TargetType::Cfo)
            .count();
        Self {
            total_count: interests.len(),
            cfo_count,
            company_count: interests.len() - cfo_count,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
