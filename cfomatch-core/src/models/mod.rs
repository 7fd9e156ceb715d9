//! Domain models.
//!
//! This module contains the marketplace domain types:
//! - [`Interest`] - A favorite relationship from an actor to a target
//! - [`TargetType`] - CFO or company profile
//! - [`InterestStats`] - Counts derived from an interest set
//! - [`AddInterestRequest`] - POST body for creating an interest
//! - [`Session`] - Snapshot of the externally-issued auth session

mod interest;
mod session;

pub use interest::{AddInterestRequest, Interest, InterestStats, TargetType};
pub use session::Session;
