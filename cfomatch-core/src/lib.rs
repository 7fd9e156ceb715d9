// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # cfomatch Core
//!
//! Core types, wire contracts, and traits for the cfomatch client.
//!
//! This crate provides the foundational abstractions used across all other
//! cfomatch crates, including:
//!
//! - The API response envelope codec
//! - The `ApiError` failure taxonomy
//! - Domain models (interests, sessions, target types)
//! - Trait definitions for API access
//!
//! ## Key Types
//!
//! ### Envelope
//! - [`Envelope`] - Tagged union over the two response shapes
//! - [`SuccessEnvelope`] - `{success: true, data, message?, meta?}`
//! - [`ErrorEnvelope`] - `{success: false, error, debug?}`
//! - [`Meta`] / [`Pagination`] - Response metadata
//!
//! ### Errors
//! - [`ApiError`] - Normalized client-side failure
//! - [`ErrorCode`] - Machine-readable failure codes
//!
//! ### Domain Models
//! - [`Interest`] - A favorite relationship from an actor to a target
//! - [`TargetType`] - Whether a target is a CFO or a company profile
//! - [`InterestStats`] - Counts derived from an interest set
//! - [`Session`] - Snapshot of the externally-issued auth session

pub mod envelope;
pub mod error;
pub mod models;
pub mod traits;

// Re-export envelope types
pub use envelope::{
    is_error_response, is_success_response, Envelope, ErrorBody, ErrorEnvelope, Meta, Pagination,
    SuccessEnvelope,
};

// Re-export error types
pub use error::{ApiError, ErrorCode};

// Re-export all model types
pub use models::{AddInterestRequest, Interest, InterestStats, Session, TargetType};

// Re-export traits
pub use traits::InterestsApi;
