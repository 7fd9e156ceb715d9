// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # cfomatch Store
//!
//! State management for the cfomatch client.
//!
//! The centerpiece is [`InterestStore`], an in-memory set of the targets
//! the current actor has favorited, kept consistent with the server
//! through an [`cfomatch_core::InterestsApi`] implementation. The store is
//! the final error-absorption boundary: API failures become a stored
//! message and boolean returns, never exceptions crossing into the UI.
//!
//! [`FallbackCache`] persists the previously-favorited target IDs so a
//! failed list fetch can still show a best-effort favorites view.

pub mod error;
pub mod fallback;
pub mod interest_store;

pub use error::StoreError;
pub use fallback::{default_fallback_path, FallbackCache};
pub use interest_store::{InterestStore, SyncState};
