//! PixGuard Core
//!
//! Shared types and error handling for the PixGuard comment moderation
//! service.
//!
//! This crate provides:
//! - The canonical [`LabelSet`] and the fixed-shape [`ClassificationResult`]
//! - Error types and result handling shared by the classifier and server

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassificationResult, LabelIndicator, LabelSet};
