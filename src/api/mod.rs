//! Artwork catalog API client and types.
//!
//! This module provides the interface for communicating with the public
//! artwork catalog REST API.

mod client;
pub mod error;
pub mod types;

pub use client::CatalogClient;
pub use error::ApiError;
pub use types::{ArtworkPage, ArtworkRecord, Pagination};
