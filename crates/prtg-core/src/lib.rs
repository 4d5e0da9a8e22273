//! # prtg-core
//!
//! Core types and utilities for talking to a PRTG Network Monitor instance.
//!
//! This crate provides the foundational pieces shared by the PRTG client:
//! error handling, typed object identifiers, query-string assembly, and
//! client configuration.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`ids`] - Strongly-typed object identifiers
//! - [`config`] - Configuration for PRTG clients
//! - [`query`] - Query parameter builder with PRTG filter helpers

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod ids;
pub mod query;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ids::ObjectId;
