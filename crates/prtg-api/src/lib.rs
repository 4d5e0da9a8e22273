//! Asynchronous client for the PRTG Network Monitor HTTP API.
//!
//! This crate provides typed models and an async client for querying and
//! manipulating PRTG objects (probes, groups, devices) without constructing
//! raw HTTP requests. Credentials are injected once and attached to every
//! outgoing request as query parameters, the way the PRTG API expects them.
//!
//! ```no_run
//! use prtg_api::{Credentials, PrtgClient};
//! use prtg_core::config::PrtgClientConfig;
//! use prtg_core::ObjectId;
//!
//! # async fn example() -> prtg_api::Result<()> {
//! let config = PrtgClientConfig::new("https://prtg.example.com")?;
//! let credentials = Credentials::passhash("prtgadmin", "0123456789");
//! let client = PrtgClient::new(config, credentials)?;
//!
//! let probe = client.get_probe(ObjectId::new(1)).await?;
//! println!("{} ({})", probe.name, probe.objid);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod auth;
pub mod client;
pub mod models;

pub use auth::Credentials;
pub use client::{PrtgClient, PrtgClientBuilder};
pub use models::{Device, Group, Icon, ObjectStatus, Probe};

/// Convenient result alias that reuses the shared PRTG error type.
pub type Result<T> = prtg_core::Result<T>;
