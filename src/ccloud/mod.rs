//! Confluent Cloud API interaction module
//!
//! This module provides the transport layer for the management API:
//! credentials, the HTTP wrapper and the client handed to every lifecycle
//! handler.
//!
//! # Module Structure
//!
//! - [`auth`] - Cloud API key pair used for Basic Auth
//! - [`client`] - Main client for building URLs and issuing requests
//! - [`http`] - HTTP utilities (timeouts, logging, error formatting)
//!
//! # Example
//!
//! ```ignore
//! use ccloud_provider::ccloud::{auth::Credentials, client::CcloudClient};
//!
//! async fn example() -> ccloud_provider::error::Result<()> {
//!     let client = CcloudClient::new(Credentials::new("KEY", "SECRET"))?;
//!     let response = client.get("/schema_registries", &[("account_id", "env-abc")]).await?;
//!     println!("{}", response.status);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
