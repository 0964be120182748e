//! Core components for signing and sending API requests.
//!
//! This crate provides the foundational types and traits for the shipsign ecosystem.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for environment access and
//!   request transport
//! - **Traits**: Abstract interfaces for credential loading ([`ProvideCredential`]) and
//!   request dispatch ([`Transport`])
//! - **Error**: A single [`Error`] type classified by [`ErrorKind`]
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use shipsign_core::{Context, Result, Transport};
//!
//! #[derive(Debug)]
//! struct EchoTransport;
//!
//! #[async_trait]
//! impl Transport for EchoTransport {
//!     async fn dispatch(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         Ok(http::Response::new(req.into_body()))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new().with_transport(EchoTransport);
//! let req = http::Request::post("https://example.com/api/orders")
//!     .body(Bytes::from_static(b"{}"))?;
//! let resp = ctx.dispatch(req).await?;
//! assert_eq!(resp.body().as_ref(), b"{}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::Context;
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};
mod transport;
pub use transport::{NoopTransport, Transport};

mod api;
pub use api::{ProvideCredential, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
