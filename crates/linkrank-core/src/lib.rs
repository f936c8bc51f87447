#![forbid(unsafe_code)]
//! linkrank-core library.
//!
//! Everything the scoring engine consumes but does not compute: the GML
//! loader that turns a citation file into nodes and edges, the error
//! taxonomy shared by every crate, and layered configuration.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums ([`error::LoadError`],
//!   [`error::ConfigError`]); binaries wrap them in `anyhow`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod gml;

pub use config::{Algorithm, LinkrankConfig};
pub use error::{ConfigError, ErrorCode, LoadError, LoadErrorKind};
pub use gml::{GmlEdge, GmlGraph, GmlNode};
