//! Core configuration for the storefront.
//!
//! This crate provides:
//! - `StorefrontConfig` - Search service and commerce backend endpoints
//! - `SessionId` - Identifier correlating one user session's log lines

mod config;
mod session;

pub use config::*;
pub use session::*;
