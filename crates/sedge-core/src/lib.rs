//! # sedge-core
//!
//! Core crate for the Solid Edge draft converter. Contains configuration
//! schemas and the unified error system shared by the converter library
//! and the command-line front end.
//!
//! This crate has **no** internal dependencies on other sedge crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
