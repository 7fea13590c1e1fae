// src/utils/mod.rs

//! Shared utilities.

pub mod email;
pub mod url;

pub use url::resolve;
