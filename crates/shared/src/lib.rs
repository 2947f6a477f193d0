//! Shared utilities for the Reptile Manager backend.
//!
//! Cross-cutting helpers used by the domain, persistence, and API crates:
//! - Cursor-based pagination
//! - Custom request validators
//! - API key hashing and generation

pub mod crypto;
pub mod pagination;
pub mod validation;
