//! Custom brush resources.
//!
//! # Responsibility
//! - Decode and cache the fixed set of shipped brush-family resources.
//!
//! # Invariants
//! - The catalog is populated at most once per instance and read-only
//!   afterward.

pub mod catalog;
