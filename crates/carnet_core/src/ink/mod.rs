//! Minimal ink toolkit layer.
//!
//! # Responsibility
//! - Define stroke geometry, brush and input-batch primitives.
//! - Provide the binary wire formats for input batches and brush-family
//!   resources.
//!
//! # Invariants
//! - Strokes and input batches are immutable once constructed; edits always
//!   produce new values.
//! - Decoding malformed payloads returns a typed error, never panics.

pub mod brush;
pub mod geometry;
pub mod storage;
pub mod strokes;
