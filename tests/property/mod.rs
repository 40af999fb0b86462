//! Property-based tests for resolution and matching guarantees

mod resolution;
