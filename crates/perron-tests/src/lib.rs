//! End-to-end certification test suite for Perron.
//!
//! This crate contains integration tests that drive the public API the way a
//! caller would: building matrices, solving, refining entries, and checking
//! that every failure lands in the right error kind.

pub mod helpers;
