//! Common test utilities for proxy testing.
//!
//! - [`harness`] - Test server wired to a mock backend
//! - [`mock_upstream`] - Recording backend client

#![allow(dead_code)]

pub mod harness;
pub mod mock_upstream;
