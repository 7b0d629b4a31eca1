//! # Ringlog Testkit
//!
//! Test utilities for ringlog.
//!
//! This crate provides:
//! - Stress testing helpers driving many concurrent writer threads
//! - Chunked-write helpers for exercising accumulation boundaries
//! - Store invariant verification
//!
//! ## Usage
//!
//! ```rust
//! use ringlog_core::LogGateway;
//! use ringlog_testkit::{concurrent_writers, verify_store, StressConfig};
//!
//! let gateway = LogGateway::new(8);
//! let result = concurrent_writers(&gateway, &StressConfig::default());
//! assert_eq!(result.failed_writes, 0);
//! verify_store(&gateway).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod chunking;
pub mod stress;

pub use chunking::{chunk_plan, write_chunked};
pub use stress::{concurrent_writers, verify_store, StressConfig, StressResult};
