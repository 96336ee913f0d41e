//! # Mint-Bench Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── driver_flows.rs   # Driver + real file sink, mock tool
//! │   └── process_flows.rs  # Driver + real process runner, stub tool script
//! └── benches/
//!     └── driver_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mb-tests
//!
//! # By category
//! cargo test -p mb-tests integration::driver_flows
//! cargo test -p mb-tests integration::process_flows
//!
//! # Benchmarks
//! cargo bench -p mb-tests
//! ```

#![allow(dead_code)]

pub mod integration;
