//! # Application Layer
//!
//! The benchmark driver orchestrating planning, execution and recording.

mod service;

pub use service::BenchmarkDriver;
