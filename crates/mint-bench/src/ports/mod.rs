//! # Ports
//!
//! - `inbound`: the API the driver offers
//! - `outbound`: what the driver needs from the outside world

pub mod inbound;
pub mod outbound;

pub use inbound::BenchmarkApi;
pub use outbound::{MemorySink, MockToolRunner, ResultSink, ToolOutput, ToolRunner};
