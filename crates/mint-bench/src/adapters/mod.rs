//! # Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! - `process_runner`: spawns the external tool with `tokio::process`
//! - `file_sink`: appends results to files under the results directory
//! - `signer_files`: keystore and password file handed to the tool

mod file_sink;
mod process_runner;
mod signer_files;

pub use file_sink::FileResultSink;
pub use process_runner::ProcessToolRunner;
pub use signer_files::SignerFiles;
