//! # Mint-Bench
//!
//! Gas cost benchmark for NFT minting across EVM networks.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Measure how mint cost scales with metadata size by minting the same
//! token with synthetic payloads of increasing length on each configured
//! network. The chain interaction is delegated to an external transaction
//! tool (`cast send`); this crate plans the runs, executes the tool,
//! checks its exit status and records receipts.
//!
//! ## Run Matrix
//!
//! ```text
//!              length:   0        200       500
//! polygon             #1        #2        #3
//! arbitrum  --legacy  #1        #2        #3
//! optimism  --legacy  #1        #2        #3
//!                      │
//!                      ↓
//!   results/<network>/mint-<name-without-spaces>-<length>.txt
//! ```
//!
//! ## Credential Handling
//!
//! The signing key is read from `MINT_BENCH_PRIVATE_KEY`. For each
//! invocation it is sealed into a throwaway Web3 v3 keystore under a random
//! password, and the tool is pointed at both files through `ETH_KEYSTORE`
//! and `ETH_PASSWORD`. The key is never part of the argument vector, the
//! child environment, rendered command lines, logs or result files.
//!
//! ## Module Structure
//!
//! ```text
//! mint-bench/
//! ├── domain/          # Networks, content, invocations, keystores, records, errors
//! ├── algorithms/      # Matrix expansion, receipt parsing
//! ├── ports/           # API trait (inbound) + tool/sink traits (outbound)
//! ├── application/     # BenchmarkDriver orchestrating everything
//! ├── adapters/        # tokio::process runner, signer files, filesystem sink
//! └── config.rs        # BenchConfig (defaults, TOML, env)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{FileResultSink, ProcessToolRunner, SignerFiles};
pub use algorithms::{build_matrix, content_entry, parse_gas_receipt};
pub use application::BenchmarkDriver;
pub use config::{BenchConfig, ConfigError, MintTemplate};
pub use domain::{
    compact_name, decode_payload, decrypt_keystore, encode_filler_payload, encrypt_keystore,
    result_path, BenchError, ContentItem, ContentTable, EncryptedKeystore, FailedRun, GasReceipt,
    Invocation, MatrixEntry, MintCall, NetworkProfile, PrivateKey, RunRecord, RunSummary,
    SignerEnv, KEYSTORE_ENV, PASSWORD_ENV, PRIVATE_KEY_ENV,
};
pub use ports::{BenchmarkApi, MemorySink, MockToolRunner, ResultSink, ToolOutput, ToolRunner};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
