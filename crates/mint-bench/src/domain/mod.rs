//! # Domain Layer
//!
//! Core types for the mint cost benchmark: network profiles, content
//! payloads, tool invocations, credentials, signer keystores and run
//! records.

pub mod content;
pub mod credential;
pub mod errors;
pub mod invocation;
pub mod keystore;
pub mod network;
pub mod record;

pub use content::{
    compact_name, decode_payload, encode_filler_payload, ContentItem, ContentTable,
    DEFAULT_FILLER, TEXT_URI_PREFIX,
};
pub use credential::{PrivateKey, PRIVATE_KEY_ENV};
pub use errors::BenchError;
pub use invocation::{result_path, Invocation, MintCall, SignerEnv, DEFAULT_TOOL, MINT_SIGNATURE};
pub use keystore::{
    decrypt_keystore, encrypt_keystore, EncryptedKeystore, KEYSTORE_ENV, PASSWORD_ENV,
};
pub use network::{default_networks, NetworkProfile, PLACEHOLDER_MARKER};
pub use record::{FailedRun, GasReceipt, MatrixEntry, RunRecord, RunSummary};
