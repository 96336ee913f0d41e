//! # Algorithms
//!
//! - `matrix`: expands the configuration into ordered matrix entries
//! - `receipt`: extracts gas figures from the tool's receipt output

pub mod matrix;
pub mod receipt;

pub use matrix::{build_matrix, content_entry};
pub use receipt::parse_gas_receipt;
