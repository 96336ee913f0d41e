//! Cross-crate integration flows.

pub mod driver_flows;
pub mod process_flows;
