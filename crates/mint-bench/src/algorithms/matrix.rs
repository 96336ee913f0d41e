//! # Run Matrix
//!
//! Cartesian product of networks and payload lengths, network-major, in
//! configured order. The content table plays no part here.

use crate::config::BenchConfig;
use crate::domain::{
    encode_filler_payload, result_path, ContentItem, Invocation, MatrixEntry, MintCall,
    NetworkProfile,
};

/// Expand the configuration into one entry per (network, length).
pub fn build_matrix(config: &BenchConfig) -> Vec<MatrixEntry> {
    let mut entries = Vec::with_capacity(config.networks.len() * config.lengths.len());

    for network in &config.networks {
        for (i, &length) in config.lengths.iter().enumerate() {
            let call = config
                .mint
                .call_with_payload(encode_filler_payload(length, config.filler));
            entries.push(MatrixEntry {
                index: entries.len(),
                test_number: i + 1,
                network: network.clone(),
                title: call.name.clone(),
                length,
                invocation: invocation_for(config, &call, network),
                result_path: result_path(&config.results_dir, &network.name, &call.name, length),
            });
        }
    }

    entries
}

/// Single entry minting a content table item on one network.
///
/// The length component of the result path is the payload size in bytes.
pub fn content_entry(
    config: &BenchConfig,
    item: &ContentItem,
    network: &NetworkProfile,
) -> MatrixEntry {
    let call = config.mint.call_for_content(item);
    let length = item.payload_len();
    MatrixEntry {
        index: 0,
        test_number: 1,
        network: network.clone(),
        title: call.name.clone(),
        length,
        invocation: invocation_for(config, &call, network),
        result_path: result_path(&config.results_dir, &network.name, &call.name, length),
    }
}

fn invocation_for(config: &BenchConfig, call: &MintCall, network: &NetworkProfile) -> Invocation {
    Invocation::cast_send(
        &config.tool,
        &config.signature,
        &config.signer,
        call,
        network,
    )
}
