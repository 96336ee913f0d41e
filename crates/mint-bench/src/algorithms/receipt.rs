//! # Receipt Parsing
//!
//! `cast send` prints the mined receipt as `key   value` lines. Only the
//! fields needed for cost accounting are extracted; anything missing or
//! unparsable stays `None`.

use crate::domain::GasReceipt;

/// Extract gas figures from the tool's stdout.
pub fn parse_gas_receipt(output: &str) -> GasReceipt {
    let mut receipt = GasReceipt::default();

    for line in output.lines() {
        let mut parts = line.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };

        match key {
            "gasUsed" if receipt.gas_used.is_none() => {
                receipt.gas_used = parse_quantity(value).and_then(|v| u64::try_from(v).ok());
            }
            "effectiveGasPrice" if receipt.effective_gas_price.is_none() => {
                receipt.effective_gas_price = parse_quantity(value);
            }
            "status" if receipt.status_ok.is_none() => {
                receipt.status_ok = match value {
                    "1" | "0x1" => Some(true),
                    "0" | "0x0" => Some(false),
                    _ => None,
                };
            }
            "transactionHash" if receipt.transaction_hash.is_none() => {
                if value.starts_with("0x") {
                    receipt.transaction_hash = Some(value.to_string());
                }
            }
            _ => {}
        }
    }

    receipt
}

/// Decimal or `0x`-prefixed hexadecimal quantity.
fn parse_quantity(value: &str) -> Option<u128> {
    match value.strip_prefix("0x") {
        Some(hex_digits) => u128::from_str_radix(hex_digits, 16).ok(),
        None => value.parse().ok(),
    }
}
