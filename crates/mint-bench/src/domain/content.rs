//! # Content Payloads
//!
//! NFT metadata content: the named content table and the synthetic filler
//! payloads used to measure how mint cost scales with metadata size.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::errors::BenchError;

/// Prefix of every text URI minted by the benchmark.
pub const TEXT_URI_PREFIX: &str = "data:text/markdown,";

/// Character repeated to build synthetic payloads.
pub const DEFAULT_FILLER: char = 'a';

/// A named piece of NFT content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Lookup key in the content table.
    pub key: String,
    /// Token name.
    pub name: String,
    /// Token description.
    pub description: String,
    /// Encoded content URI stored on chain.
    pub text_uri: String,
}

impl ContentItem {
    /// Size of the on-chain payload in bytes.
    pub fn payload_len(&self) -> usize {
        self.text_uri.len()
    }
}

/// Ordered, key-addressable set of content items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTable {
    items: Vec<ContentItem>,
}

impl ContentTable {
    /// Build a table from items. Later duplicates of a key are ignored.
    pub fn new(items: Vec<ContentItem>) -> Self {
        let mut table = Self { items: Vec::new() };
        for item in items {
            if table.get(&item.key).is_none() {
                table.items.push(item);
            }
        }
        table
    }

    /// Look up an item by key.
    pub fn get(&self, key: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Items in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ContentTable {
    fn default() -> Self {
        Self::new(vec![ContentItem {
            key: "fifth".to_string(),
            name: "The Fifth Amendment".to_string(),
            description: "Dec 15, 1791".to_string(),
            text_uri: FIFTH_AMENDMENT_URI.to_string(),
        }])
    }
}

const FIFTH_AMENDMENT_URI: &str = "data:text/markdown,The%20Fifth%20Amendment%0A----------%0A%0ANo%20person%20shall%20be%20held%20to%20answer%20for%20a%20capital%2C%20or%20otherwise%20infamous%20crime%2C%20unless%20on%20a%20presentment%20or%20indictment%20of%20a%20Grand%20Jury%2C%20except%20in%20cases%20arising%20in%20the%20land%20or%20naval%20forces%2C%20or%20in%20the%20Militia%2C%20when%20in%20actual%20service%20in%20time%20of%20War%20or%20public%20danger%3B%20nor%20shall%20any%20person%20be%20subject%20for%20the%20same%20offence%20to%20be%20twice%20put%20in%20jeopardy%20of%20life%20or%20limb%3B%20nor%20shall%20be%20compelled%20in%20any%20criminal%20case%20to%20be%20a%20witness%20against%20himself%2C%20nor%20be%20deprived%20of%20life%2C%20liberty%2C%20or%20property%2C%20without%20due%20process%20of%20law%3B%20nor%20shall%20private%20property%20be%20taken%20for%20public%20use%2C%20without%20just%20compensation+";

/// Build the text URI for `length` repetitions of `filler`, base64 encoded.
pub fn encode_filler_payload(length: usize, filler: char) -> String {
    let text = filler.to_string().repeat(length);
    format!("{}{}", TEXT_URI_PREFIX, STANDARD.encode(text.as_bytes()))
}

/// Decode a text URI produced by [`encode_filler_payload`].
pub fn decode_payload(uri: &str) -> Result<String, BenchError> {
    let encoded = uri
        .strip_prefix(TEXT_URI_PREFIX)
        .ok_or_else(|| BenchError::InvalidPayload(format!("missing {} prefix", TEXT_URI_PREFIX)))?;
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| BenchError::InvalidPayload(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| BenchError::InvalidPayload(e.to_string()))
}

/// Token name with spaces removed, as used in result file names.
pub fn compact_name(name: &str) -> String {
    name.replace(' ', "")
}
