//! # Benchmark Configuration
//!
//! Layers, lowest precedence first: built-in tables, TOML file,
//! environment variables, then whatever the caller sets explicitly.
//!
//! ## Config File Format
//!
//! ```toml
//! tool = "cast"
//! results_dir = "results"
//! lengths = [0, 200, 500]
//! filler = "a"
//! timeout_secs = 120
//!
//! [mint]
//! contract_address = "0x277be76e409a737e013b16ffc5feaa369a7c078d"
//! name = "Standard Name"
//!
//! [signer]
//! keystore_env = "ETH_KEYSTORE"
//! password_env = "ETH_PASSWORD"
//!
//! [[networks]]
//! name = "polygon"
//! rpc_url = "https://polygon-mumbai.g.alchemy.com/v2/<key>"
//!
//! [[networks]]
//! name = "arbitrum"
//! rpc_url = "https://arb-rinkeby.g.alchemy.com/v2/<key>"
//! extra_args = ["--legacy"]
//!
//! [[content]]
//! key = "fifth"
//! name = "The Fifth Amendment"
//! description = "Dec 15, 1791"
//! text_uri = "data:text/markdown,..."
//! ```

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    compact_name, default_networks, ContentItem, ContentTable, MintCall, NetworkProfile,
    SignerEnv, DEFAULT_FILLER, DEFAULT_TOOL, MINT_SIGNATURE,
};

/// Environment variable overriding [`BenchConfig::results_dir`].
pub const RESULTS_DIR_ENV: &str = "MINT_BENCH_RESULTS_DIR";

/// Environment variable overriding [`BenchConfig::tool`].
pub const TOOL_ENV: &str = "MINT_BENCH_TOOL";

/// Errors that can occur during config loading and validation.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A field holds a value the driver cannot use.
    #[error("Invalid {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The endpoint still carries a placeholder API key.
    #[error("Network {network} uses a placeholder endpoint; set {env_var} or edit the config")]
    PlaceholderEndpoint {
        /// Network name.
        network: String,
        /// Variable that would override the endpoint.
        env_var: String,
    },

    /// The endpoint is malformed.
    #[error("Network {network} has an unusable endpoint: {reason}")]
    BadEndpoint {
        /// Network name.
        network: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A network filter named a network that is not configured.
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

/// Fixed parameters shared by every mint in the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintTemplate {
    /// Target NFT contract.
    pub contract_address: String,
    /// Token name for synthetic payloads.
    pub name: String,
    /// Token description for synthetic payloads.
    pub description: String,
    /// Edition size.
    pub amount: u64,
    /// Royalty numerator.
    pub royalty_numerator: u64,
    /// Royalty receiver.
    pub royalty_recipient: String,
    /// Trailing `bytes` argument.
    pub extra_data: String,
}

impl Default for MintTemplate {
    fn default() -> Self {
        Self {
            contract_address: "0x277be76e409a737e013b16ffc5feaa369a7c078d".to_string(),
            name: "Standard Name".to_string(),
            description: "My somewhat standard-length description".to_string(),
            amount: 10,
            royalty_numerator: 100,
            royalty_recipient: "0x0000000000000000000000000000000000000000".to_string(),
            extra_data: String::new(),
        }
    }
}

impl MintTemplate {
    /// Mint call for a synthetic payload, using the template's name.
    pub fn call_with_payload(&self, text_uri: String) -> MintCall {
        MintCall {
            contract_address: self.contract_address.clone(),
            text_uri,
            name: self.name.clone(),
            description: self.description.clone(),
            amount: self.amount,
            royalty_numerator: self.royalty_numerator,
            royalty_recipient: self.royalty_recipient.clone(),
            extra_data: self.extra_data.clone(),
        }
    }

    /// Mint call for a content table item, using the item's name and text.
    pub fn call_for_content(&self, item: &ContentItem) -> MintCall {
        MintCall {
            text_uri: item.text_uri.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            ..self.call_with_payload(String::new())
        }
    }
}

/// Complete benchmark configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// External transaction tool.
    pub tool: String,
    /// ABI signature passed to the tool.
    pub signature: String,
    /// Child environment variables pointing the tool at its signer.
    pub signer: SignerEnv,
    /// Root directory for result files.
    pub results_dir: PathBuf,
    /// Payload lengths, in run order.
    pub lengths: Vec<usize>,
    /// Character repeated to build payloads.
    pub filler: char,
    /// Per-invocation time limit. `None` waits forever.
    pub timeout_secs: Option<u64>,
    /// Record failed invocations and continue instead of aborting.
    pub keep_going: bool,
    /// Shared mint parameters.
    pub mint: MintTemplate,
    /// Networks, in run order.
    pub networks: Vec<NetworkProfile>,
    /// Named content items.
    pub content: ContentTable,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            signature: MINT_SIGNATURE.to_string(),
            signer: SignerEnv::default(),
            results_dir: PathBuf::from("results"),
            lengths: vec![0, 200, 500],
            filler: DEFAULT_FILLER,
            timeout_secs: None,
            keep_going: false,
            mint: MintTemplate::default(),
            networks: default_networks(),
            content: ContentTable::default(),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing keys take defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| env::var(key).ok());
    }

    /// Apply environment overrides from a custom variable source.
    ///
    /// - `MINT_BENCH_RPC_<NETWORK>`: endpoint of one network
    /// - `MINT_BENCH_RESULTS_DIR`: result root
    /// - `MINT_BENCH_TOOL`: tool executable
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for network in &mut self.networks {
            if let Some(url) = lookup(&network.rpc_env_var()) {
                network.rpc_url = url;
            }
        }
        if let Some(dir) = lookup(RESULTS_DIR_ENV) {
            self.results_dir = PathBuf::from(dir);
        }
        if let Some(tool) = lookup(TOOL_ENV) {
            self.tool = tool;
        }
    }

    /// Keep only the named networks, preserving configured order.
    pub fn select_networks(&mut self, names: &[String]) -> Result<(), ConfigError> {
        if names.is_empty() {
            return Ok(());
        }
        for name in names {
            if self.network(name).is_none() {
                return Err(ConfigError::UnknownNetwork(name.clone()));
            }
        }
        self.networks.retain(|n| names.contains(&n.name));
        Ok(())
    }

    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.iter().find(|n| n.name == name)
    }

    /// Per-invocation timeout as a [`Duration`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Structural validation. Placeholder endpoints pass; see
    /// [`BenchConfig::validate_for_run`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.trim().is_empty() {
            return Err(invalid("tool", "must not be empty"));
        }
        if self.signer.keystore_env.trim().is_empty() {
            return Err(invalid("signer.keystore_env", "must not be empty"));
        }
        if self.signer.password_env.trim().is_empty() {
            return Err(invalid("signer.password_env", "must not be empty"));
        }
        if self.signer.keystore_env == self.signer.password_env {
            return Err(invalid("signer", "keystore and password variables must differ"));
        }
        if self.networks.is_empty() {
            return Err(invalid("networks", "at least one network is required"));
        }
        if self.lengths.is_empty() {
            return Err(invalid("lengths", "at least one length is required"));
        }
        if !self.filler.is_ascii() || self.filler.is_ascii_control() {
            return Err(invalid("filler", "must be a printable ASCII character"));
        }
        if self.timeout_secs == Some(0) {
            return Err(invalid("timeout_secs", "must be positive"));
        }

        let mut seen = HashSet::new();
        for network in &self.networks {
            check_dir_name("networks.name", &network.name)?;
            if !seen.insert(network.name.as_str()) {
                return Err(invalid(
                    "networks.name",
                    &format!("duplicate network {:?}", network.name),
                ));
            }
        }

        check_file_stem("mint.name", &self.mint.name)?;
        for item in self.content.iter() {
            check_file_stem("content.name", &item.name)?;
        }

        check_address("mint.contract_address", &self.mint.contract_address)?;
        check_address("mint.royalty_recipient", &self.mint.royalty_recipient)?;
        Ok(())
    }

    /// Validation before any transaction is sent: structure plus usable
    /// endpoints for every selected network.
    pub fn validate_for_run(&self) -> Result<(), ConfigError> {
        self.validate()?;
        for network in &self.networks {
            network.check_endpoint()?;
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Name used as a directory under the results root.
fn check_dir_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if has_path_syntax(name) || name.starts_with('.') {
        return Err(invalid(
            field,
            &format!("{:?} is not a valid directory name", name),
        ));
    }
    Ok(())
}

/// Name embedded in a result file name (`mint-<name>-<length>.txt`).
fn check_file_stem(field: &str, name: &str) -> Result<(), ConfigError> {
    if has_path_syntax(&compact_name(name)) {
        return Err(invalid(
            field,
            &format!("{:?} cannot be part of a file name", name),
        ));
    }
    Ok(())
}

fn has_path_syntax(name: &str) -> bool {
    name.contains(['/', '\\', '\0'])
}

/// `0x` followed by 40 hex digits.
fn check_address(field: &str, value: &str) -> Result<(), ConfigError> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| invalid(field, "missing 0x prefix"))?;
    if digits.len() != 40 || hex::decode(digits).is_err() {
        return Err(invalid(field, "expected 20 hex-encoded bytes"));
    }
    Ok(())
}
