//! # Network Profiles
//!
//! Per-chain endpoint and invocation flags.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Marker left in endpoint URLs that still need a real API key.
pub const PLACEHOLDER_MARKER: &str = "YOUR_";

const ENDPOINT_SCHEMES: [&str; 4] = ["http://", "https://", "ws://", "wss://"];

/// Static per-chain configuration used to parameterize an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Network identifier, also the result subdirectory name.
    pub name: String,
    /// JSON-RPC endpoint passed as `--rpc-url`.
    pub rpc_url: String,
    /// Extra flags appended verbatim, e.g. `--legacy`.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl NetworkProfile {
    /// Create a profile without extra flags.
    pub fn new(name: impl Into<String>, rpc_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rpc_url: rpc_url.into(),
            extra_args: Vec::new(),
        }
    }

    /// Set the extra flags.
    #[must_use]
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Environment variable that overrides this network's endpoint.
    pub fn rpc_env_var(&self) -> String {
        format!(
            "MINT_BENCH_RPC_{}",
            self.name.to_uppercase().replace('-', "_")
        )
    }

    /// Whether the endpoint still carries a placeholder API key.
    pub fn is_placeholder(&self) -> bool {
        self.rpc_url.contains(PLACEHOLDER_MARKER)
    }

    /// Check that the endpoint can be handed to the tool.
    pub fn check_endpoint(&self) -> Result<(), ConfigError> {
        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::BadEndpoint {
                network: self.name.clone(),
                reason: "endpoint is empty".to_string(),
            });
        }
        if !ENDPOINT_SCHEMES
            .iter()
            .any(|scheme| self.rpc_url.starts_with(scheme))
        {
            return Err(ConfigError::BadEndpoint {
                network: self.name.clone(),
                reason: "expected an http(s):// or ws(s):// URL".to_string(),
            });
        }
        if self.is_placeholder() {
            return Err(ConfigError::PlaceholderEndpoint {
                network: self.name.clone(),
                env_var: self.rpc_env_var(),
            });
        }
        Ok(())
    }
}

/// Built-in network table: polygon, arbitrum, optimism, in that order.
pub fn default_networks() -> Vec<NetworkProfile> {
    vec![
        NetworkProfile::new(
            "polygon",
            "https://polygon-mumbai.g.alchemy.com/v2/YOUR_POLYGON_ALCHEMY_API_KEY",
        ),
        NetworkProfile::new(
            "arbitrum",
            "https://arb-rinkeby.g.alchemy.com/v2/YOUR_ARBITRUM_ALCHEMY_API_KEY",
        )
        .with_extra_args(["--legacy"]),
        NetworkProfile::new(
            "optimism",
            "https://opt-kovan.g.alchemy.com/v2/YOUR_OPTIMISM_ALCHEMY_API_KEY",
        )
        .with_extra_args(["--legacy"]),
    ]
}
