//! # Tool Invocations
//!
//! Builds the argument vector for `cast send` and renders it for logs.
//! The signing key is not part of the argument vector: the child finds an
//! encrypted keystore and its password file through the variables named
//! by [`Invocation::signer`].

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::content::compact_name;
use super::keystore::{KEYSTORE_ENV, PASSWORD_ENV};
use super::network::NetworkProfile;

/// Default external transaction tool.
pub const DEFAULT_TOOL: &str = "cast";

/// ABI signature of the mint entry point.
pub const MINT_SIGNATURE: &str = "mint(string memory, string memory, string memory, uint256, uint96, address, bytes memory)(uint256)";

/// Child environment variables that point the tool at its signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerEnv {
    /// Receives the keystore file path.
    pub keystore_env: String,
    /// Receives the password file path.
    pub password_env: String,
}

impl Default for SignerEnv {
    fn default() -> Self {
        Self {
            keystore_env: KEYSTORE_ENV.to_string(),
            password_env: PASSWORD_ENV.to_string(),
        }
    }
}

/// Arguments of one `mint` contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintCall {
    /// Target NFT contract.
    pub contract_address: String,
    /// Content URI.
    pub text_uri: String,
    /// Token name.
    pub name: String,
    /// Token description.
    pub description: String,
    /// Edition size.
    pub amount: u64,
    /// Royalty numerator (basis points).
    pub royalty_numerator: u64,
    /// Royalty receiver address.
    pub royalty_recipient: String,
    /// Trailing `bytes` argument.
    pub extra_data: String,
}

/// Program plus argument vector dispatched to the external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Executable name or path.
    pub program: String,
    /// Arguments, passed without shell interpretation.
    pub args: Vec<String>,
    /// Where the child looks for its signer.
    pub signer: SignerEnv,
}

impl Invocation {
    /// Build `<tool> send <contract> <signature> <call args...> [flags...] --rpc-url <url>`.
    pub fn cast_send(
        program: &str,
        signature: &str,
        signer: &SignerEnv,
        call: &MintCall,
        network: &NetworkProfile,
    ) -> Self {
        let mut args = vec![
            "send".to_string(),
            call.contract_address.clone(),
            signature.to_string(),
            call.text_uri.clone(),
            call.name.clone(),
            call.description.clone(),
            call.amount.to_string(),
            call.royalty_numerator.to_string(),
            call.royalty_recipient.clone(),
            call.extra_data.clone(),
        ];
        args.extend(network.extra_args.iter().cloned());
        args.push("--rpc-url".to_string());
        args.push(network.rpc_url.clone());

        Self {
            program: program.to_string(),
            args,
            signer: signer.clone(),
        }
    }

    /// Whether `arg` is one of the arguments, compared verbatim.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Shell-quoted command line. Contains no secret.
    pub fn render(&self) -> String {
        let mut line = format!(
            "{}=<keystore> {}=<password-file> {}",
            self.signer.keystore_env,
            self.signer.password_env,
            quote_arg(&self.program)
        );
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote_arg(arg));
        }
        line
    }
}

/// Double-quote an argument if the shell would split or expand it.
fn quote_arg(arg: &str) -> Cow<'_, str> {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@%+".contains(c));
    if plain {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Result file for one (network, name, length) combination:
/// `<root>/<network>/mint-<name-without-spaces>-<length>.txt`.
pub fn result_path(root: &Path, network: &str, name: &str, length: usize) -> PathBuf {
    root.join(network)
        .join(format!("mint-{}-{}.txt", compact_name(name), length))
}
