//! Short-lived signer files for one tool invocation.

use std::path::{Path, PathBuf};

use rand::RngCore;
use tempfile::TempDir;
use zeroize::Zeroizing;

use crate::domain::{encrypt_keystore, BenchError, PrivateKey};

/// Keystore plus password file in a private temp directory.
///
/// The directory is created owner-only and removed on drop.
#[derive(Debug)]
pub struct SignerFiles {
    dir: TempDir,
    keystore: PathBuf,
    password: PathBuf,
}

impl SignerFiles {
    /// Seal `credential` under a fresh random password and write both files.
    pub async fn create(credential: &PrivateKey) -> Result<Self, BenchError> {
        let dir = tempfile::Builder::new()
            .prefix("mint-bench-signer-")
            .tempdir()
            .map_err(|e| BenchError::io(std::env::temp_dir(), e))?;

        let mut raw = Zeroizing::new([0u8; 32]);
        rand::thread_rng().fill_bytes(&mut raw[..]);
        let password = Zeroizing::new(hex::encode(&raw[..]));

        let keystore = encrypt_keystore(credential, password.as_bytes())?;
        let json =
            serde_json::to_string(&keystore).map_err(|e| BenchError::Keystore(e.to_string()))?;

        let keystore_path = dir.path().join("keystore.json");
        let password_path = dir.path().join("password");
        tokio::fs::write(&keystore_path, json)
            .await
            .map_err(|e| BenchError::io(&keystore_path, e))?;
        tokio::fs::write(&password_path, password.as_bytes())
            .await
            .map_err(|e| BenchError::io(&password_path, e))?;

        Ok(Self {
            dir,
            keystore: keystore_path,
            password: password_path,
        })
    }

    /// Encrypted keystore file.
    pub fn keystore_path(&self) -> &Path {
        &self.keystore
    }

    /// File holding the keystore password.
    pub fn password_path(&self) -> &Path {
        &self.password
    }

    /// Directory holding both files.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
