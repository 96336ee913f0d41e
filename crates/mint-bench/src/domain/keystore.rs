//! # Signer Keystore
//!
//! Web3 Secret Storage (version 3) encoding of the signing key. `cast`
//! accepts a signer as `--keystore <file>` plus `--password-file <file>`,
//! bound to `ETH_KEYSTORE` and `ETH_PASSWORD` in its environment. The
//! driver seals the key into such a file for the lifetime of one
//! invocation.
//!
//! ## Format
//!
//! ```text
//! dk          = PBKDF2-HMAC-SHA256(password, salt, c, 32)
//! ciphertext  = AES-128-CTR(key = dk[0..16], iv, secret)
//! mac         = Keccak256(dk[16..32] ++ ciphertext)
//! ```

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Keccak256};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::credential::PrivateKey;
use super::errors::BenchError;

/// Environment variable `cast` reads the keystore path from.
pub const KEYSTORE_ENV: &str = "ETH_KEYSTORE";

/// Environment variable `cast` reads the keystore password file path from.
pub const PASSWORD_ENV: &str = "ETH_PASSWORD";

/// PBKDF2 rounds. The password is 32 random bytes, so the KDF does not
/// need to be slow.
pub const KDF_ROUNDS: u32 = 8192;

const KEYSTORE_VERSION: u8 = 3;
const CIPHER: &str = "aes-128-ctr";
const KDF: &str = "pbkdf2";
const PRF: &str = "hmac-sha256";
const DKLEN: usize = 32;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// Encrypted keystore document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedKeystore {
    /// Cipher and KDF parameters.
    pub crypto: KeystoreCrypto,
    /// Random UUID.
    pub id: String,
    /// Always 3.
    pub version: u8,
}

/// `crypto` section of a keystore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    /// Symmetric cipher name.
    pub cipher: String,
    /// Cipher parameters.
    pub cipherparams: CipherParams,
    /// Hex-encoded encrypted key.
    pub ciphertext: String,
    /// Key derivation function name.
    pub kdf: String,
    /// KDF parameters.
    pub kdfparams: Pbkdf2Params,
    /// Hex-encoded Keccak-256 MAC.
    pub mac: String,
}

/// AES-CTR parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    /// Hex-encoded 16-byte IV.
    pub iv: String,
}

/// PBKDF2 parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pbkdf2Params {
    /// Iteration count.
    pub c: u32,
    /// Derived key length.
    pub dklen: u8,
    /// Pseudo-random function.
    pub prf: String,
    /// Hex-encoded salt.
    pub salt: String,
}

/// Seal `key` under `password` with a fresh salt, IV and id.
pub fn encrypt_keystore(
    key: &PrivateKey,
    password: &[u8],
) -> Result<EncryptedKeystore, BenchError> {
    let mut rng = rand::thread_rng();
    let mut salt = [0u8; 32];
    rng.fill_bytes(&mut salt);
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut iv);

    let dk = derive_key(password, &salt, KDF_ROUNDS);
    let mut ciphertext = key.secret_bytes().to_vec();
    apply_keystream(&dk[..], &iv, &mut ciphertext)?;

    Ok(EncryptedKeystore {
        crypto: KeystoreCrypto {
            cipher: CIPHER.to_string(),
            cipherparams: CipherParams {
                iv: hex::encode(iv),
            },
            mac: hex::encode(keystore_mac(&dk[..], &ciphertext)),
            ciphertext: hex::encode(&ciphertext),
            kdf: KDF.to_string(),
            kdfparams: Pbkdf2Params {
                c: KDF_ROUNDS,
                dklen: DKLEN as u8,
                prf: PRF.to_string(),
                salt: hex::encode(salt),
            },
        },
        id: Uuid::new_v4().to_string(),
        version: KEYSTORE_VERSION,
    })
}

/// Open a keystore produced by [`encrypt_keystore`] (or any v3 PBKDF2 /
/// AES-128-CTR keystore).
pub fn decrypt_keystore(
    keystore: &EncryptedKeystore,
    password: &[u8],
) -> Result<PrivateKey, BenchError> {
    let crypto = &keystore.crypto;
    let params = &crypto.kdfparams;
    if keystore.version != KEYSTORE_VERSION
        || crypto.cipher != CIPHER
        || crypto.kdf != KDF
        || params.prf != PRF
        || usize::from(params.dklen) != DKLEN
    {
        return Err(keystore_error("unsupported keystore parameters"));
    }

    let salt = decode_field("salt", &params.salt)?;
    let iv = decode_field("iv", &crypto.cipherparams.iv)?;
    let mac = decode_field("mac", &crypto.mac)?;
    let mut secret = Zeroizing::new(decode_field("ciphertext", &crypto.ciphertext)?);

    let dk = derive_key(password, &salt, params.c);
    if keystore_mac(&dk[..], &secret[..])[..] != mac[..] {
        return Err(keystore_error("MAC mismatch"));
    }
    apply_keystream(&dk[..], &iv, &mut secret[..])?;

    let bytes: [u8; 32] = secret
        .as_slice()
        .try_into()
        .map_err(|_| keystore_error("key is not 32 bytes"))?;
    Ok(PrivateKey::from_bytes(bytes))
}

fn derive_key(password: &[u8], salt: &[u8], rounds: u32) -> Zeroizing<[u8; DKLEN]> {
    let mut dk = Zeroizing::new([0u8; DKLEN]);
    pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut dk[..]);
    dk
}

fn apply_keystream(dk: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), BenchError> {
    let mut cipher =
        Aes128Ctr::new_from_slices(&dk[..16], iv).map_err(|e| keystore_error(&e.to_string()))?;
    cipher.apply_keystream(buf);
    Ok(())
}

fn keystore_mac(dk: &[u8], ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(&dk[16..DKLEN]);
    hasher.update(ciphertext);
    let mut mac = [0u8; 32];
    mac.copy_from_slice(&hasher.finalize());
    mac
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>, BenchError> {
    hex::decode(value).map_err(|_| keystore_error(&format!("{} is not valid hex", name)))
}

fn keystore_error(reason: &str) -> BenchError {
    BenchError::Keystore(reason.to_string())
}
