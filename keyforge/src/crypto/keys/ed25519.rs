//! Ed25519 key pairs

use ed25519_dalek::SigningKey;

/// Public key for a 32-byte Ed25519 private key seed
pub fn public_key(private_key: &[u8; 32]) -> [u8; 32] {
    let signing_key = SigningKey::from_bytes(private_key);
    signing_key.verifying_key().to_bytes()
}
