//! Encrypt and decrypt fragment values using 256 bit AES-GCM.
//!
//! A random nonce is generated for every call. The key alias is bound
//! as associated data so a ciphertext only opens under the key slot it
//! was written for.
use crate::{Error, KeyHandle, Result};
use aes_gcm::{
    aead::{Aead, Payload},
    Aes256Gcm, Key, KeyInit, Nonce as AesNonce,
};
use seedlock_core::crypto::{AeadPack, Nonce};
use zeroize::Zeroizing;

fn cipher(key: &KeyHandle) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.expose_secret()))
}

/// Encrypt plaintext with the given key.
pub fn encrypt(key: &KeyHandle, plaintext: &[u8]) -> Result<AeadPack> {
    let nonce = Nonce::new_random();
    let payload = Payload {
        msg: plaintext,
        aad: key.alias().as_bytes(),
    };
    let ciphertext = cipher(key)
        .encrypt(AesNonce::from_slice(nonce.as_ref()), payload)
        .map_err(|_| Error::Encrypt(key.alias().to_owned()))?;
    Ok(AeadPack { nonce, ciphertext })
}

/// Decrypt ciphertext with the given key.
///
/// Fails with [Error::AuthenticationFailure] when the tag does not
/// verify; a wrong plaintext is never returned.
pub fn decrypt(
    key: &KeyHandle,
    aead_pack: &AeadPack,
) -> Result<Zeroizing<Vec<u8>>> {
    let payload = Payload {
        msg: aead_pack.ciphertext.as_ref(),
        aad: key.alias().as_bytes(),
    };
    let plaintext = cipher(key)
        .decrypt(AesNonce::from_slice(aead_pack.nonce.as_ref()), payload)
        .map_err(|_| Error::AuthenticationFailure(key.alias().to_owned()))?;
    Ok(Zeroizing::new(plaintext))
}
