//! RSASSA-PKCS1-v1_5 with SHA-256 (RS256)

use crate::error::{JwtError, JwtResult};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};

fn pem_text(key: &[u8]) -> JwtResult<&str> {
    std::str::from_utf8(key)
        .map(str::trim)
        .map_err(|_| JwtError::missing_key("RSA key is not valid UTF-8"))
}

/// Sign with RSA-SHA256 using a PKCS#8 PEM private key
pub(crate) fn sign_rs256(message: &[u8], private_key_pem: &[u8]) -> JwtResult<Vec<u8>> {
    let private_key = RsaPrivateKey::from_pkcs8_pem(pem_text(private_key_pem)?)
        .map_err(|_| JwtError::missing_key("private key is not a usable RSA key"))?;

    let signing_key = SigningKey::<Sha256>::new(private_key);
    let signature = signing_key
        .try_sign(message)
        .map_err(|_| JwtError::missing_key("private key could not produce a signature"))?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify an RSA-SHA256 signature using an SPKI PEM public key
///
/// A signature of the wrong length or value is `Ok(false)`; only an
/// unusable key is an error.
pub(crate) fn verify_rs256(
    message: &[u8],
    signature: &[u8],
    public_key_pem: &[u8],
) -> JwtResult<bool> {
    let public_key = RsaPublicKey::from_public_key_pem(pem_text(public_key_pem)?)
        .map_err(|_| JwtError::missing_key("public key is not a usable RSA key"))?;

    let verifying_key = VerifyingKey::<Sha256>::new(public_key);
    let Ok(signature) = Signature::try_from(signature) else {
        return Ok(false);
    };

    Ok(verifying_key.verify(message, &signature).is_ok())
}
