//! EAPI request signing.
//!
//! The encrypted API only accepts a `params` form field built as follows:
//!
//! 1. `digest = md5("nobody" + path + "use" + json + "md5forencrypt")`, lowercase hex
//! 2. `plain = path + "-36cd479b6b5-" + json + "-36cd479b6b5-" + digest`
//! 3. PKCS#7 padding to the AES block size
//! 4. AES-128-ECB with the fixed client key
//! 5. lowercase hex of the ciphertext
//!
//! The upstream service recomputes the digest from the JSON text it receives,
//! so any JSON formatting works as long as the same text is digested and sent.
//! Everything else must stay bit-exact.

use std::fmt;

use aes::{
    Aes128,
    cipher::{BlockDecrypt, BlockEncrypt, KeyInit, generic_array::GenericArray},
};

pub const BLOCK_SIZE: usize = 16;
pub const EAPI_KEY: &[u8; 16] = b"e82ckenh8dichen8";
pub const EAPI_DELIMITER: &str = "-36cd479b6b5-";

#[derive(Debug, PartialEq, Eq)]
pub enum CryptoError {
    Hex(String),
    Length(usize),
    Padding,
    Utf8,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::Hex(e) => write!(f, "invalid hex: {e}"),
            CryptoError::Length(len) => {
                write!(f, "ciphertext length {len} is not a multiple of {BLOCK_SIZE}")
            }
            CryptoError::Padding => write!(f, "invalid PKCS#7 padding"),
            CryptoError::Utf8 => write!(f, "decrypted params are not valid UTF-8"),
        }
    }
}

impl std::error::Error for CryptoError {}

/// Rewrites the `/eapi/` prefix of an endpoint path to `/api/`.
///
/// Accepts a full URL or a bare path.
pub fn eapi_path(url: &str) -> String {
    let path = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.to_string(),
    };
    path.replacen("/eapi/", "/api/", 1)
}

pub fn eapi_digest(path: &str, json: &str) -> String {
    let message = format!("nobody{path}use{json}md5forencrypt");
    format!("{:x}", md5::compute(message.as_bytes()))
}

/// Pads `data` to a multiple of `block_size`; aligned input gains a full block.
///
/// # Panics
///
/// Panics if `block_size` is not in `1..=255`.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    assert!(
        (1..=255).contains(&block_size),
        "PKCS#7 block size must be in 1..=255, got {block_size}"
    );
    let pad = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + pad);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad, pad as u8);
    padded
}

pub fn pkcs7_unpad(data: &[u8], block_size: usize) -> Result<&[u8], CryptoError> {
    let Some(&last) = data.last() else {
        return Err(CryptoError::Padding);
    };
    let pad = last as usize;
    if pad == 0 || pad > block_size || pad > data.len() || data.len() % block_size != 0 {
        return Err(CryptoError::Padding);
    }
    let (body, padding) = data.split_at(data.len() - pad);
    if padding.iter().any(|&b| b as usize != pad) {
        return Err(CryptoError::Padding);
    }
    Ok(body)
}

/// Builds the hex `params` value for an EAPI request.
pub fn encrypt_params(path: &str, json: &str, key: &[u8; 16]) -> String {
    let digest = eapi_digest(path, json);
    let plain = format!("{path}{EAPI_DELIMITER}{json}{EAPI_DELIMITER}{digest}");

    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut buffer = pkcs7_pad(plain.as_bytes(), BLOCK_SIZE);
    for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    hex::encode(buffer)
}

/// Reverses [`encrypt_params`], returning the delimited plain text.
pub fn decrypt_params(params: &str, key: &[u8; 16]) -> Result<String, CryptoError> {
    let mut buffer = hex::decode(params).map_err(|e| CryptoError::Hex(e.to_string()))?;
    if buffer.is_empty() || buffer.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Length(buffer.len()));
    }

    let cipher = Aes128::new(GenericArray::from_slice(key));
    for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
    let plain = pkcs7_unpad(&buffer, BLOCK_SIZE)?;
    String::from_utf8(plain.to_vec()).map_err(|_| CryptoError::Utf8)
}
