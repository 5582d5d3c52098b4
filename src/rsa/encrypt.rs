// RSA Encryption Implementation
// Character-wise textbook RSA: one exponentiation per character, colon-joined

use super::bigint::{from_u64, mod_pow, RsaBigInt};
use super::charmap::CharMap;
use super::error::{Result, RsaError};
use super::keygen::{Encoding, KeyContext, RsaPublicKey};

/// Separator between ciphertext tokens
pub const DELIMITER: &str = ":";

/// Appended to every ordinal-encoded message and dropped again on decode
pub const SENTINEL: char = ' ';

/// Compute c = m^e mod n
pub fn encrypt_value(m: &RsaBigInt, public_key: &RsaPublicKey) -> RsaBigInt {
    mod_pow(m, &public_key.e, &public_key.n)
}

/// Encrypt `text` with whichever encoding the context was built for
pub fn encode(context: &KeyContext, text: &str) -> Result<String> {
    match context.encoding() {
        Encoding::Ordinal => encode_ordinal(text, context.public_key()),
        Encoding::Charmap(map) => encode_charmap(text, context.public_key(), map),
    }
}

/// Encrypt each code point of `text` followed by the space sentinel.
///
/// A code point that is not below n cannot survive the round trip and is
/// rejected as unrepresentable.
pub fn encode_ordinal(text: &str, public_key: &RsaPublicKey) -> Result<String> {
    let tokens = text
        .chars()
        .chain(std::iter::once(SENTINEL))
        .map(|c| {
            let m = from_u64(u64::from(c));
            if m >= public_key.n {
                return Err(RsaError::UnrepresentableCharacter(format!("character {:?}", c)));
            }
            Ok(encrypt_value(&m, public_key).to_string())
        })
        .collect::<Result<Vec<String>>>()?;

    Ok(tokens.join(DELIMITER))
}

/// Encrypt the char-map value of each character of `text`
pub fn encode_charmap(text: &str, public_key: &RsaPublicKey, map: &CharMap) -> Result<String> {
    let tokens = text
        .chars()
        .map(|c| map.value_of(c).map(|m| encrypt_value(m, public_key).to_string()))
        .collect::<Result<Vec<String>>>()?;

    Ok(tokens.join(DELIMITER))
}
