// RSA Decryption Implementation
// Splits colon-delimited ciphertext and inverts each token with the private exponent

use num_traits::ToPrimitive;

use super::bigint::{mod_pow, RsaBigInt};
use super::charmap::CharMap;
use super::encrypt::DELIMITER;
use super::error::{Result, RsaError};
use super::keygen::{Encoding, KeyContext, RsaPrivateKey, RsaPublicKey};

/// Compute m = c^d mod n
pub fn decrypt_value(c: &RsaBigInt, public_key: &RsaPublicKey, private_key: &RsaPrivateKey) -> RsaBigInt {
    mod_pow(c, &private_key.d, &public_key.n)
}

/// Decrypt `ciphertext` with whichever encoding the context was built for
pub fn decode(context: &KeyContext, ciphertext: &str) -> Result<String> {
    match context.encoding() {
        Encoding::Ordinal => decode_ordinal(ciphertext, context.public_key(), context.private_key()),
        Encoding::Charmap(map) => decode_charmap(ciphertext, context.public_key(), context.private_key(), map),
    }
}

/// Parse one decimal token; every ciphertext value is a residue, so it must be below n
fn parse_token(token: &str, n: &RsaBigInt) -> Result<RsaBigInt> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RsaError::MalformedCiphertext(token.to_string()));
    }
    match RsaBigInt::parse_bytes(token.as_bytes(), 10) {
        Some(c) if &c < n => Ok(c),
        _ => Err(RsaError::MalformedCiphertext(token.to_string())),
    }
}

/// Decrypt every token but the last (the sentinel) back to a code point
pub fn decode_ordinal(ciphertext: &str, public_key: &RsaPublicKey, private_key: &RsaPrivateKey) -> Result<String> {
    let tokens = ciphertext
        .split(DELIMITER)
        .map(|token| parse_token(token, &public_key.n))
        .collect::<Result<Vec<RsaBigInt>>>()?;

    let (_sentinel, body) = tokens
        .split_last()
        .ok_or_else(|| RsaError::MalformedCiphertext(ciphertext.to_string()))?;

    body.iter()
        .map(|c| {
            let m = decrypt_value(c, public_key, private_key);
            m.to_u32()
                .and_then(char::from_u32)
                .ok_or_else(|| RsaError::UnrepresentableCharacter(format!("value {}", m)))
        })
        .collect()
}

/// Decrypt every token and look the result up in the char map
pub fn decode_charmap(
    ciphertext: &str,
    public_key: &RsaPublicKey,
    private_key: &RsaPrivateKey,
    map: &CharMap,
) -> Result<String> {
    if ciphertext.is_empty() {
        return Ok(String::new());
    }

    ciphertext
        .split(DELIMITER)
        .map(|token| {
            let c = parse_token(token, &public_key.n)?;
            map.char_of(&decrypt_value(&c, public_key, private_key))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::charmap::ALPHABET;
    use crate::rsa::keygen::RsaKeyPair;

    fn textbook_keypair() -> RsaKeyPair {
        RsaKeyPair {
            public_key: RsaPublicKey {
                n: from_u64(3233),
                e: from_u64(17),
            },
            private_key: RsaPrivateKey { d: from_u64(2753) },
        }
    }

    fn test_roundtrip(context: &KeyContext, message: &str) {
        let ciphertext = context.encode(message).unwrap();
        let decrypted = context.decode(&ciphertext).unwrap();
        assert_eq!(message, decrypted);
    }

    #[test]
    fn test_decrypt_value() {
        let keypair = textbook_keypair();
        let m = decrypt_value(&from_u64(2790), &keypair.public_key, &keypair.private_key);
        assert_eq!(m, from_u64(65));
    }

    #[test]
    fn test_decode_ordinal() {
        let context = KeyContext::new(textbook_keypair(), Encoding::Ordinal);
        test_roundtrip(&context, "Hello World!");
        test_roundtrip(&context, "");
        test_roundtrip(&context, "trailing space ");
    }

    #[test]
    fn test_decode_ordinal_drops_last_token() {
        let context = KeyContext::new(textbook_keypair(), Encoding::Ordinal);
        // 2790 decrypts to 'A'; the final token is discarded whatever it is
        assert_eq!(context.decode("2790:0").unwrap(), "A");
        assert_eq!(context.decode("2790").unwrap(), "");
    }

    #[test]
    fn test_decode_charmap() {
        let keypair = textbook_keypair();
        let map = CharMap::from_modulus(&keypair.public_key.n).unwrap();
        let context = KeyContext::new(keypair, Encoding::Charmap(map));

        test_roundtrip(&context, "Hello World!");
        test_roundtrip(&context, "");
        test_roundtrip(&context, ALPHABET);
    }

    #[test]
    fn test_decode_charmap_unknown_value() {
        let keypair = textbook_keypair();
        let map = CharMap::from_modulus(&keypair.public_key.n).unwrap();
        let context = KeyContext::new(keypair, Encoding::Charmap(map));

        // 1 decrypts to 1, which is never mapped
        let result = context.decode("1");
        assert!(matches!(result, Err(RsaError::UnrepresentableCharacter(_))));
    }

    #[test]
    fn test_decode_rejects_tokens_outside_modulus() {
        let keypair = textbook_keypair();
        let map = CharMap::from_modulus(&keypair.public_key.n).unwrap();
        let ordinal = KeyContext::new(keypair.clone(), Encoding::Ordinal);
        let charmap = KeyContext::new(keypair, Encoding::Charmap(map));

        // 6023 = 3233 + 2790 would otherwise wrap around to 'A'
        assert_eq!(ordinal.decode("3233:0"), Err(RsaError::MalformedCiphertext("3233".to_string())));
        assert_eq!(ordinal.decode("6023:0"), Err(RsaError::MalformedCiphertext("6023".to_string())));
        assert_eq!(ordinal.decode("2790:3233"), Err(RsaError::MalformedCiphertext("3233".to_string())));
        assert_eq!(charmap.decode("3233"), Err(RsaError::MalformedCiphertext("3233".to_string())));

        // n - 1 is the largest residue and still parses
        assert!(ordinal.decode("3232:0").is_ok());
    }

    #[test]
    fn test_decode_malformed() {
        let context = KeyContext::new(textbook_keypair(), Encoding::Ordinal);
        for bad in ["", "12::34", "12:x", "-5:1", " 12:3"] {
            let result = context.decode(bad);
            assert!(
                matches!(result, Err(RsaError::MalformedCiphertext(_))),
                "{:?} gave {:?}",
                bad,
                result
            );
        }
    }
}
