// Key Store
// Saves and loads key material as a self-describing JSON record

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use num_traits::{One, Zero};

use crate::rsa::bigint::{from_u64, is_coprime, RsaBigInt};
use crate::rsa::charmap::{CharMap, ALPHABET, ALPHABET_LEN};
use crate::rsa::config::Variant;
use crate::rsa::error::{Result, RsaError};
use crate::rsa::keygen::{Encoding, KeyContext, RsaKeyPair, RsaPrivateKey, RsaPublicKey};

/// Big integers are stored as decimal strings so the file stays readable
mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::rsa::bigint::RsaBigInt;

    pub fn serialize<S: Serializer>(value: &RsaBigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RsaBigInt, D::Error> {
        let text = String::deserialize(deserializer)?;
        RsaBigInt::parse_bytes(text.as_bytes(), 10)
            .ok_or_else(|| de::Error::custom(format!("invalid decimal integer {:?}", text)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PublicKeyRecord {
    #[serde(with = "decimal")]
    n: RsaBigInt,
    #[serde(with = "decimal")]
    e: RsaBigInt,
}

#[derive(Debug, Serialize, Deserialize)]
struct PrivateKeyRecord {
    #[serde(with = "decimal")]
    d: RsaBigInt,
}

#[derive(Debug, Serialize, Deserialize)]
struct CharEntry {
    ch: char,
    #[serde(with = "decimal")]
    value: RsaBigInt,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeyFile {
    variant: Variant,
    public_key: PublicKeyRecord,
    private_key: PrivateKeyRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    charmap: Option<Vec<CharEntry>>,
}

impl KeyFile {
    fn from_context(context: &KeyContext) -> Self {
        let charmap = match context.encoding() {
            Encoding::Ordinal => None,
            Encoding::Charmap(map) => Some(
                map.entries()
                    .map(|(ch, value)| CharEntry {
                        ch,
                        value: value.clone(),
                    })
                    .collect(),
            ),
        };

        Self {
            variant: context.variant(),
            public_key: PublicKeyRecord {
                n: context.public_key().n.clone(),
                e: context.public_key().e.clone(),
            },
            private_key: PrivateKeyRecord {
                d: context.private_key().d.clone(),
            },
            charmap,
        }
    }

    fn into_context(self, path: &Path) -> Result<KeyContext> {
        let n = &self.public_key.n;
        if n <= &RsaBigInt::one() {
            return Err(unavailable(path, format!("modulus {} must exceed 1", n)));
        }
        check_exponent(path, "e", &self.public_key.e, n)?;
        check_exponent(path, "d", &self.private_key.d, n)?;

        let encoding = match (self.variant, self.charmap) {
            (Variant::Ordinal, _) => Encoding::Ordinal,
            (Variant::Charmap, Some(entries)) => {
                if entries.len() != ALPHABET_LEN {
                    return Err(unavailable(
                        path,
                        format!("character map has {} entries, expected {}", entries.len(), ALPHABET_LEN),
                    ));
                }
                let two = from_u64(2);
                for entry in &entries {
                    if !ALPHABET.contains(entry.ch) {
                        return Err(unavailable(path, format!("character {:?} is not in the alphabet", entry.ch)));
                    }
                    if entry.value < two || &entry.value >= n || !is_coprime(&entry.value, n) {
                        return Err(unavailable(
                            path,
                            format!("character map value {} is not a coprime of {} in [2, n)", entry.value, n),
                        ));
                    }
                }
                let map = CharMap::from_entries(entries.into_iter().map(|entry| (entry.ch, entry.value)))
                    .ok_or_else(|| unavailable(path, "character map is not a bijection"))?;
                Encoding::Charmap(map)
            }
            (Variant::Charmap, None) => return Err(unavailable(path, "character map missing")),
        };

        let keypair = RsaKeyPair {
            public_key: RsaPublicKey {
                n: self.public_key.n,
                e: self.public_key.e,
            },
            private_key: RsaPrivateKey { d: self.private_key.d },
        };

        Ok(KeyContext::new(keypair, encoding))
    }
}

/// Exponents are reduced residues: 0 < x < n
fn check_exponent(path: &Path, name: &str, value: &RsaBigInt, n: &RsaBigInt) -> Result<()> {
    if value.is_zero() || value >= n {
        return Err(unavailable(path, format!("exponent {} = {} is outside (0, {})", name, value, n)));
    }
    Ok(())
}

fn unavailable(path: &Path, reason: impl ToString) -> RsaError {
    RsaError::KeyStoreUnavailable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Read entire file into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| unavailable(path, e))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(|e| unavailable(path, e))?;
    Ok(data)
}

/// Write data to file
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| unavailable(path, e))?;
    file.write_all(data).map_err(|e| unavailable(path, e))?;
    Ok(())
}

/// Persist the key pair, and the char map if there is one, to `path`
pub fn save_keys(path: &Path, context: &KeyContext) -> Result<()> {
    let record = KeyFile::from_context(context);
    let data = serde_json::to_vec_pretty(&record).map_err(|e| unavailable(path, e))?;
    write_file(path, &data)
}

/// Load a key context written by `save_keys`
pub fn load_keys(path: &Path) -> Result<KeyContext> {
    let data = read_file(path)?;
    let record: KeyFile = serde_json::from_slice(&data).map_err(|e| unavailable(path, e))?;
    record.into_context(path)
}
