// Key Generation Configuration
// Parameters for prime search, exponent selection and persistence

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::keygen::{ExponentPicker, InverseStrategy};
use super::prime::DEFAULT_MAX_DRAWS;

/// Default key file written by `create_keys` when `save_new` is set
pub const DEFAULT_KEY_PATH: &str = "rsa_keys.json";

/// Which character-to-integer encoding the keys are generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Alphabet mapped onto coprimes of n
    #[default]
    Charmap,
    /// Unicode code points, space sentinel appended
    Ordinal,
}

impl Variant {
    pub fn default_picker(&self) -> ExponentPicker {
        match self {
            Variant::Charmap => ExponentPicker::charmap_default(),
            Variant::Ordinal => ExponentPicker::ordinal_default(),
        }
    }
}

/// Configuration for key generation
#[derive(Clone, Debug)]
pub struct KeyGenConfig {
    pub lower: u64,
    pub upper: u64,
    pub variant: Variant,
    /// Overrides the variant's default exponent picker
    pub picker: Option<ExponentPicker>,
    pub inverse: InverseStrategy,
    pub max_draws: u64,
    pub save_new: bool,
    pub verbose: bool,
    pub key_path: PathBuf,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            lower: 100,
            upper: 1000,
            variant: Variant::default(),
            picker: None,
            inverse: InverseStrategy::default(),
            max_draws: DEFAULT_MAX_DRAWS,
            save_new: true,
            verbose: false,
            key_path: PathBuf::from(DEFAULT_KEY_PATH),
        }
    }
}

impl KeyGenConfig {
    pub fn exponent_picker(&self) -> ExponentPicker {
        self.picker.unwrap_or_else(|| self.variant.default_picker())
    }

    pub fn with_bounds(mut self, lower: u64, upper: u64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_picker(mut self, picker: ExponentPicker) -> Self {
        self.picker = Some(picker);
        self
    }

    pub fn with_inverse(mut self, inverse: InverseStrategy) -> Self {
        self.inverse = inverse;
        self
    }

    pub fn with_max_draws(mut self, max_draws: u64) -> Self {
        self.max_draws = max_draws;
        self
    }

    pub fn with_save_new(mut self, save_new: bool) -> Self {
        self.save_new = save_new;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_key_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.key_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeyGenConfig::default();
        assert_eq!((config.lower, config.upper), (100, 1000));
        assert_eq!(config.variant, Variant::Charmap);
        assert_eq!(config.exponent_picker(), ExponentPicker::charmap_default());
        assert_eq!(config.inverse, InverseStrategy::ExtendedEuclid);
        assert!(config.save_new);
        assert_eq!(config.key_path, PathBuf::from(DEFAULT_KEY_PATH));
    }

    #[test]
    fn test_picker_follows_variant_unless_overridden() {
        let config = KeyGenConfig::default().with_variant(Variant::Ordinal);
        assert_eq!(config.exponent_picker(), ExponentPicker::ordinal_default());

        let fixed = ExponentPicker::FixedIndex { index: 2, max_count: 5 };
        let config = config.with_picker(fixed);
        assert_eq!(config.exponent_picker(), fixed);
    }
}
