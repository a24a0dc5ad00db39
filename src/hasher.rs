//! Perceptual fingerprinting of images.

use std::fmt;
use std::str::FromStr;

use image::DynamicImage;
use image_hasher::{HashAlg, Hasher, HasherConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown hash algorithm '{0}' (expected one of: phash, dhash, ahash)")]
    UnknownAlgorithm(String),
}

/// Hashing algorithm selector.
///
/// A run builds exactly one [`Fingerprinter`] from its kind, so fingerprints
/// produced under different kinds never meet in the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    /// DCT-based perceptual hash (`phash`).
    Perceptual,
    /// Gradient hash (`dhash`).
    Difference,
    /// Mean hash (`ahash`).
    Average,
}

impl HashKind {
    fn config(self) -> HasherConfig {
        // Default hash size is 8x8, so every kind yields a fixed 64-bit hash.
        let config = HasherConfig::new();
        match self {
            HashKind::Perceptual => config.hash_alg(HashAlg::Median).preproc_dct(),
            HashKind::Difference => config.hash_alg(HashAlg::Gradient),
            HashKind::Average => config.hash_alg(HashAlg::Mean),
        }
    }
}

impl FromStr for HashKind {
    type Err = ConfigError;

    /// Validating factory: accepts the conventional short names (`phash`,
    /// `dhash`, `ahash`) as well as the descriptive ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phash" | "perceptual" => Ok(HashKind::Perceptual),
            "dhash" | "difference" => Ok(HashKind::Difference),
            "ahash" | "average" => Ok(HashKind::Average),
            other => Err(ConfigError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashKind::Perceptual => "phash",
            HashKind::Difference => "dhash",
            HashKind::Average => "ahash",
        };
        f.write_str(name)
    }
}

/// Computes fingerprints under one fixed algorithm.
pub struct Fingerprinter {
    hasher: Hasher,
}

impl Fingerprinter {
    pub fn new(kind: HashKind) -> Self {
        Self {
            hasher: kind.config().to_hasher(),
        }
    }

    /// Fingerprint of a decoded image: base64 text of the hash bits.
    ///
    /// A pure function of pixel content and the configured kind; identical
    /// pixels always yield identical fingerprints.
    pub fn fingerprint(&self, img: &DynamicImage) -> String {
        self.hasher.hash_image(img).to_base64()
    }
}
