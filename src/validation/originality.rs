//! Originality guard
//!
//! Difference-hash fingerprinting against a read-only reference corpus. A
//! candidate whose minimum Hamming distance to any corpus hash falls below
//! the threshold is considered too close to prior work.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::providers::Raster;

/// Candidates closer than this (in Hamming bits) to any reference are
/// flagged. Distances at or above the threshold pass untouched.
pub const MIN_HAMMING_DISTANCE: u32 = 10;

const HASH_WIDTH: u32 = 9;
const HASH_HEIGHT: u32 = 8;

/// One row of the external reference corpus: an id and its perceptual hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceHash {
    pub id: String,
    pub hash: u64,
}

impl ReferenceHash {
    pub fn new(id: impl Into<String>, hash: u64) -> Self {
        Self {
            id: id.into(),
            hash,
        }
    }
}

/// 64-bit difference hash: 9x8 grayscale downsample, one bit per horizontal
/// neighbor pair, set when the left sample is darker than the right. A
/// zero-dimension raster has no gradients and hashes to zero.
pub fn dhash(raster: &Raster) -> u64 {
    let (w, h) = raster.dimensions();
    if w == 0 || h == 0 {
        return 0;
    }
    let gray = image::imageops::grayscale(raster);
    let small = image::imageops::resize(&gray, HASH_WIDTH, HASH_HEIGHT, FilterType::Triangle);

    let mut hash = 0u64;
    let mut bit = 0u32;
    for y in 0..HASH_HEIGHT {
        for x in 0..HASH_WIDTH - 1 {
            let left = small.get_pixel(x, y).0[0];
            let right = small.get_pixel(x + 1, y).0[0];
            if left < right {
                hash |= 1 << bit;
            }
            bit += 1;
        }
    }
    hash
}

pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Minimum distance from `hash` to the corpus, or `None` for an empty corpus.
pub fn min_corpus_distance(hash: u64, corpus: &[ReferenceHash]) -> Option<u32> {
    corpus
        .iter()
        .map(|r| hamming_distance(hash, r.hash))
        .min()
}

/// True when the candidate sits too close to some reference. An empty corpus
/// never flags, and neither does an empty raster, which carries no signal to
/// compare.
pub fn too_similar(raster: &Raster, corpus: &[ReferenceHash]) -> bool {
    let (w, h) = raster.dimensions();
    if w == 0 || h == 0 {
        return false;
    }
    match min_corpus_distance(dhash(raster), corpus) {
        Some(distance) => distance < MIN_HAMMING_DISTANCE,
        None => false,
    }
}
