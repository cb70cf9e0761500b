//! Unified hashing utilities using FxHash.
//!
//! Uses `rustc_hash::FxHasher` for:
//! - Fast, deterministic hashing (optimized for small data)
//! - No extra dependencies (rustc_hash already used for FxHashSet/FxHashMap)
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let h = hash::compute("some content"); // -> u64
//! ```

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_deterministic() {
        assert_eq!(compute("alert('hi')"), compute("alert('hi')"));
        assert_ne!(compute("alert('hi')"), compute("alert('bye')"));
    }
}
