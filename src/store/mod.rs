// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Concurrent deduplicating key stores.
//!
//! A store is an append-only set of fixed-length byte keys, safe under any
//! number of concurrent writers: for a given key, exactly one `add` call
//! returns `true`, no matter how the calls interleave. Entries are never
//! removed individually; the whole store is cleared as a unit.
//!
//! Implementations are size-tiered and chosen once at construction by
//! [`new_key_set`]:
//! - 1–4 byte keys: a direct bitmap over the whole key space
//!   ([`BitmapKeySet`], 32 B up to 512 MB committed regardless of
//!   occupancy).
//! - 5+ byte keys: a bucketed paged store with 64K or 16M buckets
//!   ([`PagedKeySet`]), indexed by the key bytes just before the final
//!   byte.
//! - Any length: a lock-striped hash set ([`StripedKeySet`]), the simple
//!   fallback for small generations.

pub mod bitmap;
pub mod paged;
pub mod striped;

pub use bitmap::BitmapKeySet;
pub use paged::PagedKeySet;
pub use striped::StripedKeySet;

use thiserror::Error;

/// Errors raised by key stores.
///
/// A wrong-length key is a programming error in the caller, not a runtime
/// recoverable case; it is surfaced rather than silently truncated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `add` was called with a key of the wrong length.
    #[error("key is {actual} bytes but this store holds {expected}-byte keys")]
    KeyLength { expected: usize, actual: usize },

    /// The requested tier cannot hold keys of this length.
    #[error("no {tier} tier for {len}-byte keys")]
    UnsupportedKeyLength { tier: &'static str, len: usize },
}

/// Append-only concurrent set of fixed-length byte keys.
///
/// `add` must be linearizable per key; `clear` and `for_each_key` are only
/// called once the store is frozen (no concurrent `add`).
pub trait ByteKeySet: Send + Sync {
    /// The configured key length in bytes.
    fn key_len(&self) -> usize;

    /// Insert a key, returning `true` iff it was not already present.
    fn add(&self, key: &[u8]) -> Result<bool, StoreError>;

    /// Number of distinct keys inserted so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every key. Not required to be safe against a concurrent
    /// `add`.
    fn clear(&self);

    /// Visit every distinct key exactly once. Only valid on a frozen store.
    fn for_each_key(&self, visit: &mut dyn FnMut(&[u8]));
}

/// Which whole-store strategy the factory should prefer for 5+ byte keys.
///
/// There is no runtime re-tiering: the choice is made once, from the key
/// length and this flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorePreference {
    /// Bitmaps below 5 bytes, the 64K-bucket paged store otherwise.
    #[default]
    Auto,
    /// Paged store with 64K buckets: modest bucket overhead, scan-heavy
    /// when the key space runs to billions.
    Paged64k,
    /// Paged store with 16M buckets: large fixed bucket overhead, shortest
    /// scans. For the biggest generations only.
    Paged16m,
    /// Lock-striped hash set, the simple strategy for small generations.
    Striped,
}

/// Construct the store tier for the given key length.
///
/// Keys of 1..=4 bytes get the direct bitmap (the paged layouts need at
/// least 5 bytes); longer keys get the paged structure named by
/// `preference`. A `Striped` preference is honoured at any length. Note
/// that the 4-byte bitmap commits 512 MB regardless of occupancy; there
/// is no automatic fallback, callers pick the tier to match expected
/// key-space density.
pub fn new_key_set(
    key_len: usize,
    preference: StorePreference,
) -> Result<Box<dyn ByteKeySet>, StoreError> {
    if key_len == 0 {
        return Err(StoreError::UnsupportedKeyLength {
            tier: "any",
            len: 0,
        });
    }
    if preference == StorePreference::Striped {
        return Ok(Box::new(StripedKeySet::new(key_len)));
    }
    if key_len <= bitmap::MAX_BITMAP_KEY_LEN {
        return Ok(Box::new(BitmapKeySet::new(key_len)?));
    }
    match preference {
        StorePreference::Auto | StorePreference::Paged64k => {
            Ok(Box::new(PagedKeySet::with_64k_buckets(key_len)?))
        }
        StorePreference::Paged16m => Ok(Box::new(PagedKeySet::with_16m_buckets(key_len)?)),
        StorePreference::Striped => unreachable!("handled above"),
    }
}
