// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Direct-bitmap tier for 1–4 byte keys.
//!
//! The key is read as a big-endian integer and used as an absolute bit
//! index into a bitmap covering the entire key space: 32 B for 1-byte
//! keys, 8 KB for 2, 2 MB for 3, 512 MB for 4. The full commitment is made
//! up front regardless of occupancy; callers choose this tier only when
//! the key space is dense enough to justify it.

use crate::store::{ByteKeySet, StoreError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Longest key the bitmap tier covers. 2^(8*5) bits would be 128 GB.
pub const MAX_BITMAP_KEY_LEN: usize = 4;

/// Bitmap-backed key set. `add` is a test-and-set under a single lock.
pub struct BitmapKeySet {
    key_len: usize,
    words: Mutex<Vec<u64>>,
    count: AtomicUsize,
}

impl BitmapKeySet {
    /// Allocate the full bitmap for `key_len`-byte keys.
    pub fn new(key_len: usize) -> Result<Self, StoreError> {
        if key_len == 0 || key_len > MAX_BITMAP_KEY_LEN {
            return Err(StoreError::UnsupportedKeyLength {
                tier: "bitmap",
                len: key_len,
            });
        }
        let bits = 1usize << (8 * key_len);
        Ok(Self {
            key_len,
            words: Mutex::new(vec![0u64; bits / 64]),
            count: AtomicUsize::new(0),
        })
    }

    fn bit_index(&self, key: &[u8]) -> usize {
        let mut index = 0usize;
        for &byte in key {
            index = (index << 8) | byte as usize;
        }
        index
    }
}

impl ByteKeySet for BitmapKeySet {
    fn key_len(&self) -> usize {
        self.key_len
    }

    fn add(&self, key: &[u8]) -> Result<bool, StoreError> {
        if key.len() != self.key_len {
            return Err(StoreError::KeyLength {
                expected: self.key_len,
                actual: key.len(),
            });
        }
        let index = self.bit_index(key);
        let mask = 1u64 << (index % 64);
        let mut words = self.words.lock();
        let word = &mut words[index / 64];
        if *word & mask != 0 {
            return Ok(false);
        }
        *word |= mask;
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }

    fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        let mut words = self.words.lock();
        words.iter_mut().for_each(|w| *w = 0);
        self.count.store(0, Ordering::Relaxed);
    }

    fn for_each_key(&self, visit: &mut dyn FnMut(&[u8])) {
        let words = self.words.lock();
        let mut key = [0u8; MAX_BITMAP_KEY_LEN];
        for (word_index, &word) in words.iter().enumerate() {
            if word == 0 {
                continue;
            }
            let mut bits = word;
            while bits != 0 {
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                let index = word_index * 64 + bit;
                for i in 0..self.key_len {
                    key[i] = (index >> (8 * (self.key_len - 1 - i))) as u8;
                }
                visit(&key[..self.key_len]);
            }
        }
    }
}
