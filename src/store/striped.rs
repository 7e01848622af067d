// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Lock-striped hash fallback.
//!
//! Sixty-four independent hash-set partitions, each behind its own lock.
//! Interchangeable with the tiered stores at the interface level and good
//! enough for small generations, where the paged store's layout work is
//! not worth it.

use crate::store::{ByteKeySet, StoreError};
use parking_lot::Mutex;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

const STRIPES: usize = 64;

/// Hash set partitioned across 64 locks.
pub struct StripedKeySet {
    key_len: usize,
    stripes: Vec<Mutex<HashSet<Box<[u8]>>>>,
    count: AtomicUsize,
}

impl StripedKeySet {
    pub fn new(key_len: usize) -> Self {
        Self {
            key_len,
            stripes: (0..STRIPES).map(|_| Mutex::new(HashSet::new())).collect(),
            count: AtomicUsize::new(0),
        }
    }

    fn stripe(&self, key: &[u8]) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish() as usize % STRIPES
    }
}

impl ByteKeySet for StripedKeySet {
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
        let mut stripe = self.stripes[self.stripe(key)].lock();
        let inserted = stripe.insert(key.into());
        if inserted {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
        Ok(inserted)
    }

    fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        for stripe in &self.stripes {
            stripe.lock().clear();
        }
        self.count.store(0, Ordering::Relaxed);
    }

    fn for_each_key(&self, visit: &mut dyn FnMut(&[u8])) {
        for stripe in &self.stripes {
            for key in stripe.lock().iter() {
                visit(key);
            }
        }
    }
}
