// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bucketed, paged tier for keys of 5 bytes and up.
//!
//! # Bucket selection
//!
//! The bucket index is taken from the 2 (64K buckets) or 3 (16M buckets)
//! key bytes immediately preceding the final byte. Canonical shape keys
//! make both extremes poor selectors: leading bytes are disproportionately
//! zero (canonicalization pulls content toward the low end of the
//! encoding) and the final byte is often only partially used (bit lengths
//! are rarely a multiple of 8). The interior bytes just before the tail
//! are the best-distributed choice.
//!
//! Only the residue is stored: the key minus its index bytes, which is the
//! prefix before the index bytes followed by the final byte. A lookup is a
//! prefix comparison plus one final-byte check.
//!
//! # Concurrency
//!
//! Each bucket owns a growable list of 256-entry pages behind its own
//! `RwLock`; buckets are fully independent, so insert throughput scales
//! with bucket count. `add` is two-phase: an optimistic scan of every
//! entry visible under a shared lock, then, only if the key was not found,
//! an exclusive re-lock that rescans just the entries appended since the
//! snapshot and appends. Entries are append-only and never relocated, so
//! the snapshot count taken in the first phase stays valid in the second.

use crate::store::{ByteKeySet, StoreError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Entries per page. Pages are allocated whole and filled sequentially.
const PAGE_ENTRIES: usize = 256;

/// One fixed-capacity buffer of packed entries.
struct Page {
    data: Vec<u8>,
}

impl Page {
    fn new(entry_len: usize) -> Self {
        Self {
            data: Vec::with_capacity(PAGE_ENTRIES * entry_len),
        }
    }

    fn entries(&self, entry_len: usize) -> usize {
        self.data.len() / entry_len
    }

    fn is_full(&self, entry_len: usize) -> bool {
        self.entries(entry_len) == PAGE_ENTRIES
    }

    fn entry(&self, index: usize, entry_len: usize) -> &[u8] {
        &self.data[index * entry_len..(index + 1) * entry_len]
    }
}

/// Paged, bucketed key set for 5+ byte keys.
pub struct PagedKeySet {
    key_len: usize,
    /// Bytes of the key consumed by the bucket index (2 or 3).
    index_len: usize,
    /// Bytes physically stored per entry: `key_len - index_len`.
    entry_len: usize,
    buckets: Vec<RwLock<Vec<Page>>>,
    count: AtomicUsize,
}

impl PagedKeySet {
    /// 64K buckets, indexed by the 2 bytes before the final key byte.
    pub fn with_64k_buckets(key_len: usize) -> Result<Self, StoreError> {
        Self::new(key_len, 2)
    }

    /// 16M buckets, indexed by the 3 bytes before the final key byte.
    /// Commits roughly half a gigabyte of bucket headers up front; meant
    /// for generations with billions of keys.
    pub fn with_16m_buckets(key_len: usize) -> Result<Self, StoreError> {
        Self::new(key_len, 3)
    }

    fn new(key_len: usize, index_len: usize) -> Result<Self, StoreError> {
        // Below 5 bytes the bitmap tier always wins; it also guarantees
        // index bytes and final byte never overlap.
        if key_len < 5 {
            return Err(StoreError::UnsupportedKeyLength {
                tier: "paged",
                len: key_len,
            });
        }
        let buckets = (0..1usize << (8 * index_len))
            .map(|_| RwLock::new(Vec::new()))
            .collect();
        Ok(Self {
            key_len,
            index_len,
            entry_len: key_len - index_len,
            buckets,
            count: AtomicUsize::new(0),
        })
    }

    /// Split a key into its bucket index and the two stored fragments:
    /// the prefix before the index bytes and the final byte.
    fn split<'k>(&self, key: &'k [u8]) -> (usize, &'k [u8], u8) {
        let cut = self.key_len - 1 - self.index_len;
        let mut bucket = 0usize;
        for &byte in &key[cut..self.key_len - 1] {
            bucket = (bucket << 8) | byte as usize;
        }
        (bucket, &key[..cut], key[self.key_len - 1])
    }

    fn entries_in(&self, pages: &[Page]) -> usize {
        match pages.last() {
            None => 0,
            Some(last) => (pages.len() - 1) * PAGE_ENTRIES + last.entries(self.entry_len),
        }
    }

    /// Scan entries `from..to` of the bucket for the given fragments.
    fn scan(&self, pages: &[Page], from: usize, to: usize, prefix: &[u8], last: u8) -> bool {
        let tail = self.entry_len - 1;
        for index in from..to {
            let entry =
                pages[index / PAGE_ENTRIES].entry(index % PAGE_ENTRIES, self.entry_len);
            if entry[tail] == last && &entry[..tail] == prefix {
                return true;
            }
        }
        false
    }
}

impl ByteKeySet for PagedKeySet {
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
        let (bucket_index, prefix, last) = self.split(key);
        let bucket = &self.buckets[bucket_index];

        // Phase 1: optimistic scan under the shared lock. Existing entries
        // are never mutated, so the snapshot taken here remains a valid
        // lower bound for the exclusive phase.
        let snapshot = {
            let pages = bucket.read();
            let snapshot = self.entries_in(&pages);
            if self.scan(&pages, 0, snapshot, prefix, last) {
                return Ok(false);
            }
            snapshot
        };

        // Phase 2: exclusive re-lock; rescan only what other writers
        // appended since the snapshot, then append.
        let mut pages = bucket.write();
        let current = self.entries_in(&pages);
        if self.scan(&pages, snapshot, current, prefix, last) {
            return Ok(false);
        }
        if pages.last().map_or(true, |page| page.is_full(self.entry_len)) {
            pages.push(Page::new(self.entry_len));
        }
        let page = pages.last_mut().expect("bucket has a page after push");
        page.data.extend_from_slice(prefix);
        page.data.push(last);
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }

    fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        // Full reset, first page included: every tier clears the same way.
        for bucket in &self.buckets {
            bucket.write().clear();
        }
        self.count.store(0, Ordering::Relaxed);
    }

    fn for_each_key(&self, visit: &mut dyn FnMut(&[u8])) {
        let cut = self.key_len - 1 - self.index_len;
        let mut key = vec![0u8; self.key_len];
        for (bucket_index, bucket) in self.buckets.iter().enumerate() {
            let pages = bucket.read();
            let total = self.entries_in(&pages);
            if total == 0 {
                continue;
            }
            for i in 0..self.index_len {
                key[cut + i] = (bucket_index >> (8 * (self.index_len - 1 - i))) as u8;
            }
            for index in 0..total {
                let entry =
                    pages[index / PAGE_ENTRIES].entry(index % PAGE_ENTRIES, self.entry_len);
                key[..cut].copy_from_slice(&entry[..cut]);
                key[self.key_len - 1] = entry[cut];
                visit(&key);
            }
        }
    }
}
