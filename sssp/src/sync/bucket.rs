/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

/// Sentinel marking a bucket entry whose node has migrated to another
/// bucket.
pub const TOMBSTONE: i64 = -1;

/// An append-only, lazily-deletable sequence of node IDs.
///
/// A bucket supports concurrent [`push`](Bucket::push) calls from any number
/// of threads: the tail counter is advanced with a fetch-and-increment, so
/// each entry lands at a distinct index, which is returned to the caller.
/// Deletion is out of band: the consumer later overwrites an entry with
/// [`TOMBSTONE`] (via the index returned by `push`) and readers skip it.
///
/// Reads, tombstone writes and [`clear`](Bucket::clear) must not be
/// concurrent with pushes; the solver guarantees this by separating the
/// phases that push from the phases that consume with barriers, which also
/// establish the visibility of the relaxed entry stores. The capacity is
/// fixed at construction: within one live window of the bucket horizon a
/// node enters a given bucket at most once, so `n` slots always suffice.
///
/// Buckets are move-only; there is deliberately no way to clone one.
#[derive(Debug)]
pub struct Bucket {
    data: Box<[AtomicI64]>,
    tail: AtomicUsize,
}

impl Bucket {
    /// Creates a bucket able to hold `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: (0..capacity).map(|_| AtomicI64::new(TOMBSTONE)).collect(),
            tail: AtomicUsize::new(0),
        }
    }

    /// Appends a node and returns the index of its entry.
    #[inline(always)]
    pub fn push(&self, node: usize) -> usize {
        let index = self.tail.fetch_add(1, Ordering::Relaxed);
        debug_assert!(index < self.data.len(), "bucket capacity exceeded");
        self.data[index].store(node as i64, Ordering::Relaxed);
        index
    }

    /// Returns the entry at `index`: a node ID, or [`TOMBSTONE`].
    ///
    /// `index` must be below a tail snapshot taken after the pushes of the
    /// entry were separated from this read by a barrier.
    #[inline(always)]
    pub fn get(&self, index: usize) -> i64 {
        self.data[index].load(Ordering::Relaxed)
    }

    /// Overwrites the entry at `index` with [`TOMBSTONE`].
    #[inline(always)]
    pub fn tombstone(&self, index: usize) {
        self.data[index].store(TOMBSTONE, Ordering::Relaxed);
    }

    /// Resets the bucket to empty. Must not be concurrent with any other
    /// operation.
    pub fn clear(&self) {
        self.tail.store(0, Ordering::Relaxed);
    }

    /// Returns the number of entries, tombstones included.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tail.load(Ordering::Relaxed)
    }

    /// Returns whether the bucket holds no entries at all.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
