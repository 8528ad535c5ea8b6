/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use atomic_float::AtomicF64;

/// Lock-free per-node aggregation of tentative-distance requests.
///
/// Each node owns an atomic `f64` slot holding the best (smallest) distance
/// proposed for it in the current phase, `+∞` when no request is pending.
/// Alongside the slots lives an append-only index of the nodes that received
/// at least one request: the thread that wins the `+∞ → finite` install CAS
/// enqueues the node exactly once, so the relaxation phase can iterate over
/// exactly the requested nodes instead of scanning all slots.
///
/// After [`offer`](RequestSlots::offer)`(node, d)` returns, and until some
/// thread drains the slot, `slot(node) ≤ d` holds: installs are single
/// CAS attempts (wait-free in the common case) and improvements are a
/// lock-free CAS-min loop.
pub struct RequestSlots {
    slots: Box<[AtomicF64]>,
    queued: Box<[AtomicUsize]>,
    len: AtomicUsize,
}

impl RequestSlots {
    /// Creates request slots for `num_nodes` nodes, all empty.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            slots: (0..num_nodes).map(|_| AtomicF64::new(f64::INFINITY)).collect(),
            queued: (0..num_nodes).map(|_| AtomicUsize::new(0)).collect(),
            len: AtomicUsize::new(0),
        }
    }

    /// Proposes tentative distance `distance` for `node`.
    ///
    /// The first proposal of a phase installs the distance and enqueues the
    /// node in the requested index; later (or concurrent) proposals only
    /// lower the slot towards the minimum.
    pub fn offer(&self, node: usize, distance: f64) {
        let slot = &self.slots[node];

        if slot.load(Ordering::Relaxed).is_infinite() {
            if slot
                .compare_exchange(
                    f64::INFINITY,
                    distance,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                // Single winner of the +∞ → finite transition.
                let index = self.len.fetch_add(1, Ordering::Relaxed);
                self.queued[index].store(node, Ordering::Relaxed);
                return;
            }
        }

        let mut current = slot.load(Ordering::Relaxed);
        while distance < current {
            match slot.compare_exchange_weak(
                current,
                distance,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
    }

    /// Empties the slot of `node`, returning the pending distance — `+∞` if
    /// another thread drained it first, in which case the caller has nothing
    /// to do.
    #[inline(always)]
    pub fn drain(&self, node: usize) -> f64 {
        self.slots[node].swap(f64::INFINITY, Ordering::Relaxed)
    }

    /// Returns the number of distinct nodes requested in the current phase.
    #[inline(always)]
    pub fn queued_len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    /// Returns the `index`-th requested node. `index` must be below a
    /// [`queued_len`](RequestSlots::queued_len) snapshot separated from the
    /// enqueues by a barrier.
    #[inline(always)]
    pub fn queued(&self, index: usize) -> usize {
        self.queued[index].load(Ordering::Relaxed)
    }

    /// Forgets the requested index. The slots themselves need no reset:
    /// every queued node is drained back to `+∞` by the relaxation phase.
    pub fn reset(&self) {
        self.len.store(0, Ordering::Relaxed);
    }
}
