/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use anyhow::Result;

use sssp::sync::{Bucket, FixedTaskPool, RequestSlots, TOMBSTONE};

#[test]
fn test_bucket_push_and_read() -> Result<()> {
    let bucket = Bucket::with_capacity(8);
    assert!(bucket.is_empty());

    assert_eq!(bucket.push(3), 0);
    assert_eq!(bucket.push(5), 1);
    assert_eq!(bucket.len(), 2);
    assert_eq!(bucket.get(0), 3);
    assert_eq!(bucket.get(1), 5);

    bucket.tombstone(0);
    assert_eq!(bucket.get(0), TOMBSTONE);
    assert_eq!(bucket.len(), 2);

    bucket.clear();
    assert!(bucket.is_empty());
    Ok(())
}

#[test]
fn test_bucket_concurrent_pushes() -> Result<()> {
    let threads = 8;
    let per_thread = 1000;
    let bucket = Bucket::with_capacity(threads * per_thread);

    thread::scope(|scope| {
        for t in 0..threads {
            let bucket = &bucket;
            scope.spawn(move || {
                for i in 0..per_thread {
                    bucket.push(t * per_thread + i);
                }
            });
        }
    });

    assert_eq!(bucket.len(), threads * per_thread);
    let mut entries: Vec<_> = (0..bucket.len()).map(|i| bucket.get(i)).collect();
    entries.sort_unstable();
    // Every pushed node appears exactly once: no entry was lost or
    // overwritten by a concurrent push.
    let expected: Vec<_> = (0..(threads * per_thread) as i64).collect();
    assert_eq!(entries, expected);
    Ok(())
}

#[test]
fn test_request_slots_aggregate_minimum() -> Result<()> {
    let slots = RequestSlots::new(4);

    slots.offer(2, 0.7);
    slots.offer(2, 0.3);
    slots.offer(2, 0.5);

    // A single enqueue for the three offers.
    assert_eq!(slots.queued_len(), 1);
    assert_eq!(slots.queued(0), 2);

    // The drain returns the minimum and empties the slot.
    assert_eq!(slots.drain(2), 0.3);
    assert!(slots.drain(2).is_infinite());

    slots.reset();
    assert_eq!(slots.queued_len(), 0);
    Ok(())
}

#[test]
fn test_request_slots_concurrent_offers() -> Result<()> {
    let num_nodes = 16;
    let threads = 8;
    let offers = 500;
    let slots = RequestSlots::new(num_nodes);

    thread::scope(|scope| {
        for t in 0..threads {
            let slots = &slots;
            scope.spawn(move || {
                for i in 0..offers {
                    let node = (t + i) % num_nodes;
                    // Distinct distances per (thread, iteration); global
                    // minimum for each node is deterministic.
                    let distance = 1.0 + ((i * threads + t) % 97) as f64;
                    slots.offer(node, distance);
                }
            });
        }
    });

    // Every node was offered at least once and enqueued exactly once.
    assert_eq!(slots.queued_len(), num_nodes);
    let mut queued: Vec<_> = (0..slots.queued_len()).map(|i| slots.queued(i)).collect();
    queued.sort_unstable();
    assert_eq!(queued, (0..num_nodes).collect::<Vec<_>>());

    // Each slot holds a finite value no larger than any offer made to it.
    for node in 0..num_nodes {
        let drained = slots.drain(node);
        assert!(drained >= 1.0 && drained <= 98.0);
        assert!(slots.drain(node).is_infinite());
    }
    Ok(())
}

#[test]
fn test_pool_runs_one_task_per_worker() -> Result<()> {
    let workers = 4;
    let counter = AtomicUsize::new(0);
    let pool = FixedTaskPool::new(workers);
    assert_eq!(pool.num_workers(), workers);

    thread::scope(|scope| {
        pool.spawn_workers(scope);

        for epoch in 0..10 {
            for tid in 0..workers {
                let counter = &counter;
                pool.submit(tid, move || {
                    counter.fetch_add(epoch * workers + tid, Ordering::Relaxed);
                });
            }
            pool.sync();
        }

        pool.stop();
    });

    let expected: usize = (0..10 * workers).sum();
    assert_eq!(counter.load(Ordering::Relaxed), expected);
    Ok(())
}

#[test]
fn test_pool_epochs_are_ordered() -> Result<()> {
    // The barrier separates epochs: writes from epoch k are visible to
    // epoch k + 1 even from a different worker.
    let workers = 3;
    let mut log = vec![0_usize; 0];
    {
        let cells: Vec<AtomicUsize> = (0..workers).map(|_| AtomicUsize::new(0)).collect();
        let pool = FixedTaskPool::new(workers);
        thread::scope(|scope| {
            pool.spawn_workers(scope);

            for round in 1..=5 {
                for tid in 0..workers {
                    let cells = &cells;
                    // Rotate ownership every epoch: the slot a worker writes
                    // was written by its neighbor in the previous epoch, so
                    // the assertion only holds if the barrier publishes it.
                    pool.submit(tid, move || {
                        let slot = &cells[(tid + round) % workers];
                        assert_eq!(slot.load(Ordering::Relaxed), round - 1);
                        slot.store(round, Ordering::Relaxed);
                    });
                }
                pool.sync();
            }
            pool.stop();
        });
        log.extend(cells.iter().map(|cell| cell.load(Ordering::Relaxed)));
    }
    assert_eq!(log, vec![5; workers]);
    Ok(())
}
