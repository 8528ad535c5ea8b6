/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::mem::ManuallyDrop;
use std::sync::{Barrier, Condvar, Mutex};
use std::thread::Scope;

// Boxed trait objects carry a `'env` lifetime for borrowed captures shorter
// than the pool itself. Storing them directly behind a `Mutex` makes
// dropck require `'env` to strictly outlive the pool, which conflicts with
// the usual "declare `pool` right before `thread::scope`" pattern. Wrapping
// in `ManuallyDrop` opts the slot out of drop glue for its contents, so
// dropck no longer imposes that requirement; the task is still dropped
// normally via `ManuallyDrop::into_inner` right after it runs.
type Task<'env> = ManuallyDrop<Box<dyn FnOnce() + Send + 'env>>;

enum Command<'env> {
    Run(Task<'env>),
    Stop,
}

struct SlotState<'env> {
    command: Mutex<Option<Command<'env>>>,
    ready: Condvar,
}

impl<'env> SlotState<'env> {
    fn new() -> Self {
        Self {
            command: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    fn send(&self, command: Command<'env>) {
        let mut guard = self.command.lock().unwrap();
        debug_assert!(guard.is_none(), "worker still owns a pending task");
        *guard = Some(command);
        self.ready.notify_one();
    }

    fn recv(&self) -> Command<'env> {
        let mut guard = self.command.lock().unwrap();
        loop {
            if let Some(command) = guard.take() {
                return command;
            }
            guard = self.ready.wait(guard).unwrap();
        }
    }
}

/// A pool of `N` workers, each executing one assigned task per epoch.
///
/// Every worker owns a task slot; the controller assigns a closure to each
/// slot with [`submit`](FixedTaskPool::submit) and then joins the workers on
/// a shared barrier of width `N + 1` with [`sync`](FixedTaskPool::sync).
/// A worker loops: wait for its slot to be filled, take the task (emptying
/// the slot), run it, arrive-and-wait on the barrier.
///
/// The slot-per-thread model exists because the solver chunks its edge work
/// deterministically per worker, so there is no queue to contend on between
/// phases, and a task is guaranteed to run on the worker it was assigned to.
///
/// Workers are scoped threads: they are spawned with
/// [`spawn_workers`](FixedTaskPool::spawn_workers) inside a
/// [`std::thread::scope`] and may therefore borrow state from the enclosing
/// computation. There is no mid-task cancellation; [`stop`](FixedTaskPool::stop)
/// delivers a shutdown command that each worker honors at its next
/// rendezvous, and must be called before the scope ends or the scope will
/// block joining the workers.
pub struct FixedTaskPool<'env> {
    slots: Box<[SlotState<'env>]>,
    barrier: Barrier,
}

impl<'env> FixedTaskPool<'env> {
    /// Creates a pool with `num_workers` task slots and a barrier of width
    /// `num_workers + 1`.
    pub fn new(num_workers: usize) -> Self {
        assert!(num_workers > 0, "the pool needs at least one worker");
        Self {
            slots: (0..num_workers).map(|_| SlotState::new()).collect(),
            barrier: Barrier::new(num_workers + 1),
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.slots.len()
    }

    /// Spawns one worker per slot on `scope`.
    pub fn spawn_workers<'scope>(&'scope self, scope: &'scope Scope<'scope, 'env>) {
        for slot in self.slots.iter() {
            let barrier = &self.barrier;
            scope.spawn(move || loop {
                match slot.recv() {
                    Command::Stop => return,
                    Command::Run(task) => {
                        ManuallyDrop::into_inner(task)();
                        barrier.wait();
                    }
                }
            });
        }
    }

    /// Assigns the current epoch's task for worker `tid`.
    ///
    /// Every worker must receive exactly one task per epoch before the
    /// controller calls [`sync`](FixedTaskPool::sync); workers without work
    /// still need an empty closure to arrive at the barrier.
    pub fn submit(&self, tid: usize, task: impl FnOnce() + Send + 'env) {
        self.slots[tid].send(Command::Run(ManuallyDrop::new(Box::new(task))));
    }

    /// Joins the epoch barrier, returning once every worker has finished its
    /// task. All memory effects of the tasks are visible afterwards.
    pub fn sync(&self) {
        self.barrier.wait();
    }

    /// Shuts the workers down. They exit without touching the barrier.
    pub fn stop(&self) {
        for slot in self.slots.iter() {
            slot.send(Command::Stop);
        }
    }
}
