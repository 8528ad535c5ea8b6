/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The concurrency substrate of the parallel solver: bucket slots with
//! concurrent insertion and lazy deletion, lock-free per-node request
//! aggregation, and a barrier-synchronized fixed-task worker pool.

mod bucket;
pub use bucket::*;

mod request_slots;
pub use request_slots::*;

mod task_pool;
pub use task_pool::*;
