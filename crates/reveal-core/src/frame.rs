#![forbid(unsafe_code)]

//! Next-frame task scheduling.
//!
//! [`FrameQueue`] models a rendering-synchronized, single-shot callback
//! facility (such as `requestAnimationFrame`) as plain data: producers
//! [`schedule`](FrameQueue::schedule) tasks, and the host drains them once per
//! frame with [`begin_frame`](FrameQueue::begin_frame).
//!
//! Invariants:
//! - Tasks run in the order they were scheduled.
//! - Tasks are never coalesced; N schedules produce N tasks.
//! - A task scheduled while a frame is being processed runs on the next frame.
//! - Scheduled tasks cannot be cancelled.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Monotonic identifier of one scheduled frame task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameId(u64);

impl FrameId {
    /// Raw sequence value (starts at 1).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for FrameId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Ordered queue of tasks waiting for the next frame.
#[derive(Debug, Clone)]
pub struct FrameQueue<T> {
    pending: VecDeque<(FrameId, T)>,
    next_id: u64,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameQueue<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Queue `task` for the next frame.
    pub fn schedule(&mut self, task: T) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.pending.push_back((id, task));
        id
    }

    /// Take every task scheduled so far, in scheduling order.
    ///
    /// Anything scheduled after this call lands in the following frame.
    pub fn begin_frame(&mut self) -> Vec<(FrameId, T)> {
        self.pending.drain(..).collect()
    }

    /// Number of tasks waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no task is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
