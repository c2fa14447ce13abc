use std::collections::VecDeque;

use crate::character::Side;
use crate::slot::SlotPosition;

/// A pending slot resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionRequest {
    pub position: SlotPosition,
    pub owner: Side,
}

/// FIFO of pending slot resolutions. Enqueue order is resolution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionQueue {
    pending: VecDeque<ExecutionRequest>,
}

impl ExecutionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_requests(requests: Vec<ExecutionRequest>) -> Self {
        Self {
            pending: requests.into(),
        }
    }

    pub(crate) fn push(&mut self, request: ExecutionRequest) {
        self.pending.push_back(request);
    }

    pub(crate) fn pop(&mut self) -> Option<ExecutionRequest> {
        self.pending.pop_front()
    }

    /// Drops every pending request, returning how many were dropped.
    pub(crate) fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExecutionRequest> {
        self.pending.iter()
    }
}
