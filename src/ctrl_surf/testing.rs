use std::time::Duration;

use super::scheduler::{Scheduler, Task};
use crate::midi::MsgList;

/// Records scheduled tasks so that tests fire them at will.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pub pending: Vec<(Duration, Task)>,
}

impl ManualScheduler {
    /// Removes the oldest pending task.
    pub fn pop(&mut self) -> Option<Task> {
        if self.pending.is_empty() {
            return None;
        }

        Some(self.pending.remove(0).1)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) {
        self.pending.push((delay, task));
    }
}

pub fn bytes_of(msg_list: MsgList) -> Vec<Vec<u8>> {
    msg_list
        .into_iter()
        .map(|msg| msg.inner().to_vec())
        .collect()
}
