use crossbeam_channel as channel;
use std::time::Duration;

/// Delayed work for the control surface.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Task {
    /// Next toggle of the blinking button `note`, for the blink run `generation`.
    Blink { note: u8, generation: u32 },
    /// Ends the bootstrap sequence.
    ResetRings,
}

pub trait Scheduler {
    /// Hands `task` back to the control surface after `delay`.
    fn schedule(&mut self, delay: Duration, task: Task);
}

/// Schedules tasks on a `timer` thread.
///
/// Expired tasks are not executed on the timer thread: they are sent to the
/// receiver returned by [`TimerScheduler::new`] so that the controller loop runs
/// them in between MIDI dispatch and render passes.
pub struct TimerScheduler {
    timer: timer::Timer,
    task_tx: channel::Sender<Task>,
}

impl TimerScheduler {
    pub fn new() -> (Self, channel::Receiver<Task>) {
        let (task_tx, task_rx) = channel::unbounded();

        (
            Self {
                timer: timer::Timer::new(),
                task_tx,
            },
            task_rx,
        )
    }
}

impl Scheduler for TimerScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) {
        let delay = match chrono::Duration::from_std(delay) {
            Ok(delay) => delay,
            Err(err) => {
                log::error!("Can't schedule {task:?} in {delay:?}: {err}");
                return;
            }
        };

        let task_tx = self.task_tx.clone();
        self.timer
            .schedule_with_delay(delay, move || {
                let _ = task_tx.send(task);
            })
            .ignore();
    }
}
