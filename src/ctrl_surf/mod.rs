pub mod button;
pub mod control;
pub use control::{Context, Control};

mod device;
pub use device::xtouch_mini;

mod dirty;

pub mod encoder;

pub mod error;
pub use error::Error;

pub mod output;
pub use output::Output;

pub mod registry;
pub use registry::Registry;

pub mod scheduler;
pub use scheduler::{Scheduler, Task, TimerScheduler};

pub mod surface;
pub use surface::XTouchMini;

pub mod track;
pub use track::RemoteTrackState;

#[cfg(test)]
pub(crate) mod testing;

use crate::{
    daw::{self, Daw},
    midi::{self, MsgList},
};

/// A control surface as seen by the controller loop.
///
/// Each call returns the messages to send to the device.
pub trait ControlSurface {
    /// Device initialization.
    fn start(&mut self, scheduler: &mut dyn Scheduler) -> MsgList;

    fn msg_from_device(
        &mut self,
        msg: &midi::Msg,
        daw: &mut dyn Daw,
        scheduler: &mut dyn Scheduler,
    ) -> MsgList;

    fn event_from_daw(&mut self, event: daw::Event);

    /// Render pass.
    fn flush(&mut self, daw: &mut dyn Daw, scheduler: &mut dyn Scheduler) -> MsgList;

    fn run_task(&mut self, task: Task, scheduler: &mut dyn Scheduler) -> MsgList;

    /// Turns off everything the surface lit.
    fn reset(&mut self) -> MsgList;
}
