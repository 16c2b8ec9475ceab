pub mod bytes;

pub mod controller;
pub use controller::Controller;

pub mod ctrl_surf;
pub use ctrl_surf::ControlSurface;

pub mod daw;
pub mod midi;

pub mod settings;
pub use settings::{Args, Settings};
