use super::{control::Context, output::Output};
use crate::daw;

/// Offset from an encoder address to its ring display address.
pub const RING_OFFSET: u8 = 8;
/// Highest ring step.
pub const MAX_STEP: u8 = 13;
/// Offset from a step to the same step blinking.
const BLINKING_OFFSET: u8 = 13;

mod ring_code {
    pub const OFF: u8 = 0;
    pub const ALL_ON: u8 = 27;
    pub const ALL_BLINKING: u8 = 28;
}

/// How the device draws positions on an encoder ring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Behavior {
    Single = 0,
    Pan = 1,
    Fan = 2,
    Spread = 3,
    Trim = 4,
}

/// Maps a volume on the `0..=127` scale to a ring step.
pub fn volume_to_step(volume: f64) -> u8 {
    (volume / daw::VALUE_MAX * MAX_STEP as f64)
        .floor()
        .clamp(0.0, MAX_STEP as f64) as u8
}

/// Maps a normalized pan to a ring step.
pub fn pan_to_step(pan: f64) -> u8 {
    (pan * 12.0 + 1.0).clamp(0.0, MAX_STEP as f64) as u8
}

/// LED ring of the encoder at `cc`.
#[derive(Clone, Copy, Debug)]
pub struct Ring {
    cc: u8,
}

impl Ring {
    pub const fn new(cc: u8) -> Self {
        Self { cc }
    }

    pub fn address(self) -> u8 {
        self.cc + RING_OFFSET
    }

    pub fn set_value(self, step: u8, out: &mut Output) {
        out.send_cc(self.address(), step.min(MAX_STEP));
    }

    pub fn set_value_blinking(self, step: u8, out: &mut Output) {
        out.send_cc(self.address(), step.min(MAX_STEP) + BLINKING_OFFSET);
    }

    pub fn set_off(self, out: &mut Output) {
        out.send_cc(self.address(), ring_code::OFF);
    }

    pub fn set_all_on(self, out: &mut Output) {
        out.send_cc(self.address(), ring_code::ALL_ON);
    }

    pub fn set_all_blinking(self, out: &mut Output) {
        out.send_cc(self.address(), ring_code::ALL_BLINKING);
    }

    pub fn set_behavior(self, behavior: Behavior, out: &mut Output) {
        out.send_cc(self.cc, behavior as u8);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    TrackVolume,
    TrackPan,
}

#[derive(Debug)]
pub struct Encoder {
    ring: Ring,
    target: Target,
    behavior: Option<Behavior>,
}

impl Encoder {
    pub fn new(cc: u8, target: Target) -> Self {
        Self {
            ring: Ring::new(cc),
            target,
            behavior: None,
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Sends the ring behavior, if any. Meant to be called once.
    pub fn configure(&self, out: &mut Output) {
        if let Some(behavior) = self.behavior {
            self.ring.set_behavior(behavior, out);
        }
    }

    pub fn handle(&mut self, value: u8, ctx: &mut Context<'_>) -> Result<(), daw::Error> {
        match self.target {
            Target::TrackVolume => ctx.daw.set_track_volume(value as f64),
            Target::TrackPan => ctx.daw.set_track_pan(value as f64),
        }
    }

    pub fn render(&mut self, ctx: &mut Context<'_>) {
        match self.target {
            Target::TrackVolume => {
                if let Some(volume) = ctx.track.take_volume() {
                    self.ring.set_value(volume_to_step(volume), ctx.out);
                }
            }
            Target::TrackPan => {
                if let Some(pan) = ctx.track.take_pan() {
                    self.ring.set_value(pan_to_step(pan), ctx.out);
                }
            }
        }
    }
}
