use super::{
    button::{Button, LedState},
    encoder::Encoder,
    output::Output,
    scheduler::Scheduler,
    track::RemoteTrackState,
};
use crate::daw::{self, Daw};

/// Reset value for the cursor track volume, on the `0..=127` scale.
pub const VOLUME_RESET: f64 = 68.6;
/// Reset value for the cursor track pan, on the `0..=127` scale.
pub const PAN_RESET: f64 = daw::VALUE_MAX / 2.0;

/// What controls need while handling a message or rendering.
pub struct Context<'a> {
    pub daw: &'a mut dyn Daw,
    pub track: &'a mut RemoteTrackState,
    pub out: &'a mut Output,
    pub scheduler: &'a mut dyn Scheduler,
}

/// Button press actions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    ResetVolume,
    ResetPan,
    PreviousTrack,
    NextTrack,
    Play,
    Stop,
    FastForward,
    Rewind,
    ToggleLoop,
    ToggleMetronome,
    Record,
    ToggleSolo,
    ToggleMute,
    ToggleArm,
}

impl Command {
    pub fn run(self, daw: &mut dyn Daw) -> Result<(), daw::Error> {
        use Command::*;

        log::debug!("Command {self:?}");

        match self {
            ResetVolume => daw.set_track_volume(VOLUME_RESET),
            ResetPan => daw.set_track_pan(PAN_RESET),
            PreviousTrack => daw.select_previous(),
            NextTrack => daw.select_next(),
            Play => daw.play(),
            Stop => daw.stop(),
            FastForward => daw.fast_forward(),
            Rewind => daw.rewind(),
            ToggleLoop => {
                let is_enabled = daw.is_loop_enabled();
                daw.set_loop_enabled(!is_enabled)
            }
            ToggleMetronome => {
                let is_enabled = daw.is_metronome_enabled();
                daw.set_metronome_enabled(!is_enabled)
            }
            Record => daw.record(),
            ToggleSolo => {
                let is_solo = daw.is_solo();
                daw.set_solo(!is_solo)
            }
            ToggleMute => {
                let is_muted = daw.is_muted();
                daw.set_muted(!is_muted)
            }
            ToggleArm => {
                let is_armed = daw.is_armed();
                daw.set_armed(!is_armed)
            }
        }
    }
}

/// What a button shows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Feedback {
    /// Notifies the name of a newly focused track.
    TrackName,
    /// Solid while playing.
    Playing,
    /// Off while stopped.
    Stopped,
    Loop,
    Metronome,
    Record,
    Solo,
    Mute,
    Arm,
}

impl Feedback {
    /// Returns the LED state to show, `None` meaning "leave it as it is".
    pub fn led_state(self, daw: &dyn Daw) -> Option<LedState> {
        use Feedback::*;
        use LedState::*;

        let state = match self {
            TrackName => return None,
            Playing => {
                if !daw.is_playing() {
                    return None;
                }
                Solid
            }
            Stopped => {
                if daw.is_playing() {
                    return None;
                }
                Off
            }
            Loop => solid_or_off(daw.is_loop_enabled()),
            Metronome => solid_or_off(daw.is_metronome_enabled()),
            Record => match (daw.is_record_armed(), daw.is_playing()) {
                (true, true) => Solid,
                (true, false) => Blinking,
                (false, _) => Off,
            },
            Solo => blinking_or_off(daw.is_solo()),
            Mute => blinking_or_off(daw.is_muted()),
            Arm => {
                if daw.is_record_armed() && daw.is_armed() && daw.is_playing() {
                    Solid
                } else if daw.is_armed() {
                    Blinking
                } else {
                    Off
                }
            }
        };

        Some(state)
    }
}

fn solid_or_off(is_on: bool) -> LedState {
    if is_on {
        LedState::Solid
    } else {
        LedState::Off
    }
}

fn blinking_or_off(is_on: bool) -> LedState {
    if is_on {
        LedState::Blinking
    } else {
        LedState::Off
    }
}

/// Relays its position to the master volume. The fader has no motor.
#[derive(Debug, Default)]
pub struct Fader;

impl Fader {
    pub fn handle(&mut self, value: u8, ctx: &mut Context<'_>) -> Result<(), daw::Error> {
        ctx.daw.set_master_volume(value as f64)
    }
}

#[derive(Debug)]
pub enum Control {
    Button(Button),
    Encoder(Encoder),
    Fader(Fader),
}

impl Control {
    pub fn handle(&mut self, value: u8, ctx: &mut Context<'_>) -> Result<(), daw::Error> {
        match self {
            Control::Button(button) => button.handle(ctx),
            Control::Encoder(encoder) => encoder.handle(value, ctx),
            Control::Fader(fader) => fader.handle(value, ctx),
        }
    }

    pub fn render(&mut self, ctx: &mut Context<'_>) {
        match self {
            Control::Button(button) => button.render(ctx),
            Control::Encoder(encoder) => encoder.render(ctx),
            Control::Fader(_) => (),
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Control::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn as_encoder(&self) -> Option<&Encoder> {
        match self {
            Control::Encoder(encoder) => Some(encoder),
            _ => None,
        }
    }
}

impl From<Button> for Control {
    fn from(button: Button) -> Self {
        Control::Button(button)
    }
}

impl From<Encoder> for Control {
    fn from(encoder: Encoder) -> Self {
        Control::Encoder(encoder)
    }
}

impl From<Fader> for Control {
    fn from(fader: Fader) -> Self {
        Control::Fader(fader)
    }
}
