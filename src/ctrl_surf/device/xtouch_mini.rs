//! Behringer X-Touch Mini hardware map and control assignments.

use crate::ctrl_surf::{
    button::Button,
    control::{Command, Fader, Feedback},
    encoder::{Behavior, Encoder, Target},
    Error, Registry,
};

pub mod note {
    pub const ENC_BUTTON_TRACK_VOLUME: u8 = 0x00;
    pub const ENC_BUTTON_TRACK_PAN: u8 = 0x01;

    pub const TRACK_PREV: u8 = 0x08;
    pub const TRACK_NEXT: u8 = 0x09;
    pub const TRACK_SOLO: u8 = 0x0a;
    pub const TRACK_MUTE: u8 = 0x0b;
    pub const TRACK_ARM: u8 = 0x0f;

    pub const CLICK: u8 = 0x11;
    pub const BACK: u8 = 0x12;
    pub const FWD: u8 = 0x13;
    pub const LOOP: u8 = 0x14;
    pub const STOP: u8 = 0x15;
    pub const PLAY: u8 = 0x16;
    pub const REC: u8 = 0x17;
}

pub mod cc {
    pub const ENC_TRACK_VOLUME: u8 = 0x01;
    pub const ENC_TRACK_PAN: u8 = 0x02;
    pub const FADER: u8 = 0x09;

    /// Encoders use the addresses `1..=ENCODER_COUNT`.
    pub const ENCODER_COUNT: u8 = 8;
}

/// Builds the controls of the device.
///
/// When `ring_modes` is set, the track encoders get their ring behavior at start.
pub fn registry(ring_modes: bool) -> Result<Registry, Error> {
    use Command::*;

    let mut registry = Registry::default();

    let mut volume = Encoder::new(cc::ENC_TRACK_VOLUME, Target::TrackVolume);
    let mut pan = Encoder::new(cc::ENC_TRACK_PAN, Target::TrackPan);
    if ring_modes {
        volume = volume.with_behavior(Behavior::Single);
        pan = pan.with_behavior(Behavior::Pan);
    }

    registry.add_cc(cc::FADER, Fader)?;
    registry.add_cc(cc::ENC_TRACK_VOLUME, volume)?;
    registry.add_cc(cc::ENC_TRACK_PAN, pan)?;

    let buttons = [
        Button::new(note::ENC_BUTTON_TRACK_VOLUME).on_press(ResetVolume),
        Button::new(note::ENC_BUTTON_TRACK_PAN).on_press(ResetPan),
        Button::new(note::TRACK_PREV)
            .on_press(PreviousTrack)
            .with_feedback(Feedback::TrackName),
        Button::new(note::TRACK_NEXT)
            .on_press(NextTrack)
            .with_feedback(Feedback::TrackName),
        Button::new(note::CLICK)
            .on_press(ToggleMetronome)
            .with_feedback(Feedback::Metronome),
        Button::new(note::BACK).on_press(Rewind),
        Button::new(note::FWD).on_press(FastForward),
        Button::new(note::LOOP)
            .on_press(ToggleLoop)
            .with_feedback(Feedback::Loop),
        Button::new(note::STOP)
            .on_press(Stop)
            .with_feedback(Feedback::Stopped)
            .with_led(note::PLAY),
        Button::new(note::PLAY)
            .on_press(Play)
            .with_feedback(Feedback::Playing),
        Button::new(note::REC)
            .on_press(Record)
            .with_feedback(Feedback::Record),
        Button::new(note::TRACK_SOLO)
            .on_press(ToggleSolo)
            .with_feedback(Feedback::Solo),
        Button::new(note::TRACK_MUTE)
            .on_press(ToggleMute)
            .with_feedback(Feedback::Mute),
        Button::new(note::TRACK_ARM)
            .on_press(ToggleArm)
            .with_feedback(Feedback::Arm),
    ];

    for button in buttons {
        registry.add_note(button.note(), button)?;
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_duplicates() {
        let registry = registry(false).unwrap();
        assert_eq!(registry.controls().count(), 17);
    }

    #[test]
    fn ring_modes() {
        use crate::ctrl_surf::{testing::bytes_of, Control, Output};

        let configure = |ring_modes| {
            let registry = registry(ring_modes).unwrap();
            let mut out = Output::default();
            for encoder in registry.controls().filter_map(Control::as_encoder) {
                encoder.configure(&mut out);
            }
            bytes_of(out.take())
        };

        assert!(configure(false).is_empty());
        assert_eq!(
            configure(true),
            vec![vec![0xbb, 0x01, Behavior::Single as u8], vec![0xbb, 0x02, Behavior::Pan as u8]],
        );
    }
}
