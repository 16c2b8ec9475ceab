use crate::midi::{self, MsgList, DATA_MASK};

pub const DEFAULT_NOTE_STATUS: u8 = 0x9a;
pub const DEFAULT_CC_CHANNEL: u8 = 12;

/// Outgoing messages for the device, buffered until the controller sends them.
///
/// LED notes are echo suppressed: a note with the velocity last sent for the same
/// LED is dropped. Ring messages always go through.
#[derive(Debug)]
pub struct Output {
    note_status: u8,
    cc_chan: midi::Channel,
    leds: [Option<u8>; 128],
    msg_list: MsgList,
}

impl Default for Output {
    fn default() -> Self {
        Self::new(DEFAULT_NOTE_STATUS, DEFAULT_CC_CHANNEL)
    }
}

impl Output {
    /// `cc_channel` is the 1-based MIDI channel of control change messages.
    pub fn new(note_status: u8, cc_channel: u8) -> Self {
        Self {
            note_status,
            cc_chan: midi::Channel::from_number(cc_channel),
            leds: [None; 128],
            msg_list: MsgList::new(),
        }
    }

    pub fn send_note(&mut self, note: u8, velocity: u8) {
        let velocity = velocity & DATA_MASK;
        let led = &mut self.leds[(note & DATA_MASK) as usize];
        if *led == Some(velocity) {
            return;
        }

        *led = Some(velocity);
        self.msg_list
            .push(midi::Msg::note(self.note_status, note, velocity));
    }

    pub fn send_cc(&mut self, cc: u8, value: u8) {
        self.msg_list
            .push(midi::Msg::control_change(self.cc_chan, cc, value));
    }

    /// Forgets what the LEDs are showing, e.g. after a device reset.
    pub fn forget_leds(&mut self) {
        self.leds = [None; 128];
    }

    pub fn take(&mut self) -> MsgList {
        std::mem::take(&mut self.msg_list)
    }
}
