mod error;
pub use error::Error;

pub mod msg;
pub use msg::{Msg, MsgList};

pub mod port;
pub use port::{PortsIn, PortsOut};

/// Mask for the 7 bits carried by MIDI data bytes.
pub const DATA_MASK: u8 = 0x7f;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tag(u8);

impl Tag {
    pub const NOTE_OFF: Tag = Tag(0x80);
    pub const NOTE_ON: Tag = Tag(0x90);
    pub const CONTROL_CHANGE: Tag = Tag(0xb0);

    pub const fn from_status(status: u8) -> Self {
        Self(status & 0xf0)
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag.0
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Channel(u8);

impl Channel {
    pub const fn from_status(status: u8) -> Self {
        Self(status & 0x0f)
    }

    /// Builds a `Channel` from its 1-based number as shown to users.
    ///
    /// Out of range numbers wrap on the low nibble: `0` gives channel 16.
    pub const fn from_number(number: u8) -> Self {
        Self(number.wrapping_sub(1) & 0x0f)
    }
}

impl From<Channel> for u8 {
    fn from(chan: Channel) -> u8 {
        chan.0
    }
}

impl std::ops::BitOr<Channel> for Tag {
    type Output = u8;

    fn bitor(self, chan: Channel) -> Self::Output {
        self.0 | chan.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_and_channel_from_status() {
        assert_eq!(Tag::from_status(0x9a), Tag::NOTE_ON);
        assert_eq!(Tag::from_status(0xbb), Tag::CONTROL_CHANGE);
        assert_eq!(u8::from(Channel::from_status(0x9a)), 0x0a);
    }

    #[test]
    fn channel_numbers_are_one_based() {
        assert_eq!(Tag::CONTROL_CHANGE | Channel::from_number(12), 0xbb);
        assert_eq!(Tag::CONTROL_CHANGE | Channel::from_number(1), 0xb0);
        assert_eq!(Tag::CONTROL_CHANGE | Channel::from_number(0), 0xbf);
    }
}
