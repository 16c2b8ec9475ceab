use super::{Channel, Tag, DATA_MASK};
use crate::bytes;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Msg(Box<[u8]>);

impl Msg {
    /// A note message with a raw status byte.
    ///
    /// The X-Touch Mini LEDs listen on a fixed status which mixes tag and channel,
    /// hence the raw byte instead of a `Tag` / `Channel` pair.
    pub fn note(status: u8, note: u8, velocity: u8) -> Self {
        Self::from([status, note & DATA_MASK, velocity & DATA_MASK])
    }

    pub fn control_change(chan: Channel, cc: u8, value: u8) -> Self {
        Self::from([Tag::CONTROL_CHANGE | chan, cc & DATA_MASK, value & DATA_MASK])
    }

    pub fn inner(&self) -> &[u8] {
        self.0.as_ref()
    }

    pub fn display(&self) -> bytes::Displayable {
        bytes::Displayable::from(self.0.as_ref())
    }

    pub fn tag(&self) -> Option<Tag> {
        self.0.first().map(|&status| Tag::from_status(status))
    }

    /// Returns the two data bytes of a channel voice message.
    pub fn data(&self) -> Option<(u8, u8)> {
        match self.0.as_ref() {
            [_, data1, data2, ..] => Some((*data1, *data2)),
            _ => None,
        }
    }
}

impl<const S: usize> From<[u8; S]> for Msg {
    fn from(buf: [u8; S]) -> Self {
        Self(buf.into())
    }
}

impl From<&[u8]> for Msg {
    fn from(buf: &[u8]) -> Self {
        Self(buf.into())
    }
}

impl std::ops::Deref for Msg {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct MsgList(Vec<Msg>);

impl MsgList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, msg: impl Into<Msg>) {
        self.0.push(msg.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Msg> {
        self.0.iter()
    }
}

impl IntoIterator for MsgList {
    type Item = Msg;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
