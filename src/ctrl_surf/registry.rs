use std::collections::BTreeMap;

use super::{control::Control, Error};

/// Controls by hardware address.
///
/// Notes and control changes are separate address spaces: the same number can be
/// used once in each.
#[derive(Debug, Default)]
pub struct Registry {
    notes: BTreeMap<u8, Control>,
    ccs: BTreeMap<u8, Control>,
}

impl Registry {
    pub fn add_note(&mut self, note: u8, control: impl Into<Control>) -> Result<(), Error> {
        if self.notes.contains_key(&note) {
            return Err(Error::DuplicateNote(note));
        }

        self.notes.insert(note, control.into());

        Ok(())
    }

    pub fn add_cc(&mut self, cc: u8, control: impl Into<Control>) -> Result<(), Error> {
        if self.ccs.contains_key(&cc) {
            return Err(Error::DuplicateCc(cc));
        }

        self.ccs.insert(cc, control.into());

        Ok(())
    }

    pub fn note_mut(&mut self, note: u8) -> Option<&mut Control> {
        self.notes.get_mut(&note)
    }

    pub fn cc_mut(&mut self, cc: u8) -> Option<&mut Control> {
        self.ccs.get_mut(&cc)
    }

    /// Note controls first, then control change controls, each by address.
    pub fn controls_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.notes.values_mut().chain(self.ccs.values_mut())
    }

    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.notes.values().chain(self.ccs.values())
    }
}
