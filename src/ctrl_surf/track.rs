use std::sync::Arc;

use super::dirty::Dirty;
use crate::daw;

/// Cursor track values as mirrored from the DAW.
///
/// Written by DAW observations, drained by the render pass.
#[derive(Debug, Default)]
pub struct RemoteTrackState {
    name: Dirty<Arc<str>>,
    volume: Dirty<f64>,
    pan: Dirty<f64>,
}

impl RemoteTrackState {
    pub fn set_name(&mut self, name: Arc<str>) {
        self.name.set(name);
    }

    pub fn take_name(&mut self) -> Option<Arc<str>> {
        self.name.take()
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume.set(volume);
    }

    pub fn take_volume(&mut self) -> Option<f64> {
        self.volume.take()
    }

    pub fn set_pan(&mut self, pan: f64) {
        self.pan.set(pan);
    }

    pub fn take_pan(&mut self) -> Option<f64> {
        self.pan.take()
    }

    pub fn apply(&mut self, event: daw::Event) {
        use daw::Event::*;

        match event {
            TrackName(name) => self.set_name(name),
            TrackVolume(volume) => self.set_volume(volume),
            TrackPan(pan) => self.set_pan(pan),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_tracked_independently() {
        let mut track = RemoteTrackState::default();
        track.apply(daw::Event::TrackVolume(64.0));
        track.apply(daw::Event::TrackName("Bass".into()));

        assert_eq!(track.take_pan(), None);
        assert_eq!(track.take_volume(), Some(64.0));
        assert_eq!(track.take_volume(), None);
        assert_eq!(track.take_name().as_deref(), Some("Bass"));
    }
}
