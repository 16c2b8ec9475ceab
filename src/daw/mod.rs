//! Workstation boundary.
//!
//! The control surface only sees the mixer & transport through the [`Daw`] trait
//! and gets cursor track changes as [`Event`]s, the way a host delivers its
//! value observers.

use crossbeam_channel as channel;
use std::sync::Arc;

pub mod session;
pub use session::LocalSession;

/// Upper bound of the controller value scale used by setters and volume observations.
pub const VALUE_MAX: f64 = 127.0;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No track under cursor")]
    NoCursorTrack,

    #[error("Value out of range: {}", .0)]
    OutOfRange(f64),

    #[error("DAW event channel closed: {}", .0)]
    EventSend(#[from] channel::SendError<Event>),
}

/// A change observed on the cursor track.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    TrackName(Arc<str>),
    /// Volume on the `0..=127` scale.
    TrackVolume(f64),
    /// Normalized pan: `0.0` is hard left, `0.5` center, `1.0` hard right.
    TrackPan(f64),
}

pub trait Daw {
    fn play(&mut self) -> Result<(), Error>;
    fn stop(&mut self) -> Result<(), Error>;
    fn fast_forward(&mut self) -> Result<(), Error>;
    fn rewind(&mut self) -> Result<(), Error>;
    /// Toggles arranger recording.
    fn record(&mut self) -> Result<(), Error>;

    fn is_playing(&self) -> bool;
    fn is_record_armed(&self) -> bool;

    fn is_loop_enabled(&self) -> bool;
    fn set_loop_enabled(&mut self, enabled: bool) -> Result<(), Error>;

    fn is_metronome_enabled(&self) -> bool;
    fn set_metronome_enabled(&mut self, enabled: bool) -> Result<(), Error>;

    fn select_previous(&mut self) -> Result<(), Error>;
    fn select_next(&mut self) -> Result<(), Error>;

    /// Sets the cursor track volume from a value on the `0..=127` scale.
    fn set_track_volume(&mut self, value: f64) -> Result<(), Error>;
    /// Sets the cursor track pan from a value on the `0..=127` scale.
    fn set_track_pan(&mut self, value: f64) -> Result<(), Error>;

    fn is_solo(&self) -> bool;
    fn set_solo(&mut self, solo: bool) -> Result<(), Error>;

    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool) -> Result<(), Error>;

    fn is_armed(&self) -> bool;
    fn set_armed(&mut self, armed: bool) -> Result<(), Error>;

    /// Sets the master track volume from a value on the `0..=127` scale.
    fn set_master_volume(&mut self, value: f64) -> Result<(), Error>;

    /// Displays a transient notification to the user.
    fn show_notification(&mut self, text: &str);
}

/// Converts a value on the `0..=127` scale to `0.0..=1.0`.
pub fn normalize(value: f64) -> Result<f64, Error> {
    if !(0.0..=VALUE_MAX).contains(&value) {
        return Err(Error::OutOfRange(value));
    }

    Ok(value / VALUE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bounds() {
        assert_eq!(normalize(0.0).unwrap(), 0.0);
        assert_eq!(normalize(127.0).unwrap(), 1.0);
        assert!((normalize(127.0 / 2.0).unwrap() - 0.5).abs() < f64::EPSILON);
        assert!(matches!(normalize(128.0), Err(Error::OutOfRange(_))));
        assert!(matches!(normalize(f64::NAN), Err(Error::OutOfRange(_))));
    }
}
