use crossbeam_channel as channel;
use std::sync::Arc;

use super::{normalize, Daw, Error, Event, VALUE_MAX};

const BEATS_PER_BAR: f64 = 4.0;
const DEFAULT_VOLUME: f64 = 0.54;
const CENTER_PAN: f64 = 0.5;

#[derive(Debug)]
struct Track {
    name: Arc<str>,
    volume: f64,
    pan: f64,
    solo: bool,
    mute: bool,
    arm: bool,
}

impl Track {
    fn new(name: Arc<str>) -> Self {
        Self {
            name,
            volume: DEFAULT_VOLUME,
            pan: CENTER_PAN,
            solo: false,
            mute: false,
            arm: false,
        }
    }
}

#[derive(Debug, Default)]
struct Transport {
    is_playing: bool,
    is_record_armed: bool,
    is_loop_enabled: bool,
    is_metronome_enabled: bool,
    position: f64,
}

/// An in-process mixer & transport.
///
/// Cursor track observations are sent to the receiver returned by [`LocalSession::new`].
#[derive(Debug)]
pub struct LocalSession {
    tracks: Vec<Track>,
    cursor: usize,
    transport: Transport,
    master_volume: f64,
    last_notification: Option<Arc<str>>,
    evt_tx: channel::Sender<Event>,
}

impl LocalSession {
    pub fn new<I, S>(track_names: I) -> (Self, channel::Receiver<Event>)
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let (evt_tx, evt_rx) = channel::unbounded();

        let this = Self {
            tracks: track_names
                .into_iter()
                .map(|name| Track::new(name.into()))
                .collect(),
            cursor: 0,
            transport: Transport::default(),
            master_volume: DEFAULT_VOLUME,
            last_notification: None,
            evt_tx,
        };

        if let Err(err) = this.announce_cursor() {
            log::error!("Local session: {err}");
        }

        (this, evt_rx)
    }

    pub fn cursor_name(&self) -> Option<Arc<str>> {
        self.tracks.get(self.cursor).map(|track| track.name.clone())
    }

    pub fn position(&self) -> f64 {
        self.transport.position
    }

    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }

    /// Normalized volume of the cursor track.
    pub fn track_volume(&self) -> Option<f64> {
        self.tracks.get(self.cursor).map(|track| track.volume)
    }

    /// Normalized pan of the cursor track.
    pub fn track_pan(&self) -> Option<f64> {
        self.tracks.get(self.cursor).map(|track| track.pan)
    }

    pub fn last_notification(&self) -> Option<Arc<str>> {
        self.last_notification.clone()
    }

    fn cursor_track(&self) -> Option<&Track> {
        self.tracks.get(self.cursor)
    }

    fn cursor_track_mut(&mut self) -> Result<&mut Track, Error> {
        self.tracks.get_mut(self.cursor).ok_or(Error::NoCursorTrack)
    }

    /// Sends the observable values of the cursor track.
    fn announce_cursor(&self) -> Result<(), Error> {
        if let Some(track) = self.cursor_track() {
            self.evt_tx.send(Event::TrackName(track.name.clone()))?;
            self.evt_tx.send(volume_event(track.volume))?;
            self.evt_tx.send(Event::TrackPan(track.pan))?;
        }

        Ok(())
    }

    fn move_cursor(&mut self, cursor: usize) -> Result<(), Error> {
        if cursor == self.cursor || cursor >= self.tracks.len() {
            return Ok(());
        }

        self.cursor = cursor;
        log::debug!("Local session: cursor on {:?}", self.cursor_name());

        self.announce_cursor()
    }
}

fn volume_event(volume: f64) -> Event {
    Event::TrackVolume((volume * VALUE_MAX).round())
}

impl Daw for LocalSession {
    fn play(&mut self) -> Result<(), Error> {
        self.transport.is_playing = true;
        log::debug!("Local session: play");

        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        if !self.transport.is_playing {
            self.transport.position = 0.0;
        }
        self.transport.is_playing = false;
        log::debug!("Local session: stop @ {}", self.transport.position);

        Ok(())
    }

    fn fast_forward(&mut self) -> Result<(), Error> {
        self.transport.position += BEATS_PER_BAR;
        log::debug!("Local session: position {}", self.transport.position);

        Ok(())
    }

    fn rewind(&mut self) -> Result<(), Error> {
        self.transport.position = (self.transport.position - BEATS_PER_BAR).max(0.0);
        log::debug!("Local session: position {}", self.transport.position);

        Ok(())
    }

    fn record(&mut self) -> Result<(), Error> {
        self.transport.is_record_armed = !self.transport.is_record_armed;
        log::debug!(
            "Local session: record armed {}",
            self.transport.is_record_armed
        );

        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.transport.is_playing
    }

    fn is_record_armed(&self) -> bool {
        self.transport.is_record_armed
    }

    fn is_loop_enabled(&self) -> bool {
        self.transport.is_loop_enabled
    }

    fn set_loop_enabled(&mut self, enabled: bool) -> Result<(), Error> {
        self.transport.is_loop_enabled = enabled;

        Ok(())
    }

    fn is_metronome_enabled(&self) -> bool {
        self.transport.is_metronome_enabled
    }

    fn set_metronome_enabled(&mut self, enabled: bool) -> Result<(), Error> {
        self.transport.is_metronome_enabled = enabled;

        Ok(())
    }

    fn select_previous(&mut self) -> Result<(), Error> {
        match self.cursor.checked_sub(1) {
            Some(cursor) => self.move_cursor(cursor),
            None => Ok(()),
        }
    }

    fn select_next(&mut self) -> Result<(), Error> {
        self.move_cursor(self.cursor + 1)
    }

    fn set_track_volume(&mut self, value: f64) -> Result<(), Error> {
        let volume = normalize(value)?;
        self.cursor_track_mut()?.volume = volume;

        self.evt_tx.send(volume_event(volume))?;

        Ok(())
    }

    fn set_track_pan(&mut self, value: f64) -> Result<(), Error> {
        let pan = normalize(value)?;
        self.cursor_track_mut()?.pan = pan;

        self.evt_tx.send(Event::TrackPan(pan))?;

        Ok(())
    }

    fn is_solo(&self) -> bool {
        self.cursor_track().map_or(false, |track| track.solo)
    }

    fn set_solo(&mut self, solo: bool) -> Result<(), Error> {
        self.cursor_track_mut()?.solo = solo;

        Ok(())
    }

    fn is_muted(&self) -> bool {
        self.cursor_track().map_or(false, |track| track.mute)
    }

    fn set_muted(&mut self, muted: bool) -> Result<(), Error> {
        self.cursor_track_mut()?.mute = muted;

        Ok(())
    }

    fn is_armed(&self) -> bool {
        self.cursor_track().map_or(false, |track| track.arm)
    }

    fn set_armed(&mut self, armed: bool) -> Result<(), Error> {
        self.cursor_track_mut()?.arm = armed;

        Ok(())
    }

    fn set_master_volume(&mut self, value: f64) -> Result<(), Error> {
        self.master_volume = normalize(value)?;

        Ok(())
    }

    fn show_notification(&mut self, text: &str) {
        log::info!("{text}");
        self.last_notification = Some(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(evt_rx: &channel::Receiver<Event>) -> Vec<Event> {
        evt_rx.try_iter().collect()
    }

    #[test]
    fn announces_first_track() {
        let (_session, evt_rx) = LocalSession::new(["Drums", "Bass"]);

        assert_eq!(
            drain(&evt_rx),
            vec![
                Event::TrackName("Drums".into()),
                Event::TrackVolume(69.0),
                Event::TrackPan(0.5),
            ]
        );
    }

    #[test]
    fn cursor_stops_at_both_ends() {
        let (mut session, evt_rx) = LocalSession::new(["Drums", "Bass"]);
        drain(&evt_rx);

        session.select_previous().unwrap();
        assert!(drain(&evt_rx).is_empty());

        session.select_next().unwrap();
        assert_eq!(session.cursor_name().as_deref(), Some("Bass"));
        assert_eq!(drain(&evt_rx)[0], Event::TrackName("Bass".into()));

        session.select_next().unwrap();
        assert!(drain(&evt_rx).is_empty());
    }

    #[test]
    fn track_values_on_controller_scale() {
        let (mut session, evt_rx) = LocalSession::new(["Drums"]);
        drain(&evt_rx);

        session.set_track_volume(127.0).unwrap();
        session.set_track_pan(0.0).unwrap();
        assert_eq!(
            drain(&evt_rx),
            vec![Event::TrackVolume(127.0), Event::TrackPan(0.0)]
        );

        assert!(matches!(
            session.set_track_volume(200.0),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn empty_session_has_no_cursor() {
        let (mut session, evt_rx) = LocalSession::new(Vec::<String>::new());
        assert!(drain(&evt_rx).is_empty());

        assert!(matches!(session.set_solo(true), Err(Error::NoCursorTrack)));
        assert!(!session.is_solo());
    }

    #[test]
    fn stop_twice_returns_to_start() {
        let (mut session, _evt_rx) = LocalSession::new(["Drums"]);

        session.fast_forward().unwrap();
        session.fast_forward().unwrap();
        session.rewind().unwrap();
        assert_eq!(session.position(), 4.0);

        session.play().unwrap();
        session.stop().unwrap();
        assert_eq!(session.position(), 4.0);
        session.stop().unwrap();
        assert_eq!(session.position(), 0.0);
    }
}
