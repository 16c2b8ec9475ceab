use std::time::Duration;

use super::{
    encoder::Ring,
    scheduler::{Scheduler, Task},
    xtouch_mini::{self, cc::ENCODER_COUNT},
    Context, Control, ControlSurface, Error, Output, Registry, RemoteTrackState,
};
use crate::{
    daw::{self, Daw},
    midi::{self, MsgList, Tag},
};

/// How long the rings blink at start.
pub const RESET_DELAY: Duration = Duration::from_millis(2000);

/// Velocity the device sends for a button press.
const PRESSED: u8 = 127;

fn rings() -> impl Iterator<Item = Ring> {
    (1..=ENCODER_COUNT).map(Ring::new)
}

#[derive(Debug)]
pub struct XTouchMini {
    registry: Registry,
    track: RemoteTrackState,
    out: Output,
    is_starting: bool,
}

impl XTouchMini {
    pub fn try_new(out: Output, ring_modes: bool) -> Result<Self, Error> {
        Ok(Self {
            registry: xtouch_mini::registry(ring_modes)?,
            track: RemoteTrackState::default(),
            out,
            is_starting: false,
        })
    }
}

impl ControlSurface for XTouchMini {
    fn start(&mut self, scheduler: &mut dyn Scheduler) -> MsgList {
        log::debug!("Starting X-Touch Mini");

        self.out.forget_leds();
        for ring in rings() {
            ring.set_all_blinking(&mut self.out);
        }

        for encoder in self.registry.controls().filter_map(Control::as_encoder) {
            encoder.configure(&mut self.out);
        }

        self.is_starting = true;
        scheduler.schedule(RESET_DELAY, Task::ResetRings);

        self.out.take()
    }

    fn msg_from_device(
        &mut self,
        msg: &midi::Msg,
        daw: &mut dyn Daw,
        scheduler: &mut dyn Scheduler,
    ) -> MsgList {
        let (tag, (data1, data2)) = match msg.tag().zip(msg.data()) {
            Some(tag_data) => tag_data,
            None => {
                log::trace!("Ignoring device msg {}", msg.display());
                return MsgList::new();
            }
        };

        let control = match tag {
            Tag::CONTROL_CHANGE => match self.registry.cc_mut(data1) {
                Some(control) => control,
                None => {
                    log::warn!(
                        "Control Change command {data1:#04x} is not supported {}",
                        msg.display()
                    );
                    return MsgList::new();
                }
            },
            Tag::NOTE_ON if data2 == PRESSED => match self.registry.note_mut(data1) {
                Some(control) => control,
                None => {
                    log::warn!(
                        "Note command {data1:#04x} is not supported {}",
                        msg.display()
                    );
                    return MsgList::new();
                }
            },
            _ => {
                log::trace!("Ignoring device msg {}", msg.display());
                return MsgList::new();
            }
        };

        let mut ctx = Context {
            daw,
            track: &mut self.track,
            out: &mut self.out,
            scheduler,
        };

        if let Err(err) = control.handle(data2, &mut ctx) {
            log::error!("Failed to handle {}: {err}", msg.display());
        }

        self.out.take()
    }

    fn event_from_daw(&mut self, event: daw::Event) {
        log::trace!("DAW: {event:?}");
        self.track.apply(event);
    }

    fn flush(&mut self, daw: &mut dyn Daw, scheduler: &mut dyn Scheduler) -> MsgList {
        let mut ctx = Context {
            daw,
            track: &mut self.track,
            out: &mut self.out,
            scheduler,
        };

        for control in self.registry.controls_mut() {
            // Rings are taken by the start sequence, keep their values pending.
            if self.is_starting && matches!(control, Control::Encoder(_)) {
                continue;
            }

            control.render(&mut ctx);
        }

        self.out.take()
    }

    fn run_task(&mut self, task: Task, scheduler: &mut dyn Scheduler) -> MsgList {
        match task {
            Task::Blink { note, generation } => {
                match self.registry.note_mut(note).and_then(Control::as_button_mut) {
                    Some(button) => button.blink_tick(generation, &mut self.out, scheduler),
                    None => log::warn!("Blink tick for unknown button {note:#04x}"),
                }
            }
            Task::ResetRings => {
                log::debug!("Resetting encoder rings");
                for ring in rings() {
                    ring.set_off(&mut self.out);
                }
                self.is_starting = false;
            }
        }

        self.out.take()
    }

    fn reset(&mut self) -> MsgList {
        for button in self.registry.controls_mut().filter_map(Control::as_button_mut) {
            button.stop_blinking(&mut self.out);
        }

        for ring in rings() {
            ring.set_off(&mut self.out);
        }

        self.is_starting = false;

        self.out.take()
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel as channel;

    use super::*;
    use crate::{
        ctrl_surf::{
            button::{LedState, BLINK_INTERVAL},
            testing::{bytes_of, ManualScheduler},
            xtouch_mini::{cc, note},
        },
        daw::LocalSession,
    };

    struct Rig {
        surface: XTouchMini,
        session: LocalSession,
        evt_rx: channel::Receiver<daw::Event>,
        scheduler: ManualScheduler,
    }

    impl Rig {
        fn new() -> Self {
            let (session, evt_rx) = LocalSession::new(["Drums", "Bass", ""]);

            Self {
                surface: XTouchMini::try_new(Output::default(), false).unwrap(),
                session,
                evt_rx,
                scheduler: ManualScheduler::default(),
            }
        }

        fn press(&mut self, note: u8) -> Vec<Vec<u8>> {
            self.device([0x9a, note, 127])
        }

        fn device(&mut self, buf: [u8; 3]) -> Vec<Vec<u8>> {
            let msg = midi::Msg::from(buf);
            bytes_of(
                self.surface
                    .msg_from_device(&msg, &mut self.session, &mut self.scheduler),
            )
        }

        /// Forwards DAW observations, then renders.
        fn flush(&mut self) -> Vec<Vec<u8>> {
            for event in self.evt_rx.try_iter() {
                self.surface.event_from_daw(event);
            }

            bytes_of(self.surface.flush(&mut self.session, &mut self.scheduler))
        }

        fn led(&mut self, note: u8) -> LedState {
            self.surface
                .registry
                .note_mut(note)
                .and_then(Control::as_button_mut)
                .map(|button| button.state())
                .unwrap()
        }
    }

    #[test]
    fn start_sequence() {
        let mut rig = Rig::new();

        let msgs = bytes_of(rig.surface.start(&mut rig.scheduler));
        let expected: Vec<Vec<u8>> = (9..=16).map(|ring| vec![0xbb, ring, 28]).collect();
        assert_eq!(msgs, expected);
        assert_eq!(rig.scheduler.pending, vec![(RESET_DELAY, Task::ResetRings)]);

        // rings keep blinking until the reset task
        assert!(!rig.flush().iter().any(|msg| msg[0] == 0xbb));

        let task = rig.scheduler.pop().unwrap();
        let msgs = bytes_of(rig.surface.run_task(task, &mut rig.scheduler));
        let expected: Vec<Vec<u8>> = (9..=16).map(|ring| vec![0xbb, ring, 0]).collect();
        assert_eq!(msgs, expected);

        // pending track values show up after the reset
        let msgs = rig.flush();
        assert!(msgs.contains(&vec![0xbb, 0x09, 7]));
        assert!(msgs.contains(&vec![0xbb, 0x0a, 7]));
    }

    #[test]
    fn start_sends_ring_behaviors_when_requested() {
        let mut rig = Rig::new();
        rig.surface = XTouchMini::try_new(Output::default(), true).unwrap();

        let msgs = bytes_of(rig.surface.start(&mut rig.scheduler));
        assert!(msgs.contains(&vec![0xbb, cc::ENC_TRACK_VOLUME, 0]));
        assert!(msgs.contains(&vec![0xbb, cc::ENC_TRACK_PAN, 1]));
    }

    #[test]
    fn render_is_idempotent() {
        let mut rig = Rig::new();

        let first = rig.flush();
        assert!(first.contains(&vec![0xbb, 0x09, 7]));
        assert!(first.contains(&vec![0xbb, 0x0a, 7]));
        assert!(first.contains(&vec![0x9a, note::PLAY, 0]));

        assert!(rig.flush().is_empty());
    }

    #[test]
    fn volume_encoder_round_trip() {
        let mut rig = Rig::new();
        rig.flush();

        assert!(rig.device([0xbb, cc::ENC_TRACK_VOLUME, 127]).is_empty());
        assert_eq!(rig.flush(), vec![vec![0xbb, 0x09, 13]]);

        // zero is a value, not an absence
        rig.device([0xbb, cc::ENC_TRACK_VOLUME, 0]);
        assert_eq!(rig.flush(), vec![vec![0xbb, 0x09, 0]]);

        // re-announced values are rendered again
        rig.device([0xbb, cc::ENC_TRACK_VOLUME, 0]);
        assert_eq!(rig.flush(), vec![vec![0xbb, 0x09, 0]]);
    }

    #[test]
    fn pan_encoder_and_reset() {
        let mut rig = Rig::new();
        rig.flush();

        rig.device([0xbb, cc::ENC_TRACK_PAN, 0]);
        assert_eq!(rig.flush(), vec![vec![0xbb, 0x0a, 1]]);

        rig.press(note::ENC_BUTTON_TRACK_PAN);
        assert_eq!(rig.flush(), vec![vec![0xbb, 0x0a, 7]]);

        rig.press(note::ENC_BUTTON_TRACK_VOLUME);
        assert_eq!(rig.flush(), vec![vec![0xbb, 0x09, 7]]);
    }

    #[test]
    fn fader_sets_master_volume_without_feedback() {
        let mut rig = Rig::new();
        rig.flush();

        assert!(rig.device([0xbb, cc::FADER, 127]).is_empty());
        assert_eq!(rig.session.master_volume(), 1.0);
        assert!(rig.flush().is_empty());
    }

    #[test]
    fn unmapped_cc_does_not_disturb_next_msg() {
        let mut rig = Rig::new();
        rig.flush();

        assert!(rig.device([0xbb, 0x30, 0x40]).is_empty());
        rig.device([0xbb, cc::ENC_TRACK_VOLUME, 127]);
        assert_eq!(rig.flush(), vec![vec![0xbb, 0x09, 13]]);
    }

    #[test]
    fn only_full_velocity_note_on_activates() {
        let mut rig = Rig::new();
        rig.flush();

        rig.device([0x9a, note::PLAY, 100]);
        rig.device([0x8a, note::PLAY, 127]);
        rig.device([0x9a, note::PLAY, 0]);
        assert!(!rig.session.is_playing());

        rig.press(note::PLAY);
        assert!(rig.session.is_playing());

        // unknown notes and short messages are dropped
        assert!(rig.press(0x7e).is_empty());
        let short = midi::Msg::from([0x9a, note::STOP]);
        rig.surface
            .msg_from_device(&short, &mut rig.session, &mut rig.scheduler);
        assert!(rig.session.is_playing());
    }

    #[test]
    fn play_and_stop_drive_one_led() {
        let mut rig = Rig::new();
        assert!(rig.flush().contains(&vec![0x9a, note::PLAY, 0]));

        rig.press(note::PLAY);
        assert_eq!(rig.flush(), vec![vec![0x9a, note::PLAY, 127]]);
        assert!(rig.flush().is_empty());

        rig.press(note::STOP);
        assert_eq!(rig.flush(), vec![vec![0x9a, note::PLAY, 0]]);
    }

    #[test]
    fn record_blinks_until_playing() {
        let mut rig = Rig::new();
        rig.flush();

        rig.press(note::REC);
        assert_eq!(rig.flush(), vec![vec![0x9a, note::REC, 127]]);
        assert_eq!(rig.led(note::REC), LedState::Blinking);
        assert_eq!(rig.scheduler.pending.len(), 1);
        assert_eq!(rig.scheduler.pending[0].0, BLINK_INTERVAL);

        // render passes while blinking add no timer
        rig.flush();
        assert_eq!(rig.scheduler.pending.len(), 1);

        let tick = rig.scheduler.pop().unwrap();
        let msgs = bytes_of(rig.surface.run_task(tick, &mut rig.scheduler));
        assert_eq!(msgs, vec![vec![0x9a, note::REC, 0]]);

        rig.press(note::PLAY);
        let msgs = rig.flush();
        assert!(msgs.contains(&vec![0x9a, note::REC, 127]));
        assert_eq!(rig.led(note::REC), LedState::Solid);

        // the pending tick of the cancelled run is a no-op
        let tick = rig.scheduler.pop().unwrap();
        assert!(rig.surface.run_task(tick, &mut rig.scheduler).is_empty());
        assert!(rig.scheduler.pending.is_empty());

        rig.press(note::REC);
        assert_eq!(rig.flush(), vec![vec![0x9a, note::REC, 0]]);
        assert_eq!(rig.led(note::REC), LedState::Off);
    }

    #[test]
    fn solo_blinks_while_active() {
        let mut rig = Rig::new();
        rig.flush();

        rig.press(note::TRACK_SOLO);
        assert_eq!(rig.flush(), vec![vec![0x9a, note::TRACK_SOLO, 127]]);
        assert_eq!(rig.led(note::TRACK_SOLO), LedState::Blinking);

        rig.press(note::TRACK_SOLO);
        rig.flush();
        assert_eq!(rig.led(note::TRACK_SOLO), LedState::Off);
    }

    #[test]
    fn loop_and_click_are_solid() {
        let mut rig = Rig::new();
        rig.flush();

        rig.press(note::LOOP);
        rig.press(note::CLICK);
        let msgs = rig.flush();
        assert!(msgs.contains(&vec![0x9a, note::LOOP, 127]));
        assert!(msgs.contains(&vec![0x9a, note::CLICK, 127]));
        assert!(rig.scheduler.pending.is_empty());
    }

    #[test]
    fn navigation_notifies_track_name() {
        let mut rig = Rig::new();
        rig.flush();
        assert_eq!(rig.session.last_notification().as_deref(), Some("Drums"));

        rig.press(note::TRACK_NEXT);
        let msgs = rig.flush();
        assert_eq!(rig.session.last_notification().as_deref(), Some("Bass"));
        assert!(msgs.contains(&vec![0xbb, 0x09, 7]));

        // empty names are not notified
        rig.press(note::TRACK_NEXT);
        rig.flush();
        assert_eq!(rig.session.last_notification().as_deref(), Some("Bass"));

        rig.press(note::TRACK_PREV);
        rig.flush();
        assert_eq!(rig.session.last_notification().as_deref(), Some("Bass"));
    }

    #[test]
    fn handler_failure_is_isolated() {
        let (session, evt_rx) = LocalSession::new(Vec::<String>::new());
        let mut rig = Rig {
            surface: XTouchMini::try_new(Output::default(), false).unwrap(),
            session,
            evt_rx,
            scheduler: ManualScheduler::default(),
        };
        rig.flush();

        // no cursor track: the handler fails
        rig.press(note::TRACK_SOLO);
        rig.press(note::PLAY);
        assert!(rig.session.is_playing());
    }

    #[test]
    fn reset_turns_everything_off() {
        let mut rig = Rig::new();
        rig.flush();
        rig.press(note::LOOP);
        rig.flush();

        let msgs = bytes_of(rig.surface.reset());
        assert!(msgs.contains(&vec![0x9a, note::LOOP, 0]));
        assert!(msgs.contains(&vec![0xbb, 0x10, 0]));
    }
}
