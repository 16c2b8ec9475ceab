use crossbeam_channel as channel;
use std::{io::BufRead, ops::ControlFlow, sync::Arc};

use crate::{
    ctrl_surf::{self, ControlSurface, Output, TimerScheduler, XTouchMini},
    daw::{self, session::LocalSession},
    midi::{self, MsgList},
    settings::Settings,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("MIDI error: {}", .0)]
    Midi(#[from] midi::Error),

    #[error("Control Surface error: {}", .0)]
    ControlSurface(#[from] ctrl_surf::Error),
}

#[derive(Debug)]
pub enum Request {
    Shutdown,
}

/// Sends `Shutdown` when stdin reads `q`.
///
/// The channel is closed when stdin is, e.g. when running detached.
fn spawn_stdin_watcher() -> channel::Receiver<Request> {
    let (req_tx, req_rx) = channel::bounded(1);

    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim() == "q" => {
                    let _ = req_tx.send(Request::Shutdown);
                    return;
                }
                Ok(_) => (),
                Err(err) => {
                    log::warn!("Error reading stdin: {err}");
                    return;
                }
            }
        }
    });

    req_rx
}

pub struct Controller {
    ctrl_surf: XTouchMini,
    daw: LocalSession,
    scheduler: TimerScheduler,

    midi_ports_in: midi::PortsIn,
    midi_ports_out: midi::PortsOut,
}

impl Controller {
    /// Connects to the device and runs until `q` is entered on stdin
    /// or one of the event channels is closed.
    pub fn run(settings: &Settings) -> Result<(), Error> {
        let client_name: Arc<str> = settings.client_name.as_str().into();

        let (midi_tx, midi_rx) = channel::unbounded();

        let mut midi_ports_in = midi::PortsIn::try_new(client_name.clone())?;
        midi_ports_in.connect(&settings.port_name, midi_tx)?;

        let mut midi_ports_out = midi::PortsOut::try_new(client_name)?;
        midi_ports_out.connect(&settings.port_name)?;

        let out = Output::new(settings.note_status, settings.cc_channel);
        let ctrl_surf = XTouchMini::try_new(out, settings.ring_modes)?;

        let (daw, evt_rx) = LocalSession::new(settings.tracks.iter().map(String::as_str));
        let (scheduler, task_rx) = TimerScheduler::new();

        Self {
            ctrl_surf,
            daw,
            scheduler,
            midi_ports_in,
            midi_ports_out,
        }
        .run_loop(
            spawn_stdin_watcher(),
            midi_rx,
            evt_rx,
            task_rx,
            channel::tick(settings.flush_interval()),
        );

        Ok(())
    }

    fn send(&mut self, msg_list: MsgList) {
        for msg in msg_list {
            log::trace!("Sending {}", msg.display());
            // Failures are logged by `PortsOut`.
            let _ = self.midi_ports_out.send(&msg);
        }
    }

    fn handle_request(&mut self, request: Request) -> ControlFlow<(), ()> {
        match request {
            Request::Shutdown => {
                log::info!("Shutting down");
                ControlFlow::Break(())
            }
        }
    }

    fn handle_midi_msg(&mut self, msg: midi::Msg) {
        log::trace!("Received {}", msg.display());
        let msg_list = self
            .ctrl_surf
            .msg_from_device(&msg, &mut self.daw, &mut self.scheduler);
        self.send(msg_list);
    }

    fn handle_daw_event(&mut self, event: daw::Event) {
        log::debug!("DAW: {event:?}");
        self.ctrl_surf.event_from_daw(event);
    }

    fn handle_task(&mut self, task: ctrl_surf::Task) {
        log::trace!("Task: {task:?}");
        let msg_list = self.ctrl_surf.run_task(task, &mut self.scheduler);
        self.send(msg_list);
    }

    fn flush(&mut self) {
        let msg_list = self.ctrl_surf.flush(&mut self.daw, &mut self.scheduler);
        self.send(msg_list);
    }

    fn run_loop(
        mut self,
        mut req_rx: channel::Receiver<Request>,
        midi_rx: channel::Receiver<midi::Msg>,
        evt_rx: channel::Receiver<daw::Event>,
        task_rx: channel::Receiver<ctrl_surf::Task>,
        flush_rx: channel::Receiver<std::time::Instant>,
    ) {
        let msg_list = self.ctrl_surf.start(&mut self.scheduler);
        self.send(msg_list);

        loop {
            let mut is_stdin_closed = false;

            channel::select! {
                recv(req_rx) -> request => {
                    match request {
                        Ok(request) => {
                            if self.handle_request(request).is_break() {
                                break;
                            }
                        }
                        Err(_) => is_stdin_closed = true,
                    }
                }
                recv(midi_rx) -> midi_msg => {
                    match midi_msg {
                        Ok(midi_msg) => self.handle_midi_msg(midi_msg),
                        Err(err) => {
                            log::error!("Error MIDI msg channel: {err}");
                            break;
                        }
                    }
                }
                recv(evt_rx) -> event => {
                    match event {
                        Ok(event) => self.handle_daw_event(event),
                        Err(err) => {
                            log::error!("Error DAW event channel: {err}");
                            break;
                        }
                    }
                }
                recv(task_rx) -> task => {
                    match task {
                        Ok(task) => self.handle_task(task),
                        Err(err) => {
                            log::error!("Error task channel: {err}");
                            break;
                        }
                    }
                }
                recv(flush_rx) -> _ => self.flush(),
            }

            if is_stdin_closed {
                log::debug!("No more requests from stdin");
                req_rx = channel::never();
            }
        }

        let msg_list = self.ctrl_surf.reset();
        self.send(msg_list);

        self.midi_ports_in.disconnect();
        self.midi_ports_out.disconnect();
    }
}
