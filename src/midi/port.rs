use crossbeam_channel as channel;
use std::sync::Arc;

use super::{Error, Msg};

type InputConnection = midir::MidiInputConnection<channel::Sender<Msg>>;

enum Connection<IO, C> {
    Connected(C),
    Disconnected(IO),
    None,
}

impl<IO, C> Default for Connection<IO, C> {
    fn default() -> Self {
        Self::None
    }
}

impl<IO, C> Connection<IO, C> {
    fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

/// Finds the first port whose name contains `pattern`, ignoring case.
///
/// Ports opened by this client are skipped.
fn find_port<IO: midir::MidiIO>(
    io: &IO,
    client_name: &str,
    pattern: &str,
) -> Result<(Arc<str>, IO::Port), Error> {
    let pattern_lc = pattern.to_lowercase();

    for port in io.ports() {
        let name = io.port_name(&port)?;
        if name.starts_with(client_name) {
            continue;
        }

        if name.to_lowercase().contains(&pattern_lc) {
            return Ok((name.into(), port));
        }
    }

    Err(Error::PortNotFound(pattern.into()))
}

pub struct PortsIn {
    conn: Connection<midir::MidiInput, InputConnection>,
    cur: Option<Arc<str>>,
    client_name: Arc<str>,
}

impl PortsIn {
    pub fn try_new(client_name: Arc<str>) -> Result<Self, Error> {
        let input = midir::MidiInput::new(&format!("{client_name} In"))?;

        Ok(Self {
            conn: Connection::Disconnected(input),
            cur: None,
            client_name,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_connected()
    }

    /// Connects to the first input port matching `pattern`.
    ///
    /// Incoming messages are forwarded to `msg_tx` from the `midir` thread.
    pub fn connect(
        &mut self,
        pattern: &str,
        msg_tx: channel::Sender<Msg>,
    ) -> Result<Arc<str>, Error> {
        self.disconnect();

        let input = match std::mem::take(&mut self.conn) {
            Connection::Disconnected(input) => input,
            _ => midir::MidiInput::new(&format!("{} In", self.client_name))?,
        };

        let (port_name, port) = match find_port(&input, &self.client_name, pattern) {
            Ok(found) => found,
            Err(err) => {
                self.conn = Connection::Disconnected(input);
                return Err(err);
            }
        };

        let callback = |_ts: u64, buf: &[u8], msg_tx: &mut channel::Sender<Msg>| {
            let _ = msg_tx.send(Msg::from(buf));
        };

        match input.connect(&port, &self.client_name, callback, msg_tx) {
            Ok(conn) => self.conn = Connection::Connected(conn),
            Err(err) => {
                self.conn = Connection::Disconnected(err.into_inner());
                let err = Error::Connection(port_name);
                log::error!("{err}");
                return Err(err);
            }
        }

        log::info!("Connected for Input to {port_name}");
        self.cur = Some(port_name.clone());

        Ok(port_name)
    }

    pub fn disconnect(&mut self) {
        if self.conn.is_connected() {
            if let Connection::Connected(conn) = std::mem::take(&mut self.conn) {
                let (input, _msg_tx) = conn.close();
                self.conn = Connection::Disconnected(input);
            }
        }

        if let Some(cur) = self.cur.take() {
            log::debug!("Disconnected Input from {cur}");
        }
    }
}

pub struct PortsOut {
    conn: Connection<midir::MidiOutput, midir::MidiOutputConnection>,
    cur: Option<Arc<str>>,
    client_name: Arc<str>,
}

impl PortsOut {
    pub fn try_new(client_name: Arc<str>) -> Result<Self, Error> {
        let output = midir::MidiOutput::new(&format!("{client_name} Out"))?;

        Ok(Self {
            conn: Connection::Disconnected(output),
            cur: None,
            client_name,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_connected()
    }

    pub fn connect(&mut self, pattern: &str) -> Result<Arc<str>, Error> {
        self.disconnect();

        let output = match std::mem::take(&mut self.conn) {
            Connection::Disconnected(output) => output,
            _ => midir::MidiOutput::new(&format!("{} Out", self.client_name))?,
        };

        let (port_name, port) = match find_port(&output, &self.client_name, pattern) {
            Ok(found) => found,
            Err(err) => {
                self.conn = Connection::Disconnected(output);
                return Err(err);
            }
        };

        match output.connect(&port, &self.client_name) {
            Ok(conn) => self.conn = Connection::Connected(conn),
            Err(err) => {
                self.conn = Connection::Disconnected(err.into_inner());
                let err = Error::Connection(port_name);
                log::error!("{err}");
                return Err(err);
            }
        }

        log::info!("Connected for Output to {port_name}");
        self.cur = Some(port_name.clone());

        Ok(port_name)
    }

    pub fn send(&mut self, msg: &Msg) -> Result<(), Error> {
        match &mut self.conn {
            Connection::Connected(conn) => {
                conn.send(msg.inner()).map_err(|err| {
                    log::error!("Failed to send MIDI msg {}: {err}", msg.display());
                    err
                })?;
            }
            _ => {
                log::warn!("Attempt to send a msg, but MIDI Out is not connected");
                return Err(Error::NotConnected);
            }
        }

        Ok(())
    }

    pub fn disconnect(&mut self) {
        if self.conn.is_connected() {
            if let Connection::Connected(conn) = std::mem::take(&mut self.conn) {
                self.conn = Connection::Disconnected(conn.close());
            }
        }

        if let Some(cur) = self.cur.take() {
            log::debug!("Disconnected Output from {cur}");
        }
    }
}
