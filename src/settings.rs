use serde::Deserialize;
use std::time::Duration;

use crate::ctrl_surf::output::{DEFAULT_CC_CHANNEL, DEFAULT_NOTE_STATUS};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Can't load settings: {}", .0)]
    Config(#[from] config::ConfigError),

    #[error("Invalid settings: {}", .0)]
    Invalid(&'static str),
}

#[derive(clap::Parser, Debug, Default)]
#[clap(
    name = "X-Touch Mini controller",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
)]
pub struct Args {
    #[clap(short, long, help = "Config file")]
    pub config: Option<String>,

    #[clap(short, long, help = "MIDI port name pattern, e.g. \"X-TOUCH MINI\"")]
    pub port: Option<String>,

    #[clap(short, long, help = "Log filter, e.g. \"debug\" (overrides RUST_LOG)")]
    pub log_level: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub client_name: String,
    /// Input & output ports are the first ones containing this, ignoring case.
    pub port_name: String,
    /// Status byte for LED notes.
    pub note_status: u8,
    /// 1-based MIDI channel for ring messages.
    pub cc_channel: u8,
    pub flush_interval_ms: u64,
    /// Sends ring behaviors to the track encoders at start.
    pub ring_modes: bool,
    /// Tracks of the local session.
    pub tracks: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_name: "X-Touch Mini Controller".to_string(),
            port_name: "X-TOUCH MINI".to_string(),
            note_status: DEFAULT_NOTE_STATUS,
            cc_channel: DEFAULT_CC_CHANNEL,
            flush_interval_ms: 40,
            ring_modes: false,
            tracks: (1..=4).map(|idx| format!("Track {idx}")).collect(),
        }
    }
}

impl Settings {
    /// Loads settings from the optional config file, then `XTM_*` env variables,
    /// then command line overrides.
    pub fn load(args: &Args) -> Result<Self, Error> {
        let mut builder = config::Config::builder();

        if let Some(ref path) = args.config {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(config::Environment::with_prefix("XTM"));

        if let Some(ref port) = args.port {
            builder = builder.set_override("port_name", port.as_str())?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.client_name.is_empty() {
            return Err(Error::Invalid("client name must not be empty"));
        }

        if self.port_name.is_empty() {
            return Err(Error::Invalid("port name must not be empty"));
        }

        if self.note_status < 0x80 {
            return Err(Error::Invalid("note status must be a status byte (>= 0x80)"));
        }

        if !(1..=16).contains(&self.cc_channel) {
            return Err(Error::Invalid("cc channel must be 1 to 16"));
        }

        if self.flush_interval_ms == 0 {
            return Err(Error::Invalid("flush interval must not be 0"));
        }

        if self.tracks.is_empty() {
            return Err(Error::Invalid("at least one track is needed"));
        }

        Ok(())
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}
