use crate::discovery::{find_port, friendly_name};
use crate::frame::Frame;
use crate::message::Message;
use crate::serial::{self, BAUD_RATE, DATA_BITS, PARITY, STOP_BITS};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, BadgeError>;

/// Part of the device name that identifies the USB serial adapter of the badge.
pub const DEFAULT_DEVICE: &str = "Prolific";

/// An LED badge attached to a serial port.
///
/// The port is opened for every write and closed again right after, so that
/// other programs can use it in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    port: String
}

impl Badge {
    pub fn on_port(port: &str) -> Badge {
        Badge { port: port.into() }
    }

    /// Finds the badge among the available serial ports by a case-insensitive part
    /// of its name. If multiple ports match, the first one is used.
    #[tracing::instrument]
    pub fn discover(pattern: &str) -> Result<Badge> {
        let ports = serialport::available_ports().map_err(BadgeError::ListPorts)?;
        let port = find_port(pattern, &ports).ok_or_else(|| BadgeError::not_found(pattern))?;
        info!("Found badge: {}", friendly_name(port));
        Ok(Badge::on_port(&port.port_name))
    }

    /// Uses the given serial port if any, otherwise discovers the badge by name.
    pub fn resolve(serial: Option<&str>, device: &str) -> Result<Badge> {
        match serial {
            Some(port) => Ok(Badge::on_port(port)),
            None => Badge::discover(device)
        }
    }

    /// Replaces the messages on the badge with the given ones, at most six, and
    /// activates exactly the slots that received a message.
    #[tracing::instrument(skip(messages), fields(count = messages.len()))]
    pub fn set_messages(&self, messages: &[Message]) -> Result<()> {
        for message in messages {
            debug!("Message: {}", message);
        }
        self.write(&Frame::build(messages))
    }

    /// Switches the slots in the given bit pattern on and all others off.
    #[tracing::instrument]
    pub fn enable_messages(&self, pattern: u8) -> Result<()> {
        self.write(&Frame::activation(pattern))
    }

    /// Disables all slots, so that the badge shows nothing.
    #[tracing::instrument]
    pub fn clear_messages(&self) -> Result<()> {
        self.write(&Frame::clear())
    }

    fn write(&self, frame: &Frame) -> Result<()> {
        info!("Connecting to {}", self);
        let mut serial = serial::open(&self.port).map_err(|e| BadgeError::open(e, &self.port))?;
        serial::write_frame(&mut serial, frame).map_err(|e| BadgeError::write(e, &self.port))
    }
}

impl Display for Badge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "port {port} with {baud} baud, data bits: {data_bits:?}, parity: {parity:?}, stop bits: {stop_bits:?}",
            port = self.port,
            baud = BAUD_RATE,
            data_bits = DATA_BITS,
            parity = PARITY,
            stop_bits = STOP_BITS
        )
    }
}

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("Could not find a serial port with a name containing `{pattern}`")]
    DeviceNotFound { pattern: String },
    #[error("Could not list serial ports: {0}")]
    ListPorts(serialport::Error),
    #[error("Could not open serial port connection to: {port}, due to error: {source}")]
    Open {
        source: serialport::Error,
        port: String
    },
    #[error("Could not send data to badge on port: {port}, due to I/O error: {source}")]
    Write {
        source: std::io::Error,
        port: String
    }
}

impl BadgeError {
    fn not_found(pattern: &str) -> Self {
        Self::DeviceNotFound {
            pattern: pattern.into()
        }
    }

    fn open(source: serialport::Error, port: &str) -> Self {
        Self::Open {
            source,
            port: port.into()
        }
    }

    fn write(source: std::io::Error, port: &str) -> Self {
        Self::Write {
            source,
            port: port.into()
        }
    }
}
