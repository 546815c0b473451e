//! Finding the serial port of a badge by a part of its human-readable name.
use serialport::{SerialPortInfo, SerialPortType};

/// Human-readable name of a serial port, consisting of manufacturer and product
/// of USB adapters, followed by the port name in parentheses, e.g.
/// `Prolific Technology Inc. USB-Serial Controller (/dev/ttyUSB0)`.
///
/// Ports that are not USB adapters or do not report any strings are named by
/// their port name alone.
pub fn friendly_name(info: &SerialPortInfo) -> String {
    let descriptions: Vec<&str> = match &info.port_type {
        SerialPortType::UsbPort(usb) => usb
            .manufacturer
            .iter()
            .chain(usb.product.iter())
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => vec![]
    };

    if descriptions.is_empty() {
        info.port_name.clone()
    } else {
        format!("{} ({})", descriptions.join(" "), info.port_name)
    }
}

/// Finds the first port whose friendly name contains the given pattern, ignoring
/// case.
pub fn find_port<'a>(pattern: &str, ports: &'a [SerialPortInfo]) -> Option<&'a SerialPortInfo> {
    let pattern = pattern.to_lowercase();
    ports
        .iter()
        .find(|port| friendly_name(port).to_lowercase().contains(&pattern))
}
