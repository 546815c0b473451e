use crate::args::List;
use crate::discovery::{find_port, friendly_name};
use serialport::SerialPortInfo;
use thiserror::Error;

pub fn list(list: &List) -> Result<(), ListError> {
    let ports = serialport::available_ports()?;
    if ports.is_empty() {
        println!("No serial ports found.");
    }
    for line in listing(&list.device, &ports) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per port, the port that would be picked for the device name is marked
/// with an asterisk.
fn listing(device: &str, ports: &[SerialPortInfo]) -> Vec<String> {
    let badge = find_port(device, ports).map(|p| p.port_name.as_str());
    ports
        .iter()
        .map(|port| {
            let marker = if Some(port.port_name.as_str()) == badge {
                '*'
            } else {
                ' '
            };
            format!("{} {}", marker, friendly_name(port))
        })
        .collect()
}

#[derive(Error, Debug)]
pub enum ListError {
    #[error("Could not list serial ports: {0}")]
    Serial(#[from] serialport::Error)
}
