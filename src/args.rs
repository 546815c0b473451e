use crate::activate::Pattern;
use crate::badge::DEFAULT_DEVICE;
use crate::message::Message;
use argh::FromArgs;
use serde::Deserialize;
use std::path::PathBuf;

/// Write scrolling text messages to a serial LED name badge or list available
/// serial ports.
#[derive(FromArgs)]
pub struct TopLevel {
    /// log progress in more detail.
    #[argh(switch, short = 'v')]
    pub verbose: bool,
    #[argh(subcommand)]
    pub invocation: Invocation
}

/// Inner top-level command.
#[derive(FromArgs, Deserialize)]
#[argh(subcommand)]
#[serde(rename_all = "snake_case")]
pub enum Invocation {
    #[serde(skip)]
    Run(Run),
    List(List),
    Send(SendMessages),
    Enable(Enable),
    Clear(Clear)
}

/// Take run parameters from a specified YAML configuration file.
#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
pub struct Run {
    #[argh(positional)]
    pub config: PathBuf
}

/// List available serial ports and mark the one that would be used as badge.
#[derive(FromArgs, Deserialize)]
#[argh(subcommand, name = "list")]
pub struct List {
    /// part of the device name to look for, case is ignored, defaults to Prolific.
    #[argh(option, short = 'd', default = "default_device()")]
    #[serde(default = "default_device")]
    pub device: String
}

/// Send up to six messages to the badge, replacing all messages on it.
///
/// Each message is written as TEXT[@OPTIONS], where options are a style
/// (hold, scroll, rain, flash) and a speed from 1 (slow) to 5 (fast),
/// separated by a comma, e.g. `Hello@flash,5`. Style scroll and speed 1
/// are used when omitted.
#[derive(FromArgs, Deserialize)]
#[argh(subcommand, name = "send")]
pub struct SendMessages {
    /// messages to show, in slot order.
    #[argh(positional)]
    pub messages: Vec<Message>,
    /// serial port to use, e.g. /dev/ttyUSB0 on Linux, or COM5 on Windows, found by device name if omitted.
    #[argh(option, short = 's')]
    #[serde(default)]
    pub serial: Option<String>,
    /// part of the device name to look for if no serial port is given, defaults to Prolific.
    #[argh(option, short = 'd', default = "default_device()")]
    #[serde(default = "default_device")]
    pub device: String,
    /// print the encoded data instead of sending it.
    #[argh(switch)]
    #[serde(default)]
    pub dry_run: bool
}

/// Activate message slots by bit pattern without resending the messages.
#[derive(FromArgs, Deserialize)]
#[argh(subcommand, name = "enable")]
pub struct Enable {
    /// slots to activate as bit pattern in decimal, 0x hexadecimal or 0b binary, e.g. 0b11 for the first two slots, or 0xFF for all.
    #[argh(positional)]
    pub pattern: Pattern,
    /// serial port to use, e.g. /dev/ttyUSB0 on Linux, or COM5 on Windows, found by device name if omitted.
    #[argh(option, short = 's')]
    #[serde(default)]
    pub serial: Option<String>,
    /// part of the device name to look for if no serial port is given, defaults to Prolific.
    #[argh(option, short = 'd', default = "default_device()")]
    #[serde(default = "default_device")]
    pub device: String
}

/// Deactivate all messages on the badge.
#[derive(FromArgs, Deserialize)]
#[argh(subcommand, name = "clear")]
pub struct Clear {
    /// serial port to use, e.g. /dev/ttyUSB0 on Linux, or COM5 on Windows, found by device name if omitted.
    #[argh(option, short = 's')]
    #[serde(default)]
    pub serial: Option<String>,
    /// part of the device name to look for if no serial port is given, defaults to Prolific.
    #[argh(option, short = 'd', default = "default_device()")]
    #[serde(default = "default_device")]
    pub device: String
}

fn default_device() -> String {
    DEFAULT_DEVICE.to_string()
}
