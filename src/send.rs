use crate::args::SendMessages;
use crate::badge::{Badge, BadgeError};
use crate::frame::Frame;
use crate::message::Message;
use crate::segment::{decode, SegmentParseError};
use crate::slot::Slot;
use thiserror::Error;
use tracing::warn;

pub type Result<T> = std::result::Result<T, SendError>;

pub fn send(opts: &SendMessages) -> Result<()> {
    if opts.messages.len() > Slot::COUNT {
        warn!(
            "The badge has {slots} message slots, ignoring the last {ignored} messages",
            slots = Slot::COUNT,
            ignored = opts.messages.len() - Slot::COUNT
        );
    }

    if opts.dry_run {
        println!("{}", describe(&opts.messages)?);
        return Ok(());
    }

    let badge = Badge::resolve(opts.serial.as_deref(), &opts.device)?;
    badge.set_messages(&opts.messages)?;
    Ok(())
}

/// Human-readable listing of what the frame for the given messages holds, read
/// back from the encoded bytes, followed by the bytes themselves.
fn describe(messages: &[Message]) -> Result<String> {
    let frame = Frame::build(messages);
    let mut lines = vec![];
    for segment in frame.segments() {
        let (slot, message) = decode(segment)?;
        lines.push(format!("{}: {}", slot, message));
    }
    lines.push(format!(
        "activation: {:#010b}",
        frame.activation_mask()
    ));
    lines.push(format!(
        "{len} bytes: {bytes:?}",
        len = frame.as_bytes().len(),
        bytes = frame
    ));
    Ok(lines.join("\n"))
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("{0}")]
    Badge(#[from] BadgeError),
    #[error("Encoded messages failed verification: {0}")]
    Verify(#[from] SegmentParseError)
}
