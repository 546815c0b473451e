//! Complete buffers that are written to the badge in one go.
//!
//! A frame either carries up to six messages followed by the activation trailer,
//! or only the activation trailer to switch slots on and off without resending
//! the messages.

use crate::message::Message;
use crate::segment::{self, Segment, CONTROL_BYTE_ONE, CONTROL_BYTE_THREE, START_BYTE};
use crate::slot::Slot;
use std::fmt;

const TRAILER_LEN: usize = 3;

/// Activation pattern that turns off all slots.
pub const NO_SLOTS: u8 = 0x00;

/// A buffer ready to be written to the badge, starting with the start byte and
/// ending in the activation trailer.
pub struct Frame(Vec<u8>);

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, byte) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl Frame {
    /// Encodes the given messages into the slots of the badge, in order, and
    /// activates the slots that received a message.
    ///
    /// The badge has six slots, messages after the sixth are ignored.
    pub fn build(messages: &[Message]) -> Frame {
        let count = messages.len().min(Slot::COUNT);
        let mut data = Vec::with_capacity(1 + count * Segment::LEN + TRAILER_LEN);
        data.push(START_BYTE);

        let mut mask = NO_SLOTS;
        for (message, slot) in messages.iter().zip(Slot::all()) {
            data.extend_from_slice(segment::encode(message, slot).as_bytes());
            mask = mask.wrapping_add(mask).wrapping_add(1);
        }

        data.push(CONTROL_BYTE_ONE);
        data.push(CONTROL_BYTE_THREE);
        data.push(mask);
        Frame(data)
    }

    /// Produces the standalone activation command that enables the slots in the
    /// given bit pattern without touching their contents.
    ///
    /// `0x00` disables all messages, `0xFF` enables the six text slots along with
    /// the two image slots.
    pub fn activation(pattern: u8) -> Frame {
        Frame(vec![
            START_BYTE,
            CONTROL_BYTE_ONE,
            CONTROL_BYTE_THREE,
            pattern,
        ])
    }

    /// Activation command that disables all slots.
    pub fn clear() -> Frame {
        Frame::activation(NO_SLOTS)
    }

    /// The encoded message segments between start byte and trailer.
    pub fn segments(&self) -> impl Iterator<Item = &[u8]> {
        self.0[1..self.0.len() - TRAILER_LEN].chunks(Segment::LEN)
    }

    /// The last byte of the trailer, holding the slots to activate.
    pub fn activation_mask(&self) -> u8 {
        self.0[self.0.len() - 1]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}
