//! Encoding of a single message into the four checksummed groups that the badge
//! expects for each of its message slots.
//!
//! Every group starts with the control bytes `02 31`, the first offset of the
//! slot and a batch counter that grows by `0x40` per group. The first group
//! additionally holds speed, second slot offset, style and text length. The text
//! then continues over all four groups and is padded with zeros:
//!
//! ```text
//! group 0: 02 31 <off1> 00 <speed> <off2> <style> <len> <60 data> <checksum>
//! group 1: 02 31 <off1> 40 <64 data> <checksum>
//! group 2: 02 31 <off1> 80 <64 data> <checksum>
//! group 3: 02 31 <off1> C0 <62 data> 00 00 <checksum>
//! ```
//!
//! The checksum of a group is the sum of all its bytes except the leading `02`,
//! modulo 256.

use crate::checksum::checksum;
use crate::message::{Message, Speed, Style, MAX_TEXT_LEN};
use crate::slot::Slot;
use builder::Builder;

pub use parse::{decode, SegmentParseError};

pub const START_BYTE: u8 = 0x00;
pub const PADDING_BYTE: u8 = 0x00;
pub const CONTROL_BYTE_ONE: u8 = 0x02;
pub const CONTROL_BYTE_TWO: u8 = 0x31;
pub const CONTROL_BYTE_THREE: u8 = 0x33;

const BATCH_STEP: u8 = 0x40;

/// Fixed shape of one of the four groups in a segment.
struct Layout {
    /// Whether speed, second offset, style and length follow the common header.
    message_header: bool,
    /// Number of bytes reserved for text, padded with zeros.
    data_len: usize,
    /// Zero bytes after the text and before the checksum.
    trailing_padding: usize
}

const LAYOUTS: [Layout; 4] = [
    Layout {
        message_header: true,
        data_len: 60,
        trailing_padding: 0
    },
    Layout {
        message_header: false,
        data_len: 64,
        trailing_padding: 0
    },
    Layout {
        message_header: false,
        data_len: 64,
        trailing_padding: 0
    },
    Layout {
        message_header: false,
        data_len: 62,
        trailing_padding: 2
    },
];

const COMMON_HEADER_LEN: usize = 4;
const MESSAGE_HEADER_LEN: usize = 4;
const CHECKSUM_LEN: usize = 1;

impl Layout {
    fn header_len(&self) -> usize {
        if self.message_header {
            COMMON_HEADER_LEN + MESSAGE_HEADER_LEN
        } else {
            COMMON_HEADER_LEN
        }
    }

    fn len(&self) -> usize {
        self.header_len() + self.data_len + self.trailing_padding + CHECKSUM_LEN
    }
}

/// One message encoded for a specific slot, always [`Segment::LEN`] bytes long.
pub struct Segment(Vec<u8>);

impl Segment {
    /// Length of every encoded segment, independent of the message length.
    pub const LEN: usize = 276;

    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

/// Encodes a message into the segment for the given slot.
///
/// Text longer than [`MAX_TEXT_LEN`] bytes is truncated, shorter text is padded
/// with zeros. Never fails.
pub fn encode_message(text: &[u8], slot: Slot, style: Style, speed: Speed) -> Segment {
    let text = &text[..text.len().min(MAX_TEXT_LEN)];
    // at most 250, fits a byte
    let text_len = text.len() as u8;

    let mut data = Vec::with_capacity(Segment::LEN);
    LAYOUTS
        .iter()
        .fold((0x00_u8, text), |(batch, remaining), layout| {
            let mut group = Builder::new(&mut data)
                .byte(CONTROL_BYTE_TWO)
                .byte(slot.offset_first())
                .byte(batch);
            if layout.message_header {
                group = group
                    .byte(speed.byte())
                    .byte(slot.offset_second())
                    .byte(style.byte())
                    .byte(text_len);
            }

            let (taken, remaining) = remaining.split_at(remaining.len().min(layout.data_len));
            group
                .bytes(taken)
                .padding(layout.data_len - taken.len() + layout.trailing_padding)
                .finish();

            (batch.wrapping_add(BATCH_STEP), remaining)
        });

    debug_assert_eq!(data.len(), Segment::LEN);
    Segment(data)
}

/// Encodes a message for the given slot, see [`encode_message`].
pub fn encode(message: &Message, slot: Slot) -> Segment {
    encode_message(message.text(), slot, message.style(), message.speed())
}

mod builder {
    use super::{checksum, CONTROL_BYTE_ONE, PADDING_BYTE};

    /// Appends a single group to a segment buffer.
    pub struct Builder<'a> {
        out: &'a mut Vec<u8>,
        start: usize
    }

    impl<'a> Builder<'a> {
        /// Starts a new group at the end of `out`, writing the leading control byte.
        pub fn new(out: &'a mut Vec<u8>) -> Self {
            let start = out.len();
            out.push(CONTROL_BYTE_ONE);
            Builder { out, start }
        }

        pub fn byte(mut self, byte: u8) -> Self {
            self.out.push(byte);
            self
        }

        pub fn bytes(mut self, bytes: &[u8]) -> Self {
            self.out.extend_from_slice(bytes);
            self
        }

        pub fn padding(mut self, len: usize) -> Self {
            let new_len = self.out.len() + len;
            self.out.resize(new_len, PADDING_BYTE);
            self
        }

        /// Appends the checksum over everything after the leading control byte.
        pub fn finish(mut self) {
            let checksum = checksum(&self.out[self.start + 1..]);
            self.out.push(checksum);
        }
    }

}

mod parse {
    use super::{checksum, Layout, Segment, BATCH_STEP, CONTROL_BYTE_ONE, CONTROL_BYTE_TWO, LAYOUTS};
    use crate::message::{Message, Speed, Style, MAX_TEXT_LEN};
    use crate::slot::Slot;
    use thiserror::Error;

    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum SegmentParseError {
        #[error("Segment must be {expected} bytes long, got {len}")]
        Length { expected: usize, len: usize },
        #[error("Group {group} does not start with control bytes 02 31")]
        Control { group: usize },
        #[error("Group {group} has unknown slot offset {offset:X?}")]
        Offset { group: usize, offset: u8 },
        #[error("Group {group} has batch counter {received:X?}, expected {expected:X?}")]
        Batch {
            group: usize,
            expected: u8,
            received: u8
        },
        #[error("Group {group} has checksum {received:X?}, expected {expected:X?}")]
        Checksum {
            group: usize,
            expected: u8,
            received: u8
        },
        #[error("Second slot offset {received:X?} does not match first offset, expected {expected:X?}")]
        SecondOffset { expected: u8, received: u8 },
        #[error("Unknown message style {0:X?}")]
        Style(u8),
        #[error("Unknown message speed {0:X?}")]
        Speed(u8),
        #[error("Message length {0} exceeds maximum of 250")]
        TextLength(u8)
    }

    /// Validates an encoded segment and extracts the slot and message from it.
    pub fn decode(buf: &[u8]) -> Result<(Slot, Message), SegmentParseError> {
        if buf.len() != Segment::LEN {
            return Err(SegmentParseError::Length {
                expected: Segment::LEN,
                len: buf.len()
            });
        }

        let mut slot = None;
        let mut data = Vec::with_capacity(MAX_TEXT_LEN);
        let mut rest = buf;
        let mut expected_batch = 0x00_u8;
        for (group, layout) in LAYOUTS.iter().enumerate() {
            let (bytes, tail) = rest.split_at(layout.len());
            rest = tail;

            let group_slot = verify_group(group, layout, bytes, expected_batch)?;
            if *slot.get_or_insert(group_slot) != group_slot {
                return Err(SegmentParseError::Offset {
                    group,
                    offset: group_slot.offset_first()
                });
            }

            let data_start = layout.header_len();
            data.extend_from_slice(&bytes[data_start..data_start + layout.data_len]);
            expected_batch = expected_batch.wrapping_add(BATCH_STEP);
        }

        // first group always sets the slot
        let slot = slot.ok_or(SegmentParseError::Length {
            expected: Segment::LEN,
            len: buf.len()
        })?;

        let speed = Speed::from_byte(buf[4]).ok_or(SegmentParseError::Speed(buf[4]))?;
        if buf[5] != slot.offset_second() {
            return Err(SegmentParseError::SecondOffset {
                expected: slot.offset_second(),
                received: buf[5]
            });
        }
        let style = Style::from_byte(buf[6]).ok_or(SegmentParseError::Style(buf[6]))?;
        let text_len = buf[7];
        if text_len as usize > MAX_TEXT_LEN {
            return Err(SegmentParseError::TextLength(text_len));
        }

        let message = Message::from_bytes(&data[..text_len as usize])
            .with_style(style)
            .with_speed(speed);
        Ok((slot, message))
    }

    fn verify_group(
        group: usize,
        layout: &Layout,
        bytes: &[u8],
        expected_batch: u8,
    ) -> Result<Slot, SegmentParseError> {
        if bytes[0] != CONTROL_BYTE_ONE || bytes[1] != CONTROL_BYTE_TWO {
            return Err(SegmentParseError::Control { group });
        }

        let slot = Slot::from_offset_first(bytes[2]).ok_or(SegmentParseError::Offset {
            group,
            offset: bytes[2]
        })?;

        if bytes[3] != expected_batch {
            return Err(SegmentParseError::Batch {
                group,
                expected: expected_batch,
                received: bytes[3]
            });
        }

        let checksum_idx = layout.len() - 1;
        let expected = checksum(&bytes[1..checksum_idx]);
        let received = bytes[checksum_idx];
        if expected != received {
            return Err(SegmentParseError::Checksum {
                group,
                expected,
                received
            });
        }

        Ok(slot)
    }

}
