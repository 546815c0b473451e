//! The six message registers of the badge.
use std::fmt::{self, Display, Formatter};

/// Offset markers written into every group of a segment, indexed by slot.
///
/// The first element goes into the third header byte of each group, the second
/// one into the sixth header byte of the first group only.
const OFFSETS: [(u8, u8); Slot::COUNT] = [
    (0x06, 0x31),
    (0x07, 0x32),
    (0x08, 0x33),
    (0x09, 0x34),
    (0x0A, 0x35),
    (0x0B, 0x36),
];

/// Position of a message among the message registers of the badge, guaranteed
/// to be in range 0..6.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Slot(u8);

impl Slot {
    /// Number of text message slots on the badge.
    pub const COUNT: usize = 6;

    /// Gets the slot with the given zero-based index, or `None` if the badge has
    /// no such slot.
    #[cfg(test)]
    pub fn new(index: usize) -> Option<Slot> {
        if index < Self::COUNT {
            Some(Slot(index as u8))
        } else {
            None
        }
    }

    /// All slots in ascending order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..Self::COUNT as u8).map(Slot)
    }

    /// Finds the slot that uses the given value as its first offset marker.
    pub fn from_offset_first(offset: u8) -> Option<Slot> {
        Self::all().find(|slot| slot.offset_first() == offset)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn offset_first(self) -> u8 {
        OFFSETS[self.index()].0
    }

    pub fn offset_second(self) -> u8 {
        OFFSETS[self.index()].1
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn offsets_of_all_slots() {
        let offsets: Vec<(u8, u8)> = Slot::all()
            .map(|slot| (slot.offset_first(), slot.offset_second()))
            .collect();
        assert_eq!(
            offsets,
            vec![
                (0x06, 0x31),
                (0x07, 0x32),
                (0x08, 0x33),
                (0x09, 0x34),
                (0x0A, 0x35),
                (0x0B, 0x36)
            ]
        );
    }

    #[test]
    fn six_slots() {
        assert_eq!(Slot::all().count(), 6);
        assert_eq!(Slot::new(5).map(Slot::index), Some(5));
        assert_eq!(Slot::new(6), None);
    }

    #[test]
    fn slot_from_offset() {
        assert_eq!(Slot::from_offset_first(0x0A), Slot::new(4));
        assert_eq!(Slot::from_offset_first(0x31), None);
    }
}
