/// Calculates the checksum byte of a segment group: the sum of all given bytes,
/// modulo 256. The leading control byte of a group is not part of the sum, so
/// callers pass the group starting after it.
///
/// The empty slice is a valid argument and yields 0.
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, next| acc.wrapping_add(*next))
}
