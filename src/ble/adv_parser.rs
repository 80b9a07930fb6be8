//! Walk raw advertising payloads (length / type / data AD structures).
//!
//! Reads back what the advertising builder produced.

/// AD type: Flags.
pub const AD_FLAGS: u8 = 0x01;
/// AD type: Complete List of 16-bit Service UUIDs.
pub const AD_COMPLETE_UUID16: u8 = 0x03;
/// AD type: Complete Local Name.
pub const AD_COMPLETE_NAME: u8 = 0x09;
/// AD type: Appearance.
pub const AD_APPEARANCE: u8 = 0x19;

/// Data of the first AD structure of `ad_type`.
///
/// Stops at the first zero-length structure or one that runs past the end.
pub fn find_field(data: &[u8], ad_type: u8) -> Option<&[u8]> {
    let mut i = 0;
    while i < data.len() {
        let len = data[i] as usize;
        if len == 0 || i + len >= data.len() {
            break;
        }
        if data[i + 1] == ad_type {
            return Some(&data[i + 2..i + 1 + len]);
        }
        i += len + 1;
    }
    None
}

/// Check if the complete 16-bit service list contains `uuid`.
pub fn contains_service_uuid16(data: &[u8], uuid: u16) -> bool {
    let uuid_le = uuid.to_le_bytes();
    find_field(data, AD_COMPLETE_UUID16)
        .map(|list| list.chunks_exact(2).any(|chunk| chunk == uuid_le))
        .unwrap_or(false)
}

/// GAP appearance value, if advertised.
pub fn appearance(data: &[u8]) -> Option<u16> {
    match find_field(data, AD_APPEARANCE)? {
        [lo, hi] => Some(u16::from_le_bytes([*lo, *hi])),
        _ => None,
    }
}
