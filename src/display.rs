/// Highlighting slices of one message's display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySlices {
    pub display_message: String,
    pub done_text: String,
    pub remaining_text: String,
}

/// Split a display string at a character offset into "already sent" and
/// "remaining" halves.
///
/// The offset counts display characters consumed so far and is clamped to
/// `[0, len]`; out-of-range offsets never panic.
pub fn display_slices(message: &str, char_offset: usize) -> DisplaySlices {
    let chars: Vec<char> = message.chars().collect();
    let offset = char_offset.min(chars.len());

    DisplaySlices {
        display_message: message.to_string(),
        done_text: chars[..offset].iter().collect(),
        remaining_text: chars[offset..].iter().collect(),
    }
}
