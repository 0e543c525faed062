//! Fixed mapping from sendable characters and prosign names to their
//! dot-dash patterns.

/// Marker that prefixes a prosign in raw message text (`@SK`, `@AR`, ...).
pub const PROSIGN_MARKER: char = '@';

/// Dot-dash pattern for a single character, case-insensitive.
pub fn char_pattern(c: char) -> Option<&'static str> {
    let pattern = match c.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '0' => "-----",
        '/' => "-..-.",
        '=' => "-...-",
        '?' => "..--..",
        '.' => ".-.-.-",
        ',' => "--..--",
        _ => return None,
    };
    Some(pattern)
}

/// Pattern for a prosign name (the letters after the marker), sent as one
/// block without inter-character spacing.
pub fn prosign_pattern(name: &str) -> Option<&'static str> {
    let pattern = match name.to_ascii_uppercase().as_str() {
        "AR" => ".-.-.",
        "BT" => "-...-",
        "SK" => "...-.-",
        "KN" => "-.--.",
        "BK" => "-...-.-",
        _ => return None,
    };
    Some(pattern)
}

/// Pattern for a raw token: either a `@NAME` prosign or a single character.
pub fn pattern_for(raw: &str) -> Option<&'static str> {
    if let Some(name) = raw.strip_prefix(PROSIGN_MARKER) {
        return prosign_pattern(name);
    }

    let mut chars = raw.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    char_pattern(c)
}

#[cfg(test)]
mod tests {
    use super::{char_pattern, pattern_for, prosign_pattern};

    #[test]
    fn lookups_are_case_insensitive() {
        assert_eq!(char_pattern('q'), char_pattern('Q'));
        assert_eq!(prosign_pattern("sk"), prosign_pattern("SK"));
        assert_eq!(pattern_for("@ar"), Some(".-.-."));
    }

    #[test]
    fn multi_char_raw_without_marker_has_no_pattern() {
        assert_eq!(pattern_for("SK"), None);
        assert_eq!(pattern_for(""), None);
    }
}
