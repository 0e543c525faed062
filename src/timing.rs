use serde::{Deserialize, Serialize};

/// Morse element durations in seconds.
///
/// Dot and dash widths come from the element speed; the inter-character and
/// inter-word silences come from the (usually slower) Farnsworth spacing
/// speed, which stretches the gaps without touching element widths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub dot: f64,
    pub dash: f64,
    pub char_space: f64,
    pub word_space: f64,
}

impl Timing {
    /// Compute durations from two words-per-minute speeds.
    ///
    /// "1.2" is the PARIS constant: sending the word "PARIS" once per
    /// minute makes each dot 1.2 seconds long.
    ///
    /// Both speeds must be positive. Non-positive values produce infinite
    /// or negative durations; this is a caller error, not recovered here.
    pub fn from_speeds(wpm: f64, farnsworth_wpm: f64) -> Self {
        let dot = 1.2 / wpm;
        let fw_dot = 1.2 / farnsworth_wpm;

        Self {
            dot,
            // A dash is three dots wide.
            dash: dot * 3.0,
            // Three dots of silence between characters, seven between
            // words, both at the Farnsworth rate.
            char_space: fw_dot * 3.0,
            word_space: fw_dot * 7.0,
        }
    }
}
