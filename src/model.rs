use serde::{Deserialize, Serialize};

use crate::timing::Timing;

/// Playback status of the sender engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    Lead,
    Tail,
}

/// One unsent unit of the flattened message queue.
///
/// Every message contributes a `Gap(Lead)`, its characters and spaces in
/// source order, then a `Gap(Tail)`. `message_index` is non-decreasing
/// across the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// Silence before or after a message.
    Gap { message_index: usize, gap: GapKind },
    /// Inter-word silence inside a message.
    Space { message_index: usize },
    /// A sendable character, or a prosign sent as one timed block.
    Char {
        message_index: usize,
        /// Source text, marker included for prosigns (e.g. `@SK`).
        raw: String,
        /// What the display layer shows (marker stripped).
        display: String,
        /// True iff a non-space character follows immediately.
        add_char_space: bool,
    },
}

impl Token {
    pub fn message_index(&self) -> usize {
        match self {
            Token::Gap { message_index, .. }
            | Token::Space { message_index }
            | Token::Char { message_index, .. } => *message_index,
        }
    }
}

/// Callback metadata for a char start/end pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharMeta {
    pub message_index: usize,
    /// Display length in characters; 0 for word spaces.
    pub length: usize,
    pub is_space: bool,
    /// Display text before uppercasing.
    pub raw: String,
}

/// A timed lifecycle event, offset in seconds relative to the plan anchor.
///
/// Events sharing an offset are delivered in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    MessageStart {
        time_offset: f64,
        message_index: usize,
    },
    GapStart {
        time_offset: f64,
        token_index: usize,
        gap: GapKind,
    },
    CharStart {
        time_offset: f64,
        token_index: usize,
        display: String,
        meta: CharMeta,
    },
    CharEnd {
        time_offset: f64,
        token_index: usize,
        display: String,
        meta: CharMeta,
    },
    TokenAdvance {
        time_offset: f64,
        token_index: usize,
    },
    Finish {
        time_offset: f64,
    },
}

impl PlaybackEvent {
    pub fn time_offset(&self) -> f64 {
        match self {
            PlaybackEvent::MessageStart { time_offset, .. }
            | PlaybackEvent::GapStart { time_offset, .. }
            | PlaybackEvent::CharStart { time_offset, .. }
            | PlaybackEvent::CharEnd { time_offset, .. }
            | PlaybackEvent::TokenAdvance { time_offset, .. }
            | PlaybackEvent::Finish { time_offset } => *time_offset,
        }
    }
}

/// One scheduled key-down span, relative to the plan anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneInstruction {
    pub offset: f64,
    pub duration: f64,
}

/// An immutable timed playback plan.
///
/// Built once per play/resume/skip and discarded wholesale; it is never
/// edited in place. Tones are front-loaded into the audio driver at anchor
/// time, events are released by the engine's poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub version: u32,
    pub timing: Timing,
    pub events: Vec<PlaybackEvent>,
    pub tones: Vec<ToneInstruction>,
}
