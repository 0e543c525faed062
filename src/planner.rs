use crate::code::pattern_for;
use crate::model::{CharMeta, GapKind, Plan, PlaybackEvent, Token, ToneInstruction};
use crate::timing::Timing;

/// Silence before the first token of a message, in seconds.
pub const MESSAGE_LEAD: f64 = 0.5;
/// Silence after the last token of a message, in seconds.
pub const MESSAGE_TAIL: f64 = 1.0;
/// Ramp inserted between tone elements so the oscillator can key on and
/// off without an audible click.
pub const ELEMENT_RAMP: f64 = 0.005;

#[derive(Debug, Default)]
struct PlanBuilder {
    events: Vec<PlaybackEvent>,
    tones: Vec<ToneInstruction>,
    cursor: f64,
}

impl PlanBuilder {
    fn message_start(&mut self, message_index: usize) {
        self.events.push(PlaybackEvent::MessageStart {
            time_offset: self.cursor,
            message_index,
        });
    }

    fn gap(&mut self, token_index: usize, gap: GapKind) {
        self.events.push(PlaybackEvent::GapStart {
            time_offset: self.cursor,
            token_index,
            gap,
        });
        self.cursor += match gap {
            GapKind::Lead => MESSAGE_LEAD,
            GapKind::Tail => MESSAGE_TAIL,
        };
        self.token_advance(token_index);
    }

    fn char_start(&mut self, token_index: usize, display: &str, meta: &CharMeta) {
        self.events.push(PlaybackEvent::CharStart {
            time_offset: self.cursor,
            token_index,
            display: display.to_string(),
            meta: meta.clone(),
        });
    }

    fn char_end(&mut self, token_index: usize, display: &str, meta: &CharMeta) {
        self.events.push(PlaybackEvent::CharEnd {
            time_offset: self.cursor,
            token_index,
            display: display.to_string(),
            meta: meta.clone(),
        });
    }

    fn token_advance(&mut self, token_index: usize) {
        self.events.push(PlaybackEvent::TokenAdvance {
            time_offset: self.cursor,
            token_index,
        });
    }

    /// Tone elements for one character, starting at the current cursor.
    /// Returns without tones for unknown characters, which still occupy
    /// one silent dot so the timeline keeps moving.
    fn char_tones(&mut self, raw: &str, timing: Timing) {
        let start = self.cursor;

        match pattern_for(raw) {
            Some(pattern) if !pattern.is_empty() => {
                let symbols: Vec<char> = pattern.chars().collect();
                for (i, symbol) in symbols.iter().enumerate() {
                    let width = if *symbol == '.' {
                        timing.dot
                    } else {
                        timing.dash
                    };
                    self.tones.push(ToneInstruction {
                        offset: self.cursor,
                        duration: width,
                    });
                    self.cursor += width + ELEMENT_RAMP;
                    if i < symbols.len() - 1 {
                        self.cursor += timing.dot;
                    }
                }
            }
            _ => {
                self.cursor += timing.dot;
            }
        }

        debug_assert!(self.cursor > start);
    }

    fn finish(&mut self) {
        self.events.push(PlaybackEvent::Finish {
            time_offset: self.cursor,
        });
    }
}

/// Build a playback plan covering `tokens[start_index..]`.
///
/// `last_message_index` is the message the engine was last inside, if any;
/// a `MessageStart` event is emitted whenever a token's message differs
/// from it. All offsets are relative to the plan anchor chosen when the
/// plan is started. Building is pure and deterministic: the same inputs
/// always produce an identical plan.
///
/// Returns `None` when `start_index` is at or past the end of the stream.
pub fn build_plan(
    tokens: &[Token],
    start_index: usize,
    timing: Timing,
    last_message_index: Option<usize>,
) -> Option<Plan> {
    if start_index >= tokens.len() {
        return None;
    }

    let mut builder = PlanBuilder::default();
    let mut tracked = last_message_index;

    for (token_index, token) in tokens.iter().enumerate().skip(start_index) {
        if tracked != Some(token.message_index()) {
            builder.message_start(token.message_index());
            tracked = Some(token.message_index());
        }

        match token {
            Token::Gap { gap, .. } => {
                builder.gap(token_index, *gap);
            }
            Token::Space { message_index } => {
                let meta = CharMeta {
                    message_index: *message_index,
                    length: 0,
                    is_space: true,
                    raw: " ".to_string(),
                };
                builder.char_start(token_index, " ", &meta);
                builder.cursor += timing.word_space;
                builder.char_end(token_index, " ", &meta);
                builder.token_advance(token_index);
            }
            Token::Char {
                message_index,
                raw,
                display,
                add_char_space,
            } => {
                let display_char = display.to_uppercase();
                let meta = CharMeta {
                    message_index: *message_index,
                    length: display.chars().count(),
                    is_space: false,
                    raw: display.clone(),
                };
                builder.char_start(token_index, &display_char, &meta);
                builder.char_tones(raw, timing);
                builder.char_end(token_index, &display_char, &meta);
                builder.token_advance(token_index);

                if *add_char_space && timing.char_space > 0.0 {
                    builder.cursor += timing.char_space;
                }
            }
        }
    }

    builder.finish();

    Some(Plan {
        version: 1,
        timing,
        events: builder.events,
        tones: builder.tones,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanStats {
    pub events: usize,
    pub tones: usize,
    /// Sendable characters (spaces excluded).
    pub chars: usize,
    /// Total plan duration in seconds.
    pub duration: f64,
}

pub fn stats(plan: &Plan) -> PlanStats {
    let mut out = PlanStats {
        events: plan.events.len(),
        tones: plan.tones.len(),
        ..Default::default()
    };

    for event in &plan.events {
        match event {
            PlaybackEvent::CharStart { meta, .. } if !meta.is_space => out.chars += 1,
            PlaybackEvent::Finish { time_offset } => out.duration = *time_offset,
            _ => {}
        }
    }

    out
}
