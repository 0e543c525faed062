use crate::audio::AudioDriver;
use crate::display::{display_slices, DisplaySlices};
use crate::model::{CharMeta, Plan, PlayState, PlaybackEvent, Token};
use crate::planner::build_plan;
use crate::timing::Timing;
use crate::tokenizer::{tokenize_messages, TokenStream};

/// Interval hosts should aim for between `tick` calls, in milliseconds.
pub const EVENT_TICK_MS: u64 = 50;

/// Slack when comparing the clock against event offsets. An event due
/// within this window of the current instant is released, so pausing
/// exactly on a boundary delivers the boundary event first.
pub const TIME_EPSILON: f64 = 0.0005;

/// Scheduling headroom between the plan anchor and the first tone, so the
/// audio backend never gets a start time already in the past.
pub const TOKEN_START_DELAY: f64 = 0.02;

/// Structured callback surface consumed by display layers.
///
/// All methods default to no-ops so handlers implement only what they
/// observe. `meta.raw` is the display text before uppercasing.
pub trait SenderHandler {
    fn on_message_start(&mut self, _message_index: usize) {}
    fn on_char_start(&mut self, _display: &str, _meta: &CharMeta) {}
    fn on_char_end(&mut self, _display: &str, _meta: &CharMeta) {}
    fn on_finish(&mut self) {}
    fn on_status_change(&mut self, _status: PlayState) {}
}

/// Handler that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHandler;

impl SenderHandler for NullHandler {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveKind {
    Gap,
    Space,
    Char,
}

/// The token currently in flight, tracked so that pause can force its
/// deferred `char_end` and advance past it exactly once.
#[derive(Debug, Clone)]
struct ActiveToken {
    token_index: usize,
    kind: ActiveKind,
    display: String,
    meta: Option<CharMeta>,
}

/// Timed-playback Morse sender.
///
/// Owns the token cursor, the active plan, and the playback status; all
/// mutation goes through the control methods plus `tick`. The engine is
/// single-threaded by design: a multi-threaded host must serialize calls.
///
/// The token cursor is the sole resumption point. It only advances when a
/// token fully completes (its `token_advance` fires, or pause forces the
/// active token to completion), so resuming never re-sends a character
/// from its start.
pub struct Sender<A: AudioDriver, H: SenderHandler> {
    audio: A,
    handler: H,
    timing: Timing,
    tokens: Vec<Token>,
    display_messages: Vec<String>,
    token_cursor: usize,
    last_message_index: Option<usize>,
    active: Option<ActiveToken>,
    status: PlayState,
    plan: Option<Plan>,
    plan_anchor: Option<f64>,
    next_event: usize,
}

impl<A: AudioDriver, H: SenderHandler> Sender<A, H> {
    pub fn new(audio: A, timing: Timing, handler: H) -> Self {
        Self {
            audio,
            handler,
            timing,
            tokens: Vec::new(),
            display_messages: Vec::new(),
            token_cursor: 0,
            last_message_index: None,
            active: None,
            status: PlayState::Idle,
            plan: None,
            plan_anchor: None,
            next_event: 0,
        }
    }

    pub fn status(&self) -> PlayState {
        self.status
    }

    /// Takes effect on the next plan build (play/resume/skip); never
    /// mutates an active plan.
    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn display_messages(&self) -> &[String] {
        &self.display_messages
    }

    pub fn display_message(&self, message_index: usize) -> &str {
        self.display_messages
            .get(message_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Done/remaining slices of a message for highlighting; the offset is
    /// clamped, never panics.
    pub fn display_slices(&self, message_index: usize, char_offset: usize) -> DisplaySlices {
        display_slices(self.display_message(message_index), char_offset)
    }

    /// Reset everything and load a new message queue, positioning the
    /// cursor at the first token of `start_message_index` (clamped).
    pub fn load_messages(&mut self, messages: &[String], start_message_index: usize) {
        self.clear_plan();
        let now = self.audio.current_time();
        self.audio.cancel_scheduled(now);

        if messages.is_empty() {
            self.tokens.clear();
            self.display_messages.clear();
            self.token_cursor = 0;
            self.last_message_index = None;
            self.active = None;
            self.update_status(PlayState::Idle);
            return;
        }

        let TokenStream {
            tokens,
            display_messages,
        } = tokenize_messages(messages);
        self.tokens = tokens;
        self.display_messages = display_messages;
        self.token_cursor = 0;
        self.last_message_index = None;
        self.active = None;

        let safe_start = start_message_index.min(messages.len() - 1);
        self.seek_to_message(safe_start);
        self.update_status(PlayState::Idle);
    }

    /// Start (or restart) playback from the current token cursor.
    pub fn play(&mut self) {
        if self.tokens.is_empty() {
            return;
        }

        self.audio.unsuspend();
        self.clear_plan();
        let now = self.audio.current_time();
        self.audio.cancel_scheduled(now);

        self.start_playback();
    }

    /// Freeze playback. Due events are flushed first, remaining tones are
    /// cancelled, and the in-flight token is forced to complete so its
    /// deferred `char_end` fires exactly once and the cursor lands on the
    /// next unsent token.
    pub fn pause(&mut self) {
        if self.status != PlayState::Playing {
            return;
        }

        self.sync_to_clock();
        self.clear_plan();
        let now = self.audio.current_time();
        self.audio.cancel_scheduled(now);
        self.complete_active_token();
        self.update_status(PlayState::Paused);
    }

    /// Continue from pause. This is a reissue, not a continuation: a fresh
    /// plan is built from the (already advanced) token cursor.
    pub fn resume(&mut self) {
        if self.status != PlayState::Paused {
            return;
        }

        self.audio.unsuspend();
        self.clear_plan();
        let now = self.audio.current_time();
        self.audio.cancel_scheduled(now);

        self.start_playback();
    }

    /// Clear everything back to idle, including the loaded messages.
    pub fn stop(&mut self) {
        self.clear_plan();
        let now = self.audio.current_time();
        self.audio.cancel_scheduled(now);

        self.tokens.clear();
        self.display_messages.clear();
        self.token_cursor = 0;
        self.last_message_index = None;
        self.active = None;
        self.update_status(PlayState::Idle);
    }

    /// Move the cursor to the first token of `message_index` (or the end
    /// of the stream if it is past the last message). When playing, the
    /// old plan is dropped and playback restarts from the new cursor.
    pub fn skip_to_message(&mut self, message_index: usize) {
        if self.tokens.is_empty() {
            return;
        }

        self.sync_to_clock();
        self.clear_plan();
        self.seek_to_message(message_index);

        if self.status == PlayState::Playing {
            let now = self.audio.current_time();
            self.audio.cancel_scheduled(now);
            self.start_playback();
        }
    }

    /// Reset the cursor to the very first token and park in `Paused`;
    /// never auto-resumes.
    pub fn rewind(&mut self) {
        if self.tokens.is_empty() {
            return;
        }

        self.sync_to_clock();
        self.clear_plan();
        let now = self.audio.current_time();
        self.audio.cancel_scheduled(now);

        self.token_cursor = 0;
        self.last_message_index = None;
        self.active = None;
        self.update_status(PlayState::Paused);
    }

    /// Poll step: read the audio clock once and release every plan event
    /// whose offset has elapsed, in plan order. Hosts call this at a
    /// bounded interval (`EVENT_TICK_MS`); tests call it against a
    /// scripted clock. Audio is unaffected by tick cadence because tones
    /// were scheduled at plan start.
    pub fn tick(&mut self) {
        let now = self.audio.current_time();
        self.process_due_events(now);
    }

    fn update_status(&mut self, next: PlayState) {
        self.status = next;
        self.handler.on_status_change(next);
    }

    fn clear_plan(&mut self) {
        self.plan = None;
        self.plan_anchor = None;
        self.next_event = 0;
    }

    fn seek_to_message(&mut self, message_index: usize) {
        if self.tokens.is_empty() {
            return;
        }

        self.token_cursor = self
            .tokens
            .iter()
            .position(|token| token.message_index() >= message_index)
            .unwrap_or(self.tokens.len());
        self.active = None;
        self.last_message_index = None;
    }

    fn start_playback(&mut self) {
        if self.tokens.is_empty() || self.token_cursor >= self.tokens.len() {
            return;
        }

        let Some(plan) = build_plan(
            &self.tokens,
            self.token_cursor,
            self.timing,
            self.last_message_index,
        ) else {
            return;
        };

        let anchor = self.audio.current_time();
        let audio_anchor = anchor + TOKEN_START_DELAY;
        for tone in &plan.tones {
            self.audio
                .schedule_tone(audio_anchor + tone.offset, tone.duration);
        }

        self.plan = Some(plan);
        self.plan_anchor = Some(anchor);
        self.next_event = 0;
        self.active = None;

        self.update_status(PlayState::Playing);
        // Release anything due at the anchor itself (message start, lead
        // gap) without waiting for the first tick.
        self.process_due_events(anchor + TIME_EPSILON);
    }

    fn sync_to_clock(&mut self) {
        if self.status != PlayState::Playing {
            return;
        }
        let now = self.audio.current_time();
        self.process_due_events(now);
    }

    fn process_due_events(&mut self, target_time: f64) {
        let Some(anchor) = self.plan_anchor else {
            return;
        };
        let elapsed = target_time - anchor;
        if elapsed < -TIME_EPSILON {
            return;
        }

        loop {
            let Some(event) = self
                .plan
                .as_ref()
                .and_then(|plan| plan.events.get(self.next_event))
                .cloned()
            else {
                break;
            };
            if event.time_offset() - elapsed > TIME_EPSILON {
                break;
            }

            self.next_event += 1;
            let finished = matches!(event, PlaybackEvent::Finish { .. });
            self.run_event(event);
            if finished {
                break;
            }
        }
    }

    fn run_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::MessageStart { message_index, .. } => {
                self.last_message_index = Some(message_index);
                self.handler.on_message_start(message_index);
            }
            PlaybackEvent::GapStart { token_index, .. } => {
                self.active = Some(ActiveToken {
                    token_index,
                    kind: ActiveKind::Gap,
                    display: String::new(),
                    meta: None,
                });
            }
            PlaybackEvent::CharStart {
                token_index,
                display,
                meta,
                ..
            } => {
                self.active = Some(ActiveToken {
                    token_index,
                    kind: if meta.is_space {
                        ActiveKind::Space
                    } else {
                        ActiveKind::Char
                    },
                    display: display.clone(),
                    meta: Some(meta.clone()),
                });
                self.handler.on_char_start(&display, &meta);
            }
            PlaybackEvent::CharEnd { display, meta, .. } => {
                self.handler.on_char_end(&display, &meta);
                self.active = None;
            }
            PlaybackEvent::TokenAdvance { token_index, .. } => {
                self.token_cursor = token_index + 1;
                if self
                    .active
                    .as_ref()
                    .is_some_and(|active| active.token_index == token_index)
                {
                    self.active = None;
                }
            }
            PlaybackEvent::Finish { .. } => {
                self.finalize_playback();
            }
        }
    }

    fn complete_active_token(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        match active.kind {
            ActiveKind::Char | ActiveKind::Space => {
                if let Some(meta) = &active.meta {
                    self.handler.on_char_end(&active.display, meta);
                }
            }
            ActiveKind::Gap => {}
        }

        self.token_cursor = self.token_cursor.max(active.token_index + 1);
    }

    fn finalize_playback(&mut self) {
        self.clear_plan();
        self.active = None;
        self.token_cursor = self.tokens.len();
        self.last_message_index = None;
        if self.status != PlayState::Idle {
            self.update_status(PlayState::Idle);
        }
        self.handler.on_finish();
    }
}
