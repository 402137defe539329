use std::time::Instant;

use crate::practice::PracticeSet;
use crate::runtime::{Clock, SystemClock};

pub const GAME_OVER: &str = "Game over!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Complete,
}

/// Counters and buffers for one run through the practice set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub phase: Phase,
    pub sentence_idx: usize,
    pub typed_text: String,
    pub fails: u32,
    pub typed_chars: u32,
    pub started_at: Option<Instant>,
    pub last_keypress_at: Option<Instant>,
    pub chars_per_minute: u32,
    // independent of the physical caps lock key
    pub caps_lock: bool,
}

/// What the screen shows. Fields only change when an operation refreshes them.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub sentence: String,
    pub fails: String,
    pub speed: String,
    pub input: String,
}

impl Default for SessionView {
    fn default() -> Self {
        Self {
            sentence: String::new(),
            fails: fails_label(0),
            speed: speed_label(0),
            input: String::new(),
        }
    }
}

pub fn fails_label(fails: u32) -> String {
    format!("Fails: {fails}")
}

pub fn speed_label(chars_per_minute: u32) -> String {
    format!("Speed: {chars_per_minute} chars/min")
}

/// Owns the practice set and reacts to one input event at a time
#[derive(Debug)]
pub struct SessionController<C: Clock = SystemClock> {
    practice: PracticeSet,
    state: SessionState,
    view: SessionView,
    clock: C,
}

impl SessionController<SystemClock> {
    pub fn new(practice: PracticeSet) -> Self {
        Self::with_clock(practice, SystemClock)
    }
}

impl Default for SessionController<SystemClock> {
    fn default() -> Self {
        Self::new(PracticeSet::default())
    }
}

impl<C: Clock> SessionController<C> {
    pub fn with_clock(practice: PracticeSet, clock: C) -> Self {
        Self {
            practice,
            state: SessionState::default(),
            view: SessionView::default(),
            clock,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn practice(&self) -> &PracticeSet {
        &self.practice
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == Phase::Running
    }

    /// The sentence currently being typed, `None` outside a running session
    pub fn current_sentence(&self) -> Option<&str> {
        if self.is_running() {
            self.practice.get(self.state.sentence_idx)
        } else {
            None
        }
    }

    pub fn start(&mut self) {
        let caps_lock = self.state.caps_lock;
        let now = self.clock.now();

        self.state = SessionState {
            phase: Phase::Running,
            started_at: Some(now),
            caps_lock,
            ..SessionState::default()
        };
        self.view.input.clear();

        self.show_sentence(0);
        self.update_fails();
        self.update_speed();

        log::info!("session started with {} sentences", self.practice.len());
    }

    pub fn stop(&mut self) {
        if self.state.phase != Phase::Complete {
            log::info!(
                "session over: sentence {}/{}, {} fails, {} chars typed",
                self.state.sentence_idx,
                self.practice.len(),
                self.state.fails,
                self.state.typed_chars
            );
        }

        self.state.phase = Phase::Complete;
        self.view.sentence = GAME_OVER.to_string();
        self.view.input.clear();
    }

    pub fn handle_character(&mut self, ch: char, shift_held: bool) {
        let adjusted = if shift_held || self.state.caps_lock {
            ch.to_uppercase().next().unwrap_or(ch)
        } else {
            ch.to_lowercase().next().unwrap_or(ch)
        };

        if self.append(adjusted) {
            self.finish_keystroke();
        }
    }

    pub fn handle_digit(&mut self, digit: u8) {
        let Some(literal) = char::from_digit(u32::from(digit), 10) else {
            return;
        };

        if self.append(literal) {
            self.finish_keystroke();
        }
    }

    pub fn handle_comma(&mut self) {
        if self.append(',') {
            self.finish_keystroke();
        }
    }

    pub fn handle_period(&mut self) {
        if self.append('.') {
            self.finish_keystroke();
        }
    }

    /// Drops the last typed character. Counters and fails are left alone.
    pub fn handle_backspace(&mut self) {
        if !self.is_running() {
            return;
        }

        if self.state.typed_text.pop().is_some() {
            self.view.input = self.state.typed_text.clone();
        }
    }

    /// The on-screen space bar: no fail/speed refresh and no counters
    pub fn handle_space(&mut self) {
        self.append(' ');
    }

    /// On-screen buttons that carry their literal as a tag
    pub fn handle_tagged_button(&mut self, literal: char) {
        self.append(literal);
    }

    pub fn toggle_caps_lock(&mut self) {
        self.state.caps_lock = !self.state.caps_lock;
        // not a keystroke, so a pending mismatch is not counted again
        self.advance_if_complete();
    }

    pub fn calculate_speed(&mut self) -> u32 {
        let Some(started_at) = self.state.started_at else {
            return self.state.chars_per_minute;
        };

        let elapsed = self.clock.now().saturating_duration_since(started_at);
        if elapsed.is_zero() {
            return self.state.chars_per_minute;
        }

        let minutes = elapsed.as_secs_f64() / 60.0;
        self.state.chars_per_minute = (f64::from(self.state.typed_chars) / minutes) as u32;

        self.state.chars_per_minute
    }

    /// Appends to the typed text and runs the completion check.
    /// Returns false when no session is running and nothing happened.
    fn append(&mut self, literal: char) -> bool {
        if !self.is_running() {
            return false;
        }

        self.state.typed_text.push(literal);
        self.view.input = self.state.typed_text.clone();
        self.check_sentence_complete();

        true
    }

    fn finish_keystroke(&mut self) {
        self.update_fails();
        self.state.typed_chars += 1;
        self.state.last_keypress_at = Some(self.clock.now());
        self.update_speed();
    }

    fn check_sentence_complete(&mut self) {
        if self.advance_if_complete() {
            return;
        }

        let Some(target) = self.current_sentence() else {
            return;
        };

        let typed = self.state.typed_text.chars().count();
        let Some(last) = self.state.typed_text.chars().last() else {
            return;
        };

        // past the end of the target there is nothing left to compare against
        let mismatch = target.chars().nth(typed - 1).is_some_and(|expected| expected != last);

        if mismatch {
            self.state.fails += 1;
            self.update_fails();
        }
    }

    /// Moves on when the typed text equals the current sentence
    fn advance_if_complete(&mut self) -> bool {
        let complete = self
            .current_sentence()
            .is_some_and(|target| self.state.typed_text == target);

        if complete {
            self.advance_sentence();
        }
        complete
    }

    fn advance_sentence(&mut self) {
        self.state.sentence_idx += 1;

        if self.state.sentence_idx < self.practice.len() {
            log::debug!(
                "sentence {}/{} done",
                self.state.sentence_idx,
                self.practice.len()
            );
            self.show_sentence(self.state.sentence_idx);
            self.view.input.clear();
            self.state.typed_text.clear();
        } else {
            self.stop();
        }
    }

    fn show_sentence(&mut self, idx: usize) {
        self.view.sentence = self.practice.get(idx).unwrap_or_default().to_string();
    }

    fn update_fails(&mut self) {
        self.view.fails = fails_label(self.state.fails);
    }

    fn update_speed(&mut self) {
        let speed = self.calculate_speed();
        self.view.speed = speed_label(speed);
    }
}
