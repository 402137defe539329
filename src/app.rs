use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::{
    config::Config,
    keymap::{command_for_key, Button, Command},
    runtime::{Clock, SystemClock},
    session::SessionController,
    ui::{hit_test, keypad_layout, screen_layout},
};

#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    pub session: SessionController<C>,
    pub config: Config,
    pub should_quit: bool,
}

impl App<SystemClock> {
    pub fn new(config: Config) -> Self {
        Self::with_controller(SessionController::default(), config)
    }
}

impl<C: Clock> App<C> {
    pub fn with_controller(mut session: SessionController<C>, config: Config) -> Self {
        if config.caps_lock != session.state().caps_lock {
            session.toggle_caps_lock();
        }
        if config.auto_start {
            session.start();
        }

        Self {
            session,
            config,
            should_quit: false,
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        log::debug!("command {command:?}");
        let before = self.session.phase();

        match command {
            Command::Character { ch, shift } => self.session.handle_character(ch, shift),
            Command::Digit(d) => self.session.handle_digit(d),
            Command::Comma => self.session.handle_comma(),
            Command::Period => self.session.handle_period(),
            Command::Space => self.session.handle_space(),
            Command::Backspace => self.session.handle_backspace(),
            Command::TaggedButton(literal) => self.session.handle_tagged_button(literal),
            Command::ToggleCapsLock => self.session.toggle_caps_lock(),
            Command::Start => self.session.start(),
            Command::Stop => self.session.stop(),
            Command::Quit => self.should_quit = true,
        }

        let after = self.session.phase();
        if before != after {
            log::info!("phase {before} -> {after}");
        }
    }

    /// Returns true if the key did anything
    pub fn on_key(&mut self, key: &KeyEvent) -> bool {
        match command_for_key(key) {
            Some(command) => {
                self.dispatch(command);
                true
            }
            None => false,
        }
    }

    /// Left clicks on the keypad press the button under the pointer
    pub fn on_mouse(&mut self, area: Rect, mouse: &MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }

        match self.button_at(area, mouse.column, mouse.row) {
            Some(button) => {
                self.dispatch(button.command());
                true
            }
            None => false,
        }
    }

    pub fn button_at(&self, area: Rect, column: u16, row: u16) -> Option<Button> {
        if !self.config.show_keypad {
            return None;
        }

        let layout = screen_layout(area, true);
        hit_test(&keypad_layout(layout.keypad), column, row)
    }
}
