use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything the session understands, independent of where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Character { ch: char, shift: bool },
    Digit(u8),
    Comma,
    Period,
    Space,
    Backspace,
    TaggedButton(char),
    ToggleCapsLock,
    Start,
    Stop,
    Quit,
}

/// Translate a terminal key event. Keys the trainer doesn't use map to `None`.
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char(c) if c.is_alphabetic() => Some(Command::Character {
            ch: c,
            // some terminals report shifted letters without the modifier
            shift: shift || c.is_uppercase(),
        }),
        KeyCode::Char(' ') => Some(Command::Character { ch: ' ', shift }),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            c.to_digit(10).map(|d| Command::Digit(d as u8))
        }
        KeyCode::Char(',') => Some(Command::Comma),
        KeyCode::Char('.') => Some(Command::Period),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Tab | KeyCode::F(2) | KeyCode::CapsLock => Some(Command::ToggleCapsLock),
        KeyCode::Enter | KeyCode::F(5) => Some(Command::Start),
        KeyCode::Esc => Some(Command::Stop),
        _ => None,
    }
}

/// Clickable controls drawn under the input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Digit(u8),
    Comma,
    Period,
    Space,
    Backspace,
    CapsLock,
    Start,
    Stop,
}

pub const KEYPAD: [Button; 17] = [
    Button::Digit(1),
    Button::Digit(2),
    Button::Digit(3),
    Button::Digit(4),
    Button::Digit(5),
    Button::Digit(6),
    Button::Digit(7),
    Button::Digit(8),
    Button::Digit(9),
    Button::Digit(0),
    Button::Comma,
    Button::Period,
    Button::Space,
    Button::Backspace,
    Button::CapsLock,
    Button::Start,
    Button::Stop,
];

impl Button {
    pub fn label(&self) -> String {
        match self {
            Button::Digit(d) => d.to_string(),
            Button::Comma => ",".to_string(),
            Button::Period => ".".to_string(),
            Button::Space => "Space".to_string(),
            Button::Backspace => "⌫".to_string(),
            Button::CapsLock => "Caps".to_string(),
            Button::Start => "Start".to_string(),
            Button::Stop => "Stop".to_string(),
        }
    }

    /// Digit and punctuation buttons carry their literal as a tag
    pub fn command(&self) -> Command {
        match self {
            Button::Digit(d) => Command::TaggedButton(char::from(b'0' + d % 10)),
            Button::Comma => Command::TaggedButton(','),
            Button::Period => Command::TaggedButton('.'),
            Button::Space => Command::Space,
            Button::Backspace => Command::Backspace,
            Button::CapsLock => Command::ToggleCapsLock,
            Button::Start => Command::Start,
            Button::Stop => Command::Stop,
        }
    }
}
