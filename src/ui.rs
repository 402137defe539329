use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    keymap::{Button, KEYPAD},
    runtime::Clock,
    session::Phase,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const BUTTON_HEIGHT: u16 = 3;
const KEYPAD_ROWS: u16 = 2;

/// Screen regions, top to bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub sentence: Rect,
    pub input: Rect,
    pub stats: Rect,
    pub keypad: Rect,
    pub legend: Rect,
}

pub fn screen_layout(area: Rect, show_keypad: bool) -> ScreenLayout {
    let keypad_height = if show_keypad {
        BUTTON_HEIGHT * KEYPAD_ROWS
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Length(4), // sentence
                Constraint::Length(4), // input
                Constraint::Length(1), // fails / speed
                Constraint::Length(1), // padding
                Constraint::Length(keypad_height),
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    ScreenLayout {
        title: chunks[0],
        sentence: chunks[2],
        input: chunks[3],
        stats: chunks[4],
        keypad: chunks[6],
        legend: chunks[8],
    }
}

/// Button rectangles inside the keypad region, flowing left to right.
/// Buttons that don't fit are left out.
pub fn keypad_layout(keypad: Rect) -> Vec<(Button, Rect)> {
    let mut placed = Vec::with_capacity(KEYPAD.len());
    let mut x = keypad.x;
    let mut y = keypad.y;

    for button in KEYPAD {
        let width = button.label().width() as u16 + 4;

        if x + width > keypad.x + keypad.width {
            x = keypad.x;
            y += BUTTON_HEIGHT;
        }
        if width > keypad.width || y + BUTTON_HEIGHT > keypad.y + keypad.height {
            break;
        }

        placed.push((button, Rect::new(x, y, width, BUTTON_HEIGHT)));
        x += width;
    }

    placed
}

pub fn hit_test(buttons: &[(Button, Rect)], column: u16, row: u16) -> Option<Button> {
    buttons
        .iter()
        .find(|(_, r)| column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height)
        .map(|(button, _)| *button)
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let state = session.state();
        let view = session.view();
        let layout = screen_layout(area, self.config.show_keypad);

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let caps_style = Style::default().patch(bold_style).fg(Color::Yellow);

        let phase_style = match session.phase() {
            Phase::Idle => dim_style,
            Phase::Running => green_bold_style,
            Phase::Complete => Style::default().patch(bold_style).fg(Color::Magenta),
        };
        let mut title = vec![
            Span::styled("keytrainer", bold_style),
            Span::raw("  "),
            Span::styled(session.phase().to_string(), phase_style),
        ];
        if session.is_running() {
            title.push(Span::styled(
                format!(
                    "  sentence {}/{}",
                    state.sentence_idx + 1,
                    session.practice().len()
                ),
                dim_style,
            ));
        }
        if state.caps_lock {
            title.push(Span::raw("  "));
            title.push(Span::styled("CAPS", caps_style));
        }
        Paragraph::new(Line::from(title)).render(layout.title, buf);

        let sentence = if session.phase() == Phase::Idle {
            Paragraph::new(Span::styled(
                "Press Enter or click Start to begin",
                Style::default().patch(dim_style).patch(italic_style),
            ))
        } else {
            Paragraph::new(Span::styled(view.sentence.as_str(), bold_style))
        };
        sentence
            .block(Block::default().borders(Borders::ALL).title("Sentence"))
            .wrap(Wrap { trim: false })
            .render(layout.sentence, buf);

        // typed text colored against the target, the label itself stays the source of truth
        let target: Vec<char> = session
            .current_sentence()
            .map(|s| s.chars().collect())
            .unwrap_or_default();
        let mut spans = view
            .input
            .chars()
            .enumerate()
            .map(|(idx, c)| {
                let shown = match c {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                };
                match target.get(idx) {
                    Some(expected) if *expected == c => Span::styled(shown, green_bold_style),
                    Some(_) => Span::styled(shown, red_bold_style),
                    None if target.is_empty() => Span::raw(shown),
                    None => Span::styled(shown, red_bold_style),
                }
            })
            .collect::<Vec<Span>>();
        if session.is_running() {
            spans.push(Span::styled(
                "_",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Input"))
            .wrap(Wrap { trim: false })
            .render(layout.input, buf);

        let stats_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(layout.stats);
        Paragraph::new(Span::styled(view.fails.as_str(), bold_style))
            .alignment(Alignment::Left)
            .render(stats_chunks[0], buf);
        Paragraph::new(Span::styled(view.speed.as_str(), bold_style))
            .alignment(Alignment::Right)
            .render(stats_chunks[1], buf);

        if self.config.show_keypad {
            for (button, rect) in keypad_layout(layout.keypad) {
                let style = match button {
                    Button::CapsLock if state.caps_lock => caps_style,
                    Button::Start => green_bold_style,
                    Button::Stop => red_bold_style,
                    _ => Style::default(),
                };
                Paragraph::new(Span::styled(button.label(), style))
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center)
                    .render(rect, buf);
            }
        }

        Paragraph::new(Span::styled(
            "(enter) start / (esc) stop / (tab) caps lock / (ctrl+c) quit",
            italic_style,
        ))
        .render(layout.legend, buf);
    }
}
