use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keytrainer::{
    app::App,
    config::Config,
    practice::{PracticeSet, SENTENCES},
    runtime::ManualClock,
    session::{Phase, SessionController, GAME_OVER},
};

/// The key event a terminal would send for `c`
fn key_for(c: char) -> KeyEvent {
    let modifiers = if c.is_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    KeyEvent::new(KeyCode::Char(c), modifiers)
}

fn builtin_app() -> App<ManualClock> {
    App::with_controller(
        SessionController::with_clock(PracticeSet::default(), ManualClock::new()),
        Config::default(),
    )
}

#[test]
fn full_practice_set_without_mistakes() {
    let mut app = builtin_app();
    app.on_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

    let mut total_chars = 0u32;
    for (idx, sentence) in SENTENCES.iter().enumerate() {
        assert_eq!(app.session.state().sentence_idx, idx);
        assert_eq!(app.session.view().sentence, *sentence);

        for c in sentence.chars() {
            app.session.clock().advance(Duration::from_millis(200));
            app.on_key(&key_for(c));
            total_chars += 1;
        }
    }

    assert_eq!(app.session.phase(), Phase::Complete);
    assert_eq!(app.session.view().sentence, GAME_OVER);
    assert_eq!(app.session.view().fails, "Fails: 0");
    assert_eq!(app.session.state().typed_chars, total_chars);
    // one keystroke every 200ms, give or take float truncation
    let cpm = app.session.state().chars_per_minute;
    assert!((299..=300).contains(&cpm), "unexpected speed {cpm}");
}

#[test]
fn forgetting_shift_costs_a_fail_per_capital() {
    let mut app = builtin_app();
    app.on_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

    // "Max ..." typed all lowercase, then fixed
    app.on_key(&KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
    assert_eq!(app.session.state().fails, 1);

    app.on_key(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
    app.on_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    app.on_key(&KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE));
    app.on_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    app.on_key(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));

    assert_eq!(app.session.state().typed_text, "Ma");
    assert_eq!(app.session.state().fails, 1);
}

#[test]
fn restart_mid_session_starts_over() {
    let mut app = builtin_app();
    app.on_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    for c in "Mzz".chars() {
        app.on_key(&key_for(c));
    }
    assert_eq!(app.session.state().fails, 2);

    app.on_key(&KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE));

    assert_eq!(app.session.phase(), Phase::Running);
    assert_eq!(app.session.state().fails, 0);
    assert_eq!(app.session.state().typed_chars, 0);
    assert_eq!(app.session.view().sentence, SENTENCES[0]);
    assert_eq!(app.session.view().input, "");
}
