//! Keybinding dispatcher for vaultplay.
//!
//! Translates raw crossterm `KeyEvent`s into session events and `AppState`
//! mutations and returns a `KeyAction` telling the event loop whether to
//! continue or quit. The dispatcher branches first on the overlay mode, then
//! on what the operator is looking at: the player modal, the input form, or
//! the "stream ready" card.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vaultplay_core::Event;

use crate::app::{AppState, Mode};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running.
    Continue,
    /// Tear down the terminal and exit.
    Quit,
}

/// What the main area currently shows, which decides the active key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Identifier form; inputs accept typing.
    Form,
    /// Stream loaded, player modal hidden.
    ReadyCard,
    /// Player modal on top.
    Player,
}

impl Screen {
    pub fn of(state: &AppState) -> Self {
        if state.session.surface_visible() {
            Screen::Player
        } else if state.session.stream_request_url().is_some() {
            Screen::ReadyCard
        } else {
            Screen::Form
        }
    }
}

/// Dispatches a key event to the handler matching the current mode and screen.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global keys work everywhere, including while typing.
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return KeyAction::Quit,
        KeyCode::F(1) => {
            toggle_help(state);
            return KeyAction::Continue;
        }
        KeyCode::Char('r') if ctrl => {
            state.dispatch(Event::Reset);
            return KeyAction::Continue;
        }
        _ => {}
    }

    if state.mode == Mode::HelpOverlay {
        return handle_help(key, state);
    }

    match Screen::of(state) {
        Screen::Form => handle_form(key, state),
        Screen::ReadyCard => handle_ready_card(key, state),
        Screen::Player => handle_player(key, state),
    }
}

fn toggle_help(state: &mut AppState) {
    state.mode = match state.mode {
        Mode::Normal => {
            state.help_scroll = 0;
            Mode::HelpOverlay
        }
        Mode::HelpOverlay => Mode::Normal,
    };
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Typing goes to the focused field; Enter is "Load & Play".
///
/// Every printable character is text here, so quitting and help use the
/// global Ctrl/F-key bindings only.
fn handle_form(key: KeyEvent, state: &mut AppState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.focus = state.focus.toggle();
        }
        KeyCode::Enter => {
            state.dispatch(Event::Trigger);
        }
        KeyCode::Backspace => {
            state.edit_focused(|t| {
                t.pop();
            });
        }
        KeyCode::Char('u') if ctrl => {
            state.edit_focused(String::clear);
        }
        KeyCode::Char(c) if !ctrl => {
            state.edit_focused(|t| t.push(c));
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Ready card
// ---------------------------------------------------------------------------

fn handle_ready_card(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('o') | KeyCode::Enter => {
            state.dispatch(Event::Reopen);
        }
        KeyCode::Char('r') => {
            state.dispatch(Event::Reset);
        }
        KeyCode::Char('?') => toggle_help(state),
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Player modal
// ---------------------------------------------------------------------------

fn handle_player(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('x') => {
            state.dispatch(Event::Dismiss);
        }
        KeyCode::Char('r') => {
            state.dispatch(Event::Reset);
        }
        KeyCode::Char('?') => toggle_help(state),
        KeyCode::Char('q') => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use vaultplay_core::{Phase, Session};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(state: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(press(KeyCode::Char(c)), state);
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(Session::default());
        type_str(&mut state, "u1");
        handle_key(press(KeyCode::Tab), &mut state);
        type_str(&mut state, "t1");
        handle_key(press(KeyCode::Enter), &mut state);
        state
    }

    #[test]
    fn typing_fills_focused_field_including_q() {
        let mut state = AppState::new(Session::default());
        type_str(&mut state, "q?x");
        assert_eq!(state.session.uid(), "q?x");
        handle_key(press(KeyCode::Backspace), &mut state);
        assert_eq!(state.session.uid(), "q?");
        handle_key(ctrl('u'), &mut state);
        assert_eq!(state.session.uid(), "");
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn enter_on_empty_form_shows_validation_error() {
        let mut state = AppState::new(Session::default());
        handle_key(press(KeyCode::Enter), &mut state);
        assert_eq!(state.session.phase(), Phase::Errored);
        assert_eq!(Screen::of(&state), Screen::Form);
    }

    #[test]
    fn enter_with_both_ids_opens_player() {
        let state = loaded();
        assert_eq!(state.session.phase(), Phase::Ready);
        assert_eq!(Screen::of(&state), Screen::Player);
    }

    #[test]
    fn esc_dismisses_and_o_reopens() {
        let mut state = loaded();
        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(Screen::of(&state), Screen::ReadyCard);
        handle_key(press(KeyCode::Char('o')), &mut state);
        assert_eq!(Screen::of(&state), Screen::Player);
    }

    #[test]
    fn typing_is_ignored_while_stream_is_loaded() {
        let mut state = loaded();
        handle_key(press(KeyCode::Esc), &mut state);
        handle_key(press(KeyCode::Char('z')), &mut state);
        assert_eq!(state.session.uid(), "u1");
    }

    #[test]
    fn ctrl_r_resets_from_player() {
        let mut state = loaded();
        handle_key(ctrl('r'), &mut state);
        assert_eq!(state.session, Session::default());
        assert_eq!(Screen::of(&state), Screen::Form);
    }

    #[test]
    fn quit_keys() {
        let mut state = AppState::new(Session::default());
        assert_eq!(handle_key(ctrl('c'), &mut state), KeyAction::Quit);
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        let mut state = loaded();
        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn f1_toggles_help_and_blocks_typing() {
        let mut state = AppState::new(Session::default());
        handle_key(press(KeyCode::F(1)), &mut state);
        assert_eq!(state.mode, Mode::HelpOverlay);
        handle_key(press(KeyCode::Char('j')), &mut state);
        assert_eq!(state.help_scroll, 1);
        assert_eq!(state.session.uid(), "");
        handle_key(KeyEvent::new_with_kind(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }
}
