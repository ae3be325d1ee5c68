//! UI rendering module for vaultplay.
//!
//! Re-exports `render()` as the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`, the form
//! and ready card in `form.rs`, the player modal in `player.rs`.

mod form;
pub mod help;
pub mod keybindings;
mod layout;
mod player;

use ratatui::Frame;

use crate::app::{AppState, InputField, Mode};
use crate::theme::Theme;
use keybindings::Screen;
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame.
///
/// Called exactly once per `AppEvent::Render`. Overlays are drawn last so they
/// sit on top: player modal first, then help.
pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let areas = compute_layout(frame);

    form::render_header(frame, areas.header, theme);
    form::render_input(frame, areas.uid, InputField::Uid, state, theme);
    form::render_input(frame, areas.tid, InputField::Tid, state, theme);
    form::render_banner(frame, areas.banner, state, theme);
    form::render_action(frame, areas.action, state, theme);
    if Screen::of(state) == Screen::ReadyCard {
        form::render_ready_card(frame, areas.card, state, theme);
    }
    form::render_footer(frame, areas.footer, theme);
    render_status_bar(frame, areas.status_bar, state, theme);

    if state.session.surface_visible() {
        player::render_player_modal(frame, state, theme);
    }
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use vaultplay_core::{Event, Session};

    use crate::surface::types::{SignalKind, SurfaceSignal};

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let theme = Theme::dark();
        terminal.draw(|f| render(f, state, &theme)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn empty_form_shows_placeholders() {
        let screen = draw(&AppState::new(Session::default()));
        assert!(screen.contains("Enter UID"));
        assert!(screen.contains("Enter Transaction ID"));
        assert!(screen.contains("Load & Play Video"));
        assert!(screen.contains("IDLE"));
    }

    #[test]
    fn validation_error_is_shown() {
        let mut state = AppState::new(Session::default());
        state.dispatch(Event::Trigger);
        assert!(draw(&state).contains("Please enter both UID and Transaction ID"));
    }

    #[test]
    fn player_modal_and_ready_card() {
        let mut state = AppState::new(Session::default());
        state.dispatch(Event::EditUid("u1".into()));
        state.dispatch(Event::EditTid("t1".into()));
        state.dispatch(Event::Trigger);
        let screen = draw(&state);
        assert!(screen.contains("Encrypted Video Player"));
        assert!(screen.contains("uid=u1&tid=t1"));

        state.dispatch(Event::Dismiss);
        let screen = draw(&state);
        assert!(screen.contains("Video Ready!"));
        assert!(screen.contains("Open Video Player"));
        assert!(!screen.contains("Encrypted Video Player"));
    }

    #[test]
    fn modal_reports_finished_playback() {
        let mut state = AppState::new(Session::default());
        state.dispatch(Event::EditUid("u1".into()));
        state.dispatch(Event::EditTid("t1".into()));
        state.dispatch(Event::Trigger);
        assert!(draw(&state).contains("Buffering stream"));

        let ticket = state.load_ticket;
        state.apply_surface_signal(SurfaceSignal { ticket, kind: SignalKind::Started });
        assert!(draw(&state).contains("Playing in external player"));

        state.apply_surface_signal(SurfaceSignal { ticket, kind: SignalKind::Finished });
        let screen = draw(&state);
        assert!(screen.contains("Finished. Press Esc to close"));
        assert!(!screen.contains("Buffering stream"));
    }
}
