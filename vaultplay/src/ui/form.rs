//! Identifier form, banners, and the "Video Ready" card.

use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style, Stylize as _},
    text::{Line, Span, Text},
    widgets::Paragraph,
};
use vaultplay_core::Phase;

use crate::app::{AppState, InputField, Mode};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Current spinner glyph for `state.spinner`.
pub fn spinner_frame(state: &AppState) -> &'static str {
    SPINNER[state.spinner % SPINNER.len()]
}

pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            "▶ Admin Video Player",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from("Secure encrypted video streaming platform").fg(theme.muted),
    ]);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// Renders one identifier input and, when it is focused and editable, places
/// the terminal cursor at the end of its text.
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    field: InputField,
    state: &AppState,
    theme: &Theme,
) {
    let editable = state.session.inputs_editable();
    let focused = editable && state.focus == field && state.mode == Mode::Normal;
    let (title, value, placeholder) = match field {
        InputField::Uid => (" User ID (UID) ", state.session.uid(), "Enter UID"),
        InputField::Tid => (" Transaction ID ", state.session.tid(), "Enter Transaction ID"),
    };

    let block = panel_block(title, focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let line = if value.is_empty() {
        Line::from(placeholder).fg(theme.placeholder)
    } else if editable {
        Line::from(value).fg(theme.input_text)
    } else {
        Line::from(value).fg(theme.input_disabled)
    };
    frame.render_widget(Paragraph::new(line), inner);

    if focused && inner.width > 0 {
        let typed = value.chars().count() as u16;
        let x = inner.x + typed.min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position { x, y: inner.y });
    }
}

/// Error, loading, or success banner. Errors win over success.
pub fn render_banner(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let session = &state.session;
    let line = if session.phase() == Phase::Errored {
        Line::from(format!("✖ {}", session.error_message())).fg(theme.error)
    } else if session.phase() == Phase::Loading {
        Line::from(format!("{} Loading...", spinner_frame(state))).fg(theme.muted)
    } else if session.loaded_successfully() {
        Line::from("✔ Video loaded successfully!").fg(theme.success)
    } else {
        return;
    };
    let block = panel_block("", false, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(line), inner);
}

/// The primary action: "Load & Play" while editable, "Load Different Video"
/// once a stream exists.
pub fn render_action(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let line = if state.session.stream_request_url().is_none() {
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw("▶ Load & Play Video"),
        ])
    } else {
        Line::from(vec![
            Span::styled("[r] ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw("Load Different Video"),
        ])
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Card shown when a stream is loaded but the player modal is closed.
pub fn render_ready_card(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block(" Video Ready! ", false, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let text = Text::from(vec![
        Line::from(""),
        Line::from("Your video has been decrypted and is ready to play").fg(theme.muted),
        Line::from(""),
        Line::from(vec![
            Span::styled("[o] ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw("Open Video Player"),
        ]),
        Line::from(""),
        identifiers_line(state, theme, "Transaction ID"),
    ]);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

/// `UID: … | <tid_label>: …` with the values highlighted.
pub fn identifiers_line<'a>(state: &'a AppState, theme: &Theme, tid_label: &'a str) -> Line<'a> {
    let value = Style::default().fg(theme.identifier);
    Line::from(vec![
        Span::raw("UID: "),
        Span::styled(state.session.uid(), value),
        Span::raw(format!(" | {tid_label}: ")),
        Span::styled(state.session.tid(), value),
    ])
    .fg(theme.muted)
}

pub fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = Text::from(vec![
        Line::from("Secured with RSA + AES-GCM encryption"),
        Line::from("Decryption happens server-side; no key material reaches this client"),
    ])
    .fg(theme.muted);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}
