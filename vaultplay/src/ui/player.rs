//! Player modal renderer.
//!
//! Drawn last (before help) over the form with `Clear`, like a modal dialog.
//! The actual video plays in the external player; this modal mirrors its
//! state and offers the close / load-different-video controls.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint},
    style::{Modifier, Style, Stylize as _},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};
use vaultplay_core::Phase;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::form::{identifiers_line, spinner_frame};

pub fn render_player_modal(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame
        .area()
        .centered(Constraint::Percentage(85), Constraint::Percentage(70));
    if area.height < 8 || area.width < 30 {
        return;
    }
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" ▶ Encrypted Video Player ")
        .title_bottom(Line::from(" Esc close · r Load Different Video ").right_aligned())
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(theme.border_active));

    let status = match state.session.phase() {
        Phase::Playing => Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.success)),
            Span::raw("Playing in external player"),
        ]),
        _ if state.playback_finished => Line::from(vec![
            Span::styled("■ ", Style::default().fg(theme.success)),
            Span::raw("Finished. Press Esc to close, r to load a different video"),
        ]),
        _ => Line::from(format!("{} Buffering stream...", spinner_frame(state))).fg(theme.muted),
    };

    let text = Text::from(vec![
        identifiers_line(state, theme, "TID"),
        Line::from(""),
        status,
        Line::from(""),
        Line::from(vec![
            Span::raw("Source: "),
            Span::styled(
                state.session.stream_request_url_str(),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("✔ ", Style::default().fg(theme.success)),
            Span::raw("Decrypted with RSA-4096 + AES-256-GCM"),
        ])
        .fg(theme.muted),
    ]);

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        area,
    );
}
