//! Help overlay renderer for vaultplay.
//!
//! Draws a centred modal over everything else, erasing the background with
//! `Clear` inside the same `terminal.draw()` closure.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 50 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 50 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help: j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Form"),
        Line::from("  Tab / ↑ / ↓   Switch between UID and Transaction ID"),
        Line::from("  Enter         Load & play the video"),
        Line::from("  Backspace     Delete last character"),
        Line::from("  Ctrl-u        Clear the field"),
        Line::from(""),
        Line::from("Video ready"),
        Line::from("  o / Enter     Open the video player"),
        Line::from("  r             Load a different video"),
        Line::from(""),
        Line::from("Video player"),
        Line::from("  Esc / x       Close the player (keeps the video loaded)"),
        Line::from("  r             Load a different video"),
        Line::from(""),
        Line::from("Anywhere"),
        Line::from("  Ctrl-r        Start over"),
        Line::from("  F1            Open / close this help"),
        Line::from("  Ctrl-c        Quit"),
        Line::from("  Ctrl-q        Quit"),
        Line::from(""),
        Line::from("The identifiers are locked while a video is loaded;"),
        Line::from("start over to enter new ones."),
    ])
}
