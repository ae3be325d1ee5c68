//! Screen layout for vaultplay.
//!
//! Pure layout arithmetic plus the small shared widgets (bordered blocks and the
//! status bar). Called inside `terminal.draw()` on every render so each frame
//! reflects the current terminal size.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use vaultplay_core::Phase;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::keybindings::Screen;

/// Areas of one frame, top to bottom.
pub struct Areas {
    pub header: Rect,
    pub uid: Rect,
    pub tid: Rect,
    pub banner: Rect,
    pub action: Rect,
    pub card: Rect,
    pub footer: Rect,
    pub status_bar: Rect,
}

/// Content column width cap; wider terminals get side margins.
const MAX_WIDTH: u16 = 100;

/// Splits the frame into the form column and the status bar.
///
/// The two identifier inputs sit side by side from 80 columns up and stack
/// below that.
pub fn compute_layout(frame: &Frame) -> Areas {
    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let width = main_area.width.min(MAX_WIDTH);
    let column = main_area.centered_horizontally(Constraint::Length(width));
    let wide = column.width >= 80;

    let inputs_height = if wide { 3 } else { 6 };
    let [header, inputs, banner, action, card, footer] = column.layout(&Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(inputs_height),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(2),
    ]));

    let [uid, tid] = if wide {
        inputs.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).spacing(2))
    } else {
        inputs.layout(&Layout::vertical([Constraint::Length(3), Constraint::Length(3)]))
    };

    Areas { header, uid, tid, banner, action, card, footer, status_bar }
}

/// Returns the inner `Rect` of a block after removing the 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block`, thick and in the active color when highlighted.
pub fn panel_block<'a>(title: &'a str, is_active: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_active {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_active { BorderType::Thick } else { BorderType::Rounded };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
}

/// Renders the 1-row status bar: phase indicator plus the keys that matter on
/// the current screen.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let phase = state.session.phase();
    let phase_fg = if phase == Phase::Playing {
        theme.status_phase_playing
    } else {
        theme.status_phase_other
    };

    let hints = match Screen::of(state) {
        Screen::Form => "Tab switch field · Enter load & play · Ctrl-r reset · F1 help · Ctrl-c quit",
        Screen::ReadyCard => "o open player · r load different video · ? help · q quit",
        Screen::Player => "Esc close player · r load different video · ? help · q quit",
    };

    let status_line = Line::from(vec![
        Span::styled(
            format!(" {} ", phase.label()),
            Style::default().fg(phase_fg).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(hints),
    ]);

    frame.render_widget(
        Paragraph::new(status_line)
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
