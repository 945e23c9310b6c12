//! Quit confirmation dialog

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::theme::theme;

/// Render the quit confirmation dialog centered in `area`
///
/// Prompt: "Press y to confirm, n or Esc to cancel" (y=green, n/Esc=red)
pub fn render_quit_confirm_dialog(frame: &mut Frame, area: Rect) {
    let t = theme();

    let width = area.width.min(44);
    let height = area.height.min(7);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let dialog_area = Rect::new(x, y, width, height);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Stop the simulation and quit?",
            Style::default().fg(t.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(t.text)),
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to confirm, ", Style::default().fg(t.text)),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" or ", Style::default().fg(t.text)),
            Span::styled(
                "Esc",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to cancel", Style::default().fg(t.text)),
        ]),
    ];

    // Clear background
    frame.render_widget(Clear, dialog_area);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border_warning))
            .title("Quit"),
    );

    frame.render_widget(paragraph, dialog_area);
}
