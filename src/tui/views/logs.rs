//! Log window view
//!
//! Displays log entries with scrolling and colored levels. Only the visible
//! window is copied out of the source, through `range()`.

use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

use crate::app::LogViewState;
use crate::logging::{LogEntry, LogWindowSource};
use crate::tui::theme::theme;

/// Render the log window
pub fn render_log_window(
    frame: &mut Frame,
    area: Rect,
    source: &LogWindowSource,
    view: &LogViewState,
    focused: bool,
) {
    let t = theme();
    let border_style = t.pane_border_style(focused);

    // Visible area height (minus borders)
    let visible_height = area.height.saturating_sub(2) as usize;
    let entry_count = source.size();
    let effective_scroll = view.effective_scroll(entry_count);

    // A concurrent append may have evicted entries since size(), so trust what range() returns
    let entries = source.range(effective_scroll, visible_height);

    if entries.is_empty() {
        let empty = Paragraph::new("No log entries yet.")
            .style(t.muted_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title("Log"),
            );
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = entries.iter().map(log_line).map(ListItem::new).collect();

    let auto_scroll_status = if view.auto_scroll { " auto" } else { "" };
    let title = format!(
        "Log [{}-{} of {}{}]",
        effective_scroll + 1,
        effective_scroll + entries.len(),
        entry_count.max(effective_scroll + entries.len()),
        auto_scroll_status
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(list, area);

    // Scrollbar
    if entry_count > visible_height && area.width > 2 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        let mut scrollbar_state = ScrollbarState::new(entry_count)
            .position(effective_scroll)
            .viewport_content_length(visible_height);

        // Inside the right border
        let scrollbar_area = Rect {
            x: area.x + area.width - 1,
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

/// One entry as a styled line: time, level, target, message
fn log_line(entry: &LogEntry) -> Line<'static> {
    let t = theme();
    let time = entry.timestamp().format("%H:%M:%S%.3f");

    Line::from(vec![
        Span::styled(format!("{} ", time), t.muted_style()),
        Span::styled(
            format!("{:5} ", entry.level().as_str()),
            Style::default().fg(t.level_color(entry.level())).bold(),
        ),
        Span::styled(
            format!("{}: ", entry.target()),
            Style::default().fg(t.accent),
        ),
        Span::raw(single_line(entry.message())),
    ])
}

/// One row per entry: continuation lines are folded behind a marker
fn single_line(message: &str) -> String {
    message.lines().collect::<Vec<_>>().join(" ⏎ ")
}
