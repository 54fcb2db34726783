use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::{HaidPeriod, HaidStatus};
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, period: &HaidPeriod, status: &HaidStatus) {
    let block = Block::default()
        .title(Span::styled(" Moon Mode ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut lines = vec![Line::from("")];

    if status.active {
        lines.push(Line::from(vec![
            Span::styled("  ☾ ", theme::blue()),
            Span::styled(
                format!("Day {} of {}", status.day, status.total),
                theme::blue().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            "  Prayer tracking is paused",
            theme::dim(),
        )));
    } else if period.is_set() {
        lines.push(Line::from(Span::styled("  Not active today", theme::dim())));
        if let (Some(start), Some(end)) = (&period.start_date, &period.end_date) {
            if !start.is_empty() || !end.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  Range: {} – {}", start, end),
                    theme::dim(),
                )));
            }
        }
    } else {
        lines.push(Line::from(Span::styled("  No range set", theme::dim())));
    }

    lines.push(Line::from(Span::styled("  [o] edit range", theme::dim())));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
