use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::dhikr::Dhikr;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, entry: &Dhikr) {
    let block = Block::default()
        .title(Span::styled(" Dhikr of the Day ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            entry.arabic,
            theme::bold().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(entry.latin, theme::amber())),
        Line::from(Span::styled(entry.meaning, theme::dim())),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
