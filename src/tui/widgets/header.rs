use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, location_name: &str) {
    let today = Local::now();
    let date_str = today.format("%A, %b %d, %Y").to_string();

    let title_line = Line::from(vec![
        Span::styled("  مِحْرَاب  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("mihrab", theme::gold()),
    ]);

    let date_line = Line::from(vec![
        Span::styled(location_name, theme::amber()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(date_str, theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, Line::from(""), date_line])
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
