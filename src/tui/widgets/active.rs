use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::timing::ActivePrayer;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, active: Option<&ActivePrayer>) {
    let block = Block::default()
        .title(Span::styled(" Now ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let content: Vec<Line> = match active {
        None => vec![
            Line::from(""),
            Line::from(Span::styled("  No schedule", theme::dim())),
        ],
        Some(active) => {
            let name = active.current.key.display_name().to_uppercase();
            let name_style = if active.upcoming {
                theme::blue().add_modifier(Modifier::BOLD)
            } else {
                theme::gold().add_modifier(Modifier::BOLD)
            };

            let status = if active.completed {
                Span::styled("  ● completed", theme::green())
            } else if active.upcoming {
                Span::styled("  first prayer still ahead", theme::dim())
            } else {
                Span::styled("  ○ not yet marked", theme::dim())
            };

            vec![
                Line::from(""),
                Line::from(Span::styled(format!("  {}", name), name_style)),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  ", theme::dim()),
                    Span::styled(active.display_range(), theme::amber().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(status),
            ]
        }
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}
