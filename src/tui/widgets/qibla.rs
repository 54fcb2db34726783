use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::sensors::GeoError;
use crate::tui::theme;
use crate::utils::format::{compass_point, format_bearing};

/// Dashboard summary panel; the full compass lives in the Qibla view.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    bearing: Option<f64>,
    geo_error: Option<GeoError>,
) {
    let block = Block::default()
        .title(Span::styled(" Qibla ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut lines = vec![Line::from("")];

    match (bearing, geo_error) {
        (Some(bearing), _) => {
            lines.push(Line::from(vec![
                Span::styled("  ", theme::dim()),
                Span::styled(
                    format!("{}  {}", format_bearing(bearing), compass_point(bearing)),
                    theme::gold().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled("  [k] open compass", theme::dim())));
        }
        (None, Some(e)) => {
            let msg = match e {
                GeoError::PermissionDenied => "  Location permission denied",
                GeoError::Unavailable => "  No location configured",
                GeoError::Timeout => "  Location request timed out",
            };
            lines.push(Line::from(Span::styled(msg, theme::red())));
            lines.push(Line::from(Span::styled(
                "  Set [location] in config.toml",
                theme::dim(),
            )));
        }
        (None, None) => {
            lines.push(Line::from(Span::styled("  Locating…", theme::dim())));
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
