use chrono::NaiveTime;
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::models::{PrayerRecord, PrayerTime};
use crate::timing;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    schedule: &[PrayerTime],
    record: &PrayerRecord,
    now: NaiveTime,
    focus_idx: usize,
    suspended: bool,
) {
    let title = if suspended {
        " Prayers · paused "
    } else {
        " Prayers "
    };

    let block = Block::default()
        .title(Span::styled(title, theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());

    let items: Vec<ListItem> = schedule
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let is_focused = i == focus_idx;
            let done = record.is_done(p.key);

            let (icon, icon_style, label) = if done {
                ("●", theme::green(), "done")
            } else if suspended {
                ("◌", theme::blue(), "paused")
            } else if timing::has_passed(p.time, now) {
                ("✗", theme::red(), "passed")
            } else if timing::in_early_window(p.time, now) {
                ("◑", theme::amber(), "early")
            } else {
                ("○", theme::dim(), "upcoming")
            };

            let name_style = if is_focused {
                theme::gold().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };

            let line = Line::from(vec![
                Span::styled(format!("  {:<8}", p.key.display_name()), name_style),
                Span::styled(format!("{:<7}", p.time.format("%H:%M")), theme::dim()),
                Span::styled(icon, icon_style),
                Span::styled(format!("  {}", label), theme::dim()),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
