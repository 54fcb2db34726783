use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use std::sync::mpsc;

use crate::config::AppConfig;
use crate::models::dhikr::{self, Dhikr};
use crate::models::surah::SHORT_SURAHS;
use crate::models::{HaidPeriod, HaidStatus, PrayerRecord, PrayerTime, haid};
use crate::qibla;
use crate::records::{HaidSettings, PrayerRecords, WriteOutcome};
use crate::sensors::{GeoError, LocationProvider, OrientationProvider};
use crate::session::UserIdentity;
use crate::store::{SqliteStore, Subscription};
use crate::timing::{self, ActivePrayer, MarkGate};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{
    active as active_widget, dhikr as dhikr_widget, header, moon, prayers,
    qibla as qibla_widget, statusbar,
};
use crate::utils::format::{compass_point, format_bearing};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Qibla,
    Surah,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    /// Moon Mode date-range form.
    MoonForm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MoonField {
    Start,
    End,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Focus and selection
    focus_idx: usize,
    surah_idx: usize,

    // Moon form state
    form_start: String,
    form_end: String,
    form_field: MoonField,
    form_error: Option<String>,

    // Today's derived state, replaced wholesale by store pushes
    today: NaiveDate,
    schedule: Vec<PrayerTime>,
    record: PrayerRecord,
    haid_period: HaidPeriod,
    haid_status: HaidStatus,
    dhikr_today: &'static Dhikr,

    // Qibla: one-shot bearing per location fix, live heading if available
    qibla_bearing: Option<f64>,
    geo_error: Option<GeoError>,
    heading: Option<f64>,
    headings_rx: Option<mpsc::Receiver<f64>>,

    // Store plumbing
    identity: UserIdentity,
    prayer_doc: PrayerRecords,
    haid_doc: HaidSettings,
    record_sub: Subscription,
    haid_sub: Subscription,

    // Transient one-line message shown in the status bar
    notice: Option<String>,
}

impl App {
    pub fn new(
        store: &SqliteStore,
        config: AppConfig,
        identity: UserIdentity,
        location: &dyn LocationProvider,
        orientation: &dyn OrientationProvider,
    ) -> Result<Self> {
        let today = Local::now().date_naive();
        let schedule = config.schedule.times()?;

        let prayer_doc = PrayerRecords::for_day(&config.app.id, &identity, today);
        let haid_doc = HaidSettings::new(&config.app.id, &identity);
        let record_sub = prayer_doc.subscribe(store)?;
        let haid_sub = haid_doc.subscribe(store)?;

        let (qibla_bearing, geo_error) = match location.current_position() {
            Ok(fix) => (
                Some(qibla::bearing_to_kaaba(fix.latitude, fix.longitude)),
                None,
            ),
            Err(e) => {
                log::warn!("geolocation failed: {}", e);
                (None, Some(e))
            }
        };

        let headings_rx = orientation.headings();

        Ok(App {
            view: View::Dashboard,
            config,
            should_quit: false,
            input_mode: InputMode::Normal,
            focus_idx: 0,
            surah_idx: 0,
            form_start: String::new(),
            form_end: String::new(),
            form_field: MoonField::Start,
            form_error: None,
            today,
            schedule,
            record: PrayerRecord::default(),
            haid_period: HaidPeriod::default(),
            haid_status: HaidStatus::inactive(),
            dhikr_today: dhikr::for_date(today),
            qibla_bearing,
            geo_error,
            heading: None,
            headings_rx,
            identity,
            prayer_doc,
            haid_doc,
            record_sub,
            haid_sub,
            notice: None,
        })
    }

    /// Drain pushed snapshots and sensor events; called on every tick and
    /// after every local write.
    pub fn sync(&mut self, store: &SqliteStore) {
        let now_date = Local::now().date_naive();
        if now_date != self.today {
            self.rollover(store, now_date);
        }

        if let Some(snapshot) = self.record_sub.try_latest() {
            self.record = PrayerRecords::from_snapshot(&snapshot);
        }
        if let Some(snapshot) = self.haid_sub.try_latest() {
            self.haid_period = HaidSettings::from_snapshot(&snapshot);
        }
        self.haid_status = self.haid_period.evaluate(self.today);

        if let Some(rx) = &self.headings_rx {
            while let Ok(alpha) = rx.try_recv() {
                self.heading = Some(alpha);
            }
        }
    }

    /// New calendar day: track the new day's record document.
    fn rollover(&mut self, store: &SqliteStore, now_date: NaiveDate) {
        self.today = now_date;
        self.dhikr_today = dhikr::for_date(now_date);
        self.record = PrayerRecord::default();
        self.prayer_doc = PrayerRecords::for_day(&self.config.app.id, &self.identity, now_date);
        match self.prayer_doc.subscribe(store) {
            Ok(sub) => self.record_sub = sub,
            Err(e) => log::warn!("day rollover resubscribe failed: {}", e),
        }
    }

    fn now_time(&self) -> NaiveTime {
        Local::now().time()
    }

    fn active_prayer(&self) -> Option<ActivePrayer> {
        timing::select_active(&self.schedule, self.now_time(), &self.record)
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &SqliteStore) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.notice = None;
        match self.input_mode {
            InputMode::MoonForm => self.handle_moon_form_key(key, store),
            InputMode::Normal => match self.view {
                View::Dashboard => self.handle_dashboard_key(key, store),
                View::Qibla => self.handle_qibla_key(key),
                View::Surah => self.handle_surah_key(key),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, store: &SqliteStore) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.view = View::Help,
            KeyCode::Char('k') => self.view = View::Qibla,
            KeyCode::Char('u') => self.view = View::Surah,
            KeyCode::Char('o') => self.open_moon_form(),
            KeyCode::Up => {
                if self.focus_idx > 0 {
                    self.focus_idx -= 1;
                }
            }
            KeyCode::Down => {
                if self.focus_idx + 1 < self.schedule.len() {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Char('m') | KeyCode::Enter => self.mark_focused(store),
            _ => {}
        }
    }

    fn handle_qibla_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('k') => self.view = View::Dashboard,
            _ => {}
        }
    }

    fn handle_surah_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('u') => self.view = View::Dashboard,
            KeyCode::Left | KeyCode::Up => {
                if self.surah_idx > 0 {
                    self.surah_idx -= 1;
                }
            }
            KeyCode::Right | KeyCode::Down => {
                if self.surah_idx + 1 < SHORT_SURAHS.len() {
                    self.surah_idx += 1;
                }
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => self.view = View::Dashboard,
            _ => {}
        }
    }

    fn mark_focused(&mut self, store: &SqliteStore) {
        let Some(prayer) = self.schedule.get(self.focus_idx).copied() else {
            return;
        };
        match timing::can_mark(prayer.time, self.now_time(), self.haid_status.active) {
            MarkGate::Suspended => {
                self.notice = Some("Moon Mode is active — marking is paused".to_string());
            }
            MarkGate::TooEarly => {
                self.notice = Some(format!(
                    "Too early — {} opens 10 minutes before {}",
                    prayer.key.display_name(),
                    prayer.time.format("%H:%M")
                ));
            }
            MarkGate::Allowed => {
                if self.prayer_doc.mark_done(store, prayer.key) == WriteOutcome::Busy {
                    self.notice = Some("Write in progress, try again".to_string());
                }
                self.sync(store);
            }
        }
    }

    // ─── Moon form ───────────────────────────────────────────────────────────

    fn open_moon_form(&mut self) {
        self.input_mode = InputMode::MoonForm;
        self.form_start = self.haid_period.start_date.clone().unwrap_or_default();
        self.form_end = self.haid_period.end_date.clone().unwrap_or_default();
        self.form_field = MoonField::Start;
        self.form_error = None;
    }

    fn handle_moon_form_key(&mut self, key: KeyEvent, store: &SqliteStore) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.form_error = None;
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.form_field = match self.form_field {
                    MoonField::Start => MoonField::End,
                    MoonField::End => MoonField::Start,
                };
                self.form_error = None;
            }
            KeyCode::Enter => self.submit_moon_form(store),
            KeyCode::Char('x') => {
                self.haid_doc.clear(store);
                self.input_mode = InputMode::Normal;
                self.sync(store);
            }
            KeyCode::Backspace => {
                self.form_buffer_mut().pop();
                self.form_error = None;
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                if self.form_buffer_mut().len() < 10 {
                    self.form_buffer_mut().push(c);
                }
                self.form_error = None;
            }
            _ => {}
        }
    }

    fn form_buffer_mut(&mut self) -> &mut String {
        match self.form_field {
            MoonField::Start => &mut self.form_start,
            MoonField::End => &mut self.form_end,
        }
    }

    fn submit_moon_form(&mut self, store: &SqliteStore) {
        let Some(start) = haid::parse_date(&self.form_start) else {
            self.form_error = Some(format!("Bad start date '{}'", self.form_start));
            return;
        };
        let Some(end) = haid::parse_date(&self.form_end) else {
            self.form_error = Some(format!("Bad end date '{}'", self.form_end));
            return;
        };
        if start > end {
            self.form_error = Some("Start date is after end date".to_string());
            return;
        }

        let period = HaidPeriod::new(self.form_start.trim(), self.form_end.trim());
        if self.haid_doc.save(store, &period) == WriteOutcome::Busy {
            self.form_error = Some("Write in progress, try again".to_string());
            return;
        }
        self.input_mode = InputMode::Normal;
        self.form_error = None;
        self.sync(store);
    }

    // ─── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Qibla => self.draw_qibla_view(frame),
            View::Surah => self.draw_surah_view(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }

        if self.input_mode == InputMode::MoonForm {
            self.draw_moon_form(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer[0], &self.config.location.name);
        statusbar::render(frame, outer[2], self.notice.as_deref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(7)])
            .split(columns[0]);

        prayers::render(
            frame,
            left[0],
            &self.schedule,
            &self.record,
            self.now_time(),
            self.focus_idx,
            self.haid_status.active,
        );
        dhikr_widget::render(frame, left[1], self.dhikr_today);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(columns[1]);

        let active = self.active_prayer();
        active_widget::render(frame, right[0], active.as_ref());
        moon::render(frame, right[1], &self.haid_period, &self.haid_status);
        qibla_widget::render(frame, right[2], self.qibla_bearing, self.geo_error);
    }

    fn draw_qibla_view(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let block = Block::default()
            .title(Span::styled(" Qibla Compass ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        let mut lines = vec![Line::from("")];

        match (self.qibla_bearing, self.geo_error) {
            (Some(bearing), _) => {
                lines.push(Line::from(Span::styled(
                    format!("   {}  {}", format_bearing(bearing), compass_point(bearing)),
                    theme::gold().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "   Initial great-circle bearing toward the Kaaba",
                    theme::dim(),
                )));
                lines.push(Line::from(""));
                match self.heading {
                    Some(alpha) => {
                        let rotation = qibla::compass_rotation(bearing, alpha);
                        lines.push(Line::from(vec![
                            Span::styled("   Needle: ", theme::dim()),
                            Span::styled(
                                format!("turn {}", format_bearing(rotation)),
                                theme::amber().add_modifier(Modifier::BOLD),
                            ),
                        ]));
                        lines.push(Line::from(Span::styled(
                            "   Live compass heading connected",
                            theme::green(),
                        )));
                    }
                    None => {
                        lines.push(Line::from(Span::styled(
                            "   No compass sensor — static bearing only",
                            theme::dim(),
                        )));
                    }
                }
            }
            (None, geo_error) => {
                let msg = match geo_error {
                    Some(GeoError::PermissionDenied) => "Location permission denied",
                    Some(GeoError::Timeout) => "Location request timed out",
                    _ => "No location available",
                };
                lines.push(Line::from(Span::styled(format!("   {}", msg), theme::red())));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "   Set [location] latitude/longitude in config.toml",
                    theme::dim(),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("   [Esc] back", theme::dim())));

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, centered(area, 60, 14));
    }

    fn draw_surah_view(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let surah = &SHORT_SURAHS[self.surah_idx.min(SHORT_SURAHS.len() - 1)];

        let title = format!(
            " {} — {} ({})  [{}/{}] ",
            surah.number,
            surah.name,
            surah.arabic_name,
            self.surah_idx + 1,
            SHORT_SURAHS.len()
        );
        let block = Block::default()
            .title(Span::styled(title, theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        let mut lines = vec![Line::from("")];
        for (i, verse) in surah.verses.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                verse.to_string(),
                theme::bold(),
            )));
            lines.push(Line::from(Span::styled(
                format!("({})", i + 1),
                theme::dim(),
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "[←/→] switch surah   [Esc] back",
            theme::dim(),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup = centered(area, area.width / 2, area.height / 2);
        frame.render_widget(Clear, popup);

        let entries = [
            ("[m] / Enter", "Mark focused prayer done"),
            ("[↑ ↓]", "Navigate prayers"),
            ("[o]", "Moon Mode date range"),
            ("[k]", "Qibla compass"),
            ("[u]", "Surah reader"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Quit"),
        ];

        let mut lines = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in entries {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<13}", key), theme::gold()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }

    fn draw_moon_form(&self, frame: &mut Frame) {
        let area = frame.area();
        let height = if self.form_error.is_some() { 10 } else { 8 };
        let popup = centered(area, area.width / 2, height);
        frame.render_widget(Clear, popup);

        let field_line = |label: &str, value: &str, focused: bool| {
            let cursor = if focused { "█" } else { " " };
            let style = if focused {
                theme::gold().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };
            Line::from(vec![
                Span::styled(format!("  {:<7}", label), theme::dim()),
                Span::styled(value.to_string(), style),
                Span::styled(cursor, theme::amber()),
            ])
        };

        let mut lines = vec![
            Line::from(""),
            field_line(
                "Start:",
                &self.form_start,
                self.form_field == MoonField::Start,
            ),
            field_line("End:", &self.form_end, self.form_field == MoonField::End),
            Line::from(""),
            Line::from(Span::styled(
                "  YYYY-MM-DD · [Tab] switch · [Enter] save · [x] clear · [Esc] cancel",
                theme::dim(),
            )),
        ];

        if let Some(err) = &self.form_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let border = if self.form_error.is_some() {
            theme::red()
        } else {
            theme::blue()
        };
        let block = Block::default()
            .title(Span::styled(" Moon Mode ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(theme::surface());

        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run the TUI event loop.
pub fn run(
    store: &SqliteStore,
    config: AppConfig,
    identity: UserIdentity,
    location: &dyn LocationProvider,
    orientation: &dyn OrientationProvider,
) -> Result<()> {
    let mut app = App::new(store, config, identity, location, orientation)?;
    app.sync(store);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(500);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, store);
                if app.should_quit {
                    break;
                }
            }
            Event::Tick => app.sync(store),
        }
    }

    ratatui::restore();
    Ok(())
}
