use anyhow::{Result, anyhow};
use chrono::Local;
use std::str::FromStr;

use crate::cli::args::{MoonCommands, SurahCommands};
use crate::config::AppConfig;
use crate::models::{HaidPeriod, PrayerKey, haid};
use crate::models::{dhikr, surah};
use crate::qibla;
use crate::records::{HaidSettings, PrayerRecords, WriteOutcome};
use crate::sensors::{ConfigLocation, GeoError, LocationProvider};
use crate::session::UserIdentity;
use crate::store::DocumentStore;
use crate::store::SqliteStore;
use crate::timing::{self, MarkGate};
use crate::utils::format::{compass_point, format_bearing, format_time};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    store: &SqliteStore,
    config: &AppConfig,
    identity: &UserIdentity,
) -> Result<()> {
    let now = Local::now();
    let today = now.date_naive();
    let now_time = now.time();

    let schedule = config.schedule.times()?;
    let records = PrayerRecords::for_day(&config.app.id, identity, today);
    let record = PrayerRecords::from_snapshot(&store.read(records.path())?);
    let haid_period = load_haid(store, config, identity)?;
    let haid_status = haid_period.evaluate(today);

    println!();
    println_colored!(
        GOLD,
        "  Prayer Times — {} ({})",
        config.location.name,
        today.format("%Y-%m-%d")
    );
    println!();

    for prayer in &schedule {
        let time_str = format_time(prayer.time);
        let done = record.is_done(prayer.key);
        let marker = if done {
            format!("{}●\x1b[0m done", GREEN)
        } else if timing::has_passed(prayer.time, now_time) {
            format!("{}✗\x1b[0m passed", RED)
        } else if timing::in_early_window(prayer.time, now_time) {
            format!("{}◑\x1b[0m early window", AMBER)
        } else {
            format!("{}○\x1b[0m upcoming", DIM)
        };
        println!("  {:<8}  {}  {}", prayer.key.display_name(), time_str, marker);
    }

    if let Some(active) = timing::select_active(&schedule, now_time, &record) {
        println!();
        println_colored!(
            AMBER,
            "  Now: {}  ({})",
            active.current.key.display_name(),
            active.display_range()
        );
    }

    if haid_status.active {
        println!();
        println_colored!(
            AMBER,
            "  Moon Mode: day {}/{} — tracking is paused",
            haid_status.day,
            haid_status.total
        );
    }
    println!();
    Ok(())
}

// ─── Mark prayer ─────────────────────────────────────────────────────────────

pub fn handle_mark(
    store: &SqliteStore,
    config: &AppConfig,
    identity: &UserIdentity,
    prayer_str: &str,
) -> Result<()> {
    let key = PrayerKey::from_str(prayer_str)
        .map_err(|_| anyhow!("Unknown prayer '{}'. Use: fajr, dhuhr, asr, maghrib, isha", prayer_str))?;
    let now = Local::now();
    let today = now.date_naive();

    let schedule = config.schedule.times()?;
    let scheduled = schedule
        .iter()
        .find(|p| p.key == key)
        .map(|p| p.time)
        .ok_or_else(|| anyhow!("No schedule entry for {}", key))?;

    let haid_active = load_haid(store, config, identity)?.evaluate(today).active;

    match timing::can_mark(scheduled, now.time(), haid_active) {
        MarkGate::Suspended => {
            println_colored!(AMBER, "  Moon Mode is active — marking is paused");
        }
        MarkGate::TooEarly => {
            println_colored!(
                RED,
                "  Too early to mark {} — window opens 10 minutes before {}",
                key.display_name(),
                format_time(scheduled)
            );
        }
        MarkGate::Allowed => {
            let records = PrayerRecords::for_day(&config.app.id, identity, today);
            match records.mark_done(store, key) {
                WriteOutcome::Accepted => {
                    println_colored!(GREEN, "  ✓ {} marked as done", key.display_name());
                }
                WriteOutcome::Busy => {
                    println_colored!(AMBER, "  A write is already in progress, try again");
                }
            }
        }
    }
    Ok(())
}

// ─── Moon Mode ───────────────────────────────────────────────────────────────

pub fn handle_moon(
    store: &SqliteStore,
    config: &AppConfig,
    identity: &UserIdentity,
    action: &MoonCommands,
) -> Result<()> {
    let settings = HaidSettings::new(&config.app.id, identity);
    let today = Local::now().date_naive();

    match action {
        MoonCommands::Status => {
            let period = HaidSettings::from_snapshot(&store.read(settings.path())?);
            let status = period.evaluate(today);
            println!();
            if status.active {
                println_colored!(
                    AMBER,
                    "  Moon Mode active — day {} of {}",
                    status.day,
                    status.total
                );
                println_colored!(DIM, "  Prayer tracking is paused for this range");
            } else if period.is_set() {
                println_colored!(GREEN, "  Moon Mode not active today");
            } else {
                println_colored!(DIM, "  No Moon Mode range set");
            }
            println!();
        }
        MoonCommands::Set { start, end } => {
            let s = haid::parse_date(start)
                .ok_or_else(|| anyhow!("Bad start date '{}', expected YYYY-MM-DD", start))?;
            let e = haid::parse_date(end)
                .ok_or_else(|| anyhow!("Bad end date '{}', expected YYYY-MM-DD", end))?;
            if s > e {
                return Err(anyhow!("Start date {} is after end date {}", start, end));
            }
            settings.save(store, &HaidPeriod::new(start, end));
            println_colored!(AMBER, "  Moon Mode range set: {} – {}", start, end);
        }
        MoonCommands::Clear => {
            settings.clear(store);
            println_colored!(GREEN, "  ✓ Moon Mode range cleared");
        }
    }
    Ok(())
}

// ─── Dhikr ───────────────────────────────────────────────────────────────────

pub fn handle_dhikr() -> Result<()> {
    let today = Local::now().date_naive();
    let entry = dhikr::for_date(today);
    println!();
    println_colored!(GOLD, "  Dhikr of the day — {}", today.format("%A"));
    println!();
    println_colored!(BOLD, "  {}", entry.arabic);
    println_colored!(AMBER, "  {}", entry.latin);
    println_colored!(DIM, "  {}", entry.meaning);
    println!();
    Ok(())
}

// ─── Surah ───────────────────────────────────────────────────────────────────

pub fn handle_surah(action: &SurahCommands) -> Result<()> {
    match action {
        SurahCommands::List => {
            println!();
            println_colored!(GOLD, "  Short Surahs");
            println!();
            for s in surah::SHORT_SURAHS {
                println!("  {:>3}  {:<12} {}", s.number, s.name, s.arabic_name);
            }
            println!();
        }
        SurahCommands::Show { number } => {
            let s = surah::by_number(*number)
                .ok_or_else(|| anyhow!("No short surah with number {}", number))?;
            println!();
            println_colored!(GOLD, "  {} — {} ({})", s.number, s.name, s.arabic_name);
            println!();
            for (i, verse) in s.verses.iter().enumerate() {
                println_colored!(BOLD, "  {}", verse);
                println_colored!(DIM, "  ({})", i + 1);
            }
            println!();
        }
    }
    Ok(())
}

// ─── Qibla ───────────────────────────────────────────────────────────────────

pub fn handle_qibla(config: &AppConfig, lat: Option<f64>, lon: Option<f64>) -> Result<()> {
    let provider = ConfigLocation::new(
        lat.or(config.location.latitude),
        lon.or(config.location.longitude),
    );

    let fix = match provider.current_position() {
        Ok(fix) => fix,
        Err(e) => {
            let hint = match e {
                GeoError::PermissionDenied => "location permission was denied",
                GeoError::Unavailable => {
                    "no position available — set [location] latitude/longitude in config.toml or pass --lat/--lon"
                }
                GeoError::Timeout => "the location request timed out",
            };
            println_colored!(RED, "  Could not determine your location: {}", hint);
            return Ok(());
        }
    };

    let bearing = qibla::bearing_to_kaaba(fix.latitude, fix.longitude);
    println!();
    println_colored!(
        GOLD,
        "  Qibla from ({:.4}, {:.4})",
        fix.latitude,
        fix.longitude
    );
    println!();
    println_colored!(
        BOLD,
        "  {}  {}",
        format_bearing(bearing),
        compass_point(bearing)
    );
    println_colored!(DIM, "  Initial great-circle bearing toward the Kaaba");
    println!();
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn load_haid(
    store: &SqliteStore,
    config: &AppConfig,
    identity: &UserIdentity,
) -> Result<HaidPeriod> {
    let settings = HaidSettings::new(&config.app.id, identity);
    Ok(HaidSettings::from_snapshot(&store.read(settings.path())?))
}
