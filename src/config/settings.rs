use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{PrayerKey, PrayerTime};

fn default_app_id() -> String {
    "mihrab".to_string()
}
fn default_location_name() -> String {
    "Jakarta".to_string()
}
fn default_fajr() -> String {
    "04:35".to_string()
}
fn default_dhuhr() -> String {
    "12:05".to_string()
}
fn default_asr() -> String {
    "15:15".to_string()
}
fn default_maghrib() -> String {
    "18:10".to_string()
}
fn default_isha() -> String {
    "19:25".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
    /// Backend application id scoping every document path. Empty means the
    /// backend is not configured, which is fatal at startup.
    #[serde(default = "default_app_id")]
    pub id: String,
    /// Pre-issued sign-in token (uid). Absent = anonymous sign-in.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            id: default_app_id(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_name")]
    pub name: String,
    /// Used for the qibla bearing; absent means no fix is available.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: Some(-6.2),
            longitude: Some(106.8),
        }
    }
}

/// Fixed daily schedule, "HH:MM" per prayer. Placeholder times, not an
/// astronomical calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_fajr")]
    pub fajr: String,
    #[serde(default = "default_dhuhr")]
    pub dhuhr: String,
    #[serde(default = "default_asr")]
    pub asr: String,
    #[serde(default = "default_maghrib")]
    pub maghrib: String,
    #[serde(default = "default_isha")]
    pub isha: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            fajr: default_fajr(),
            dhuhr: default_dhuhr(),
            asr: default_asr(),
            maghrib: default_maghrib(),
            isha: default_isha(),
        }
    }
}

impl ScheduleConfig {
    fn raw(&self, key: PrayerKey) -> &str {
        match key {
            PrayerKey::Fajr => &self.fajr,
            PrayerKey::Dhuhr => &self.dhuhr,
            PrayerKey::Asr => &self.asr,
            PrayerKey::Maghrib => &self.maghrib,
            PrayerKey::Isha => &self.isha,
        }
    }

    /// The day's ordered prayer times.
    pub fn times(&self) -> Result<Vec<PrayerTime>> {
        PrayerKey::all()
            .iter()
            .map(|key| {
                let raw = self.raw(*key);
                let time = NaiveTime::parse_from_str(raw, "%H:%M")
                    .with_context(|| format!("Bad schedule time for {}: '{}'", key, raw))?;
                Ok(PrayerTime::new(*key, time))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "mihrab").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("mihrab.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Startup validation. A missing backend id or a malformed schedule is
    /// fatal; everything else degrades at the point of use.
    pub fn validate(&self) -> Result<()> {
        if self.app.id.trim().is_empty() {
            bail!("Backend not configured: [app] id is empty in config.toml");
        }
        self.schedule.times()?;
        if let Some(lat) = self.location.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                bail!("Latitude out of range: {}", lat);
            }
        }
        if let Some(lon) = self.location.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                bail!("Longitude out of range: {}", lon);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_and_match_placeholder_times() {
        let config = AppConfig::default();
        config.validate().unwrap();

        let times = config.schedule.times().unwrap();
        assert_eq!(times.len(), 5);
        assert_eq!(times[0].key, PrayerKey::Fajr);
        assert_eq!(times[0].time.format("%H:%M").to_string(), "04:35");
        assert_eq!(times[4].time.format("%H:%M").to_string(), "19:25");
    }

    #[test]
    fn empty_app_id_fails_validation() {
        let mut config = AppConfig::default();
        config.app.id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_schedule_time_fails_validation() {
        let mut config = AppConfig::default();
        config.schedule.asr = "quarter past three".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_coordinates_fail_validation() {
        let mut config = AppConfig::default();
        config.location.latitude = Some(123.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("[location]\nname = \"Bandung\"\n").unwrap();
        assert_eq!(config.location.name, "Bandung");
        assert_eq!(config.app.id, "mihrab");
        assert_eq!(config.schedule.dhuhr, "12:05");
    }
}
