use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mihrab", version, author, about = "A terminal prayer companion: daily tracking, moon mode, qibla compass")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's prayer times and the active prayer
    Times,
    /// Mark a prayer as completed (gated by its time window)
    Mark {
        /// Prayer name (fajr, dhuhr, asr, maghrib, isha)
        prayer: String,
    },
    /// Moon Mode (haid) suspension range
    Moon {
        #[command(subcommand)]
        action: MoonCommands,
    },
    /// Show today's remembrance
    Dhikr,
    /// Short-surah reader
    Surah {
        #[command(subcommand)]
        action: SurahCommands,
    },
    /// Qibla bearing from your location
    Qibla {
        /// Override latitude
        #[arg(long)]
        lat: Option<f64>,
        /// Override longitude
        #[arg(long)]
        lon: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MoonCommands {
    /// Show today's Moon Mode status
    Status,
    /// Set the suspension range (inclusive)
    Set {
        /// Start date, YYYY-MM-DD
        start: String,
        /// End date, YYYY-MM-DD
        end: String,
    },
    /// Clear the suspension range
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum SurahCommands {
    /// List the available short surahs
    List,
    /// Print one surah by its number
    Show {
        /// Mushaf chapter number (e.g. 112)
        number: u32,
    },
}
