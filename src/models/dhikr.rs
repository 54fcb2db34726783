use chrono::{Datelike, NaiveDate};

/// One daily remembrance entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dhikr {
    pub arabic: &'static str,
    pub latin: &'static str,
    pub meaning: &'static str,
}

/// Fixed weekday table, index 0 = Sunday through 6 = Saturday.
const DHIKR_TABLE: [Dhikr; 7] = [
    Dhikr {
        arabic: "سُبْحَانَ اللَّهِ وَبِحَمْدِهِ",
        latin: "Subhanallahi wa bihamdih",
        meaning: "Glory be to Allah and praise Him",
    },
    Dhikr {
        arabic: "لَا إِلَٰهَ إِلَّا اللَّهُ",
        latin: "La ilaha illallah",
        meaning: "There is no god but Allah",
    },
    Dhikr {
        arabic: "أَسْتَغْفِرُ اللَّهَ الْعَظِيمَ",
        latin: "Astaghfirullahal 'azhim",
        meaning: "I seek forgiveness from Allah the Mighty",
    },
    Dhikr {
        arabic: "اللَّهُمَّ صَلِّ عَلَى مُحَمَّدٍ",
        latin: "Allahumma shalli 'ala Muhammad",
        meaning: "O Allah, send blessings upon Muhammad",
    },
    Dhikr {
        arabic: "لَا حَوْلَ وَلَا قُوَّةَ إِلَّا بِاللَّهِ",
        latin: "La hawla wa la quwwata illa billah",
        meaning: "There is no power nor strength except through Allah",
    },
    Dhikr {
        arabic: "حَسْبُنَا اللَّهُ وَنِعْمَ الْوَكِيلُ",
        latin: "Hasbunallahu wa ni'mal wakil",
        meaning: "Allah is sufficient for us, the best disposer of affairs",
    },
    Dhikr {
        arabic: "سُبْحَانَ اللَّهِ وَالْحَمْدُ لِلَّهِ",
        latin: "Subhanallahi walhamdulillah",
        meaning: "Glory be to Allah, and all praise is due to Allah",
    },
];

/// Select the remembrance for a weekday index (0 = Sunday .. 6 = Saturday).
/// Indices past 6 wrap, so any `num_days_from_sunday` value is safe.
pub fn for_weekday(weekday: u32) -> &'static Dhikr {
    &DHIKR_TABLE[(weekday % 7) as usize]
}

/// Select the remembrance for a calendar day.
pub fn for_date(date: NaiveDate) -> &'static Dhikr {
    for_weekday(date.weekday().num_days_from_sunday())
}
