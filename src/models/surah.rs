/// A short surah for the reader view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surah {
    /// Mushaf chapter number.
    pub number: u32,
    pub name: &'static str,
    pub arabic_name: &'static str,
    pub verses: &'static [&'static str],
}

pub const SHORT_SURAHS: &[Surah] = &[
    Surah {
        number: 1,
        name: "Al-Fatihah",
        arabic_name: "الفاتحة",
        verses: &[
            "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ",
            "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ",
            "الرَّحْمَٰنِ الرَّحِيمِ",
            "مَالِكِ يَوْمِ الدِّينِ",
            "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ",
            "اهْدِنَا الصِّرَاطَ الْمُسْتَقِيمَ",
            "صِرَاطَ الَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ الْمَغْضُوبِ عَلَيْهِمْ وَلَا الضَّالِّينَ",
        ],
    },
    Surah {
        number: 103,
        name: "Al-Asr",
        arabic_name: "العصر",
        verses: &[
            "وَالْعَصْرِ",
            "إِنَّ الْإِنسَانَ لَفِي خُسْرٍ",
            "إِلَّا الَّذِينَ آمَنُوا وَعَمِلُوا الصَّالِحَاتِ وَتَوَاصَوْا بِالْحَقِّ وَتَوَاصَوْا بِالصَّبْرِ",
        ],
    },
    Surah {
        number: 108,
        name: "Al-Kawthar",
        arabic_name: "الكوثر",
        verses: &[
            "إِنَّا أَعْطَيْنَاكَ الْكَوْثَرَ",
            "فَصَلِّ لِرَبِّكَ وَانْحَرْ",
            "إِنَّ شَانِئَكَ هُوَ الْأَبْتَرُ",
        ],
    },
    Surah {
        number: 109,
        name: "Al-Kafirun",
        arabic_name: "الكافرون",
        verses: &[
            "قُلْ يَا أَيُّهَا الْكَافِرُونَ",
            "لَا أَعْبُدُ مَا تَعْبُدُونَ",
            "وَلَا أَنتُمْ عَابِدُونَ مَا أَعْبُدُ",
            "وَلَا أَنَا عَابِدٌ مَّا عَبَدتُّمْ",
            "وَلَا أَنتُمْ عَابِدُونَ مَا أَعْبُدُ",
            "لَكُمْ دِينُكُمْ وَلِيَ دِينِ",
        ],
    },
    Surah {
        number: 112,
        name: "Al-Ikhlas",
        arabic_name: "الإخلاص",
        verses: &[
            "قُلْ هُوَ اللَّهُ أَحَدٌ",
            "اللَّهُ الصَّمَدُ",
            "لَمْ يَلِدْ وَلَمْ يُولَدْ",
            "وَلَمْ يَكُن لَّهُ كُفُوًا أَحَدٌ",
        ],
    },
    Surah {
        number: 113,
        name: "Al-Falaq",
        arabic_name: "الفلق",
        verses: &[
            "قُلْ أَعُوذُ بِرَبِّ الْفَلَقِ",
            "مِن شَرِّ مَا خَلَقَ",
            "وَمِن شَرِّ غَاسِقٍ إِذَا وَقَبَ",
            "وَمِن شَرِّ النَّفَّاثَاتِ فِي الْعُقَدِ",
            "وَمِن شَرِّ حَاسِدٍ إِذَا حَسَدَ",
        ],
    },
    Surah {
        number: 114,
        name: "An-Nas",
        arabic_name: "الناس",
        verses: &[
            "قُلْ أَعُوذُ بِرَبِّ النَّاسِ",
            "مَلِكِ النَّاسِ",
            "إِلَٰهِ النَّاسِ",
            "مِن شَرِّ الْوَسْوَاسِ الْخَنَّاسِ",
            "الَّذِي يُوَسْوِسُ فِي صُدُورِ النَّاسِ",
            "مِنَ الْجِنَّةِ وَالنَّاسِ",
        ],
    },
];

/// Look up a surah by its mushaf number.
pub fn by_number(number: u32) -> Option<&'static Surah> {
    SHORT_SURAHS.iter().find(|s| s.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_number() {
        assert_eq!(by_number(112).map(|s| s.name), Some("Al-Ikhlas"));
        assert!(by_number(2).is_none());
    }

    #[test]
    fn every_surah_has_verses() {
        for surah in SHORT_SURAHS {
            assert!(!surah.verses.is_empty(), "{} has no verses", surah.name);
        }
    }
}
