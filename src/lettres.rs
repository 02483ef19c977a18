//! French transcription of whole amounts for the legal "montant en lettres"
//! fields printed on official documents.
//!
//! The pluralization of "vingt"/"quatre-vingt" follows the reference tables
//! used by the office forms: `80` renders as "quatre-vingt" with no terminal
//! "s". "cent" takes an "s" when multiplied and terminal ("deux cents") but
//! not before "mille" ("deux cent mille"); it keeps it before "million" and
//! "milliard", which are nouns ("deux cents millions").

const UNITES: [&str; 10] = [
    "", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf",
];

const DIX_A_DIX_NEUF: [&str; 10] = [
    "dix",
    "onze",
    "douze",
    "treize",
    "quatorze",
    "quinze",
    "seize",
    "dix-sept",
    "dix-huit",
    "dix-neuf",
];

// 20 through 60; 70 and 90 are built from 60 and 80.
const DIZAINES: [&str; 5] = ["vingt", "trente", "quarante", "cinquante", "soixante"];

/// Transcribes `n` into French words. Zero maps to "zéro" and negative
/// amounts are prefixed with "moins ".
pub fn nombre_en_lettres(n: i64) -> String {
    if n == 0 {
        return "zéro".to_string();
    }
    if n < 0 {
        return format!("moins {}", naturel_en_lettres(n.unsigned_abs()));
    }
    naturel_en_lettres(n as u64)
}

fn naturel_en_lettres(n: u64) -> String {
    let milliards = n / 1_000_000_000;
    let millions = (n / 1_000_000) % 1_000;
    let milliers = (n / 1_000) % 1_000;
    let reste = n % 1_000;

    let mut parts: Vec<String> = Vec::new();
    if milliards > 0 {
        let suffix = if milliards > 1 { "milliards" } else { "milliard" };
        // The milliards group can itself exceed 999 ("mille milliards"), so
        // it goes back through the full transcription.
        parts.push(format!("{} {}", naturel_en_lettres(milliards), suffix));
    }
    if millions > 0 {
        let suffix = if millions > 1 { "millions" } else { "million" };
        parts.push(format!("{} {}", centaines(millions, true), suffix));
    }
    if milliers > 0 {
        // "mille" is invariable and elides a leading "un".
        if milliers == 1 {
            parts.push("mille".to_string());
        } else {
            parts.push(format!("{} mille", centaines(milliers, false)));
        }
    }
    if reste > 0 {
        parts.push(centaines(reste, true));
    }
    parts.join(" ")
}

/// Renders 1-999. `terminal` is false when the group multiplies "mille",
/// which suppresses the plural "cents".
fn centaines(n: u64, terminal: bool) -> String {
    debug_assert!((1..1_000).contains(&n));
    let cents = n / 100;
    let reste = n % 100;

    if cents == 0 {
        return dizaines(reste);
    }
    let tete = if cents == 1 {
        "cent".to_string()
    } else if reste == 0 && terminal {
        format!("{} cents", UNITES[cents as usize])
    } else {
        format!("{} cent", UNITES[cents as usize])
    };
    if reste == 0 {
        tete
    } else {
        format!("{} {}", tete, dizaines(reste))
    }
}

fn dizaines(n: u64) -> String {
    match n {
        1..=9 => UNITES[n as usize].to_string(),
        10..=19 => DIX_A_DIX_NEUF[(n - 10) as usize].to_string(),
        20..=69 => {
            let base = DIZAINES[(n / 10 - 2) as usize];
            match n % 10 {
                0 => base.to_string(),
                1 => format!("{} et un", base),
                u => format!("{}-{}", base, UNITES[u as usize]),
            }
        }
        70..=79 => {
            // 70-79 borrow the teen forms: soixante-dix, soixante et onze, ...
            if n == 71 {
                "soixante et onze".to_string()
            } else {
                format!("soixante-{}", DIX_A_DIX_NEUF[(n - 70) as usize])
            }
        }
        80 => "quatre-vingt".to_string(),
        81..=89 => format!("quatre-vingt-{}", UNITES[(n - 80) as usize]),
        90..=99 => format!("quatre-vingt-{}", DIX_A_DIX_NEUF[(n - 90) as usize]),
        _ => unreachable!("dizaines only handles 1-99"),
    }
}

#[cfg(test)]
mod tests {
    use super::nombre_en_lettres;

    #[test]
    fn reference_table() {
        let cases = [
            (0, "zéro"),
            (1, "un"),
            (20, "vingt"),
            (21, "vingt et un"),
            (71, "soixante et onze"),
            (80, "quatre-vingt"),
            (91, "quatre-vingt-onze"),
            (100, "cent"),
            (200, "deux cents"),
            (1000, "mille"),
            (2000, "deux mille"),
        ];
        for (value, expected) in cases {
            assert_eq!(nombre_en_lettres(value), expected, "value {value}");
        }
    }

    #[test]
    fn seventies_and_nineties_use_teen_forms() {
        assert_eq!(nombre_en_lettres(70), "soixante-dix");
        assert_eq!(nombre_en_lettres(77), "soixante-dix-sept");
        assert_eq!(nombre_en_lettres(90), "quatre-vingt-dix");
        assert_eq!(nombre_en_lettres(99), "quatre-vingt-dix-neuf");
    }

    #[test]
    fn et_un_joiner_skips_eighty_and_ninety() {
        assert_eq!(nombre_en_lettres(31), "trente et un");
        assert_eq!(nombre_en_lettres(61), "soixante et un");
        assert_eq!(nombre_en_lettres(81), "quatre-vingt-un");
        assert_eq!(nombre_en_lettres(91), "quatre-vingt-onze");
    }

    #[test]
    fn cent_pluralizes_only_when_terminal() {
        assert_eq!(nombre_en_lettres(200), "deux cents");
        assert_eq!(nombre_en_lettres(230), "deux cent trente");
        assert_eq!(nombre_en_lettres(200_000), "deux cent mille");
        assert_eq!(nombre_en_lettres(200_000_000), "deux cents millions");
    }

    #[test]
    fn large_magnitudes() {
        assert_eq!(nombre_en_lettres(1234), "mille deux cent trente-quatre");
        assert_eq!(nombre_en_lettres(1_000_000), "un million");
        assert_eq!(nombre_en_lettres(2_000_000), "deux millions");
        assert_eq!(nombre_en_lettres(1_000_000_000), "un milliard");
        assert_eq!(
            nombre_en_lettres(999_999),
            "neuf cent quatre-vingt-dix-neuf mille neuf cent quatre-vingt-dix-neuf"
        );
        assert_eq!(
            nombre_en_lettres(1_234_567),
            "un million deux cent trente-quatre mille cinq cent soixante-sept"
        );
    }

    #[test]
    fn milliards_group_recurses_past_a_thousand() {
        assert_eq!(nombre_en_lettres(1_000_000_000_000), "mille milliards");
        assert_eq!(
            nombre_en_lettres(2_500_000_000_000),
            "deux mille cinq cents milliards"
        );
        assert_eq!(
            nombre_en_lettres(1_000_000_001_000),
            "mille milliards mille"
        );
        assert!(!nombre_en_lettres(i64::MAX).is_empty());
    }

    #[test]
    fn negative_amounts_are_prefixed() {
        assert_eq!(nombre_en_lettres(-42), "moins quarante-deux");
    }
}
