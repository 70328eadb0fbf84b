use serde::Serialize;

/// Words that switch a message into fine-lookup mode.
pub const FINE_TRIGGERS: [&str; 3] = ["fine", "penalty", "amount"];

pub const FINE_REPLY_HEADER: &str = "Here are the fine amounts for the detected violation(s):\n";

pub const FINE_NOT_FOUND: &str =
    "Sorry, I could not find a matching violation for your query. Please specify the violation more clearly.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationFineEntry {
    pub keywords: &'static [&'static str],
    pub label: &'static str,
    /// Whole rupees.
    pub amount: u32,
}

impl ViolationFineEntry {
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|keyword| normalized.contains(keyword))
    }

    pub fn bullet(&self) -> String {
        format!("• {}: ₹{}", self.label, format_rupees(self.amount))
    }
}

macro_rules! fine {
    ([$($kw:literal),+ $(,)?], $label:literal, $amount:literal) => {
        ViolationFineEntry { keywords: &[$($kw),+], label: $label, amount: $amount }
    };
}

pub static FINE_TABLE: &[ViolationFineEntry] = &[
    fine!(["driving without licence", "without license", "no license"], "Driving without licence", 5000),
    fine!(["driving without insurance", "no insurance"], "Driving without insurance", 2000),
    fine!(["pucc", "pollution"], "Driving without PUCC (Pollution Under Control Certificate)", 10000),
    fine!(["rc violation", "rc book"], "RC violation", 5000),
    fine!(["drunken", "drunk", "influence"], "Driving under the influence/Drunken Driving", 10000),
    fine!(["dangerous"], "Driving Dangerously", 5000),
    fine!(
        ["wrong side", "against flow"],
        "Driving against the authorized flow of traffic/Wrong side driving",
        1000
    ),
    fine!(["wrong passing", "overtaking"], "Wrong Passing or Overtaking other Vehicles", 1000),
    fine!(["without helmet", "no helmet", "pillion"], "Driving without Helmet (Rider/Pillion Rider)", 1000),
    fine!(["disobeying police", "disobeying order"], "Disobeying police order or directions", 2000),
    fine!(["emergency vehicle"], "Not giving way to an emergency vehicle", 10000),
    fine!(["nmv", "no entry", "one-way"], "Driving in NMV lanes/No entry/One-way roads", 5000),
    fine!(["footpath", "cycle track"], "Driving/Parking on Footpath/Cycle Track", 2000),
    fine!(["speeding", "speed", "over speed"], "Speeding Violation", 2000),
    fine!(["red light", "signal jump"], "Red Light Violation", 3000),
    fine!(["illegal parking", "wrong parking"], "Illegal Parking", 1000),
    fine!(["texting", "mobile phone", "phone while driving"], "Using Mobile Phone While Driving", 2000),
    fine!(["seatbelt", "no seatbelt"], "Not Wearing Seatbelt", 1000),
];

pub fn has_fine_trigger(normalized: &str) -> bool {
    FINE_TRIGGERS.iter().any(|word| normalized.contains(word))
}

/// Every entry with a keyword inside `normalized`, in table order.
pub fn matching_fines(normalized: &str) -> Vec<&'static ViolationFineEntry> {
    FINE_TABLE.iter()
        .filter(|entry| entry.matches(normalized))
        .collect()
}

pub fn fine_reply(matches: &[&ViolationFineEntry]) -> String {
    if matches.is_empty() {
        return FINE_NOT_FOUND.to_string();
    }
    let lines = matches
        .iter()
        .map(|entry| entry.bullet())
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}{}", FINE_REPLY_HEADER, lines)
}

/// Groups digits in threes: `10000` -> `10,000`.
pub fn format_rupees(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_invariants_hold() {
        for entry in FINE_TABLE {
            assert!(!entry.keywords.is_empty(), "{} has no keywords", entry.label);
            for keyword in entry.keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "keywords are matched against lowercase text");
            }
        }
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_rupees(0), "0");
        assert_eq!(format_rupees(500), "500");
        assert_eq!(format_rupees(1000), "1,000");
        assert_eq!(format_rupees(10000), "10,000");
        assert_eq!(format_rupees(1234567), "1,234,567");
    }

    #[test]
    fn speeding_matches_once_even_with_several_keywords() {
        let found = matching_fines("what's the fine for speeding?");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "Speeding Violation");
        assert_eq!(found[0].amount, 2000);
    }

    #[test]
    fn multiple_matches_keep_table_order() {
        let found = matching_fines("penalty for red light and no helmet");
        let labels: Vec<_> = found.iter().map(|e| e.label).collect();
        assert_eq!(
            labels,
            vec!["Driving without Helmet (Rider/Pillion Rider)", "Red Light Violation"]
        );
    }

    #[test]
    fn reply_lists_bullets_after_header() {
        let found = matching_fines("fine for drunk driving");
        assert_eq!(
            fine_reply(&found),
            "Here are the fine amounts for the detected violation(s):\n• Driving under the influence/Drunken Driving: ₹10,000"
        );
    }

    #[test]
    fn empty_match_gives_not_found_literal() {
        assert_eq!(fine_reply(&[]), FINE_NOT_FOUND);
    }

    #[test]
    fn trigger_words() {
        assert!(has_fine_trigger("what is the penalty"));
        assert!(has_fine_trigger("fines please"));
        assert!(has_fine_trigger("amount due"));
        assert!(!has_fine_trigger("tell me about traffic rules"));
    }
}
