use super::dates::lenient_date;
use super::statute::Statute;
use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::warn;

/// Offense grades from least to most serious. A grade's severity is its position here.
pub const GRADE_ORDER: [&str; 11] = ["", "S", "M", "IC", "M3", "M2", "M1", "F", "F3", "F2", "F1"];

/// Position of `grade` in [`GRADE_ORDER`], or `None` when the grade is not a known code.
pub fn grade_rank(grade: &str) -> Option<usize> {
    let grade = grade.trim();
    GRADE_ORDER.iter().position(|known| *known == grade)
}

/// True when `grade_a` is the same as or more serious than `grade_b`.
///
/// Unknown grades are treated as least serious.
pub fn grade_at_least(grade_a: &str, grade_b: &str) -> bool {
    rank_or_lowest(grade_a, "first") >= rank_or_lowest(grade_b, "second")
}

fn rank_or_lowest(grade: &str, position: &str) -> usize {
    grade_rank(grade).unwrap_or_else(|| {
        warn!(
            grade,
            position, "unrecognized grade, assuming it has low seriousness"
        );
        0
    })
}

/// One offense on a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub offense: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub statute: String,
    #[serde(default)]
    pub disposition: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub disposition_date: Option<NaiveDate>,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    /// Position of the charge on its docket. Identifies the charge within the case.
    #[serde(default)]
    pub sequence: Option<u32>,
}

impl Charge {
    pub fn new(
        offense: impl Into<String>,
        grade: impl Into<String>,
        statute: impl Into<String>,
        disposition: impl Into<String>,
    ) -> Self {
        Self {
            offense: offense.into(),
            grade: grade.into(),
            statute: statute.into(),
            disposition: disposition.into(),
            disposition_date: None,
            sentences: Vec::new(),
            sequence: None,
        }
    }

    pub fn with_disposition_date(mut self, date: NaiveDate) -> Self {
        self.disposition_date = Some(date);
        self
    }

    pub fn with_sentence(mut self, sentence: Sentence) -> Self {
        self.sentences.push(sentence);
        self
    }

    /// A disposition counts as a conviction when it starts with "Guilty" (case-sensitive).
    pub fn is_conviction(&self) -> bool {
        self.disposition.trim().starts_with("Guilty")
    }

    pub fn parsed_statute(&self) -> Option<Statute> {
        let parsed = Statute::parse(&self.statute);
        if parsed.is_none() && !self.statute.trim().is_empty() {
            warn!(statute = %self.statute, "could not parse statute citation");
        }
        parsed
    }

    pub fn statute_chapter(&self) -> Option<u32> {
        self.parsed_statute().map(|statute| statute.chapter)
    }

    pub fn statute_section(&self) -> Option<f64> {
        self.parsed_statute().map(|statute| statute.section_number())
    }

    /// Normalized subsections, empty when the citation has none. `None` when it is unreadable.
    pub fn statute_subsections(&self) -> Option<String> {
        self.parsed_statute().map(|statute| statute.subsections)
    }

    /// Latest date on which a sentence on this charge is complete.
    pub fn sentence_complete_date(&self) -> Option<NaiveDate> {
        self.sentences
            .iter()
            .filter_map(Sentence::complete_date)
            .max()
    }

    /// Collapses charges that share a sequence number into one charge each, keeping order of
    /// first appearance.
    pub fn reduce_merge(charges: Vec<Charge>) -> Vec<Charge> {
        let mut merged: Vec<Charge> = Vec::with_capacity(charges.len());
        for charge in charges {
            let existing = charge.sequence.and_then(|sequence| {
                merged
                    .iter_mut()
                    .find(|candidate| candidate.sequence == Some(sequence))
            });
            match existing {
                Some(existing) => existing.combine_with(charge),
                None => merged.push(charge),
            }
        }
        merged
    }

    /// Fills blank fields from `other`, and takes `other`'s disposition when it reads like a
    /// final disposition.
    pub fn combine_with(&mut self, other: Charge) {
        fill_blank(&mut self.offense, &other.offense);
        fill_blank(&mut self.grade, &other.grade);
        fill_blank(&mut self.statute, &other.statute);

        if self.disposition.trim().is_empty() && !other.disposition.trim().is_empty() {
            self.disposition = other.disposition.clone();
        } else if final_disposition_pattern().is_match(&other.disposition) {
            self.disposition = other.disposition.clone();
            self.disposition_date = other.disposition_date;
        }

        if self.disposition_date.is_none() {
            self.disposition_date = other.disposition_date;
        }
        if self.sequence.is_none() {
            self.sequence = other.sequence;
        }
        if self.sentences.is_empty() {
            self.sentences = other.sentences;
        }
    }
}

fn fill_blank(target: &mut String, candidate: &str) {
    if target.trim().is_empty() && !candidate.trim().is_empty() {
        *target = candidate.to_string();
    }
}

fn final_disposition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)nolle|guilt|dismiss|withdraw").expect("disposition pattern is valid")
    })
}

/// A sentence imposed on a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(default, deserialize_with = "lenient_date")]
    pub sentence_date: Option<NaiveDate>,
    #[serde(default)]
    pub sentence_type: String,
    #[serde(default)]
    pub sentence_period: String,
    #[serde(default)]
    pub sentence_length: SentenceLength,
}

impl Sentence {
    pub fn complete_date(&self) -> Option<NaiveDate> {
        let start = self.sentence_date?;
        let days = self.sentence_length.max_days?;
        start.checked_add_signed(Duration::days(days))
    }
}

/// Minimum and maximum length of a sentence, in days. `None` when the length is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceLength {
    pub min_days: Option<i64>,
    pub max_days: Option<i64>,
}

impl SentenceLength {
    /// Builds a length from `(amount, unit)` terms as they appear on dockets, e.g. `("90", "Days")`.
    pub fn from_terms(min: (&str, &str), max: (&str, &str)) -> Self {
        Self {
            min_days: Self::calculate_days(min.0, min.1),
            max_days: Self::calculate_days(max.0, max.1),
        }
    }

    /// Days described by a phrase like "18 months". Months are 30.42 days, years 365.
    pub fn calculate_days(amount: &str, unit: &str) -> Option<i64> {
        let amount = amount.trim();
        if amount.is_empty() {
            return Some(0);
        }

        let unit = unit.trim().to_ascii_lowercase();
        let days_per_unit = if unit.starts_with("day") {
            1.0
        } else if unit.starts_with("month") {
            30.42
        } else if unit.starts_with("year") {
            365.0
        } else {
            if !unit.is_empty() {
                warn!(unit = %unit, "could not understand unit of time");
            }
            return None;
        };

        match amount.parse::<f64>() {
            Ok(value) => Some((value * days_per_unit).round() as i64),
            Err(_) => {
                warn!(amount, "could not parse sentence length");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conviction_requires_leading_guilty() {
        let disposition = |text: &str| Charge::new("Theft", "M1", "18 § 3921", text);
        assert!(disposition("Guilty").is_conviction());
        assert!(disposition("  Guilty Plea").is_conviction());
        assert!(disposition("Guilty But Mentally Ill").is_conviction());
        assert!(!disposition("Not Guilty").is_conviction());
        assert!(!disposition("guilty plea").is_conviction());
        assert!(!disposition("Nolle Prossed").is_conviction());
        assert!(!disposition("Withdrawn").is_conviction());
        assert!(!disposition("Dismissed").is_conviction());
    }

    #[test]
    fn grade_ordering_is_a_total_preorder() {
        for grade in GRADE_ORDER {
            assert!(grade_at_least(grade, grade));
        }
        assert!(grade_at_least("F1", "S"));
        assert!(!grade_at_least("", "M1"));
        assert!(grade_at_least("M1", "M2"));
        assert!(grade_at_least("M3", "IC"));
        assert!(!grade_at_least("IC", "M3"));
    }

    #[test]
    fn unknown_grades_rank_lowest() {
        assert_eq!(grade_rank("X9"), None);
        assert!(grade_at_least("X9", ""));
        assert!(!grade_at_least("X9", "S"));
        assert!(grade_at_least("S", "X9"));
    }

    #[test]
    fn statute_accessors_fall_back_when_unparseable() {
        let charge = Charge::new("Mystery", "M", "unknown citation", "Guilty");
        assert_eq!(charge.statute_chapter(), None);
        assert_eq!(charge.statute_section(), None);
        assert_eq!(charge.statute_subsections(), None);

        let bare = Charge::new("Theft", "M1", "18 § 3921", "Guilty");
        assert_eq!(bare.statute_subsections(), Some(String::new()));

        let charge = Charge::new("Simple assault", "M2", "18 § 2701 §§ A1", "Guilty");
        assert_eq!(charge.statute_chapter(), Some(18));
        assert_eq!(charge.statute_section(), Some(2701.0));
        assert_eq!(charge.statute_subsections().as_deref(), Some("a1"));
    }

    #[test]
    fn sentence_lengths_convert_units() {
        assert_eq!(SentenceLength::calculate_days("90", "Days"), Some(90));
        assert_eq!(SentenceLength::calculate_days("2", "Years"), Some(730));
        assert_eq!(SentenceLength::calculate_days("1", "Months"), Some(30));
        assert_eq!(SentenceLength::calculate_days("", "Years"), Some(0));
        assert_eq!(SentenceLength::calculate_days("5", "fortnights"), None);
        assert_eq!(SentenceLength::calculate_days("five", "days"), None);
    }

    #[test]
    fn sentence_complete_date_adds_maximum() {
        let sentence = Sentence {
            sentence_date: NaiveDate::from_ymd_opt(2010, 1, 1),
            sentence_type: "Probation".to_string(),
            sentence_period: String::new(),
            sentence_length: SentenceLength::from_terms(("6", "Months"), ("1", "Years")),
        };
        assert_eq!(
            sentence.complete_date(),
            NaiveDate::from_ymd_opt(2011, 1, 1)
        );
    }

    #[test]
    fn reduce_merge_combines_by_sequence() {
        let mut first = Charge::new("Theft", "", "18 § 3921", "Proceed to Court");
        first.sequence = Some(1);
        let mut later = Charge::new("Theft", "M1", "", "Guilty Plea")
            .with_disposition_date(NaiveDate::from_ymd_opt(2012, 5, 1).expect("valid"));
        later.sequence = Some(1);
        let mut other = Charge::new("Conspiracy", "M1", "18 § 903", "Withdrawn");
        other.sequence = Some(2);

        let merged = Charge::reduce_merge(vec![first, other, later]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].grade, "M1");
        assert_eq!(merged[0].disposition, "Guilty Plea");
        assert_eq!(merged[0].disposition_date, NaiveDate::from_ymd_opt(2012, 5, 1));
        assert_eq!(merged[1].offense, "Conspiracy");
    }
}
