use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A citation parsed out of the free-text statute field of a charge, e.g. `18 § 3126 §§ A1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statute {
    pub chapter: u32,
    /// Section as written, including any decimal part (`4915.1`).
    pub section: String,
    /// Subsections with parentheses, whitespace and case removed (`(a)(1)` becomes `a1`).
    pub subsections: String,
}

fn citation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*(?P<chapter>\d+)\s*§\s*(?P<section>\d+(?:\.\d+)?)\s*(?:§§)?\s*(?P<subsections>[()A-Za-z0-9.*]*)",
        )
        .expect("statute citation pattern is valid")
    })
}

impl Statute {
    /// Parses `<chapter> § <section>[.<decimal>] [§§ <subsections>]`.
    ///
    /// Returns `None` when the text does not follow that grammar.
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = citation_pattern().captures(raw)?;
        let chapter = captures.name("chapter")?.as_str().parse().ok()?;
        let section = captures.name("section")?.as_str().to_string();
        let subsections = captures
            .name("subsections")
            .map(|m| normalize_subsections(m.as_str()))
            .unwrap_or_default();

        Some(Self {
            chapter,
            section,
            subsections,
        })
    }

    /// Section as a number, for range checks.
    pub fn section_number(&self) -> f64 {
        self.section.parse().unwrap_or(0.0)
    }

    /// True when this is a chapter `chapter` statute with a section strictly between `low` and `high`.
    pub fn in_section_range(&self, chapter: u32, low: f64, high: f64) -> bool {
        let section = self.section_number();
        self.chapter == chapter && section > low && section < high
    }

    pub fn is_section(&self, chapter: u32, section: &str) -> bool {
        self.chapter == chapter && self.section == section
    }

    /// Section and subsections run together, the way offense lists key statutes (`3126a1`).
    pub fn offense_code(&self) -> String {
        format!("{}{}", self.section, self.subsections)
    }
}

fn normalize_subsections(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '(' | ')') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
