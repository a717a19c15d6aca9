use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Whole calendar years elapsed between `from` and `to`, anniversary based.
///
/// Negative when `to` is before `from`.
pub fn whole_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if years > 0 && (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    } else if years < 0 && (to.month(), to.day()) > (from.month(), from.day()) {
        years += 1;
    }
    years
}

/// Reads a date written as `YYYY-MM-DD` or `MM/DD/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Deserializes an optional date, turning blank or unreadable strings into `None`.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|value| {
        let parsed = parse_date(&value);
        if parsed.is_none() && !value.trim().is_empty() {
            tracing::warn!(value = %value, "could not read date string");
        }
        parsed
    }))
}

/// Time elapsed since the most recent event of some kind on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum Elapsed {
    /// Whole years since the latest dated event.
    Years(i32),
    /// The record holds no events at all.
    NoEvents,
    /// At least one case has no usable date, so the latest event is unknown.
    Undated {
        /// Whole years since the latest dated event on the other cases, if any.
        known: Option<i32>,
        dockets: Vec<String>,
    },
}

impl Elapsed {
    /// Latest event date across `events`, one `(docket, date)` pair per case, measured up to
    /// `today`. A single undated case makes the whole result [`Elapsed::Undated`].
    pub(crate) fn since_latest<'a, I>(events: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<NaiveDate>)>,
    {
        let mut any_events = false;
        let mut latest: Option<NaiveDate> = None;
        let mut undated = Vec::new();
        for (docket, date) in events {
            any_events = true;
            match date {
                Some(date) => latest = latest.max(Some(date)),
                None => undated.push(docket.to_string()),
            }
        }

        match latest {
            _ if !any_events => Elapsed::NoEvents,
            Some(latest) if undated.is_empty() => {
                Elapsed::Years(whole_years_between(latest, today))
            }
            latest => Elapsed::Undated {
                known: latest.map(|latest| whole_years_between(latest, today)),
                dockets: undated,
            },
        }
    }

    /// `Years(n)` satisfies the test when `test(n)` holds. No events always satisfies,
    /// an undated record never does.
    pub fn satisfies(&self, test: impl Fn(i32) -> bool) -> bool {
        match self {
            Elapsed::Years(years) => test(*years),
            Elapsed::NoEvents => true,
            Elapsed::Undated { .. } => false,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elapsed::Years(years) => write!(f, "{years} years"),
            Elapsed::NoEvents => write!(f, "no recorded events"),
            Elapsed::Undated { .. } => write!(f, "an unknown number of years"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn whole_years_count_anniversaries() {
        assert_eq!(whole_years_between(date(2000, 6, 15), date(2010, 6, 14)), 9);
        assert_eq!(whole_years_between(date(2000, 6, 15), date(2010, 6, 15)), 10);
        assert_eq!(whole_years_between(date(2010, 6, 15), date(2000, 6, 16)), -9);
    }

    #[test]
    fn parse_date_accepts_iso_and_us_formats() {
        assert_eq!(parse_date("2019-03-04"), Some(date(2019, 3, 4)));
        assert_eq!(parse_date(" 03/04/2019 "), Some(date(2019, 3, 4)));
        assert_eq!(parse_date("March 4"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn elapsed_distinguishes_empty_and_undated() {
        let today = date(2024, 1, 1);
        assert_eq!(Elapsed::since_latest(Vec::<(&str, Option<NaiveDate>)>::new(), today), Elapsed::NoEvents);
        assert_eq!(
            Elapsed::since_latest([("CP-1", None)], today),
            Elapsed::Undated {
                known: None,
                dockets: vec!["CP-1".to_string()],
            }
        );
        assert_eq!(
            Elapsed::since_latest(
                [("CP-1", Some(date(2010, 1, 1))), ("CP-2", Some(date(2015, 6, 1)))],
                today
            ),
            Elapsed::Years(8)
        );
        assert!(Elapsed::NoEvents.satisfies(|years| years > 100));
    }

    #[test]
    fn one_undated_case_makes_the_record_undated() {
        let elapsed = Elapsed::since_latest(
            [("CP-OLD", Some(date(1991, 1, 1))), ("CP-NEW", None)],
            date(2024, 1, 1),
        );
        assert_eq!(
            elapsed,
            Elapsed::Undated {
                known: Some(33),
                dockets: vec!["CP-NEW".to_string()],
            }
        );
        assert!(!elapsed.satisfies(|_| true));
    }
}
