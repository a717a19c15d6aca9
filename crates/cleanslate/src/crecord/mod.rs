//! Structured criminal record: a person, their cases, and the charges on each case.

mod case;
mod charge;
mod dates;
mod person;
mod statute;

pub use case::Case;
pub use charge::{grade_at_least, grade_rank, Charge, Sentence, SentenceLength, GRADE_ORDER};
pub use dates::{parse_date, whole_years_between, Elapsed};
pub use person::{Address, Person};
pub use statute::Statute;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Errors raised while reading a record from JSON.
#[derive(Debug, thiserror::Error)]
pub enum RecordLoadError {
    #[error("failed to read record: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One person's criminal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CRecord {
    pub person: Person,
    #[serde(default)]
    pub cases: Vec<Case>,
}

impl CRecord {
    pub fn new(person: Person) -> Self {
        Self {
            person,
            cases: Vec::new(),
        }
    }

    pub fn with_cases(person: Person, cases: Vec<Case>) -> Self {
        Self { person, cases }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RecordLoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RecordLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Every charge on the record, paired with the case it belongs to.
    pub fn charges(&self) -> impl Iterator<Item = (&Case, &Charge)> {
        self.cases
            .iter()
            .flat_map(|case| case.charges.iter().map(move |charge| (case, charge)))
    }

    pub fn charge_count(&self) -> usize {
        self.cases.iter().map(|case| case.charges.len()).sum()
    }

    /// Time since the most recent arrest or prosecution on any case.
    pub fn years_since_last_arrested_or_prosecuted(&self, today: NaiveDate) -> Elapsed {
        Elapsed::since_latest(
            self.cases
                .iter()
                .map(|case| (case.docket_number.as_str(), case.last_action())),
            today,
        )
    }

    /// Time since the person was last released from confinement or supervision.
    pub fn years_since_final_release(&self, today: NaiveDate) -> Elapsed {
        Elapsed::since_latest(
            self.cases
                .iter()
                .map(|case| (case.docket_number.as_str(), case.end_of_sentence())),
            today,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn loads_record_json_with_lenient_dates() {
        let json = r#"{
            "person": {"first_name": "Jane", "last_name": "Doe", "date_of_birth": "01/02/1960"},
            "cases": [{
                "docket_number": "CP-51-CR-0001234-2005",
                "county": "Philadelphia",
                "total_fines": 150.0,
                "arrest_date": "not a date",
                "charges": [{
                    "offense": "Theft",
                    "grade": "M1",
                    "statute": "18 § 3921 §§ A",
                    "disposition": "Guilty Plea",
                    "disposition_date": "2005-06-01"
                }]
            }]
        }"#;

        let record = CRecord::from_reader(json.as_bytes()).expect("record loads");
        assert_eq!(record.person.date_of_birth, Some(date(1960, 1, 2)));
        let case = &record.cases[0];
        assert_eq!(case.arrest_date, None);
        assert_eq!(case.fines_paid, None);
        assert_eq!(case.charges[0].disposition_date, Some(date(2005, 6, 1)));
        assert_eq!(record.charge_count(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = CRecord::from_reader("{".as_bytes()).expect_err("invalid json");
        assert!(matches!(err, RecordLoadError::Json(_)));
    }

    #[test]
    fn elapsed_time_helpers() {
        let today = date(2024, 6, 1);
        let person = Person::new("Jane", "Doe");
        assert_eq!(
            CRecord::new(person.clone()).years_since_last_arrested_or_prosecuted(today),
            Elapsed::NoEvents
        );

        let undated = CRecord::with_cases(person.clone(), vec![Case::new("CP-1", "Erie")]);
        assert_eq!(
            undated.years_since_last_arrested_or_prosecuted(today),
            Elapsed::Undated {
                known: None,
                dockets: vec!["CP-1".to_string()],
            }
        );

        let record = CRecord::with_cases(
            person,
            vec![
                Case::new("CP-1", "Erie").arrested_on(date(2010, 1, 1)),
                Case::new("CP-2", "Erie")
                    .arrested_on(date(2012, 1, 1))
                    .disposed_on(date(2013, 5, 1)),
            ],
        );
        assert_eq!(
            record.years_since_last_arrested_or_prosecuted(today),
            Elapsed::Years(11)
        );
        assert_eq!(record.years_since_final_release(today), Elapsed::Years(11));
    }

    #[test]
    fn undated_case_hides_the_latest_contact() {
        let today = date(2024, 6, 1);
        let record = CRecord::with_cases(
            Person::new("Ruth", "Doe"),
            vec![
                Case::new("CP-OLD", "Erie")
                    .arrested_on(date(1990, 1, 1))
                    .disposed_on(date(1991, 1, 1)),
                Case::new("CP-UNDATED", "Erie")
                    .with_charge(Charge::new("Robbery", "F1", "18 § 3701", "Guilty")),
            ],
        );
        let expected = Elapsed::Undated {
            known: Some(33),
            dockets: vec!["CP-UNDATED".to_string()],
        };
        assert_eq!(record.years_since_last_arrested_or_prosecuted(today), expected);
        assert_eq!(record.years_since_final_release(today), expected);
    }
}
