use super::ruledefs::sealing::{
    fines_and_costs_paid, full_record_requirements_for_petition_sealing,
    petition_sealing_for_single_charge, ten_years_since_last_conviction,
};
use super::decision::Reasoning;
use super::Analysis;
use crate::crecord::CRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeesLookupError {
    #[error("no case with docket number {0}")]
    NotFound(String),
    #[error("{count} cases share docket number {docket_number}")]
    Ambiguous { docket_number: String, count: usize },
}

/// A charge that passes the charge-level sealing checks on a case with unpaid or unknown fines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinesBlockedCharge {
    pub docket_number: String,
    pub offense: String,
    pub fines_owed: f64,
    pub explanation: String,
}

/// A case that could be sealed once enough time has passed since the last conviction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaitingPeriodNote {
    pub docket_number: String,
    pub explanation: String,
}

/// Screening overview of a finished [`Analysis`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub client: String,
    pub as_of: NaiveDate,
    pub petition_count: usize,
    pub cases_cleared: usize,
    pub charges_cleared: usize,
    pub remaining_charges: usize,
    /// Trimmed, lower-cased county names from the original record.
    pub counties: BTreeSet<String>,
    pub sealable_but_for_fines: Vec<FinesBlockedCharge>,
    /// Heuristic hints, not legal conclusions.
    pub waiting_period_notes: Vec<WaitingPeriodNote>,
}

impl AnalysisSummary {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let cleared_dockets: BTreeSet<&str> = analysis
            .petitions()
            .flat_map(|petition| petition.cases())
            .map(|case| case.docket_number.as_str())
            .collect();

        Self {
            client: analysis.record.person.full_name(),
            as_of: analysis.as_of,
            petition_count: analysis.petitions().count(),
            cases_cleared: cleared_dockets.len(),
            charges_cleared: analysis.petitions().map(|petition| petition.charge_count()).sum(),
            remaining_charges: analysis.remaining_record.charge_count(),
            counties: counties(&analysis.record),
            sealable_but_for_fines: sealable_but_for_fines(&analysis.record),
            waiting_period_notes: waiting_period_notes(&analysis.record, analysis.as_of),
        }
    }
}

pub(crate) fn counties(record: &CRecord) -> BTreeSet<String> {
    record
        .cases
        .iter()
        .map(|case| case.county.trim().to_lowercase())
        .filter(|county| !county.is_empty())
        .collect()
}

/// Unpaid fines and costs on the case with `docket_number`. Unknown amounts count as zero.
pub fn fees_owed(record: &CRecord, docket_number: &str) -> Result<f64, FeesLookupError> {
    let mut matching = record
        .cases
        .iter()
        .filter(|case| case.docket_number == docket_number);
    let Some(case) = matching.next() else {
        return Err(FeesLookupError::NotFound(docket_number.to_string()));
    };
    let extra = matching.count();
    if extra > 0 {
        return Err(FeesLookupError::Ambiguous {
            docket_number: docket_number.to_string(),
            count: extra + 1,
        });
    }
    Ok(case.fines_owed())
}

fn sealable_but_for_fines(record: &CRecord) -> Vec<FinesBlockedCharge> {
    record
        .cases
        .iter()
        .flat_map(|case| {
            let fines = fines_and_costs_paid(case);
            let explanation = match &fines.reasoning {
                Reasoning::Text(text) => text.clone(),
                _ => String::new(),
            };
            let blocked = !fines.is_satisfied();
            case.charges
                .iter()
                .filter(move |charge| {
                    blocked
                        && charge.is_conviction()
                        && petition_sealing_for_single_charge(charge).is_satisfied()
                })
                .map(move |charge| FinesBlockedCharge {
                    docket_number: case.docket_number.clone(),
                    offense: charge.offense.clone(),
                    fines_owed: case.fines_owed(),
                    explanation: explanation.clone(),
                })
        })
        .collect()
}

/// Cases with sealable charges where the ten-year wait is the only record-level requirement
/// that fails.
fn waiting_period_notes(record: &CRecord, as_of: NaiveDate) -> Vec<WaitingPeriodNote> {
    let gate = full_record_requirements_for_petition_sealing(record, as_of);
    let ten_years = ten_years_since_last_conviction(record, as_of);
    let failing: Vec<_> = gate
        .children()
        .iter()
        .filter(|child| !child.is_satisfied())
        .collect();
    if failing.len() != 1 || failing[0].name != ten_years.name {
        return Vec::new();
    }
    let Reasoning::Text(explanation) = &ten_years.reasoning else {
        return Vec::new();
    };

    record
        .cases
        .iter()
        .filter(|case| {
            case.charges
                .iter()
                .any(|charge| petition_sealing_for_single_charge(charge).is_satisfied())
        })
        .map(|case| WaitingPeriodNote {
            docket_number: case.docket_number.clone(),
            explanation: explanation.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crecord::{Case, Charge, Person};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn record() -> CRecord {
        CRecord::with_cases(
            Person::new("Jane", "Doe"),
            vec![
                Case::new("CP-1", " Erie ")
                    .with_fines(Some(250.0), Some(100.0))
                    .with_charge(
                        Charge::new("Theft", "M2", "18 § 3921", "Guilty")
                            .with_disposition_date(date(2020, 1, 1)),
                    ),
                Case::new("CP-2", "PHILADELPHIA")
                    .with_charge(Charge::new("Trespass", "S", "18 § 3503", "Withdrawn")),
            ],
        )
    }

    #[test]
    fn counties_are_normalized() {
        let counties = counties(&record());
        assert_eq!(
            counties.into_iter().collect::<Vec<_>>(),
            vec!["erie".to_string(), "philadelphia".to_string()]
        );
    }

    #[test]
    fn fees_lookup_by_docket() {
        let record = record();
        assert_eq!(fees_owed(&record, "CP-1"), Ok(150.0));
        assert_eq!(fees_owed(&record, "CP-2"), Ok(0.0));
        assert_eq!(
            fees_owed(&record, "CP-9"),
            Err(FeesLookupError::NotFound("CP-9".to_string()))
        );

        let mut duplicated = record.clone();
        duplicated.cases.push(Case::new("CP-1", "Erie"));
        assert!(matches!(
            fees_owed(&duplicated, "CP-1"),
            Err(FeesLookupError::Ambiguous { count: 2, .. })
        ));
    }

    #[test]
    fn unpaid_fines_are_flagged_on_sealable_convictions() {
        let blocked = sealable_but_for_fines(&record());
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].docket_number, "CP-1");
        assert_eq!(blocked[0].fines_owed, 150.0);
    }

    #[test]
    fn waiting_period_note_when_only_ten_year_rule_fails() {
        let notes = waiting_period_notes(&record(), date(2024, 6, 1));
        let dockets: Vec<&str> = notes.iter().map(|note| note.docket_number.as_str()).collect();
        assert_eq!(dockets, vec!["CP-1"]);
        assert!(notes[0].explanation.contains("eligible for sealing in 6 years"));
    }

    #[test]
    fn summary_counts_petitions() {
        let analysis = Analysis::standard(record(), date(2024, 6, 1));
        let summary = analysis.summary();
        assert_eq!(summary.client, "Jane Doe");
        assert_eq!(summary.petition_count, 1);
        assert_eq!(summary.cases_cleared, 1);
        assert_eq!(summary.charges_cleared, 1);
        assert_eq!(summary.remaining_charges, 1);
    }
}
