//! Rules that turn a record into petitions.
//!
//! Every rule reads a record and returns the part of it left unaddressed along with a decision
//! whose value is the list of petitions. The input record is never modified.

use super::expungement::{
    arrest_free_for_n_years, is_conviction, is_over_age, is_summary_conviction,
    years_since_final_release, years_since_last_contact, ARREST_FREE_DEFAULT_YEARS,
};
use super::sealing::{full_record_requirements_for_petition_sealing, slice_case_for_sealing};
use crate::analysis::decision::{CaseSealability, Decision, DecisionValue};
use crate::crecord::{CRecord, Case, Charge};
use crate::petitions::{
    Expungement, ExpungementProcedure, ExpungementType, Petition, Sealing,
};
use chrono::NaiveDate;
use tracing::debug;

/// Signature shared by every petition rule.
pub type PetitionRule = fn(&CRecord, NaiveDate) -> (CRecord, Decision);

const SUMMARY_EXPUNGEMENT_LANGUAGE: &str =
    "The petitioner has been arrest free for more than five years since this summary conviction.";

const OVER_70_EXPUNGEMENT_LANGUAGE: &str = "The petitioner is over 70 years old and has been free of arrest or prosecution for ten years following completion of the sentence.";

/// 18 Pa.C.S. 9122(b)(1): a person over 70 who has been free of arrest or prosecution for ten
/// years following release from confinement or supervision.
pub fn expunge_over_70(record: &CRecord, today: NaiveDate) -> (CRecord, Decision) {
    let conditions = vec![
        is_over_age(&record.person, 70, today),
        years_since_last_contact(record, 10, today),
        years_since_final_release(record, 10, today),
    ];
    expunge_whole_record(
        "Expungements for a person over 70.",
        record,
        conditions,
        Some(OVER_70_EXPUNGEMENT_LANGUAGE),
    )
}

/// 18 Pa.C.S. 9122(b)(2): a person who has been dead for three years.
pub fn expunge_deceased(record: &CRecord, today: NaiveDate) -> (CRecord, Decision) {
    let name = format!("Is {} dead for more than three years?", record.person.first_name);
    let condition = match record.person.years_dead(today) {
        Some(years) => Decision::fact(
            name,
            years > 3,
            format!("{} died {years} years ago.", record.person.first_name),
        ),
        None => Decision::fact(
            name,
            false,
            format!("{} is not known to have died.", record.person.first_name),
        ),
    };
    expunge_whole_record(
        "Expungements for a deceased person.",
        record,
        vec![condition],
        None,
    )
}

/// One full expungement covering every case, when all `conditions` hold.
fn expunge_whole_record(
    name: &str,
    record: &CRecord,
    conditions: Vec<Decision>,
    language: Option<&str>,
) -> (CRecord, Decision) {
    let eligible = conditions.iter().all(Decision::is_satisfied);
    let decision = Decision::all_of(name, conditions);
    if !eligible || record.cases.is_empty() {
        return (record.clone(), decision.with_value(DecisionValue::Petitions(Vec::new())));
    }

    debug!(cases = record.cases.len(), "expunging whole record");
    let petition = Petition::Expungement(Expungement {
        client: record.person.clone(),
        cases: record.cases.clone(),
        expungement_type: ExpungementType::Full,
        procedure: ExpungementProcedure::NonSummary,
        summary_expungement_language: language.map(str::to_string),
    });
    (
        CRecord::new(record.person.clone()),
        decision.with_value(DecisionValue::Petitions(vec![petition])),
    )
}

/// 18 Pa.C.S. 9122(a) and Pa.R.Crim.P. 490: charges that did not end in a conviction.
pub fn expunge_nonconvictions(record: &CRecord, _today: NaiveDate) -> (CRecord, Decision) {
    let mut decision = Decision::new("Expungements for nonconvictions.");
    let mut remaining = CRecord::new(record.person.clone());
    let mut petitions = Vec::new();

    for case in &record.cases {
        let (case_decision, expungeable, kept) = split_case(case, |charge| {
            let conviction = is_conviction(charge);
            let value = !conviction.is_satisfied();
            Decision::all_of(
                format!("Is the charge for {} not a conviction?", charge.offense),
                vec![conviction],
            )
            .with_value(value)
        });
        decision.push(case_decision);
        if let Some(petition) = expungement_for(
            record,
            case,
            expungeable,
            ExpungementProcedure::NonSummary,
            None,
        ) {
            petitions.push(petition);
        }
        if let Some(kept) = kept {
            remaining.cases.push(kept);
        }
    }

    (remaining, decision.with_value(DecisionValue::Petitions(petitions)))
}

/// 18 Pa.C.S. 9122(b)(3)(i): summary convictions, once the person has been arrest and
/// prosecution free for five years.
pub fn expunge_summary_convictions(record: &CRecord, today: NaiveDate) -> (CRecord, Decision) {
    let mut decision = Decision::new("Expungements for summary convictions.");
    let arrest_free = arrest_free_for_n_years(record, ARREST_FREE_DEFAULT_YEARS, today);
    let eligible = arrest_free.is_satisfied() && !record.cases.is_empty();
    decision.push(arrest_free);
    if !eligible {
        return (
            record.clone(),
            decision.with_value(DecisionValue::Petitions(Vec::new())),
        );
    }

    let mut remaining = CRecord::new(record.person.clone());
    let mut petitions = Vec::new();
    for case in &record.cases {
        let (case_decision, expungeable, kept) = split_case(case, is_summary_conviction);
        decision.push(case_decision);
        if let Some(petition) = expungement_for(
            record,
            case,
            expungeable,
            ExpungementProcedure::Summary,
            Some(SUMMARY_EXPUNGEMENT_LANGUAGE.to_string()),
        ) {
            petitions.push(petition);
        }
        if let Some(kept) = kept {
            remaining.cases.push(kept);
        }
    }

    (remaining, decision.with_value(DecisionValue::Petitions(petitions)))
}

/// Splits a case's charges by `test`. Returns the per-case decision, the charges that passed
/// and a copy of the case holding the charges that did not, if any.
fn split_case(
    case: &Case,
    test: impl Fn(&Charge) -> Decision,
) -> (Decision, Vec<Charge>, Option<Case>) {
    let mut case_decision = Decision::new(format!("Case {}", case.docket_number));
    let mut passed = Vec::new();
    let mut kept = case.partial_copy();
    for charge in &case.charges {
        let charge_decision = test(charge);
        if charge_decision.is_satisfied() {
            passed.push(charge.clone());
        } else {
            kept.charges.push(charge.clone());
        }
        case_decision.push(charge_decision);
    }
    let case_decision = case_decision.with_value(!passed.is_empty());
    let kept = (!kept.charges.is_empty()).then_some(kept);
    (case_decision, passed, kept)
}

fn expungement_for(
    record: &CRecord,
    case: &Case,
    charges: Vec<Charge>,
    procedure: ExpungementProcedure,
    summary_expungement_language: Option<String>,
) -> Option<Petition> {
    if charges.is_empty() {
        return None;
    }
    let expungement_type = ExpungementType::for_coverage(charges.len(), case.charges.len());
    let mut petition_case = case.partial_copy();
    petition_case.charges = charges;
    debug!(
        docket_number = %case.docket_number,
        expungement_type = expungement_type.label(),
        procedure = procedure.label(),
        "expungement petition"
    );
    Some(Petition::Expungement(Expungement {
        client: record.person.clone(),
        cases: vec![petition_case],
        expungement_type,
        procedure,
        summary_expungement_language,
    }))
}

/// 18 Pa.C.S. 9122.1: petition-based sealing of convictions.
///
/// Only applies when the whole record clears the record-level requirements. Each case then
/// yields a sealing petition for its sealable charges, and its other charges stay on the
/// remaining record.
pub fn seal_convictions(record: &CRecord, today: NaiveDate) -> (CRecord, Decision) {
    let mut decision = Decision::new("Sealings under 18 Pa.C.S. 9122.1");
    let gate = full_record_requirements_for_petition_sealing(record, today);
    let eligible = gate.is_satisfied();
    decision.push(gate);
    if !eligible {
        return (
            record.clone(),
            decision.with_value(DecisionValue::Petitions(Vec::new())),
        );
    }

    let mut remaining = CRecord::new(record.person.clone());
    let mut petitions = Vec::new();
    for case in &record.cases {
        let (case_decision, slice) = slice_case_for_sealing(case);
        let sealability = match (&slice.sealable, &slice.unsealable) {
            (Some(_), None) => CaseSealability::AllChargesSealable,
            (Some(_), Some(_)) => CaseSealability::SomeChargesSealable,
            (None, _) => CaseSealability::NoChargesSealable,
        };
        decision.push(case_decision.with_value(DecisionValue::CaseSealability(sealability)));

        if let Some(sealable) = slice.sealable {
            debug!(docket_number = %sealable.docket_number, "sealing petition");
            petitions.push(Petition::Sealing(Sealing {
                client: record.person.clone(),
                cases: vec![sealable],
            }));
        }
        if let Some(unsealable) = slice.unsealable {
            remaining.cases.push(unsealable);
        }
    }

    (remaining, decision.with_value(DecisionValue::Petitions(petitions)))
}
