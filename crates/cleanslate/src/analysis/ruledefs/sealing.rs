//! Predicates for petition-based sealing under 18 Pa.C.S. 9122.1.
//!
//! Disqualifying offense categories are checked two ways: against a single charge (is this
//! charge itself unsealable?) and against a whole record (does the record hold too many
//! disqualifying convictions within a window?). Each has its own function.

use crate::analysis::decision::{CaseSlice, Decision, DecisionValue, Reasoning, Sealability};
use crate::crecord::{
    grade_at_least, grade_rank, whole_years_between, CRecord, Case, Charge, Statute,
};
use chrono::NaiveDate;

/// Offenses under 42 Pa.C.S. 9799.14 and 9799.55 (tiered sexual offenses and registration),
/// keyed by section and subsections.
pub const TIERED_SEX_OFFENSES: [&str; 35] = [
    "2901a.1", "2902b", "2903b", "2904", "2910b", "3011b", "3121", "3122.1b", "3123", "3124.1",
    "3124.2a", "3124.2a.1", "3124.2a2", "3124.2a3", "3125", "3126a1", "3126a2", "3126a3",
    "3126a4", "3126a5", "3126a6", "3126a7", "3126a8", "4302b", "5902b", "5902b.1", "5903a3ii",
    "5903a4ii", "5903a5ii", "5903a6", "6301a1ii", "6312", "6318", "6320", "7507.1",
];

/// Corruption of minors, 18 Pa.C.S. 6301(a)(1).
pub const CORRUPTION_OF_MINORS: &str = "6301a1";

/// Grades used as a stand-in for "punishable by two or more years".
pub const TWO_YEAR_PENALTY_PROXY_GRADES: [&str; 6] = ["F1", "F2", "F3", "F", "M1", "M2"];

/// How far back a record-level check looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Years(i32),
    Unlimited,
}

impl Window {
    /// Inclusive: a conviction exactly `n` years old is inside a window of `n` years.
    /// Convictions without a known date are treated as inside every window.
    pub fn includes(&self, years_passed: Option<i32>) -> bool {
        match (self, years_passed) {
            (Window::Unlimited, _) | (_, None) => true,
            (Window::Years(limit), Some(years)) => years <= *limit,
        }
    }

    /// Exclusive variant of [`Window::includes`].
    pub fn strictly_includes(&self, years_passed: Option<i32>) -> bool {
        match (self, years_passed) {
            (Window::Unlimited, _) | (_, None) => true,
            (Window::Years(limit), Some(years)) => years < *limit,
        }
    }

    fn label(&self) -> String {
        match self {
            Window::Years(years) => format!("{years} years"),
            Window::Unlimited => "any number of years".to_string(),
        }
    }
}

/// Parameters of a disqualifying-offense check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisqualifierLimits {
    /// Minimum penalty, in years, of offenses the check is about. Statutory maximum penalties
    /// are not part of the record, so this only labels the decision.
    pub penalty_limit: u32,
    /// Number of matching convictions at which the check fails.
    pub conviction_limit: usize,
    pub within: Window,
}

/// Limits applied to the record as a whole by 18 Pa.C.S. 9122.1(b)(2).
pub const RECORD_LEVEL_LIMITS: DisqualifierLimits = DisqualifierLimits {
    penalty_limit: 7,
    conviction_limit: 1,
    within: Window::Years(20),
};

/// Limits applied to a single charge by 18 Pa.C.S. 9122.1(b)(1).
pub const CHARGE_LEVEL_LIMITS: DisqualifierLimits = DisqualifierLimits {
    penalty_limit: 2,
    conviction_limit: 1,
    within: Window::Unlimited,
};

/// Families of offenses that can disqualify a charge or a record from sealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffenseCategory {
    /// Article B of Part II, offenses involving danger to the person.
    DangerToPerson,
    /// Article D of Part II, offenses against the family.
    AgainstFamily,
    /// Chapter 61, firearms and other dangerous articles.
    Firearms,
    /// Tiered sexual offenses and registration offenses.
    Sexual,
    CorruptionOfMinors,
}

impl OffenseCategory {
    fn description(&self) -> &'static str {
        match self {
            OffenseCategory::DangerToPerson => "an Article B (danger to the person) offense",
            OffenseCategory::AgainstFamily => "an offense against the family",
            OffenseCategory::Firearms => "a Chapter 61 firearms offense",
            OffenseCategory::Sexual => "a disqualifying sexual or registration offense",
            OffenseCategory::CorruptionOfMinors => "a disqualifying corruption of minors offense",
        }
    }

    fn statute_matches(&self, statute: &Statute) -> bool {
        match self {
            OffenseCategory::DangerToPerson => statute.in_section_range(18, 2300.0, 3300.0),
            OffenseCategory::AgainstFamily => statute.in_section_range(18, 4300.0, 4500.0),
            OffenseCategory::Firearms => statute.in_section_range(18, 6100.0, 6200.0),
            OffenseCategory::Sexual => {
                statute.chapter == 18
                    && TIERED_SEX_OFFENSES.contains(&statute.offense_code().as_str())
            }
            OffenseCategory::CorruptionOfMinors => {
                statute.chapter == 18 && statute.offense_code() == CORRUPTION_OF_MINORS
            }
        }
    }

    /// Decision that is true when `charge` is NOT a conviction in this category.
    fn charge_decision(&self, charge: &Charge, limits: &DisqualifierLimits) -> Decision {
        let name = format!(
            "Is the charge for {} not a conviction for {} punishable by {} or more years?",
            charge.statute,
            self.description(),
            limits.penalty_limit
        );
        let Some(statute) = charge.parsed_statute() else {
            return Decision::fact(
                name,
                true,
                format!(
                    "Couldn't read the statute {}, so it's probably not {}.",
                    charge.statute,
                    self.description()
                ),
            );
        };

        let matches = self.statute_matches(&statute) && charge.is_conviction();
        let disqualifying = matches && limits.conviction_limit <= 1;
        let reasoning = if matches {
            format!(
                "Statute {} is a conviction for {}.",
                charge.statute,
                self.description()
            )
        } else {
            format!(
                "Statute {} with disposition {} is not a conviction for {}.",
                charge.statute,
                charge.disposition,
                self.description()
            )
        };
        Decision::fact(name, !disqualifying, reasoning)
    }

    /// Decision that is true when `record` holds fewer than `limits.conviction_limit`
    /// convictions in this category within the window.
    fn record_decision(
        &self,
        record: &CRecord,
        limits: &DisqualifierLimits,
        today: NaiveDate,
    ) -> Decision {
        let single = DisqualifierLimits {
            conviction_limit: 1,
            ..*limits
        };
        let children: Vec<Decision> = record
            .charges()
            .filter(|(case, charge)| {
                limits
                    .within
                    .includes(years_since_disposition(case, charge, today))
            })
            .map(|(_, charge)| self.charge_decision(charge, &single))
            .collect();
        let convictions = children
            .iter()
            .filter(|decision| !decision.is_satisfied())
            .count();

        Decision::all_of(
            format!(
                "Not convicted {} or more times within {} of {} punishable by {} or more years?",
                limits.conviction_limit,
                limits.within.label(),
                self.description(),
                limits.penalty_limit
            ),
            children,
        )
        .with_value(convictions < limits.conviction_limit)
    }
}

/// Years since the charge was disposed, falling back to the case's disposition date.
fn years_since_disposition(case: &Case, charge: &Charge, today: NaiveDate) -> Option<i32> {
    match charge.disposition_date {
        Some(disposed) => Some(whole_years_between(disposed, today)),
        None => case.years_passed_disposition(today),
    }
}

pub fn no_danger_to_person_offense_for_charge(
    charge: &Charge,
    limits: &DisqualifierLimits,
) -> Decision {
    OffenseCategory::DangerToPerson.charge_decision(charge, limits)
}

pub fn no_danger_to_person_offense_for_record(
    record: &CRecord,
    limits: &DisqualifierLimits,
    today: NaiveDate,
) -> Decision {
    OffenseCategory::DangerToPerson.record_decision(record, limits, today)
}

pub fn no_offense_against_family_for_charge(
    charge: &Charge,
    limits: &DisqualifierLimits,
) -> Decision {
    OffenseCategory::AgainstFamily.charge_decision(charge, limits)
}

pub fn no_offense_against_family_for_record(
    record: &CRecord,
    limits: &DisqualifierLimits,
    today: NaiveDate,
) -> Decision {
    OffenseCategory::AgainstFamily.record_decision(record, limits, today)
}

pub fn no_firearms_offense_for_charge(charge: &Charge, limits: &DisqualifierLimits) -> Decision {
    OffenseCategory::Firearms.charge_decision(charge, limits)
}

pub fn no_firearms_offense_for_record(
    record: &CRecord,
    limits: &DisqualifierLimits,
    today: NaiveDate,
) -> Decision {
    OffenseCategory::Firearms.record_decision(record, limits, today)
}

pub fn no_sexual_offense_for_charge(charge: &Charge, limits: &DisqualifierLimits) -> Decision {
    OffenseCategory::Sexual.charge_decision(charge, limits)
}

pub fn no_sexual_offense_for_record(
    record: &CRecord,
    limits: &DisqualifierLimits,
    today: NaiveDate,
) -> Decision {
    OffenseCategory::Sexual.record_decision(record, limits, today)
}

pub fn no_corruption_of_minors_offense(charge: &Charge, limits: &DisqualifierLimits) -> Decision {
    OffenseCategory::CorruptionOfMinors.charge_decision(charge, limits)
}

/// 18 Pa.C.S. 9122.1(a): free from conviction for at least 10 years.
pub fn ten_years_since_last_conviction(record: &CRecord, today: NaiveDate) -> Decision {
    let name = "Has the person been free of conviction for at least 10 years?";
    let convictions: Vec<(&Case, &Charge)> = record
        .charges()
        .filter(|(_, charge)| charge.is_conviction())
        .collect();
    if convictions.is_empty() {
        return Decision::fact(name, true, "The person appears to have no convictions.");
    }

    let undated = convictions
        .iter()
        .filter(|(case, charge)| {
            charge.disposition_date.is_none() && case.effective_disposition_date().is_none()
        })
        .count();
    let last = convictions
        .iter()
        .filter_map(|(case, charge)| {
            charge
                .disposition_date
                .or_else(|| case.effective_disposition_date())
                .or_else(|| case.last_action())
                .map(|date| (date, case.docket_number.as_str()))
        })
        .max_by_key(|(date, _)| *date);

    let Some((last_date, docket_number)) = last else {
        return Decision::fact(
            name,
            false,
            format!(
                "There are {} convictions but none has a usable date, so we cannot tell when the last conviction was.",
                convictions.len()
            ),
        );
    };

    let years = whole_years_between(last_date, today);
    let mut reasoning = format!(
        "It has been {years} years since the last conviction on {last_date} in {docket_number}."
    );
    if undated > 0 {
        reasoning.push_str(&format!(
            " But note that there were {undated} convictions without disposition dates, so our estimate of the last conviction date may be wrong."
        ));
    }
    let value = years >= 10;
    if !value {
        reasoning.push_str(&format!(
            " Person may be eligible for sealing in {} years, if there are no further convictions.",
            10 - years
        ));
    }
    Decision::fact(name, value, reasoning)
}

/// 18 Pa.C.S. 9122.1(a): all fines and costs on the case are paid.
pub fn fines_and_costs_paid(case: &Case) -> Decision {
    let name = format!(
        "Fines and costs are all paid on the case {}?",
        case.docket_number
    );
    match (case.total_fines, case.fines_paid) {
        (Some(total), Some(paid)) => Decision::fact(
            name,
            (total - paid).abs() < 0.005,
            format!("The case's total fines are {total}, of which {paid} has been paid."),
        ),
        (total, paid) => {
            let mut reasoning = Vec::new();
            if total.is_none() {
                reasoning
                    .push("Total Fines is undefined, so we're not sure if this case has fines.");
            }
            if paid.is_none() {
                reasoning.push(
                    "Fines paid is undefined, so we're not sure if this case has any fines paid.",
                );
            }
            Decision::fact(name, false, reasoning.join(" "))
        }
    }
}

/// True when the charge is NOT an F1 conviction.
pub fn not_felony1(charge: &Charge) -> Decision {
    let name = "Is the charge not an F1 conviction?";
    let grade = charge.grade.trim();
    if !charge.is_conviction() {
        return Decision::fact(
            name,
            true,
            format!(
                "The charge was {}, but the disposition was {}",
                display_grade(grade),
                charge.disposition
            ),
        );
    }
    if grade.is_empty() {
        Decision::fact(
            name,
            false,
            "The charge's grade is unknown, so we don't know it's *not* an F1.",
        )
    } else if grade.starts_with("F1") {
        Decision::fact(name, false, "The charge is an F1 conviction")
    } else {
        Decision::fact(name, true, format!("The charge is {grade}, which is not F1"))
    }
}

fn display_grade(grade: &str) -> &str {
    if grade.is_empty() {
        "ungraded"
    } else {
        grade
    }
}

/// True when the charge is NOT a murder conviction.
pub fn not_murder(charge: &Charge) -> Decision {
    let name = "Is the charge NOT a murder conviction?";
    if !charge.is_conviction() {
        return Decision::fact(name, true, "Not a conviction.");
    }
    if charge.offense.trim().to_lowercase().starts_with("murder") {
        Decision::fact(name, false, "The charge was a murder conviction.")
    } else {
        Decision::fact(name, true, "Conviction for something other than murder.")
    }
}

/// 18 Pa.C.S. 9122.1(b)(2)(i): no F1 or murder convictions anywhere on the record.
pub fn no_f1_convictions(record: &CRecord) -> Decision {
    let children = record
        .charges()
        .map(|(_, charge)| {
            Decision::all_of(
                format!(
                    "Is the charge for {} neither an F1 nor a murder conviction?",
                    charge.offense
                ),
                vec![not_felony1(charge), not_murder(charge)],
            )
        })
        .collect();
    Decision::all_of("No F1 or murder convictions in the record?", children)
}

pub fn is_felony_conviction(charge: &Charge) -> Decision {
    let felony = charge.grade.trim().to_ascii_uppercase().starts_with('F');
    let children = vec![
        Decision::fact(
            "Is the charge a felony?",
            felony,
            format!("The charge's grade is {}", display_grade(charge.grade.trim())),
        ),
        super::expungement::is_conviction(charge),
    ];
    Decision::all_of(
        format!(
            "Was the charge [{}, {}, {}] a felony conviction?",
            charge.offense, charge.grade, charge.disposition
        ),
        children,
    )
}

/// True when the record has at least one felony conviction within `years` years.
pub fn any_felony_convictions_n_years(record: &CRecord, years: i32, today: NaiveDate) -> Decision {
    let window = Window::Years(years);
    let matching: Vec<Charge> = record
        .charges()
        .filter(|(case, charge)| {
            is_felony_conviction(charge).is_satisfied()
                && window.includes(years_since_disposition(case, charge, today))
        })
        .map(|(_, charge)| charge.clone())
        .collect();
    let value = !matching.is_empty();
    Decision::new(format!(
        "Were there any felony convictions within {years} years?"
    ))
    .with_reasoning(Reasoning::Charges(matching))
    .with_value(value)
}

/// 9122.1(a): sealing is for misdemeanors and ungraded offenses punishable by five years or less.
pub fn is_misdemeanor_or_ungraded(charge: &Charge) -> Decision {
    let name = "The offense is a misdemeanor or ungraded offense w/ a penalty of <= 5 years.";
    let grade = charge.grade.trim();
    if grade.starts_with('M') {
        Decision::fact(name, true, "Charge is a misdemeanor")
    } else if grade.is_empty() {
        Decision::fact(
            name,
            true,
            "Charge is ungraded. But be careful - we don't know the maximum penalty for the offense.",
        )
    } else {
        Decision::fact(name, false, "Charge is neither a misdemeanor nor ungraded.")
    }
}

/// True when `record` holds `offense_limit` or more convictions graded `grade_limit` or higher
/// within the last `years` years.
pub fn more_than_x_convictions_y_grade_z_years(
    record: &CRecord,
    offense_limit: usize,
    grade_limit: &str,
    years: i32,
    today: NaiveDate,
) -> Decision {
    let window = Window::Years(years);
    let matching: Vec<Charge> = record
        .charges()
        .filter(|(case, charge)| {
            charge.is_conviction()
                && grade_at_least(&charge.grade, grade_limit)
                && window.includes(years_since_disposition(case, charge, today))
        })
        .map(|(_, charge)| charge.clone())
        .collect();
    let value = matching.len() >= offense_limit;
    Decision::new(format!(
        "Does {}'s record contain {offense_limit} or more convictions, graded {grade_limit} or higher, within the last {years} years?",
        record.person.full_name()
    ))
    .with_reasoning(Reasoning::Charges(matching))
    .with_value(value)
}

/// 9122.1(b)(2)(ii)(B) and (b)(2)(iii)(A): fewer than `conviction_limit` convictions punishable
/// by two or more years within `within_years`. Grade stands in for the penalty.
pub fn offenses_punishable_by_two_or_more_years(
    record: &CRecord,
    conviction_limit: usize,
    within_years: i32,
    today: NaiveDate,
) -> Decision {
    let window = Window::Years(within_years);
    let mut matching = Vec::new();
    let mut unclassified = Vec::new();
    for (case, charge) in record.charges() {
        if !charge.is_conviction()
            || !window.strictly_includes(years_since_disposition(case, charge, today))
        {
            continue;
        }
        let grade = charge.grade.trim();
        if TWO_YEAR_PENALTY_PROXY_GRADES.contains(&grade) {
            matching.push(charge.clone());
        } else if grade_rank(grade).is_none() {
            unclassified.push(not_counted(
                charge,
                format!("The grade {grade} is not a known grade, so we can't tell the maximum penalty."),
            ));
        }
    }
    let value = matching.len() < conviction_limit;
    Decision::new(format!(
        "The record has fewer than {conviction_limit} convictions for offenses punishable by two or more years in the last {within_years} years."
    ))
    .with_reasoning(counted_convictions(matching, unclassified, value))
    .with_value(value)
}

/// Fewer than `conviction_limit` convictions under any of the chapter 18 `sections` within
/// `within_years`.
fn no_recent_conviction_for_sections(
    name: &str,
    record: &CRecord,
    sections: &[&str],
    conviction_limit: usize,
    within_years: i32,
    today: NaiveDate,
) -> Decision {
    let window = Window::Years(within_years);
    let mut matching = Vec::new();
    let mut unclassified = Vec::new();
    for (case, charge) in record.charges() {
        if !charge.is_conviction()
            || !window.strictly_includes(years_since_disposition(case, charge, today))
        {
            continue;
        }
        match charge.parsed_statute() {
            Some(statute) if sections.iter().any(|section| statute.is_section(18, section)) => {
                matching.push(charge.clone());
            }
            Some(_) => {}
            None => unclassified.push(not_counted(
                charge,
                format!(
                    "Couldn't read the statute {}, so we can't tell whether it is one of these offenses.",
                    charge.statute
                ),
            )),
        }
    }
    let value = matching.len() < conviction_limit;
    Decision::new(name)
        .with_reasoning(counted_convictions(matching, unclassified, value))
        .with_value(value)
}

/// A conviction a counting check could not classify and therefore left out of the count.
fn not_counted(charge: &Charge, detail: String) -> Decision {
    Decision::fact(
        format!("Conviction for {} ({}) was not counted", charge.offense, charge.grade),
        true,
        detail,
    )
}

/// Reasoning for a counting check. Plain charges when every conviction could be classified,
/// otherwise the counted charges followed by one note per conviction left out.
fn counted_convictions(
    matching: Vec<Charge>,
    unclassified: Vec<Decision>,
    value: bool,
) -> Reasoning {
    if unclassified.is_empty() {
        return Reasoning::Charges(matching);
    }
    let counted = Decision::new(format!("{} conviction(s) counted", matching.len()))
        .with_reasoning(Reasoning::Charges(matching))
        .with_value(value);
    Reasoning::Decisions(std::iter::once(counted).chain(unclassified).collect())
}

/// 9122.1(b)(2)(iii)(B)(I)
pub fn no_indecent_exposure(
    record: &CRecord,
    conviction_limit: usize,
    within_years: i32,
    today: NaiveDate,
) -> Decision {
    no_recent_conviction_for_sections(
        "No indecent exposure convictions in this record.",
        record,
        &["3127"],
        conviction_limit,
        within_years,
        today,
    )
}

/// 9122.1(b)(2)(iii)(B)(II)
pub fn no_sexual_intercourse_w_animal(
    record: &CRecord,
    conviction_limit: usize,
    within_years: i32,
    today: NaiveDate,
) -> Decision {
    no_recent_conviction_for_sections(
        "No intercourse with animals convictions in this record.",
        record,
        &["3129"],
        conviction_limit,
        within_years,
        today,
    )
}

/// 9122.1(b)(2)(iii)(B)(III)
pub fn no_failure_to_register(
    record: &CRecord,
    conviction_limit: usize,
    within_years: i32,
    today: NaiveDate,
) -> Decision {
    no_recent_conviction_for_sections(
        "No failure-to-register convictions in this record.",
        record,
        &["4915.1", "4915.2"],
        conviction_limit,
        within_years,
        today,
    )
}

/// 9122.1(b)(2)(iii)(B)(IV)
pub fn no_weapons_of_escape(
    record: &CRecord,
    conviction_limit: usize,
    within_years: i32,
    today: NaiveDate,
) -> Decision {
    no_recent_conviction_for_sections(
        "No possession-of-implement-of-escape convictions in this record.",
        record,
        &["5122"],
        conviction_limit,
        within_years,
        today,
    )
}

/// 9122.1(b)(2)(iii)(B)(V)
pub fn no_abuse_of_corpse(
    record: &CRecord,
    conviction_limit: usize,
    within_years: i32,
    today: NaiveDate,
) -> Decision {
    no_recent_conviction_for_sections(
        "No abuse of corpse convictions in this record.",
        record,
        &["5510"],
        conviction_limit,
        within_years,
        today,
    )
}

/// 9122.1(b)(2)(iii)(B)(VI)
pub fn no_paramilitary_training(
    record: &CRecord,
    conviction_limit: usize,
    within_years: i32,
    today: NaiveDate,
) -> Decision {
    no_recent_conviction_for_sections(
        "No paramilitary training offenses in this record.",
        record,
        &["5515"],
        conviction_limit,
        within_years,
        today,
    )
}

/// Requirements the record as a whole must meet before any case or charge can be sealed by
/// petition.
pub fn full_record_requirements_for_petition_sealing(
    record: &CRecord,
    today: NaiveDate,
) -> Decision {
    Decision::all_of(
        "Sealing requirements that relate to the whole record.",
        vec![
            ten_years_since_last_conviction(record, today),
            no_f1_convictions(record),
            no_danger_to_person_offense_for_record(record, &RECORD_LEVEL_LIMITS, today),
            no_offense_against_family_for_record(record, &RECORD_LEVEL_LIMITS, today),
            no_firearms_offense_for_record(record, &RECORD_LEVEL_LIMITS, today),
            no_sexual_offense_for_record(record, &RECORD_LEVEL_LIMITS, today),
            offenses_punishable_by_two_or_more_years(record, 4, 20, today),
            offenses_punishable_by_two_or_more_years(record, 2, 15, today),
            no_indecent_exposure(record, 1, 15, today),
            no_sexual_intercourse_w_animal(record, 1, 15, today),
            no_failure_to_register(record, 1, 15, today),
            no_weapons_of_escape(record, 1, 15, today),
            no_abuse_of_corpse(record, 1, 15, today),
            no_paramilitary_training(record, 1, 15, today),
        ],
    )
}

/// Whether a single charge can be sealed, judged on the charge alone (9122.1(b)(1)).
pub fn petition_sealing_for_single_charge(charge: &Charge) -> Decision {
    let children = vec![
        is_misdemeanor_or_ungraded(charge),
        no_danger_to_person_offense_for_charge(charge, &CHARGE_LEVEL_LIMITS),
        no_offense_against_family_for_charge(charge, &CHARGE_LEVEL_LIMITS),
        no_firearms_offense_for_charge(charge, &CHARGE_LEVEL_LIMITS),
        no_sexual_offense_for_charge(charge, &CHARGE_LEVEL_LIMITS),
        no_corruption_of_minors_offense(charge, &CHARGE_LEVEL_LIMITS),
    ];
    let sealability = if children.iter().all(Decision::is_satisfied) {
        Sealability::Sealable
    } else {
        Sealability::NotSealable
    };
    Decision::all_of(format!("Sealing charge {}", charge.offense), children)
        .with_value(DecisionValue::Sealability(sealability))
}

/// Splits `case` into the charges that can and cannot be sealed, ignoring record-level
/// requirements. The value is a [`CaseSlice`].
pub fn petition_sealing_for_single_case(case: &Case) -> Decision {
    let (decision, slice) = slice_case_for_sealing(case);
    decision.with_value(DecisionValue::CaseSlice(slice))
}

pub(crate) fn slice_case_for_sealing(case: &Case) -> (Decision, CaseSlice) {
    let mut decision = Decision::new(format!("Sealing case {}", case.docket_number));
    decision.push(fines_and_costs_paid(case));

    let mut sealable = case.partial_copy();
    let mut unsealable = case.partial_copy();
    for charge in &case.charges {
        let charge_decision = petition_sealing_for_single_charge(charge);
        if charge_decision.is_satisfied() {
            sealable.charges.push(charge.clone());
        } else {
            unsealable.charges.push(charge.clone());
        }
        decision.push(charge_decision);
    }

    let slice = CaseSlice {
        unsealable: (!unsealable.charges.is_empty()).then_some(unsealable),
        sealable: (!sealable.charges.is_empty()).then_some(sealable),
    };
    (decision, slice)
}
