//! Single-fact predicates for expungement under 18 Pa.C.S. 9122.

use crate::analysis::decision::Decision;
use crate::crecord::{CRecord, Charge, Elapsed, Person};
use chrono::NaiveDate;

/// Years a record must be arrest and prosecution free before summary convictions can be expunged.
pub const ARREST_FREE_DEFAULT_YEARS: i32 = 5;

pub fn is_over_age(person: &Person, age_limit: i32, today: NaiveDate) -> Decision {
    let name = format!("Is {} over {age_limit}?", person.first_name);
    match person.age(today) {
        Some(age) => Decision::fact(name, age > age_limit, format!("{} is {age}", person.first_name)),
        None => Decision::fact(
            name,
            false,
            format!(
                "{}'s date of birth is unknown, so we cannot tell their age.",
                person.first_name
            ),
        ),
    }
}

/// Free of arrest or prosecution for at least `year_min` years.
pub fn years_since_last_contact(record: &CRecord, year_min: i32, today: NaiveDate) -> Decision {
    let elapsed = record.years_since_last_arrested_or_prosecuted(today);
    Decision::fact(
        format!(
            "Has {} been free of arrest or prosecution for {year_min} years?",
            record.person.first_name
        ),
        elapsed.satisfies(|years| years >= year_min),
        contact_reasoning(&elapsed, "the last arrest or prosecution"),
    )
}

/// More than `year_min` years since the final release from confinement or supervision.
pub fn years_since_final_release(record: &CRecord, year_min: i32, today: NaiveDate) -> Decision {
    let elapsed = record.years_since_final_release(today);
    Decision::fact(
        format!(
            "Has it been at least {year_min} years since {}'s final release from custody?",
            record.person.first_name
        ),
        elapsed.satisfies(|years| years > year_min),
        contact_reasoning(&elapsed, "the final release from custody"),
    )
}

/// More than `year_min` years without an arrest or prosecution.
pub fn arrest_free_for_n_years(record: &CRecord, year_min: i32, today: NaiveDate) -> Decision {
    let elapsed = record.years_since_last_arrested_or_prosecuted(today);
    Decision::fact(
        format!(
            "Has {} been arrest free and prosecution free for {year_min} years?",
            record.person.first_name
        ),
        elapsed.satisfies(|years| years > year_min),
        contact_reasoning(&elapsed, "the last arrest or prosecution"),
    )
}

fn contact_reasoning(elapsed: &Elapsed, event: &str) -> String {
    match elapsed {
        Elapsed::Years(_) => format!("It has been {elapsed} since {event}."),
        Elapsed::NoEvents => "There are no cases on the record.".to_string(),
        Elapsed::Undated { known, dockets } => {
            let mut reasoning = format!(
                "No usable date on {}, so we cannot tell how long since {event}.",
                dockets.join(", ")
            );
            if let Some(years) = known {
                reasoning.push_str(&format!(" The other cases are at least {years} years old."));
            }
            reasoning
        }
    }
}

pub fn is_summary(charge: &Charge) -> Decision {
    let grade = charge.grade.trim();
    Decision::fact(
        format!("Is this charge for {} a summary?", charge.offense),
        grade == "S",
        format!("The charge's grade is {grade}"),
    )
}

pub fn is_conviction(charge: &Charge) -> Decision {
    let convicted = charge.is_conviction();
    let reasoning = if convicted {
        format!(
            "The charge's disposition {} indicates a conviction",
            charge.disposition
        )
    } else {
        format!(
            "The charge's disposition {} indicates it's not a conviction.",
            charge.disposition
        )
    };
    Decision::fact(
        format!("Is this charge for {} a conviction?", charge.offense),
        convicted,
        reasoning,
    )
}

pub fn is_summary_conviction(charge: &Charge) -> Decision {
    let children = vec![is_summary(charge), is_conviction(charge)];
    let value = children.iter().all(Decision::is_satisfied);
    Decision::all_of(
        format!("Is this charge for {} a summary conviction?", charge.offense),
        children,
    )
    .with_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::decision::Reasoning;
    use crate::crecord::Case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    /// One case whose last arrest and final release were exactly `years` before today.
    fn record_last_touched(years: i32) -> CRecord {
        let on = date(2024 - years, 6, 1);
        CRecord::with_cases(
            Person::new("Ruth", "Doe"),
            vec![Case::new("CP-1", "Erie")
                .arrested_on(on)
                .disposed_on(on)
                .with_charge(Charge::new("Theft", "M1", "18 § 3921", "Guilty"))],
        )
    }

    #[test]
    fn last_contact_includes_the_boundary_year() {
        assert!(years_since_last_contact(&record_last_touched(10), 10, today()).is_satisfied());
        assert!(!years_since_last_contact(&record_last_touched(9), 10, today()).is_satisfied());
    }

    #[test]
    fn final_release_excludes_the_boundary_year() {
        assert!(!years_since_final_release(&record_last_touched(10), 10, today()).is_satisfied());
        assert!(years_since_final_release(&record_last_touched(11), 10, today()).is_satisfied());
    }

    #[test]
    fn arrest_free_excludes_the_boundary_year() {
        let exactly = arrest_free_for_n_years(&record_last_touched(5), 5, today());
        assert!(!exactly.is_satisfied());
        assert_eq!(
            exactly.reasoning,
            Reasoning::Text("It has been 5 years since the last arrest or prosecution.".to_string())
        );
        assert!(arrest_free_for_n_years(&record_last_touched(6), 5, today()).is_satisfied());
    }

    #[test]
    fn seventy_is_not_over_seventy() {
        let seventy = Person::new("Ruth", "Doe").born(date(1954, 6, 1));
        assert!(!is_over_age(&seventy, 70, today()).is_satisfied());
        let older = Person::new("Ruth", "Doe").born(date(1954, 5, 31));
        assert!(!is_over_age(&older, 70, today()).is_satisfied());
        let seventy_one = Person::new("Ruth", "Doe").born(date(1953, 6, 1));
        assert!(is_over_age(&seventy_one, 70, today()).is_satisfied());
        assert!(!is_over_age(&Person::new("Ruth", "Doe"), 70, today()).is_satisfied());
    }

    #[test]
    fn empty_record_has_no_contact() {
        let record = CRecord::new(Person::new("Ruth", "Doe"));
        let decision = years_since_last_contact(&record, 10, today());
        assert!(decision.is_satisfied());
        assert_eq!(
            decision.reasoning,
            Reasoning::Text("There are no cases on the record.".to_string())
        );
    }

    #[test]
    fn undated_case_fails_contact_checks_and_is_named() {
        let mut record = record_last_touched(30);
        record.cases.push(
            Case::new("CP-UNDATED", "Erie")
                .with_charge(Charge::new("Robbery", "F1", "18 § 3701", "Guilty")),
        );

        let contact = years_since_last_contact(&record, 10, today());
        assert!(!contact.is_satisfied());
        assert_eq!(
            contact.reasoning,
            Reasoning::Text(
                "No usable date on CP-UNDATED, so we cannot tell how long since the last \
                 arrest or prosecution. The other cases are at least 30 years old."
                    .to_string()
            )
        );
        assert!(!years_since_final_release(&record, 10, today()).is_satisfied());
        assert!(!arrest_free_for_n_years(&record, 5, today()).is_satisfied());
    }
}
