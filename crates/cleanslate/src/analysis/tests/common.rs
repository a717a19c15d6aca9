use chrono::NaiveDate;

use crate::crecord::{CRecord, Case, Charge, Person};
use crate::petitions::Petition;

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Fixed evaluation date for every analysis test.
pub(super) fn today() -> NaiveDate {
    date(2024, 6, 1)
}

pub(super) fn client() -> Person {
    Person::new("Jordan", "Rivera").born(date(1980, 3, 15))
}

pub(super) fn charge(offense: &str, grade: &str, statute: &str, disposition: &str) -> Charge {
    Charge::new(offense, grade, statute, disposition)
}

pub(super) fn disposed(charge: Charge, on: NaiveDate) -> Charge {
    charge.with_disposition_date(on)
}

/// A record touching every rule: nonconvictions, a summary conviction, sealable and
/// unsealable misdemeanors, and an old felony.
pub(super) fn mixed_record() -> CRecord {
    let old = date(2008, 5, 1);
    let theft = charge("Theft by Unlawful Taking", "M1", "18 § 3921 §§ A", "Guilty Plea");
    let receiving = charge("Receiving Stolen Property", "M1", "18 § 3925 §§ A", "Nolle Prossed");
    let corruption = charge("Corruption of Minors", "M1", "18 § 6301 §§ A1", "Guilty");
    let disorderly = charge("Disorderly Conduct", "S", "18 § 5503 §§ A4", "Guilty");
    let burglary = charge("Burglary", "F2", "18 § 3502", "Guilty");
    let trespass = charge("Criminal Trespass", "F3", "18 § 3503 §§ A1ii", "Withdrawn");

    CRecord::with_cases(
        client(),
        vec![
            Case::new("CP-51-CR-0000100-2008", "Philadelphia")
                .arrested_on(date(2008, 1, 10))
                .with_fines(Some(300.0), Some(300.0))
                .with_charge(disposed(theft, old))
                .with_charge(disposed(receiving, old))
                .with_charge(disposed(corruption, old)),
            Case::new("MC-51-SU-0000200-2010", "Philadelphia")
                .arrested_on(date(2010, 7, 4))
                .with_fines(Some(50.0), Some(50.0))
                .with_charge(disposed(disorderly, date(2010, 9, 1))),
            Case::new("CP-02-CR-0000300-2006", "Allegheny")
                .arrested_on(date(2006, 2, 2))
                .with_fines(Some(0.0), Some(0.0))
                .with_charge(disposed(burglary, date(2006, 11, 1)))
                .with_charge(disposed(trespass, date(2006, 11, 1))),
        ],
    )
}

pub(super) fn petition_charges(petitions: &[Petition]) -> Vec<Charge> {
    petitions
        .iter()
        .flat_map(|petition| petition.cases())
        .flat_map(|case| case.charges.iter().cloned())
        .collect()
}

/// True when `left` and `right` hold the same charges, counting duplicates.
pub(super) fn same_charges(mut left: Vec<Charge>, right: Vec<Charge>) -> bool {
    if left.len() != right.len() {
        return false;
    }
    for charge in right {
        match left.iter().position(|candidate| *candidate == charge) {
            Some(index) => {
                left.swap_remove(index);
            }
            None => return false,
        }
    }
    left.is_empty()
}
