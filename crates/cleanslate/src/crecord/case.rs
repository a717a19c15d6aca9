use super::charge::Charge;
use super::dates::{lenient_date, whole_years_between};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single docket and the charges brought on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub docket_number: String,
    #[serde(default)]
    pub otn: Option<String>,
    #[serde(default)]
    pub dc: Option<String>,
    #[serde(default)]
    pub county: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub charges: Vec<Charge>,
    /// Fines and costs assessed. `None` means unknown, which is not the same as zero.
    #[serde(default)]
    pub total_fines: Option<f64>,
    #[serde(default)]
    pub fines_paid: Option<f64>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub arrest_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub complaint_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub disposition_date: Option<NaiveDate>,
    #[serde(default)]
    pub judge: Option<String>,
    #[serde(default)]
    pub affiant: Option<String>,
    #[serde(default)]
    pub arresting_agency: Option<String>,
}

impl Case {
    pub fn new(docket_number: impl Into<String>, county: impl Into<String>) -> Self {
        Self {
            docket_number: docket_number.into(),
            otn: None,
            dc: None,
            county: county.into(),
            status: String::new(),
            charges: Vec::new(),
            total_fines: None,
            fines_paid: None,
            arrest_date: None,
            complaint_date: None,
            disposition_date: None,
            judge: None,
            affiant: None,
            arresting_agency: None,
        }
    }

    pub fn with_charge(mut self, charge: Charge) -> Self {
        self.charges.push(charge);
        self
    }

    pub fn with_fines(mut self, total_fines: Option<f64>, fines_paid: Option<f64>) -> Self {
        self.total_fines = total_fines;
        self.fines_paid = fines_paid;
        self
    }

    pub fn arrested_on(mut self, date: NaiveDate) -> Self {
        self.arrest_date = Some(date);
        self
    }

    pub fn disposed_on(mut self, date: NaiveDate) -> Self {
        self.disposition_date = Some(date);
        self
    }

    /// Copy of this case with every field except its charges.
    pub fn partial_copy(&self) -> Case {
        Case {
            docket_number: self.docket_number.clone(),
            otn: self.otn.clone(),
            dc: self.dc.clone(),
            county: self.county.clone(),
            status: self.status.clone(),
            charges: Vec::new(),
            total_fines: self.total_fines,
            fines_paid: self.fines_paid,
            arrest_date: self.arrest_date,
            complaint_date: self.complaint_date,
            disposition_date: self.disposition_date,
            judge: self.judge.clone(),
            affiant: self.affiant.clone(),
            arresting_agency: self.arresting_agency.clone(),
        }
    }

    /// Case disposition date, or the latest charge disposition date when the case has none.
    pub fn effective_disposition_date(&self) -> Option<NaiveDate> {
        self.disposition_date.or_else(|| {
            self.charges
                .iter()
                .filter_map(|charge| charge.disposition_date)
                .max()
        })
    }

    /// Whole years since disposition, or `None` when no disposition date is known.
    pub fn years_passed_disposition(&self, today: NaiveDate) -> Option<i32> {
        self.effective_disposition_date()
            .map(|disposed| whole_years_between(disposed, today))
    }

    /// Latest arrest, complaint or disposition date on the case.
    pub fn last_action(&self) -> Option<NaiveDate> {
        [
            self.arrest_date,
            self.complaint_date,
            self.effective_disposition_date(),
        ]
        .into_iter()
        .flatten()
        .max()
    }

    /// Latest date on which a sentence on this case is complete. Falls back to the disposition
    /// date when no sentence carries a usable length.
    pub fn end_of_sentence(&self) -> Option<NaiveDate> {
        self.charges
            .iter()
            .filter_map(Charge::sentence_complete_date)
            .max()
            .or_else(|| self.effective_disposition_date())
    }

    /// Unpaid fines and costs, treating unknown amounts as zero.
    pub fn fines_owed(&self) -> f64 {
        self.total_fines.unwrap_or(0.0) - self.fines_paid.unwrap_or(0.0)
    }
}
