use super::dates::{lenient_date, whole_years_between};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The person whose record is being screened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_of_death: Option<NaiveDate>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub ssn: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: None,
            date_of_death: None,
            aliases: Vec::new(),
            ssn: None,
            address: None,
        }
    }

    pub fn born(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub fn died(mut self, date_of_death: NaiveDate) -> Self {
        self.date_of_death = Some(date_of_death);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Age in whole years on `today`, or `None` when the date of birth is unknown.
    pub fn age(&self, today: NaiveDate) -> Option<i32> {
        self.date_of_birth
            .map(|born| whole_years_between(born, today))
    }

    /// Whole years since death, or `None` for a person not known to have died.
    pub fn years_dead(&self, today: NaiveDate) -> Option<i32> {
        self.date_of_death
            .map(|died| whole_years_between(died, today))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line_one: String,
    pub city_state_zip: String,
}
