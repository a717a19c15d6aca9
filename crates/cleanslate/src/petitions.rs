//! Petitions the analysis recommends filing.

use crate::crecord::{Case, Person};
use serde::{Deserialize, Serialize};

/// Whether an expungement clears every charge on its cases or only some of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpungementType {
    #[serde(rename = "Full Expungement")]
    Full,
    #[serde(rename = "Partial Expungement")]
    Partial,
}

impl ExpungementType {
    /// Full when every charge of the original case is covered.
    pub fn for_coverage(covered: usize, total: usize) -> Self {
        if covered == total {
            ExpungementType::Full
        } else {
            ExpungementType::Partial
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpungementType::Full => "Full Expungement",
            ExpungementType::Partial => "Partial Expungement",
        }
    }
}

/// Rule of criminal procedure an expungement is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpungementProcedure {
    /// Pa.R.Crim.P. 490, summary offenses.
    #[serde(rename = "§ 490")]
    Summary,
    /// Pa.R.Crim.P. 790, everything else.
    #[serde(rename = "§ 790")]
    NonSummary,
}

impl ExpungementProcedure {
    pub fn label(&self) -> &'static str {
        match self {
            ExpungementProcedure::Summary => "§ 490",
            ExpungementProcedure::NonSummary => "§ 790",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expungement {
    pub client: Person,
    pub cases: Vec<Case>,
    pub expungement_type: ExpungementType,
    pub procedure: ExpungementProcedure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_expungement_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sealing {
    pub client: Person,
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "petition_type")]
pub enum Petition {
    Expungement(Expungement),
    Sealing(Sealing),
}

impl Petition {
    pub fn client(&self) -> &Person {
        match self {
            Petition::Expungement(petition) => &petition.client,
            Petition::Sealing(petition) => &petition.client,
        }
    }

    pub fn cases(&self) -> &[Case] {
        match self {
            Petition::Expungement(petition) => &petition.cases,
            Petition::Sealing(petition) => &petition.cases,
        }
    }

    /// Only expungements carry a type.
    pub fn expungement_type(&self) -> Option<ExpungementType> {
        match self {
            Petition::Expungement(petition) => Some(petition.expungement_type),
            Petition::Sealing(_) => None,
        }
    }

    pub fn procedure(&self) -> Option<ExpungementProcedure> {
        match self {
            Petition::Expungement(petition) => Some(petition.procedure),
            Petition::Sealing(_) => None,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Petition::Expungement(_) => "Expungement",
            Petition::Sealing(_) => "Sealing",
        }
    }

    pub fn charge_count(&self) -> usize {
        self.cases().iter().map(|case| case.charges.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crecord::Charge;

    #[test]
    fn accessors_expose_client_cases_and_type() {
        let client = Person::new("Jane", "Doe");
        let case = Case::new("CP-1", "Erie")
            .with_charge(Charge::new("Theft", "M1", "18 § 3921", "Not Guilty"));
        let petition = Petition::Expungement(Expungement {
            client: client.clone(),
            cases: vec![case.clone()],
            expungement_type: ExpungementType::for_coverage(1, 1),
            procedure: ExpungementProcedure::NonSummary,
            summary_expungement_language: None,
        });

        assert_eq!(petition.client(), &client);
        assert_eq!(petition.cases(), &[case.clone()]);
        assert_eq!(petition.expungement_type(), Some(ExpungementType::Full));
        assert_eq!(petition.charge_count(), 1);

        let sealing = Petition::Sealing(Sealing {
            client,
            cases: vec![case],
        });
        assert_eq!(sealing.expungement_type(), None);
        assert_eq!(sealing.kind_label(), "Sealing");
    }

    #[test]
    fn coverage_decides_full_or_partial() {
        assert_eq!(ExpungementType::for_coverage(2, 2), ExpungementType::Full);
        assert_eq!(ExpungementType::for_coverage(1, 2), ExpungementType::Partial);
    }
}
