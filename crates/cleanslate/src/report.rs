//! Flat CSV export of recommended petitions, one row per charge.

use crate::petitions::Petition;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write petitions CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to create petitions file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetitionRow {
    #[serde(rename = "Petition")]
    pub kind: &'static str,
    #[serde(rename = "Type")]
    pub expungement_type: &'static str,
    #[serde(rename = "Procedure")]
    pub procedure: &'static str,
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Docket Number")]
    pub docket_number: String,
    #[serde(rename = "County")]
    pub county: String,
    #[serde(rename = "Offense")]
    pub offense: String,
    #[serde(rename = "Grade")]
    pub grade: String,
    #[serde(rename = "Statute")]
    pub statute: String,
    #[serde(rename = "Disposition")]
    pub disposition: String,
}

/// Flattens petitions into rows. Sealings leave type and procedure blank.
pub fn petition_rows<'a>(petitions: impl IntoIterator<Item = &'a Petition>) -> Vec<PetitionRow> {
    petitions
        .into_iter()
        .flat_map(|petition| {
            let client = petition.client().full_name();
            petition.cases().iter().flat_map(move |case| {
                let client = client.clone();
                case.charges.iter().map(move |charge| PetitionRow {
                    kind: petition.kind_label(),
                    expungement_type: petition
                        .expungement_type()
                        .map(|kind| kind.label())
                        .unwrap_or(""),
                    procedure: petition
                        .procedure()
                        .map(|procedure| procedure.label())
                        .unwrap_or(""),
                    client: client.clone(),
                    docket_number: case.docket_number.clone(),
                    county: case.county.clone(),
                    offense: charge.offense.clone(),
                    grade: charge.grade.clone(),
                    statute: charge.statute.clone(),
                    disposition: charge.disposition.clone(),
                })
            })
        })
        .collect()
}

pub fn write_petitions<'a, W: Write>(
    writer: W,
    petitions: impl IntoIterator<Item = &'a Petition>,
) -> Result<usize, ReportError> {
    let rows = petition_rows(petitions);
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

pub fn write_petitions_to_path<'a, P: AsRef<Path>>(
    path: P,
    petitions: impl IntoIterator<Item = &'a Petition>,
) -> Result<usize, ReportError> {
    let file = std::fs::File::create(path)?;
    write_petitions(std::io::BufWriter::new(file), petitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crecord::{Case, Charge, Person};
    use crate::petitions::{Expungement, ExpungementProcedure, ExpungementType, Sealing};

    fn petitions() -> Vec<Petition> {
        let client = Person::new("Jane", "Doe");
        let case = Case::new("CP-51-CR-0000001-2010", "Philadelphia")
            .with_charge(Charge::new("Theft", "M2", "18 § 3921", "Guilty"))
            .with_charge(Charge::new("Receiving", "M2", "18 § 3925", "Guilty"));
        vec![
            Petition::Expungement(Expungement {
                client: client.clone(),
                cases: vec![Case::new("MC-1", "Erie").with_charge(Charge::new(
                    "Disorderly Conduct",
                    "S",
                    "18 § 5503",
                    "Guilty",
                ))],
                expungement_type: ExpungementType::Full,
                procedure: ExpungementProcedure::Summary,
                summary_expungement_language: None,
            }),
            Petition::Sealing(Sealing {
                client,
                cases: vec![case],
            }),
        ]
    }

    #[test]
    fn one_row_per_charge() {
        let petitions = petitions();
        let rows = petition_rows(&petitions);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].procedure, "§ 490");
        assert_eq!(rows[0].expungement_type, "Full Expungement");
        assert_eq!(rows[1].kind, "Sealing");
        assert_eq!(rows[1].expungement_type, "");
        assert_eq!(rows[2].offense, "Receiving");
    }

    #[test]
    fn writes_header_and_rows() {
        let petitions = petitions();
        let mut buffer = Vec::new();
        let written = write_petitions(&mut buffer, &petitions).expect("csv written");
        assert_eq!(written, 3);

        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Petition,Type,Procedure,Client,Docket Number,County,Offense,Grade,Statute,Disposition")
        );
        assert_eq!(
            lines.next(),
            Some("Expungement,Full Expungement,§ 490,Jane Doe,MC-1,Erie,Disorderly Conduct,S,18 § 5503,Guilty")
        );
        assert_eq!(text.lines().count(), 4);
    }
}
