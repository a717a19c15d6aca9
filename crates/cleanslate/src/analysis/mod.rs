//! Applies petition rules to a record one after another.
//!
//! Each rule sees only what earlier rules left unaddressed, so the order of application
//! decides which remedy a charge receives. [`Analysis::standard`] uses the preferred order.

pub mod decision;
pub mod ruledefs;
mod summary;

#[cfg(test)]
mod tests;

pub use decision::{
    CaseSealability, CaseSlice, Decision, DecisionValue, Reasoning, Sealability,
};
pub use ruledefs::PetitionRule;
pub use summary::{
    fees_owed, AnalysisSummary, FeesLookupError, FinesBlockedCharge, WaitingPeriodNote,
};

use crate::crecord::CRecord;
use crate::petitions::Petition;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Rules applied by [`Analysis::standard`], in order.
pub const STANDARD_RULES: [PetitionRule; 5] = [
    ruledefs::expunge_deceased,
    ruledefs::expunge_over_70,
    ruledefs::expunge_nonconvictions,
    ruledefs::expunge_summary_convictions,
    ruledefs::seal_convictions,
];

/// The original record, what is left of it, and one decision per applied rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub record: CRecord,
    pub remaining_record: CRecord,
    pub decisions: Vec<Decision>,
    pub as_of: NaiveDate,
}

impl Analysis {
    pub fn new(record: CRecord, as_of: NaiveDate) -> Self {
        Self {
            remaining_record: record.clone(),
            record,
            decisions: Vec::new(),
            as_of,
        }
    }

    /// Runs `rule` against the remaining record, keeping its decision and replacing the
    /// remaining record with what the rule left behind.
    pub fn apply<R>(mut self, rule: R) -> Self
    where
        R: FnOnce(&CRecord, NaiveDate) -> (CRecord, Decision),
    {
        let (remaining, decision) = rule(&self.remaining_record, self.as_of);
        debug!(
            rule = %decision.name,
            petitions = decision.petitions().len(),
            remaining_cases = remaining.cases.len(),
            "applied rule"
        );
        self.remaining_record = remaining;
        self.decisions.push(decision);
        self
    }

    /// Applies [`STANDARD_RULES`] in order.
    pub fn standard(record: CRecord, as_of: NaiveDate) -> Self {
        let analysis = STANDARD_RULES
            .iter()
            .fold(Self::new(record, as_of), |analysis, rule| analysis.apply(*rule));
        info!(
            client = %analysis.record.person.full_name(),
            %as_of,
            petitions = analysis.petitions().count(),
            remaining_charges = analysis.remaining_record.charge_count(),
            "analysis complete"
        );
        analysis
    }

    /// Every petition produced so far, in rule order.
    pub fn petitions(&self) -> impl Iterator<Item = &Petition> {
        self.decisions
            .iter()
            .flat_map(|decision| decision.petitions().iter())
    }

    pub fn explain(&self) -> String {
        self.decisions.iter().map(Decision::explain).collect()
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary::from_analysis(self)
    }
}
