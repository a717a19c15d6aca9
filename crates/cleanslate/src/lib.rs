//! Screening engine for Pennsylvania criminal record relief.
//!
//! A [`CRecord`] is threaded through petition rules by an [`Analysis`]. Each rule answers
//! with a [`Decision`] tree explaining its verdict, the petitions it recommends, and the part
//! of the record it left for later rules.

pub mod analysis;
pub mod config;
pub mod crecord;
pub mod error;
pub mod petitions;
pub mod report;
pub mod telemetry;

pub use analysis::{Analysis, AnalysisSummary, Decision};
pub use crecord::{CRecord, Case, Charge, Person};
pub use petitions::Petition;
