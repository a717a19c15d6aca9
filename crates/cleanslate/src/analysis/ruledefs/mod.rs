//! Eligibility rules under Pennsylvania's expungement and sealing statutes.
//!
//! `expungement` and `sealing` hold single predicates, each returning a [`Decision`].
//! `petition_rules` combines them into rules that produce petitions.
//!
//! [`Decision`]: crate::analysis::decision::Decision

pub mod expungement;
pub mod petition_rules;
pub mod sealing;

pub use petition_rules::{
    expunge_deceased, expunge_nonconvictions, expunge_over_70, expunge_summary_convictions,
    seal_convictions, PetitionRule,
};
