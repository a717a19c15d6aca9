use crate::crecord::{Case, Charge};
use crate::petitions::Petition;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A node in the proof tree that explains an eligibility verdict.
///
/// `value` carries the verdict. When it is absent and the reasoning is a list of child
/// decisions, the verdict is the logical AND of the children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<DecisionValue>,
    pub reasoning: Reasoning,
}

/// What a decision concluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionValue {
    Bool(bool),
    Petitions(Vec<Petition>),
    Sealability(Sealability),
    CaseSealability(CaseSealability),
    CaseSlice(CaseSlice),
}

impl DecisionValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            DecisionValue::Bool(value) => *value,
            DecisionValue::Petitions(petitions) => !petitions.is_empty(),
            DecisionValue::Sealability(sealability) => *sealability == Sealability::Sealable,
            DecisionValue::CaseSealability(sealability) => {
                *sealability != CaseSealability::NoChargesSealable
            }
            DecisionValue::CaseSlice(slice) => slice.sealable.is_some(),
        }
    }
}

impl From<bool> for DecisionValue {
    fn from(value: bool) -> Self {
        DecisionValue::Bool(value)
    }
}

/// Why a decision concluded what it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reasoning {
    Text(String),
    Decisions(Vec<Decision>),
    /// The charges that triggered a record-level rule.
    Charges(Vec<Charge>),
}

impl Default for Reasoning {
    fn default() -> Self {
        Reasoning::Decisions(Vec::new())
    }
}

/// Verdict on a single charge under petition sealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sealability {
    #[serde(rename = "Sealable")]
    Sealable,
    #[serde(rename = "Not sealable")]
    NotSealable,
}

/// Verdict on a whole case under petition sealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseSealability {
    #[serde(rename = "All charges sealable")]
    AllChargesSealable,
    #[serde(rename = "Some charges sealable")]
    SomeChargesSealable,
    #[serde(rename = "No charges sealable")]
    NoChargesSealable,
}

/// A case split into the charges that cannot be sealed and the charges that can.
/// A half is `None` when it would hold no charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSlice {
    pub unsealable: Option<Case>,
    pub sealable: Option<Case>,
}

impl Decision {
    /// A decision with no verdict yet and an empty list of child decisions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            reasoning: Reasoning::default(),
        }
    }

    /// A single boolean fact with a textual explanation.
    pub fn fact(name: impl Into<String>, value: bool, reasoning: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(DecisionValue::Bool(value)),
            reasoning: Reasoning::Text(reasoning.into()),
        }
    }

    /// A decision whose verdict is the AND of `children`.
    pub fn all_of(name: impl Into<String>, children: Vec<Decision>) -> Self {
        Self {
            name: name.into(),
            value: None,
            reasoning: Reasoning::Decisions(children),
        }
    }

    pub fn with_value(mut self, value: impl Into<DecisionValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_reasoning(mut self, reasoning: Reasoning) -> Self {
        self.reasoning = reasoning;
        self
    }

    /// Appends a child decision. A text or charge-list reasoning is replaced by the child list.
    pub fn push(&mut self, child: Decision) {
        match &mut self.reasoning {
            Reasoning::Decisions(children) => children.push(child),
            other => *other = Reasoning::Decisions(vec![child]),
        }
    }

    /// Boolean reading of the decision.
    pub fn is_satisfied(&self) -> bool {
        match &self.value {
            Some(value) => value.is_truthy(),
            None => match &self.reasoning {
                Reasoning::Decisions(children) => children.iter().all(Decision::is_satisfied),
                Reasoning::Text(_) | Reasoning::Charges(_) => false,
            },
        }
    }

    pub fn children(&self) -> &[Decision] {
        match &self.reasoning {
            Reasoning::Decisions(children) => children,
            Reasoning::Text(_) | Reasoning::Charges(_) => &[],
        }
    }

    /// Petitions carried by this decision, empty for decisions of other kinds.
    pub fn petitions(&self) -> &[Petition] {
        match &self.value {
            Some(DecisionValue::Petitions(petitions)) => petitions,
            _ => &[],
        }
    }

    pub fn case_slice(&self) -> Option<&CaseSlice> {
        match &self.value {
            Some(DecisionValue::CaseSlice(slice)) => Some(slice),
            _ => None,
        }
    }

    /// Indented, human-readable rendering of the whole tree.
    pub fn explain(&self) -> String {
        let mut out = String::new();
        self.write_explanation(&mut out, 0);
        out
    }

    fn write_explanation(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = writeln!(out, "{indent}- {} [{}]", self.name, self.verdict_label());
        match &self.reasoning {
            Reasoning::Text(text) if !text.is_empty() => {
                let _ = writeln!(out, "{indent}    {text}");
            }
            Reasoning::Text(_) => {}
            Reasoning::Decisions(children) => {
                for child in children {
                    child.write_explanation(out, depth + 1);
                }
            }
            Reasoning::Charges(charges) => {
                for charge in charges {
                    let _ = writeln!(
                        out,
                        "{indent}    * {} ({}, {}): {}",
                        charge.offense, charge.grade, charge.statute, charge.disposition
                    );
                }
            }
        }
    }

    fn verdict_label(&self) -> String {
        match &self.value {
            Some(DecisionValue::Petitions(petitions)) => format!("{} petition(s)", petitions.len()),
            Some(DecisionValue::Sealability(Sealability::Sealable)) => "Sealable".to_string(),
            Some(DecisionValue::Sealability(Sealability::NotSealable)) => {
                "Not sealable".to_string()
            }
            Some(DecisionValue::CaseSealability(CaseSealability::AllChargesSealable)) => {
                "All charges sealable".to_string()
            }
            Some(DecisionValue::CaseSealability(CaseSealability::SomeChargesSealable)) => {
                "Some charges sealable".to_string()
            }
            Some(DecisionValue::CaseSealability(CaseSealability::NoChargesSealable)) => {
                "No charges sealable".to_string()
            }
            _ if self.is_satisfied() => "yes".to_string(),
            _ => "no".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_defaults_to_and_of_children() {
        let all_true = Decision::all_of(
            "both",
            vec![Decision::fact("a", true, "ok"), Decision::fact("b", true, "ok")],
        );
        assert!(all_true.is_satisfied());
        assert!(all_true.is_satisfied());

        let one_false = Decision::all_of(
            "both",
            vec![Decision::fact("a", true, "ok"), Decision::fact("b", false, "no")],
        );
        assert!(!one_false.is_satisfied());
        assert!(Decision::all_of("vacuous", Vec::new()).is_satisfied());
    }

    #[test]
    fn explicit_value_overrides_children() {
        let decision = Decision::all_of("override", vec![Decision::fact("a", false, "no")])
            .with_value(true);
        assert!(decision.is_satisfied());
    }

    #[test]
    fn tagged_values_have_defined_truthiness() {
        assert!(DecisionValue::Sealability(Sealability::Sealable).is_truthy());
        assert!(!DecisionValue::Sealability(Sealability::NotSealable).is_truthy());
        assert!(DecisionValue::CaseSealability(CaseSealability::SomeChargesSealable).is_truthy());
        assert!(!DecisionValue::CaseSealability(CaseSealability::NoChargesSealable).is_truthy());
        assert!(!DecisionValue::Petitions(Vec::new()).is_truthy());
    }

    #[test]
    fn push_converts_text_reasoning_to_children() {
        let mut decision = Decision::new("parent").with_reasoning(Reasoning::Text("note".into()));
        decision.push(Decision::fact("child", true, "ok"));
        assert_eq!(decision.children().len(), 1);
    }

    #[test]
    fn explain_renders_nested_tree() {
        let decision = Decision::all_of(
            "Is the record clean?",
            vec![Decision::fact("Is it old?", true, "It has been 12 years.")],
        );
        let text = decision.explain();
        assert!(text.contains("- Is the record clean? [yes]"));
        assert!(text.contains("  - Is it old? [yes]"));
        assert!(text.contains("It has been 12 years."));
    }
}
