//! Presentation-facing output of the engine

use crate::types::script::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a surfaced step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Scene,
    Option,
    End,
    PersonSay,
    PersonThink,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Scene => "scene",
            StepKind::Option => "option",
            StepKind::End => "end",
            StepKind::PersonSay => "person_say",
            StepKind::PersonThink => "person_think",
        };
        f.write_str(name)
    }
}

/// A single node as the presentation layer sees it
///
/// `choices` is only populated for [`StepKind::Option`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub name: String,
    pub content: String,
    pub choices: Vec<String>,
}

impl Step {
    fn new(kind: StepKind, name: &str, content: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            content: content.to_string(),
            choices: Vec::new(),
        }
    }

    /// Convert a surfaceable node; `None` for start, choice and placeholders
    pub fn from_node(node: &Node) -> Option<Self> {
        let step = match node {
            Node::Scene { content } => Self::new(StepKind::Scene, "", content),
            Node::Option { name, choices } => Self {
                kind: StepKind::Option,
                name: name.clone(),
                content: choices.join("; "),
                choices: choices.clone(),
            },
            Node::End => Self::new(StepKind::End, "", ""),
            Node::Say { speaker, content } => Self::new(StepKind::PersonSay, speaker, content),
            Node::Think { speaker, content } => Self::new(StepKind::PersonThink, speaker, content),
            Node::Start | Node::Choice { .. } | Node::Dead | Node::Empty => return None,
        };
        Some(step)
    }

    pub fn is_option(&self) -> bool {
        self.kind == StepKind::Option
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type: {} | name: {} | content: {} | choices: {}",
            self.kind,
            self.name,
            self.content,
            self.choices.join(" ; ")
        )
    }
}
