//! Dialogue traversal engine
//!
//! An [`Engine`] walks a compiled [`Script`] one step at a time. It owns the
//! traversal position and the [`OptionMemory`] of a single playthrough; the
//! script itself is only borrowed, so any number of engines can share it.

use crate::types::{
    memory::OptionMemory,
    script::{Node, NodeId, Script},
    step::Step,
};


/// Errors returned while driving an [`Engine`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// `advance` was called while an option prompt is still open
    #[error("option '{option}' is waiting for a selection")]
    AwaitingSelection { option: String },
    #[error("choice {index} is out of range for option '{option}' with {count} choices")]
    ChoiceOutOfRange {
        option: String,
        index: usize,
        count: usize,
    },
    /// The graph led to a node that has no step form
    #[error("node at line {line} cannot be presented")]
    Unsurfaceable { line: usize },
}

/// Prompt opened by the last option step
#[derive(Debug, Clone, PartialEq, Eq)]
struct Prompt {
    option: String,
    count: usize,
}

/// Traversal state of one playthrough
#[derive(Debug, Clone)]
pub struct Engine<'s> {
    script: &'s Script,
    position: NodeId,
    memory: OptionMemory,
    prompt: Option<Prompt>,
}

impl<'s> Engine<'s> {
    /// Start a playthrough at the script root
    ///
    /// Every option reachable anywhere in the script is declared unset up
    /// front, so branches that test an option presented later still resolve.
    pub fn new(script: &'s Script) -> Self {
        let mut memory = OptionMemory::new();
        for id in script.reachable() {
            if let Node::Option { name, .. } = script.node(id) {
                memory.declare(name.as_str());
            }
        }
        log::debug!(
            target: "katari::flow",
            "engine started with {} declared options",
            memory.len()
        );

        Self {
            script,
            position: script.root(),
            memory,
            prompt: None,
        }
    }

    /// Move to the next node and return it as a step
    ///
    /// Returns `Ok(None)` once the dialogue has ended.
    pub fn advance(&mut self) -> Result<Option<Step>, EngineError> {
        if let Some(prompt) = &self.prompt {
            return Err(EngineError::AwaitingSelection {
                option: prompt.option.clone(),
            });
        }

        let Some(&next) = self.script.successors(self.position).first() else {
            log::debug!(target: "katari::flow", "dialogue ended at line {}", self.position_line());
            return Ok(None);
        };
        let Some(target) = self.resolve(next) else {
            return Ok(None);
        };

        let node = self.script.node(target);
        let step = Step::from_node(node).ok_or(EngineError::Unsurfaceable {
            line: self.script.line(target),
        })?;
        self.position = target;

        if let Node::Option { name, choices } = node {
            self.prompt = Some(Prompt {
                option: name.clone(),
                count: choices.len(),
            });
        }
        log::trace!(
            target: "katari::flow",
            "line {}: {}",
            self.script.line(target),
            node
        );
        Ok(Some(step))
    }

    /// Answer the open option prompt with a 0-based choice index
    ///
    /// Does nothing when no prompt is open.
    pub fn select(&mut self, index: usize) -> Result<(), EngineError> {
        let Some(prompt) = &self.prompt else {
            return Ok(());
        };
        if index >= prompt.count {
            return Err(EngineError::ChoiceOutOfRange {
                option: prompt.option.clone(),
                index,
                count: prompt.count,
            });
        }

        log::debug!(target: "katari::flow", "option '{}' answered with {}", prompt.option, index);
        self.memory.record(prompt.option.as_str(), index);
        self.prompt = None;
        Ok(())
    }

    /// Follow choice nodes starting at `id` until a presentable node
    ///
    /// `None` when a choice has no branches at all.
    fn resolve(&self, mut id: NodeId) -> Option<NodeId> {
        while let Node::Choice { guards } = self.script.node(id) {
            let branches = self.script.successors(id);
            let picked = guards
                .iter()
                .position(|guard| self.memory.matches(guard))
                .filter(|&index| index < branches.len());
            let index = match picked {
                Some(index) => index,
                None => branches.len().checked_sub(1)?,
            };
            log::debug!(
                target: "katari::flow",
                "choice at line {} takes branch {} of {}{}",
                self.script.line(id),
                index + 1,
                branches.len(),
                if picked.is_none() { " (fallback)" } else { "" }
            );
            id = branches[index];
        }
        Some(id)
    }

    pub fn memory(&self) -> &OptionMemory {
        &self.memory
    }

    /// Name of the option waiting for [`Engine::select`], if any
    pub fn awaiting_selection(&self) -> Option<&str> {
        self.prompt.as_ref().map(|prompt| prompt.option.as_str())
    }

    pub fn script(&self) -> &'s Script {
        self.script
    }

    /// Source line of the last surfaced node, 0 before the first step
    pub fn position_line(&self) -> usize {
        self.script.line(self.position)
    }
}
