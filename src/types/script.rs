//! Compiled dialogue graph
//!
//! Nodes live in a single arena owned by [`Script`]; edges are [`NodeId`]
//! indices into it, so the fix-up pass splices plain index lists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside a [`Script`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Branch condition of a choice node: `option` was answered with choice
/// number `threshold` (1-based), or is still unset when `threshold` is 0
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guard {
    pub option: String,
    pub threshold: u32,
}

impl Guard {
    pub fn new(option: impl Into<String>, threshold: u32) -> Self {
        Self {
            option: option.into(),
            threshold,
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.option, self.threshold)
    }
}

/// A single element of the dialogue graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Synthetic root; the engine starts here and never surfaces it
    Start,
    /// Scene change marker
    Scene { content: String },
    /// Named prompt presenting one label per choice
    Option { name: String, choices: Vec<String> },
    /// Termination of the enclosing sub-graph
    End,
    /// Conditional branch, one guard per child in order
    Choice { guards: Vec<Guard> },
    /// Spoken line
    Say { speaker: String, content: String },
    /// Inner thought
    Think { speaker: String, content: String },
    /// Comment branch waiting to be spliced out
    Dead,
    /// Successor allocated by the parser and never filled
    Empty,
}

impl Node {
    /// Whether the fix-up pass removes this node
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Node::Dead | Node::Empty)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Start => "start",
            Node::Scene { .. } => "scene",
            Node::Option { .. } => "option",
            Node::End => "end",
            Node::Choice { .. } => "choice",
            Node::Say { .. } => "person_say",
            Node::Think { .. } => "person_think",
            Node::Dead => "dead",
            Node::Empty => "empty",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind_name();
        match self {
            Node::Scene { content } => write!(f, "{kind} | | {content}"),
            Node::Option { name, choices } => write!(f, "{kind} | {name} | {}", choices.join("; ")),
            Node::Choice { guards } => {
                let guards: Vec<String> = guards.iter().map(Guard::to_string).collect();
                write!(f, "{kind} | | {}", guards.join("; "))
            }
            Node::Say { speaker, content } | Node::Think { speaker, content } => {
                write!(f, "{kind} | {speaker} | {content}")
            }
            Node::Start | Node::End | Node::Dead | Node::Empty => write!(f, "{kind} | |"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Slot {
    node: Node,
    /// 1-based source line, 0 for synthesized nodes
    line: usize,
    next: Vec<NodeId>,
}

/// Arena of nodes plus the root the engine starts from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    slots: Vec<Slot>,
    root: NodeId,
}

impl Script {
    /// Create an arena holding only the [`Node::Start`] root
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Slot {
                node: Node::Start,
                line: 0,
                next: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.slots[id.0].node
    }

    pub fn line(&self, id: NodeId) -> usize {
        self.slots[id.0].line
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.0].next
    }

    /// Number of arena slots, reachable or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.len() <= 1
    }

    /// All node ids in arena order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.slots.len()).map(NodeId)
    }

    /// Node ids reachable from the root, in depth-first preorder
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut seen = vec![false; self.slots.len()];
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            order.push(id);
            stack.extend(self.slots[id.0].next.iter().rev());
        }
        order
    }

    pub(crate) fn push(&mut self, node: Node, line: usize) -> NodeId {
        self.slots.push(Slot {
            node,
            line,
            next: Vec::new(),
        });
        NodeId(self.slots.len() - 1)
    }

    pub(crate) fn set(&mut self, id: NodeId, node: Node, line: usize) {
        let slot = &mut self.slots[id.0];
        slot.node = node;
        slot.line = line;
    }

    pub(crate) fn link(&mut self, from: NodeId, to: NodeId) {
        self.slots[from.0].next.push(to);
    }

    pub(crate) fn successors_mut(&mut self, id: NodeId) -> &mut Vec<NodeId> {
        &mut self.slots[id.0].next
    }
}

impl fmt::Display for Script {
    /// One reachable node per line: `#id (line n): kind | name | content -> [#a, #b]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.reachable() {
            let next: Vec<String> = self.successors(id).iter().map(NodeId::to_string).collect();
            writeln!(
                f,
                "{id} (line {}): {} -> [{}]",
                self.line(id),
                self.node(id),
                next.join(", ")
            )?;
        }
        Ok(())
    }
}
