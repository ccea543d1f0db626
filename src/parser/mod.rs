//! Dialogue script parser
//!
//! Turns tag-based script lines into a [`Script`] graph. Lines are decoded up
//! front, option names are declared in a first pass so that branch labels can
//! refer to options defined further down, and the graph is then built by a
//! recursive scope parser. Placeholders left behind by comment branches are
//! spliced out by [`fixup`] before the script is returned.

pub mod fixup;
pub mod line;
pub mod scan;

#[cfg(test)]
mod tests;

use crate::types::script::{Node, NodeId, Script};
use line::{Line, Statement};
use std::collections::HashSet;

/// Errors raised while compiling a script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("script is empty")]
    Empty,
    #[error("line {line} has no tag: {text}")]
    MissingTag { line: usize, text: String },
    #[error("empty tag at line {line}")]
    EmptyTag { line: usize },
    #[error("line {line} carries {count} tags, at most 2 are allowed")]
    TooManyTags { line: usize, count: usize },
    #[error("option at line {line} has no name")]
    MissingOptionName { line: usize },
    #[error("option '{name}' opened at line {line} is never closed with </>")]
    UnterminatedOption { name: String, line: usize },
    #[error("option '{name}' at line {line} has no choices")]
    EmptyOption { name: String, line: usize },
    #[error("choices block opened at line {line} is never closed with </>")]
    UnterminatedChoices { line: usize },
    #[error("expected a branch label at line {line}, found <{found}>")]
    ExpectedBranch { line: usize, found: String },
    #[error("invalid threshold '{value}' for option '{option}' at line {line}")]
    InvalidThreshold {
        line: usize,
        option: String,
        value: String,
    },
}

/// Compile already trimmed, non-empty lines into a script
///
/// Lines are numbered from 1 in the order given.
pub fn compile<S: AsRef<str>>(lines: &[S]) -> Result<Script, ParseError> {
    let decoded = lines
        .iter()
        .enumerate()
        .map(|(index, text)| line::decode(index + 1, text.as_ref().trim()))
        .collect::<Result<Vec<_>, _>>()?;
    build(decoded)
}

/// Compile raw script text, skipping blank lines
///
/// Errors report the line numbers of the original text.
pub fn compile_str(source: &str) -> Result<Script, ParseError> {
    let decoded = source
        .lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty())
        .map(|(number, text)| line::decode(number, text))
        .collect::<Result<Vec<_>, _>>()?;
    build(decoded)
}

fn build(lines: Vec<Line<'_>>) -> Result<Script, ParseError> {
    if lines.is_empty() {
        return Err(ParseError::Empty);
    }

    let declared = declare_options(&lines)?;
    let mut parser = Parser {
        lines,
        cursor: 0,
        declared,
        registered: HashSet::new(),
        script: Script::new(),
    };
    parser.parse_root()?;

    let mut script = parser.script;
    fixup::fix_up(&mut script);
    log::debug!(
        target: "katari::parser",
        "compiled {} nodes, {} reachable",
        script.len(),
        script.reachable().len()
    );
    Ok(script)
}

/// Forward pass collecting every option name in the script
///
/// Labels may name an option defined further down; ordinary lines are
/// classified against the options registered above them instead.
fn declare_options<'a>(lines: &[Line<'a>]) -> Result<HashSet<&'a str>, ParseError> {
    let none = HashSet::new();
    let mut declared = HashSet::new();
    for line in lines.iter().filter(|line| line.first() == "option") {
        if let Statement::Option { name } = line.statement(&none)? {
            declared.insert(name);
        }
    }
    Ok(declared)
}

/// Where a sub-graph is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Root,
    Branch,
}

/// Result of parsing one sub-graph
struct ScopeExit {
    head: NodeId,
    /// Dead tails that continue wherever the enclosing block reconverges
    loose: Vec<NodeId>,
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    cursor: usize,
    /// Every option name in the script, for branch labels
    declared: HashSet<&'a str>,
    /// Option names defined so far, for line classification
    registered: HashSet<&'a str>,
    script: Script,
}

impl<'a> Parser<'a> {
    fn parse_root(&mut self) -> Result<(), ParseError> {
        let end = self.lines.len();
        let exit = self.parse_scope(end, Scope::Root)?;
        let root = self.script.root();
        self.script.link(root, exit.head);

        if self.cursor < end {
            log::warn!(
                target: "katari::parser",
                "ignoring {} lines after the dialogue ends at line {}",
                end - self.cursor,
                self.lines[self.cursor - 1].number
            );
        }

        // Loose ends with nowhere to reconverge terminate the dialogue
        if !exit.loose.is_empty() {
            let end_node = self.script.push(Node::End, 0);
            for loose in exit.loose {
                self.script.link(loose, end_node);
            }
        }
        Ok(())
    }

    /// Parse lines up to `end`, or until `<END>` / `<//>` closes the scope
    fn parse_scope(&mut self, end: usize, scope: Scope) -> Result<ScopeExit, ParseError> {
        let head = self.script.push(Node::Empty, 0);
        let mut current = head;
        // Loose ends of the previous choices block, waiting for the next node
        let mut pending: Vec<NodeId> = Vec::new();

        while self.cursor < end {
            let line = self.lines[self.cursor].clone();
            let node = match line.statement(&self.registered)? {
                Statement::Terminator | Statement::Label { .. } => {
                    self.cursor += 1;
                    continue;
                }
                Statement::Scene { content } => Node::Scene {
                    content: content.to_string(),
                },
                Statement::Option { name } => {
                    self.registered.insert(name);
                    Node::Option {
                        name: name.to_string(),
                        choices: self.option_block(name)?,
                    }
                }
                Statement::Say { speaker, content } => Node::Say {
                    speaker: speaker.to_string(),
                    content: content.to_string(),
                },
                Statement::Think { speaker, content } => Node::Think {
                    speaker: speaker.to_string(),
                    content: content.to_string(),
                },
                Statement::End => {
                    self.emit(current, Node::End, line.number, &mut pending);
                    self.cursor += 1;
                    return Ok(ScopeExit {
                        head,
                        loose: Vec::new(),
                    });
                }
                Statement::Dead => {
                    self.emit(current, Node::Dead, line.number, &mut pending);
                    self.cursor += 1;
                    return Ok(ScopeExit {
                        head,
                        loose: vec![current],
                    });
                }
                Statement::Choices => {
                    pending = self.choices_block(current, &mut pending)?;
                    current = self.script.push(Node::Empty, 0);
                    continue;
                }
            };

            self.emit(current, node, line.number, &mut pending);
            let next = self.script.push(Node::Empty, 0);
            self.script.link(current, next);
            current = next;
            self.cursor += 1;
        }

        // Out of lines: a branch falls through to its block's reconvergence
        // point, and so does the root when a block is still waiting
        if scope == Scope::Branch || !pending.is_empty() {
            let number = self.lines[end.saturating_sub(1)].number;
            self.emit(current, Node::Dead, number, &mut pending);
            return Ok(ScopeExit {
                head,
                loose: vec![current],
            });
        }
        Ok(ScopeExit {
            head,
            loose: Vec::new(),
        })
    }

    /// Fill the placeholder `at` and connect waiting loose ends to it
    fn emit(&mut self, at: NodeId, node: Node, number: usize, pending: &mut Vec<NodeId>) {
        self.script.set(at, node, number);
        for loose in pending.drain(..) {
            self.script.link(loose, at);
        }
    }

    /// Collect the labels of an option block; leaves the cursor on its `</>`
    fn option_block(&mut self, name: &str) -> Result<Vec<String>, ParseError> {
        let opened = self.lines[self.cursor].number;
        let mut choices = Vec::new();
        loop {
            self.cursor += 1;
            let Some(line) = self.lines.get(self.cursor) else {
                return Err(ParseError::UnterminatedOption {
                    name: name.to_string(),
                    line: opened,
                });
            };
            if line.is_terminator() {
                break;
            }
            let label = if line.content.is_empty() {
                line.first()
            } else {
                line.content
            };
            choices.push(label.to_string());
        }

        if choices.is_empty() {
            return Err(ParseError::EmptyOption {
                name: name.to_string(),
                line: opened,
            });
        }
        Ok(choices)
    }

    /// Build the choice node at `at` and one sub-graph per branch
    ///
    /// Returns the loose ends of all branches; the cursor is left on the line
    /// after the block.
    fn choices_block(
        &mut self,
        at: NodeId,
        pending: &mut Vec<NodeId>,
    ) -> Result<Vec<NodeId>, ParseError> {
        let opened_at = self.cursor;
        let number = self.lines[opened_at].number;
        let block = scan::scan_block(&self.lines, opened_at, opened_at + 1, &self.declared)?;

        let guards = block.branches.iter().map(|b| b.guard.clone()).collect();
        self.emit(at, Node::Choice { guards }, number, pending);

        let mut loose = Vec::new();
        for index in 0..block.branches.len() {
            let body = block.body(index);
            self.cursor = body.start;
            let exit = self.parse_scope(body.end, Scope::Branch)?;
            if self.cursor < body.end {
                log::debug!(
                    target: "katari::parser",
                    "branch {} of block at line {} stops early at line {}",
                    block.branches[index].guard,
                    number,
                    self.lines[self.cursor - 1].number
                );
            }
            self.script.link(at, exit.head);
            loose.extend(exit.loose);
        }

        self.cursor = block.reconverge();
        Ok(loose)
    }
}
