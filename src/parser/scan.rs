//! Lookahead over a `<choices>` block
//!
//! Finds where the block closes, counting nested `choices` and `option`
//! openings against `</>` terminators, and collects the branch labels that
//! sit directly inside it.

use super::ParseError;
use super::line::Line;
use crate::types::script::Guard;
use std::collections::HashSet;

/// One branch of a choices block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Index of the label line
    pub label: usize,
    pub guard: Guard,
}

/// Extent of a choices block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub branches: Vec<Branch>,
    /// Index of the closing `</>`
    pub close: usize,
}

impl Block {
    /// Index of the first line after the block, where its branches reconverge
    pub fn reconverge(&self) -> usize {
        self.close + 1
    }

    /// Line range holding the body of branch `index`, label line excluded
    pub fn body(&self, index: usize) -> std::ops::Range<usize> {
        let start = self.branches[index].label + 1;
        let end = self
            .branches
            .get(index + 1)
            .map_or(self.close, |next| next.label);
        start..end
    }
}

/// Scan the block whose first label sits at `start`
///
/// `opened_at` is the index of the `<choices>` line, used for errors. Only
/// the first label must be well formed; later depth-1 lines whose threshold
/// is not a number are branch content, not labels.
pub fn scan_block(
    lines: &[Line<'_>],
    opened_at: usize,
    start: usize,
    declared: &HashSet<&str>,
) -> Result<Block, ParseError> {
    let opening_line = lines[opened_at].number;
    let first = lines.get(start).ok_or(ParseError::UnterminatedChoices {
        line: opening_line,
    })?;
    let Some(guard) = first.guard(declared)? else {
        return Err(ParseError::ExpectedBranch {
            line: first.number,
            found: first.ids.join("><"),
        });
    };

    let mut branches = vec![Branch {
        label: start,
        guard,
    }];
    let mut depth = 1usize;
    for (index, line) in lines.iter().enumerate().skip(start + 1) {
        match line.first() {
            "choices" | "option" => depth += 1,
            "/" if line.is_terminator() => {
                depth -= 1;
                if depth == 0 {
                    log::trace!(
                        target: "katari::parser",
                        "choices block at line {} closes at line {} with {} branches",
                        opening_line,
                        line.number,
                        branches.len()
                    );
                    return Ok(Block {
                        branches,
                        close: index,
                    });
                }
            }
            _ if depth == 1 => {
                if let Some(guard) = line.branch(declared) {
                    branches.push(Branch {
                        label: index,
                        guard,
                    });
                }
            }
            _ => {}
        }
    }

    Err(ParseError::UnterminatedChoices { line: opening_line })
}
