//! Line decoding: tag identifiers, trailing content and statement kind

use super::ParseError;
use crate::types::script::Guard;
use std::collections::HashSet;

/// One decoded source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the original source
    pub number: usize,
    /// Identifiers enclosed in `<` `>` pairs, in order
    pub ids: Vec<&'a str>,
    /// Everything after the last `>`, trimmed
    pub content: &'a str,
}

/// What a line means to the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    Scene { content: &'a str },
    Option { name: &'a str },
    End,
    Choices,
    Dead,
    Terminator,
    /// Label-shaped line for an option registered so far; never emitted
    Label { option: &'a str },
    Think { speaker: &'a str, content: &'a str },
    Say { speaker: &'a str, content: &'a str },
}

/// Split a trimmed line into its tags and content
pub fn decode(number: usize, text: &str) -> Result<Line<'_>, ParseError> {
    let mut ids = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else { break };
        let id = after[..close].trim();
        if id.is_empty() {
            return Err(ParseError::EmptyTag { line: number });
        }
        ids.push(id);
        rest = &after[close + 1..];
    }

    if ids.is_empty() {
        return Err(ParseError::MissingTag {
            line: number,
            text: text.to_string(),
        });
    }
    if ids.len() > 2 {
        return Err(ParseError::TooManyTags {
            line: number,
            count: ids.len(),
        });
    }

    let content = text.rfind('>').map_or(text, |end| &text[end + 1..]).trim();
    Ok(Line {
        number,
        ids,
        content,
    })
}

impl<'a> Line<'a> {
    /// Whether this line is exactly `</>`
    pub fn is_terminator(&self) -> bool {
        self.ids == ["/"]
    }

    pub fn first(&self) -> &'a str {
        self.ids[0]
    }

    /// Interpret the line; `registered` holds the option names defined above it
    pub fn statement(&self, registered: &HashSet<&str>) -> Result<Statement<'a>, ParseError> {
        if let Some((option, _)) = self.label_parts(registered) {
            return Ok(Statement::Label { option });
        }
        let statement = match self.ids[..] {
            ["scene"] => Statement::Scene {
                content: self.content,
            },
            ["option"] if self.content.is_empty() => {
                return Err(ParseError::MissingOptionName { line: self.number });
            }
            ["option"] => Statement::Option { name: self.content },
            ["option", name] => Statement::Option { name },
            ["END"] => Statement::End,
            ["choices"] => Statement::Choices,
            ["//"] => Statement::Dead,
            ["/"] => Statement::Terminator,
            [speaker] => Statement::Say {
                speaker,
                content: self.content,
            },
            [speaker, _] => Statement::Think {
                speaker,
                content: self.content,
            },
            _ => {
                return Err(ParseError::TooManyTags {
                    line: self.number,
                    count: self.ids.len(),
                });
            }
        };
        Ok(statement)
    }

    /// Option name and raw threshold of a `<name,n>` or `<name><n>` line
    fn label_parts(&self, names: &HashSet<&str>) -> Option<(&'a str, &'a str)> {
        let (name, threshold) = match self.ids[..] {
            [name, threshold] => (name, threshold),
            [single] => {
                let (name, threshold) = single.split_once(',')?;
                (name.trim(), threshold.trim())
            }
            _ => return None,
        };
        (name != "option" && names.contains(name)).then_some((name, threshold))
    }

    /// Branch label for a declared option name; the threshold must be a number
    pub fn guard(&self, declared: &HashSet<&str>) -> Result<Option<Guard>, ParseError> {
        let Some((name, threshold)) = self.label_parts(declared) else {
            return Ok(None);
        };
        let threshold = threshold
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidThreshold {
                line: self.number,
                option: name.to_string(),
                value: threshold.to_string(),
            })?;
        Ok(Some(Guard::new(name, threshold)))
    }

    /// Like [`Line::guard`], but a non-numeric threshold means "not a label"
    pub fn branch(&self, declared: &HashSet<&str>) -> Option<Guard> {
        let (name, threshold) = self.label_parts(declared)?;
        let threshold = threshold.parse::<u32>().ok()?;
        Some(Guard::new(name, threshold))
    }
}
