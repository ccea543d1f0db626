//! Non-interactive player
//!
//! Walks a script from start to end, answering every option prompt from a
//! list of pre-chosen indices.

use crate::{
    parser,
    runtime::{Engine, EngineError},
    types::{memory::OptionMemory, script::Script, step::Step},
};
use anyhow::Context;
use serde::Serialize;

/// How a playthrough is driven and printed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayOptions {
    /// Answers for successive prompts; prompts beyond the list take 0
    pub selections: Vec<usize>,
    /// Print a JSON dump instead of one line per step
    pub json: bool,
}

/// Steps surfaced by one playthrough and the memory it ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub steps: Vec<Step>,
    pub final_memory: OptionMemory,
}

#[derive(Serialize)]
struct StepDump<'a> {
    step_number: usize,
    #[serde(flatten)]
    step: &'a Step,
}

#[derive(Serialize)]
struct PlayDump<'a> {
    input_hash: String,
    steps: Vec<StepDump<'a>>,
    final_memory: &'a OptionMemory,
}

/// Play `script` to the end, answering prompts from `selections`
pub fn trace(script: &Script, selections: &[usize]) -> Result<Trace, EngineError> {
    let mut engine = Engine::new(script);
    let mut answers = selections.iter().copied();
    let mut steps = Vec::new();

    while let Some(step) = engine.advance()? {
        if step.is_option() {
            engine.select(answers.next().unwrap_or(0))?;
        }
        steps.push(step);
    }

    Ok(Trace {
        steps,
        final_memory: engine.memory().clone(),
    })
}

/// Compile and play `source`, returning the rendered output
pub fn run_play(source: &str, options: &PlayOptions) -> anyhow::Result<String> {
    let script = parser::compile_str(source).context("Failed to compile script")?;
    let trace = trace(&script, &options.selections).context("Playthrough failed")?;

    if options.json {
        let dump = PlayDump {
            // Hash of the input for deterministic comparison
            input_hash: format!("{:x}", md5::compute(source.as_bytes())),
            steps: trace
                .steps
                .iter()
                .enumerate()
                .map(|(step_number, step)| StepDump { step_number, step })
                .collect(),
            final_memory: &trace.final_memory,
        };
        return serde_json::to_string_pretty(&dump).context("Failed to serialize playthrough");
    }

    let mut output = String::new();
    for step in &trace.steps {
        output.push_str(&step.to_string());
        output.push('\n');
    }
    Ok(output)
}

/// Parse a `--select` list such as `0,1,1`
pub fn parse_selections(value: &str) -> anyhow::Result<Vec<usize>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<usize>()
                .with_context(|| format!("Invalid selection '{}'", item))
        })
        .collect()
}
