//! # katari
//!
//! A Rust library that compiles tag-based dialogue scripts into a branching
//! node graph and walks it one step at a time, remembering the player's
//! answers so that later choice blocks can branch on them.
//!
//! ## Quick Start
//!
//! ```rust
//! use katari::{Engine, StepKind, compile_str};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let script = compile_str(
//!     r#"
//! <scene>Crossroads
//! <option>pick
//! <go_left>Go left
//! <go_right>Go right
//! </>
//! <choices>
//! <pick,1>
//! <Guide>You went left.
//! <END>
//! <pick,2>
//! <Guide>You went right.
//! <END>
//! </>
//! "#,
//! )?;
//!
//! let mut engine = Engine::new(&script);
//! while let Some(step) = engine.advance()? {
//!     println!("{}", step);
//!     if step.kind == StepKind::Option {
//!         // Present step.choices to the player, then answer
//!         engine.select(1)?;
//!     }
//! }
//! assert_eq!(engine.memory().get("pick"), Some(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Script format
//!
//! Every line starts with one or two `<tag>`s followed by optional content:
//!
//! - `<scene>` opens a scene
//! - `<Speaker>` / `<Speaker><think>` speaks or thinks a line
//! - `<option>name` followed by one line per choice and `</>` presents a prompt
//! - `<choices>` followed by `<name,n>` labelled branches and `</>` branches
//!   on an earlier answer (`n` is the 1-based choice, `0` means unanswered)
//! - `<END>` ends the current branch, `<//>` lets it continue after the block

pub mod cli;
pub mod debug;
pub mod lint;
pub mod parser;
pub mod runtime;
pub mod types;

pub use lint::{LintResult, lint, lint_with_config};
pub use parser::{ParseError, compile, compile_str};
pub use runtime::{Engine, EngineError};
pub use types::{Guard, Node, NodeId, OptionMemory, Script, Step, StepKind};
