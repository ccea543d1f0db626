//! Core types for the katari library
//!
//! - Script: arena graph of compiled dialogue nodes
//! - Step: what the engine hands to the presentation layer
//! - OptionMemory: selections made during one playthrough

pub mod memory;
pub mod script;
pub mod step;

pub use memory::OptionMemory;
pub use script::{Guard, Node, NodeId, Script};
pub use step::{Step, StepKind};
