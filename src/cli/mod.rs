//! Command handlers behind the `katari` binary
//!
//! Each handler takes the script source and returns the text to print, so
//! the binary only deals with arguments, files and exit codes.

pub mod check;
pub mod graph;
pub mod play;
