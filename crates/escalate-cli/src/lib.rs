//! Escalate CLI - terminal front end for the escalation tracker
//!
//! - `classify`: show how a piece of issue text would be classified
//! - `import`: load a spreadsheet, print the board, optionally export
//! - `session`: line-oriented interactive session over stdin

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod logging;
pub mod render;
pub mod repl;

pub use cli::{build_cli, load_config, run, Options};
pub use render::Renderer;
pub use repl::{session_command, Flow, Repl, Reply};
