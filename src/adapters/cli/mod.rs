//! CLI Adapter
//!
//! Command-line interface for the curvepad simulator.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{BoardCmd, CliApp, Command, CurveCmd, IdeaCmd, LaunchCmd, RunCmd, TradeCmd};

/// Parse the CLI application from process arguments
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
