//! Terminal output
//!
//! Progress goes to stdout, one line per stage, closed by a marker; the
//! final failure message goes to stderr.

use std::fmt::Display;
use std::io::{self, Write};

use colored::*;

/// Pipeline stage, as shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ProjectInfo,
    Package,
    Upload,
    Build,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::ProjectInfo => "Getting project info",
            Stage::Package => "Packaging sources",
            Stage::Upload => "Uploading sources",
            Stage::Build => "Building",
        }
    }
}

pub fn stage_started(stage: Stage) {
    print!("{}... ", stage.label());
    io::stdout().flush().ok();
}

pub fn stage_done() {
    println!("{}", "✓".green());
}

pub fn stage_failed() {
    println!("{}", "✗".red());
}

/// Secondary line under a stage
pub fn detail(text: impl Display) {
    println!("  {}", text.to_string().dimmed());
}

/// Final error line
pub fn failure(err: impl Display) {
    eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
}
